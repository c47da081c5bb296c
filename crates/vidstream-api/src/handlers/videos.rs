//! Video handlers
//!
//! Publishing is a multipart upload carrying the video file and a
//! thumbnail. Listing supports free-text search, owner filtering and
//! sort controls via query parameters.

use axum::extract::{Query, State};
use serde::Deserialize;

use vidstream_core::query::SortDirection;
use vidstream_core::value_objects::Snowflake;
use vidstream_service::{
    ListVideosRequest, PageResponse, PublishVideoRequest, UpdateVideoRequest, VideoListingResponse,
    VideoResponse, VideoService,
};

use crate::extractors::{AuthUser, IdPath, MultipartForm, OptionalAuthUser, Pagination, SnowflakePath};
use crate::response::{ApiError, ApiJson, ApiResult, Created};
use crate::state::AppState;

/// Query parameters accepted by the video listing
#[derive(Debug, Default, Deserialize)]
pub struct VideoListQuery {
    pub query: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    #[serde(rename = "sortType")]
    pub sort_type: Option<String>,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

impl VideoListQuery {
    fn into_request(self) -> Result<ListVideosRequest, ApiError> {
        let owner_id = self
            .user_id
            .map(|raw| {
                Snowflake::parse(&raw)
                    .map_err(|_| ApiError::invalid_query("Invalid userId format"))
            })
            .transpose()?;

        Ok(ListVideosRequest {
            search: self.query,
            owner_id,
            sort_key: self.sort_by,
            sort_direction: self
                .sort_type
                .as_deref()
                .map(SortDirection::parse)
                .unwrap_or_default(),
        })
    }
}

/// List published videos
///
/// GET /api/v1/videos
pub async fn list_videos(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Pagination(page): Pagination,
    Query(params): Query<VideoListQuery>,
) -> ApiResult<ApiJson<PageResponse<VideoListingResponse>>> {
    let request = params.into_request()?;

    let service = VideoService::new(state.service_context());
    let response = service.list(viewer.user_id(), request, page).await?;
    Ok(ApiJson(response))
}

/// Upload and publish a new video
///
/// POST /api/v1/videos
pub async fn publish_video(
    State(state): State<AppState>,
    auth: AuthUser,
    mut form: MultipartForm,
) -> ApiResult<Created<VideoResponse>> {
    let request = PublishVideoRequest {
        title: form.require_text("title")?,
        description: form.text("description").unwrap_or_default(),
        video: form.require_file("video")?,
        thumbnail: form.require_file("thumbnail")?,
    };

    let service = VideoService::new(state.service_context());
    let response = service.publish(auth.user_id, request).await?;
    Ok(Created(response))
}

/// Fetch a video, counting the view
///
/// GET /api/v1/videos/{id}
pub async fn get_video(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    SnowflakePath(path): SnowflakePath<IdPath>,
) -> ApiResult<ApiJson<VideoResponse>> {
    let video_id = path.id()?;

    let service = VideoService::new(state.service_context());
    let response = service.get(video_id, viewer.user_id()).await?;
    Ok(ApiJson(response))
}

/// Update a video's title, description and/or thumbnail
///
/// PATCH /api/v1/videos/{id}
pub async fn update_video(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<IdPath>,
    mut form: MultipartForm,
) -> ApiResult<ApiJson<VideoResponse>> {
    let video_id = path.id()?;

    let request = UpdateVideoRequest {
        title: form.text("title"),
        description: form.text("description"),
        thumbnail: form.take_file("thumbnail"),
    };

    let service = VideoService::new(state.service_context());
    let response = service.update(video_id, auth.user_id, request).await?;
    Ok(ApiJson(response))
}

/// Delete a video and its comments, likes and media
///
/// DELETE /api/v1/videos/{id}
pub async fn delete_video(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<IdPath>,
) -> ApiResult<ApiJson<()>> {
    let video_id = path.id()?;

    let service = VideoService::new(state.service_context());
    service.delete(video_id, auth.user_id).await?;
    Ok(ApiJson(()))
}

/// Flip a video between draft and published
///
/// PATCH /api/v1/videos/{id}/toggle-publish
pub async fn toggle_publish(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<IdPath>,
) -> ApiResult<ApiJson<VideoResponse>> {
    let video_id = path.id()?;

    let service = VideoService::new(state.service_context());
    let response = service.toggle_publish(video_id, auth.user_id).await?;
    Ok(ApiJson(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_parses_user_id() {
        let params = VideoListQuery {
            user_id: Some("42".to_string()),
            ..VideoListQuery::default()
        };
        let request = params.into_request().unwrap();
        assert_eq!(request.owner_id, Some(Snowflake::new(42)));
    }

    #[test]
    fn test_list_query_rejects_bad_user_id() {
        let params = VideoListQuery {
            user_id: Some("abc".to_string()),
            ..VideoListQuery::default()
        };
        assert!(params.into_request().is_err());
    }

    #[test]
    fn test_sort_type_defaults_to_descending() {
        let request = VideoListQuery::default().into_request().unwrap();
        assert_eq!(request.sort_direction, SortDirection::Desc);
    }

    #[test]
    fn test_sort_type_ascending() {
        let params = VideoListQuery {
            sort_type: Some("asc".to_string()),
            ..VideoListQuery::default()
        };
        let request = params.into_request().unwrap();
        assert_eq!(request.sort_direction, SortDirection::Asc);
    }
}
