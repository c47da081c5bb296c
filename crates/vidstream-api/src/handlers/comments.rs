//! Comment handlers
//!
//! Comments always hang off a video; listing and creation go through
//! the video-scoped routes, edits and deletes address the comment
//! directly.

use axum::extract::State;

use vidstream_service::{
    CommentListingResponse, CommentResponse, CommentService, CreateCommentRequest, PageResponse,
    UpdateCommentRequest,
};

use crate::extractors::{
    AuthUser, IdPath, OptionalAuthUser, Pagination, SnowflakePath, ValidatedJson, VideoIdPath,
};
use crate::response::{ApiJson, ApiResult, Created};
use crate::state::AppState;

/// List a video's comments with author summaries
///
/// GET /api/v1/comments/video/{video_id}
pub async fn list_video_comments(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    SnowflakePath(path): SnowflakePath<VideoIdPath>,
    Pagination(page): Pagination,
) -> ApiResult<ApiJson<PageResponse<CommentListingResponse>>> {
    let video_id = path.video_id()?;

    let service = CommentService::new(state.service_context());
    let response = service
        .list_by_video(video_id, viewer.user_id(), page)
        .await?;
    Ok(ApiJson(response))
}

/// Comment on a video
///
/// POST /api/v1/comments/video/{video_id}
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<VideoIdPath>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<CommentResponse>> {
    let video_id = path.video_id()?;

    let service = CommentService::new(state.service_context());
    let response = service.create(auth.user_id, video_id, request).await?;
    Ok(Created(response))
}

/// Edit a comment
///
/// PATCH /api/v1/comments/{id}
pub async fn update_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<IdPath>,
    ValidatedJson(request): ValidatedJson<UpdateCommentRequest>,
) -> ApiResult<ApiJson<CommentResponse>> {
    let comment_id = path.id()?;

    let service = CommentService::new(state.service_context());
    let response = service.update(comment_id, auth.user_id, request).await?;
    Ok(ApiJson(response))
}

/// Delete a comment and its likes
///
/// DELETE /api/v1/comments/{id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<IdPath>,
) -> ApiResult<ApiJson<()>> {
    let comment_id = path.id()?;

    let service = CommentService::new(state.service_context());
    service.delete(comment_id, auth.user_id).await?;
    Ok(ApiJson(()))
}
