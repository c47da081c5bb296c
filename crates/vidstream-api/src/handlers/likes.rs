//! Like handlers
//!
//! Toggle endpoints per target kind, plus the caller's liked-video
//! listing.

use axum::extract::State;

use vidstream_core::entities::ReactionTargetKind;
use vidstream_service::{LikeService, PageResponse, ToggleResponse, VideoListingResponse};

use crate::extractors::{AuthUser, IdPath, Pagination, SnowflakePath};
use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

/// Toggle a like on a video
///
/// POST /api/v1/likes/toggle/video/{id}
pub async fn toggle_video_like(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<IdPath>,
) -> ApiResult<ApiJson<ToggleResponse>> {
    toggle(state, auth, &path, ReactionTargetKind::Video).await
}

/// Toggle a like on a comment
///
/// POST /api/v1/likes/toggle/comment/{id}
pub async fn toggle_comment_like(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<IdPath>,
) -> ApiResult<ApiJson<ToggleResponse>> {
    toggle(state, auth, &path, ReactionTargetKind::Comment).await
}

/// Toggle a like on a tweet
///
/// POST /api/v1/likes/toggle/tweet/{id}
pub async fn toggle_tweet_like(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<IdPath>,
) -> ApiResult<ApiJson<ToggleResponse>> {
    toggle(state, auth, &path, ReactionTargetKind::Tweet).await
}

/// List the caller's liked videos, most recent like first
///
/// GET /api/v1/likes/videos
pub async fn liked_videos(
    State(state): State<AppState>,
    auth: AuthUser,
    Pagination(page): Pagination,
) -> ApiResult<ApiJson<PageResponse<VideoListingResponse>>> {
    let service = LikeService::new(state.service_context());
    let response = service.liked_videos(auth.user_id, page).await?;
    Ok(ApiJson(response))
}

async fn toggle(
    state: AppState,
    auth: AuthUser,
    path: &IdPath,
    target_kind: ReactionTargetKind,
) -> ApiResult<ApiJson<ToggleResponse>> {
    let target_id = path.id()?;

    let service = LikeService::new(state.service_context());
    let response = service.toggle(auth.user_id, target_kind, target_id).await?;
    Ok(ApiJson(response))
}
