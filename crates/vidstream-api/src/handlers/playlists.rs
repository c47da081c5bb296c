//! Playlist handlers
//!
//! Playlist CRUD plus video membership. Membership changes are
//! idempotent and report whether anything actually changed.

use axum::extract::State;

use vidstream_service::{
    CreatePlaylistRequest, PageResponse, PlaylistDetailResponse, PlaylistMembershipResponse,
    PlaylistResponse, PlaylistService, UpdatePlaylistRequest,
};

use crate::extractors::{
    AuthUser, IdPath, Pagination, PlaylistVideoPath, SnowflakePath, UserIdPath, ValidatedJson,
};
use crate::response::{ApiJson, ApiResult, Created};
use crate::state::AppState;

/// Create a playlist
///
/// POST /api/v1/playlists
pub async fn create_playlist(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreatePlaylistRequest>,
) -> ApiResult<Created<PlaylistResponse>> {
    let service = PlaylistService::new(state.service_context());
    let response = service.create(auth.user_id, request).await?;
    Ok(Created(response))
}

/// List a user's playlists
///
/// GET /api/v1/playlists/user/{user_id}
pub async fn list_user_playlists(
    State(state): State<AppState>,
    SnowflakePath(path): SnowflakePath<UserIdPath>,
    Pagination(page): Pagination,
) -> ApiResult<ApiJson<PageResponse<PlaylistResponse>>> {
    let user_id = path.user_id()?;

    let service = PlaylistService::new(state.service_context());
    let response = service.list_by_owner(user_id, page).await?;
    Ok(ApiJson(response))
}

/// Fetch a playlist with a page of its videos
///
/// GET /api/v1/playlists/{id}
pub async fn get_playlist(
    State(state): State<AppState>,
    SnowflakePath(path): SnowflakePath<IdPath>,
    Pagination(page): Pagination,
) -> ApiResult<ApiJson<PlaylistDetailResponse>> {
    let playlist_id = path.id()?;

    let service = PlaylistService::new(state.service_context());
    let response = service.get(playlist_id, page).await?;
    Ok(ApiJson(response))
}

/// Rename a playlist or edit its description
///
/// PATCH /api/v1/playlists/{id}
pub async fn update_playlist(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<IdPath>,
    ValidatedJson(request): ValidatedJson<UpdatePlaylistRequest>,
) -> ApiResult<ApiJson<PlaylistResponse>> {
    let playlist_id = path.id()?;

    let service = PlaylistService::new(state.service_context());
    let response = service.update(playlist_id, auth.user_id, request).await?;
    Ok(ApiJson(response))
}

/// Delete a playlist, leaving its videos intact
///
/// DELETE /api/v1/playlists/{id}
pub async fn delete_playlist(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<IdPath>,
) -> ApiResult<ApiJson<()>> {
    let playlist_id = path.id()?;

    let service = PlaylistService::new(state.service_context());
    service.delete(playlist_id, auth.user_id).await?;
    Ok(ApiJson(()))
}

/// Add a video to a playlist
///
/// POST /api/v1/playlists/{id}/videos/{video_id}
pub async fn add_video(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<PlaylistVideoPath>,
) -> ApiResult<ApiJson<PlaylistMembershipResponse>> {
    let playlist_id = path.playlist_id()?;
    let video_id = path.video_id()?;

    let service = PlaylistService::new(state.service_context());
    let response = service.add_video(playlist_id, video_id, auth.user_id).await?;
    Ok(ApiJson(response))
}

/// Remove a video from a playlist
///
/// DELETE /api/v1/playlists/{id}/videos/{video_id}
pub async fn remove_video(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<PlaylistVideoPath>,
) -> ApiResult<ApiJson<PlaylistMembershipResponse>> {
    let playlist_id = path.playlist_id()?;
    let video_id = path.video_id()?;

    let service = PlaylistService::new(state.service_context());
    let response = service
        .remove_video(playlist_id, video_id, auth.user_id)
        .await?;
    Ok(ApiJson(response))
}
