//! User and authentication handlers
//!
//! Registration, login, token lifecycle and profile management.
//! Registration and the avatar/cover endpoints accept multipart bodies
//! because they carry image uploads.

use axum::extract::State;

use vidstream_service::{
    AuthResponse, AuthService, ChangePasswordRequest, ChannelProfileResponse,
    CurrentUserResponse, LoginRequest, PageResponse, RefreshTokenRequest, RegisterRequest,
    TokenPairResponse, UpdateProfileRequest, UserService, WatchedVideoResponse,
};

use crate::extractors::{
    AuthUser, MultipartForm, OptionalAuthUser, Pagination, SnowflakePath, UsernamePath,
    ValidatedJson,
};
use crate::response::{ApiJson, ApiResult, Created};
use crate::state::AppState;

/// Register a new account
///
/// POST /api/v1/users/register
pub async fn register(
    State(state): State<AppState>,
    mut form: MultipartForm,
) -> ApiResult<Created<AuthResponse>> {
    let request = RegisterRequest {
        username: form.require_text("username")?,
        email: form.require_text("email")?,
        password: form.require_text("password")?,
        full_name: form.require_text("full_name")?,
        avatar: form.take_file("avatar"),
        cover_image: form.take_file("cover_image"),
    };

    let service = AuthService::new(state.service_context());
    let response = service.register(request).await?;
    Ok(Created(response))
}

/// Log in with username or email
///
/// POST /api/v1/users/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<ApiJson<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(ApiJson(response))
}

/// Revoke the caller's refresh token
///
/// POST /api/v1/users/logout
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> ApiResult<ApiJson<()>> {
    let service = AuthService::new(state.service_context());
    service.logout(auth.user_id).await?;
    Ok(ApiJson(()))
}

/// Exchange a refresh token for a new token pair
///
/// POST /api/v1/users/refresh-token
pub async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RefreshTokenRequest>,
) -> ApiResult<ApiJson<TokenPairResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.refresh_tokens(request).await?;
    Ok(ApiJson(response))
}

/// Change the caller's password
///
/// POST /api/v1/users/change-password
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<ApiJson<()>> {
    let service = AuthService::new(state.service_context());
    service.change_password(auth.user_id, request).await?;
    Ok(ApiJson(()))
}

/// Get the caller's profile
///
/// GET /api/v1/users/me
pub async fn current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<ApiJson<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.current_user(auth.user_id).await?;
    Ok(ApiJson(response))
}

/// Update the caller's full name and/or email
///
/// PATCH /api/v1/users/me
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<ApiJson<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.update_profile(auth.user_id, request).await?;
    Ok(ApiJson(response))
}

/// Replace the caller's avatar image
///
/// PATCH /api/v1/users/me/avatar
pub async fn update_avatar(
    State(state): State<AppState>,
    auth: AuthUser,
    mut form: MultipartForm,
) -> ApiResult<ApiJson<CurrentUserResponse>> {
    let upload = form.require_file("avatar")?;

    let service = UserService::new(state.service_context());
    let response = service.update_avatar(auth.user_id, upload).await?;
    Ok(ApiJson(response))
}

/// Replace the caller's cover image
///
/// PATCH /api/v1/users/me/cover
pub async fn update_cover_image(
    State(state): State<AppState>,
    auth: AuthUser,
    mut form: MultipartForm,
) -> ApiResult<ApiJson<CurrentUserResponse>> {
    let upload = form.require_file("cover_image")?;

    let service = UserService::new(state.service_context());
    let response = service.update_cover_image(auth.user_id, upload).await?;
    Ok(ApiJson(response))
}

/// Public channel profile with subscriber counts
///
/// GET /api/v1/users/channel/{username}
pub async fn channel_profile(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    SnowflakePath(path): SnowflakePath<UsernamePath>,
) -> ApiResult<ApiJson<ChannelProfileResponse>> {
    let service = UserService::new(state.service_context());
    let response = service
        .channel_profile(&path.username, viewer.user_id())
        .await?;
    Ok(ApiJson(response))
}

/// The caller's watch history, most recent first
///
/// GET /api/v1/users/me/watch-history
pub async fn watch_history(
    State(state): State<AppState>,
    auth: AuthUser,
    Pagination(page): Pagination,
) -> ApiResult<ApiJson<PageResponse<WatchedVideoResponse>>> {
    let service = UserService::new(state.service_context());
    let response = service.watch_history(auth.user_id, page).await?;
    Ok(ApiJson(response))
}
