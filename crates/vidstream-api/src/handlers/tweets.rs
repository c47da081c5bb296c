//! Tweet handlers
//!
//! Short text posts. Content length is enforced in characters, not
//! bytes, by the service layer.

use axum::extract::State;

use vidstream_service::{
    CreateTweetRequest, PageResponse, TweetResponse, TweetService, UpdateTweetRequest,
};

use crate::extractors::{AuthUser, IdPath, Pagination, SnowflakePath, UserIdPath, ValidatedJson};
use crate::response::{ApiJson, ApiResult, Created};
use crate::state::AppState;

/// Post a tweet
///
/// POST /api/v1/tweets
pub async fn create_tweet(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateTweetRequest>,
) -> ApiResult<Created<TweetResponse>> {
    let service = TweetService::new(state.service_context());
    let response = service.create(auth.user_id, request).await?;
    Ok(Created(response))
}

/// List a user's tweets, newest first
///
/// GET /api/v1/tweets/user/{user_id}
pub async fn list_user_tweets(
    State(state): State<AppState>,
    SnowflakePath(path): SnowflakePath<UserIdPath>,
    Pagination(page): Pagination,
) -> ApiResult<ApiJson<PageResponse<TweetResponse>>> {
    let user_id = path.user_id()?;

    let service = TweetService::new(state.service_context());
    let response = service.list_by_owner(user_id, page).await?;
    Ok(ApiJson(response))
}

/// Edit a tweet
///
/// PATCH /api/v1/tweets/{id}
pub async fn update_tweet(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<IdPath>,
    ValidatedJson(request): ValidatedJson<UpdateTweetRequest>,
) -> ApiResult<ApiJson<TweetResponse>> {
    let tweet_id = path.id()?;

    let service = TweetService::new(state.service_context());
    let response = service.update(tweet_id, auth.user_id, request).await?;
    Ok(ApiJson(response))
}

/// Delete a tweet and its likes
///
/// DELETE /api/v1/tweets/{id}
pub async fn delete_tweet(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<IdPath>,
) -> ApiResult<ApiJson<()>> {
    let tweet_id = path.id()?;

    let service = TweetService::new(state.service_context());
    service.delete(tweet_id, auth.user_id).await?;
    Ok(ApiJson(()))
}
