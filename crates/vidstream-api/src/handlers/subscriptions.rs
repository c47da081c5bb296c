//! Subscription handlers
//!
//! Channel subscriptions: toggle, the channels a user follows and a
//! channel's subscriber roster.

use axum::extract::State;

use vidstream_service::{ChannelSummaryResponse, PageResponse, SubscriptionService, ToggleResponse};

use crate::extractors::{AuthUser, ChannelIdPath, Pagination, SnowflakePath, SubscriberIdPath};
use crate::response::{ApiJson, ApiResult};
use crate::state::AppState;

/// Toggle the caller's subscription to a channel
///
/// POST /api/v1/subscriptions/toggle/{channel_id}
pub async fn toggle_subscription(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<ChannelIdPath>,
) -> ApiResult<ApiJson<ToggleResponse>> {
    let channel_id = path.channel_id()?;

    let service = SubscriptionService::new(state.service_context());
    let response = service.toggle(auth.user_id, channel_id).await?;
    Ok(ApiJson(response))
}

/// Channels a user is subscribed to
///
/// GET /api/v1/subscriptions/subscribed/{subscriber_id}
pub async fn subscribed_channels(
    State(state): State<AppState>,
    SnowflakePath(path): SnowflakePath<SubscriberIdPath>,
    Pagination(page): Pagination,
) -> ApiResult<ApiJson<PageResponse<ChannelSummaryResponse>>> {
    let subscriber_id = path.subscriber_id()?;

    let service = SubscriptionService::new(state.service_context());
    let response = service.subscribed_channels(subscriber_id, page).await?;
    Ok(ApiJson(response))
}

/// A channel's subscribers
///
/// GET /api/v1/subscriptions/subscribers/{channel_id}
pub async fn channel_subscribers(
    State(state): State<AppState>,
    SnowflakePath(path): SnowflakePath<ChannelIdPath>,
    Pagination(page): Pagination,
) -> ApiResult<ApiJson<PageResponse<ChannelSummaryResponse>>> {
    let channel_id = path.channel_id()?;

    let service = SubscriptionService::new(state.service_context());
    let response = service.channel_subscribers(channel_id, page).await?;
    Ok(ApiJson(response))
}
