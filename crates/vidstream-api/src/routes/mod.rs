//! Route definitions
//!
//! All API routes organized by resource and mounted under /api/v1.
//! Health probes are exported separately so they can bypass the rate
//! limiter.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::handlers::{
    blogs, comments, health, likes, playlists, subscriptions, tweets, users, videos,
};
use crate::state::AppState;

/// Create the main API router (excluding health probes)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(user_routes())
        .merge(video_routes())
        .merge(tweet_routes())
        .merge(comment_routes())
        .merge(blog_routes())
        .merge(playlist_routes())
        .merge(like_routes())
        .merge(subscription_routes())
}

/// User and authentication routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/register", post(users::register))
        .route("/users/login", post(users::login))
        .route("/users/logout", post(users::logout))
        .route("/users/refresh-token", post(users::refresh_token))
        .route("/users/change-password", post(users::change_password))
        .route("/users/me", get(users::current_user))
        .route("/users/me", patch(users::update_profile))
        .route("/users/me/avatar", patch(users::update_avatar))
        .route("/users/me/cover", patch(users::update_cover_image))
        .route("/users/me/watch-history", get(users::watch_history))
        .route("/users/channel/:username", get(users::channel_profile))
}

/// Video routes
fn video_routes() -> Router<AppState> {
    Router::new()
        .route("/videos", get(videos::list_videos))
        .route("/videos", post(videos::publish_video))
        .route("/videos/:id", get(videos::get_video))
        .route("/videos/:id", patch(videos::update_video))
        .route("/videos/:id", delete(videos::delete_video))
        .route("/videos/:id/toggle-publish", patch(videos::toggle_publish))
}

/// Tweet routes
fn tweet_routes() -> Router<AppState> {
    Router::new()
        .route("/tweets", post(tweets::create_tweet))
        .route("/tweets/user/:user_id", get(tweets::list_user_tweets))
        .route("/tweets/:id", patch(tweets::update_tweet))
        .route("/tweets/:id", delete(tweets::delete_tweet))
}

/// Comment routes
fn comment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/comments/video/:video_id",
            get(comments::list_video_comments),
        )
        .route("/comments/video/:video_id", post(comments::create_comment))
        .route("/comments/:id", patch(comments::update_comment))
        .route("/comments/:id", delete(comments::delete_comment))
}

/// Blog routes
fn blog_routes() -> Router<AppState> {
    Router::new()
        .route("/blogs", get(blogs::list_blogs))
        .route("/blogs", post(blogs::create_blog))
        .route("/blogs/:id", patch(blogs::update_blog))
        .route("/blogs/:id", delete(blogs::delete_blog))
}

/// Playlist routes
fn playlist_routes() -> Router<AppState> {
    Router::new()
        .route("/playlists", post(playlists::create_playlist))
        .route("/playlists/user/:user_id", get(playlists::list_user_playlists))
        .route("/playlists/:id", get(playlists::get_playlist))
        .route("/playlists/:id", patch(playlists::update_playlist))
        .route("/playlists/:id", delete(playlists::delete_playlist))
        .route("/playlists/:id/videos/:video_id", post(playlists::add_video))
        .route(
            "/playlists/:id/videos/:video_id",
            delete(playlists::remove_video),
        )
}

/// Like routes
fn like_routes() -> Router<AppState> {
    Router::new()
        .route("/likes/toggle/video/:id", post(likes::toggle_video_like))
        .route("/likes/toggle/comment/:id", post(likes::toggle_comment_like))
        .route("/likes/toggle/tweet/:id", post(likes::toggle_tweet_like))
        .route("/likes/videos", get(likes::liked_videos))
}

/// Subscription routes
fn subscription_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/subscriptions/toggle/:channel_id",
            post(subscriptions::toggle_subscription),
        )
        .route(
            "/subscriptions/subscribed/:subscriber_id",
            get(subscriptions::subscribed_channels),
        )
        .route(
            "/subscriptions/subscribers/:channel_id",
            get(subscriptions::channel_subscribers),
        )
}
