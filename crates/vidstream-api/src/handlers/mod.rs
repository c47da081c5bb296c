//! HTTP request handlers
//!
//! One module per resource. Handlers stay thin: extract, call the
//! service layer, wrap the result in the response envelope.

pub mod blogs;
pub mod comments;
pub mod health;
pub mod likes;
pub mod playlists;
pub mod subscriptions;
pub mod tweets;
pub mod users;
pub mod videos;
