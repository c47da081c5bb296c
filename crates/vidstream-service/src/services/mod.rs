//! Service layer
//!
//! Use-case implementations sitting between the HTTP handlers and the
//! repositories. Each service borrows the shared [`ServiceContext`] and
//! is constructed per request.

pub mod auth;
pub mod blog;
pub mod comment;
pub mod context;
pub mod error;
pub mod like;
pub mod playlist;
pub mod subscription;
pub mod tweet;
pub mod user;
pub mod video;

pub use auth::AuthService;
pub use blog::BlogService;
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use like::LikeService;
pub use playlist::PlaylistService;
pub use subscription::SubscriptionService;
pub use tweet::TweetService;
pub use user::UserService;
pub use video::VideoService;
