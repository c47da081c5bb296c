//! Request extractors
//!
//! Custom axum extractors for authentication, pagination, typed path
//! parameters, validated JSON bodies and multipart uploads.

pub mod auth;
pub mod pagination;
pub mod path;
pub mod upload;
pub mod validated;

pub use auth::{AuthUser, OptionalAuthUser};
pub use pagination::{PageParams, Pagination};
pub use path::{
    ChannelIdPath, IdPath, PlaylistVideoPath, SnowflakePath, SubscriberIdPath, UserIdPath,
    UsernamePath, VideoIdPath,
};
pub use upload::MultipartForm;
pub use validated::ValidatedJson;
