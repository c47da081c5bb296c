//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in
//! vidstream-core. Each repository handles database operations for a
//! specific domain entity; list endpoints go through the shared
//! pipeline executor.

mod blog;
mod comment;
mod error;
mod playlist;
mod reaction;
mod tweet;
mod user;
mod video;

pub use blog::PgBlogRepository;
pub use comment::PgCommentRepository;
pub use playlist::PgPlaylistRepository;
pub use reaction::PgReactionRepository;
pub use tweet::PgTweetRepository;
pub use user::PgUserRepository;
pub use video::PgVideoRepository;
