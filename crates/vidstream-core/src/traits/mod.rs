//! Ports implemented by the infrastructure crates

pub mod media;
pub mod repositories;

pub use media::{MediaStore, StoredMedia};
pub use repositories::{
    BlogRepository, CommentRepository, PlaylistRepository, ReactionRepository, RepoResult,
    TweetRepository, UserRepository, VideoQuery, VideoRepository,
};
