//! # vidstream-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `vidstream-core`. It handles:
//!
//! - Connection pool management and migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - A SQL executor for the typed list-query pipeline
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vidstream_db::pool::{create_pool, DatabaseConfig};
//! use vidstream_db::repositories::PgVideoRepository;
//! use vidstream_core::traits::VideoRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig {
//!         url: std::env::var("DATABASE_URL")?,
//!         ..DatabaseConfig::default()
//!     };
//!     let pool = create_pool(&config).await?;
//!     let video_repo = PgVideoRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pipeline;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgBlogRepository, PgCommentRepository, PgPlaylistRepository, PgReactionRepository,
    PgTweetRepository, PgUserRepository, PgVideoRepository,
};
