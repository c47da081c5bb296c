//! Database models mapping to PostgreSQL tables and query row shapes

mod blog;
mod channel;
mod comment;
mod playlist;
mod tweet;
mod user;
mod video;

pub use blog::BlogModel;
pub use channel::{ChannelProfileModel, ChannelSummaryModel};
pub use comment::{CommentListingModel, CommentModel};
pub use playlist::PlaylistModel;
pub use tweet::TweetModel;
pub use user::{UserModel, WatchHistoryModel};
pub use video::{VideoListingModel, VideoModel, WatchedVideoModel};
