//! Entity to DTO mappers
//!
//! Conversion impls from domain entities to response DTOs. Owned
//! conversions delegate to the borrowing ones so callers can use
//! whichever fits.

use vidstream_common::auth::TokenPair;
use vidstream_core::entities::{
    Blog, ChannelProfile, ChannelSummary, Comment, CommentListing, Playlist, Tweet, User, Video,
    VideoListing, WatchedVideo,
};
use vidstream_core::query::PageResult;

use super::responses::{
    AuthResponse, BlogResponse, ChannelProfileResponse, ChannelSummaryResponse,
    CommentListingResponse, CommentResponse, CurrentUserResponse, PageResponse, PlaylistResponse,
    TokenPairResponse, TweetResponse, VideoListingResponse, VideoResponse, WatchedVideoResponse,
};

// ============================================================================
// Auth mappers
// ============================================================================

impl AuthResponse {
    /// Combine an issued token pair with the account it belongs to
    #[must_use]
    pub fn new(pair: TokenPair, user: &User) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: pair.token_type,
            expires_in: pair.expires_in,
            user: CurrentUserResponse::from(user),
        }
    }
}

impl From<TokenPair> for TokenPairResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: pair.token_type,
            expires_in: pair.expires_in,
        }
    }
}

// ============================================================================
// User mappers
// ============================================================================

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            avatar_url: user.avatar_url.clone(),
            cover_image_url: user.cover_image_url.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for CurrentUserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&ChannelSummary> for ChannelSummaryResponse {
    fn from(channel: &ChannelSummary) -> Self {
        Self {
            id: channel.id,
            username: channel.username.clone(),
            full_name: channel.full_name.clone(),
            avatar_url: channel.avatar_url.clone(),
        }
    }
}

impl From<ChannelSummary> for ChannelSummaryResponse {
    fn from(channel: ChannelSummary) -> Self {
        Self::from(&channel)
    }
}

impl From<&ChannelProfile> for ChannelProfileResponse {
    fn from(profile: &ChannelProfile) -> Self {
        Self {
            id: profile.id,
            username: profile.username.clone(),
            full_name: profile.full_name.clone(),
            avatar_url: profile.avatar_url.clone(),
            cover_image_url: profile.cover_image_url.clone(),
            subscriber_count: profile.subscriber_count,
            subscribed_to_count: profile.subscribed_to_count,
            is_subscribed: profile.is_subscribed,
        }
    }
}

impl From<ChannelProfile> for ChannelProfileResponse {
    fn from(profile: ChannelProfile) -> Self {
        Self::from(&profile)
    }
}

// ============================================================================
// Video mappers
// ============================================================================

impl From<&Video> for VideoResponse {
    fn from(video: &Video) -> Self {
        Self {
            id: video.id,
            owner_id: video.owner_id,
            title: video.title.clone(),
            description: video.description.clone(),
            video_url: video.video_url.clone(),
            thumbnail_url: video.thumbnail_url.clone(),
            duration_seconds: video.duration_seconds,
            views: video.views,
            is_published: video.is_published,
            created_at: video.created_at,
            updated_at: video.updated_at,
        }
    }
}

impl From<Video> for VideoResponse {
    fn from(video: Video) -> Self {
        Self::from(&video)
    }
}

impl From<&VideoListing> for VideoListingResponse {
    fn from(listing: &VideoListing) -> Self {
        Self {
            id: listing.video.id,
            title: listing.video.title.clone(),
            description: listing.video.description.clone(),
            video_url: listing.video.video_url.clone(),
            thumbnail_url: listing.video.thumbnail_url.clone(),
            duration_seconds: listing.video.duration_seconds,
            views: listing.video.views,
            is_published: listing.video.is_published,
            created_at: listing.video.created_at,
            owner: ChannelSummaryResponse::from(&listing.owner),
        }
    }
}

impl From<VideoListing> for VideoListingResponse {
    fn from(listing: VideoListing) -> Self {
        Self::from(&listing)
    }
}

impl From<&WatchedVideo> for WatchedVideoResponse {
    fn from(watched: &WatchedVideo) -> Self {
        Self {
            id: watched.video.id,
            title: watched.video.title.clone(),
            description: watched.video.description.clone(),
            video_url: watched.video.video_url.clone(),
            thumbnail_url: watched.video.thumbnail_url.clone(),
            duration_seconds: watched.video.duration_seconds,
            views: watched.video.views,
            created_at: watched.video.created_at,
            owner: ChannelSummaryResponse::from(&watched.owner),
            watched_at: watched.watched_at,
        }
    }
}

impl From<WatchedVideo> for WatchedVideoResponse {
    fn from(watched: WatchedVideo) -> Self {
        Self::from(&watched)
    }
}

// ============================================================================
// Tweet mappers
// ============================================================================

impl From<&Tweet> for TweetResponse {
    fn from(tweet: &Tweet) -> Self {
        Self {
            id: tweet.id,
            owner_id: tweet.owner_id,
            content: tweet.content.clone(),
            created_at: tweet.created_at,
            updated_at: tweet.updated_at,
        }
    }
}

impl From<Tweet> for TweetResponse {
    fn from(tweet: Tweet) -> Self {
        Self::from(&tweet)
    }
}

// ============================================================================
// Comment mappers
// ============================================================================

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id,
            video_id: comment.video_id,
            owner_id: comment.owner_id,
            content: comment.content.clone(),
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self::from(&comment)
    }
}

impl From<&CommentListing> for CommentListingResponse {
    fn from(listing: &CommentListing) -> Self {
        Self {
            id: listing.comment.id,
            video_id: listing.comment.video_id,
            content: listing.comment.content.clone(),
            created_at: listing.comment.created_at,
            updated_at: listing.comment.updated_at,
            author: ChannelSummaryResponse::from(&listing.author),
        }
    }
}

impl From<CommentListing> for CommentListingResponse {
    fn from(listing: CommentListing) -> Self {
        Self::from(&listing)
    }
}

// ============================================================================
// Blog mappers
// ============================================================================

impl From<&Blog> for BlogResponse {
    fn from(blog: &Blog) -> Self {
        Self {
            id: blog.id,
            owner_id: blog.owner_id,
            title: blog.title.clone(),
            content: blog.content.clone(),
            created_at: blog.created_at,
            updated_at: blog.updated_at,
        }
    }
}

impl From<Blog> for BlogResponse {
    fn from(blog: Blog) -> Self {
        Self::from(&blog)
    }
}

// ============================================================================
// Playlist mappers
// ============================================================================

impl From<&Playlist> for PlaylistResponse {
    fn from(playlist: &Playlist) -> Self {
        Self {
            id: playlist.id,
            owner_id: playlist.owner_id,
            name: playlist.name.clone(),
            description: playlist.description.clone(),
            created_at: playlist.created_at,
            updated_at: playlist.updated_at,
        }
    }
}

impl From<Playlist> for PlaylistResponse {
    fn from(playlist: Playlist) -> Self {
        Self::from(&playlist)
    }
}

// ============================================================================
// Pagination mapper
// ============================================================================

impl<T, U> From<PageResult<U>> for PageResponse<T>
where
    T: From<U>,
{
    fn from(result: PageResult<U>) -> Self {
        let mapped = result.map(T::from);
        Self {
            items: mapped.items,
            total_items: mapped.total_items,
            page_number: mapped.page_number,
            page_size: mapped.page_size,
            total_pages: mapped.total_pages,
        }
    }
}
