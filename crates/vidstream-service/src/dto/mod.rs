//! Data transfer objects
//!
//! Request payloads coming into the service layer and response payloads
//! going back out, plus the entity-to-DTO mappers.

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    ChangePasswordRequest, CreateBlogRequest, CreateCommentRequest, CreatePlaylistRequest,
    CreateTweetRequest, ListVideosRequest, LoginRequest, MediaUpload, PublishVideoRequest,
    RefreshTokenRequest, RegisterRequest, UpdateBlogRequest, UpdateCommentRequest,
    UpdatePlaylistRequest, UpdateProfileRequest, UpdateTweetRequest, UpdateVideoRequest,
};
pub use responses::{
    AuthResponse, BlogResponse, ChannelProfileResponse, ChannelSummaryResponse,
    CommentListingResponse, CommentResponse, CurrentUserResponse, PageResponse,
    PlaylistDetailResponse, PlaylistMembershipResponse, PlaylistResponse, TokenPairResponse,
    ToggleResponse, TweetResponse, VideoListingResponse, VideoResponse, WatchedVideoResponse,
};
