//! # vidstream-service
//!
//! Application layer: business logic and use cases. Services validate
//! input, enforce ownership and visibility rules, and orchestrate the
//! repositories and media store defined in the lower crates.

pub mod dto;
pub mod services;

pub use dto::{
    AuthResponse, BlogResponse, ChangePasswordRequest, ChannelProfileResponse,
    ChannelSummaryResponse, CommentListingResponse, CommentResponse, CreateBlogRequest,
    CreateCommentRequest, CreatePlaylistRequest, CreateTweetRequest, CurrentUserResponse,
    ListVideosRequest, LoginRequest, MediaUpload, PageResponse, PlaylistDetailResponse,
    PlaylistMembershipResponse, PlaylistResponse, PublishVideoRequest, RefreshTokenRequest,
    RegisterRequest, TokenPairResponse, ToggleResponse, TweetResponse, UpdateBlogRequest,
    UpdateCommentRequest, UpdatePlaylistRequest, UpdateProfileRequest, UpdateTweetRequest,
    UpdateVideoRequest, VideoListingResponse, VideoResponse, WatchedVideoResponse,
};
pub use services::{
    AuthService, BlogService, CommentService, LikeService, PlaylistService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, SubscriptionService, TweetService,
    UserService, VideoService,
};
