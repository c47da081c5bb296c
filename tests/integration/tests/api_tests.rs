//! End-to-end API tests
//!
//! Each test starts a full server against the configured database and
//! exercises the HTTP surface through a real client. Tests skip
//! themselves when `DATABASE_URL` or `JWT_SECRET` is not set.

use axum::http::StatusCode;
use serde_json::json;

use integration_tests::*;

/// Register a fresh user and return the credentials with the auth payload
async fn register(server: &TestServer) -> (RegisterUser, AuthResponse) {
    let user = RegisterUser::unique();
    let response = server
        .post_multipart("/users/register", user.form())
        .await
        .unwrap();
    let auth: AuthResponse = assert_data(response, StatusCode::CREATED).await.unwrap();
    (user, auth)
}

/// Publish a video with placeholder media and return its record
async fn publish_video(server: &TestServer, token: &str, title: &str) -> Video {
    let form = publish_video_form(title, "A short clip for testing");
    let response = server.post_multipart_auth("/videos", token, form).await.unwrap();
    assert_data(response, StatusCode::CREATED).await.unwrap()
}

// ============================================================================
// Health Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // Liveness is plain JSON outside the envelope
    let response = server.get_root("/health").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");

    let response = server.get_root("/health/ready").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ready");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (user, auth) = register(&server).await;

    assert_eq!(auth.user.username, user.username);
    assert_eq!(auth.user.email, user.email);
    assert_eq!(auth.token_type, "Bearer");
    assert!(!auth.access_token.is_empty());
    assert!(!auth.refresh_token.is_empty());
    assert!(auth.expires_in > 0);
}

#[tokio::test]
async fn test_register_duplicate_username() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (user, _) = register(&server).await;

    let mut duplicate = RegisterUser::unique();
    duplicate.username = user.username.clone();

    let response = server
        .post_multipart("/users/register", duplicate.form())
        .await
        .unwrap();
    assert_failure(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_register_invalid_email() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let mut user = RegisterUser::unique();
    user.email = "not-an-email".to_string();

    let response = server
        .post_multipart("/users/register", user.form())
        .await
        .unwrap();
    assert_failure(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_login_with_username_and_email() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (user, _) = register(&server).await;

    let response = server.post("/users/login", &user.login()).await.unwrap();
    let auth: AuthResponse = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(auth.user.username, user.username);

    // The login field also accepts the email address
    let by_email = LoginRequest {
        login: user.email.clone(),
        password: user.password.clone(),
    };
    let response = server.post("/users/login", &by_email).await.unwrap();
    let auth: AuthResponse = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(auth.user.email, user.email);
}

#[tokio::test]
async fn test_login_wrong_password() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (user, _) = register(&server).await;

    let bad = LoginRequest {
        login: user.username.clone(),
        password: "WrongPass123!".to_string(),
    };
    let response = server.post("/users/login", &bad).await.unwrap();
    assert_failure(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_refresh_token_rotation() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (_, auth) = register(&server).await;

    let request = RefreshTokenRequest {
        refresh_token: auth.refresh_token.clone(),
    };
    let response = server.post("/users/refresh-token", &request).await.unwrap();
    let pair: TokenPairResponse = assert_data(response, StatusCode::OK).await.unwrap();

    assert!(!pair.access_token.is_empty());
    assert_ne!(pair.refresh_token, auth.refresh_token);
    assert_eq!(pair.token_type, "Bearer");

    // The rotated-out token is revoked
    let response = server.post("/users/refresh-token", &request).await.unwrap();
    assert_failure(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_logout_revokes_refresh_token() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (_, auth) = register(&server).await;

    let response = server
        .post_auth_empty("/users/logout", &auth.access_token)
        .await
        .unwrap();
    assert_ok(response, StatusCode::OK).await.unwrap();

    let request = RefreshTokenRequest {
        refresh_token: auth.refresh_token.clone(),
    };
    let response = server.post("/users/refresh-token", &request).await.unwrap();
    assert_failure(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_change_password() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (user, auth) = register(&server).await;

    let request = ChangePasswordRequest {
        old_password: user.password.clone(),
        new_password: "NewTestPass456!".to_string(),
    };
    let response = server
        .post_auth("/users/change-password", &auth.access_token, &request)
        .await
        .unwrap();
    assert_ok(response, StatusCode::OK).await.unwrap();

    // Old password no longer works
    let response = server.post("/users/login", &user.login()).await.unwrap();
    assert_failure(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let updated = LoginRequest {
        login: user.username.clone(),
        password: "NewTestPass456!".to_string(),
    };
    let response = server.post("/users/login", &updated).await.unwrap();
    assert_data::<AuthResponse>(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// User Tests
// ============================================================================

#[tokio::test]
async fn test_get_current_user() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (user, auth) = register(&server).await;

    let response = server.get_auth("/users/me", &auth.access_token).await.unwrap();
    let me: CurrentUser = assert_data(response, StatusCode::OK).await.unwrap();

    assert_eq!(me.id, auth.user.id);
    assert_eq!(me.username, user.username);
}

#[tokio::test]
async fn test_get_current_user_unauthorized() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/users/me").await.unwrap();
    assert_failure(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_update_profile() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (_, auth) = register(&server).await;

    let response = server
        .patch_auth(
            "/users/me",
            &auth.access_token,
            &json!({ "full_name": "Renamed User" }),
        )
        .await
        .unwrap();
    let me: CurrentUser = assert_data(response, StatusCode::OK).await.unwrap();

    assert_eq!(me.full_name, "Renamed User");
}

#[tokio::test]
async fn test_channel_profile() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (user, _) = register(&server).await;

    // Public endpoint, no auth needed
    let response = server
        .get(&format!("/users/channel/{}", user.username))
        .await
        .unwrap();
    let profile: ChannelProfile = assert_data(response, StatusCode::OK).await.unwrap();

    assert_eq!(profile.username, user.username);
    assert_eq!(profile.subscriber_count, 0);
    assert!(!profile.is_subscribed);
}

#[tokio::test]
async fn test_channel_profile_unknown_username() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .get(&format!("/users/channel/no_such_user_{}", unique_suffix()))
        .await
        .unwrap();
    assert_failure(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Video Tests
// ============================================================================

#[tokio::test]
async fn test_publish_video() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (_, auth) = register(&server).await;

    let video = publish_video(&server, &auth.access_token, "My First Video").await;

    assert_eq!(video.title, "My First Video");
    assert_eq!(video.owner_id, auth.user.id);
    assert_eq!(video.views, 0);
    assert!(video.is_published);
    assert!(!video.video_url.is_empty());
    assert!(!video.thumbnail_url.is_empty());
}

#[tokio::test]
async fn test_get_video_counts_views() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (_, auth) = register(&server).await;
    let video = publish_video(&server, &auth.access_token, "View Counter").await;

    let response = server.get(&format!("/videos/{}", video.id)).await.unwrap();
    let fetched: Video = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.views, 1);

    let response = server.get(&format!("/videos/{}", video.id)).await.unwrap();
    let fetched: Video = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.views, 2);
}

#[tokio::test]
async fn test_video_search_is_case_insensitive() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (_, auth) = register(&server).await;

    let token = format!("Zebra{}", unique_suffix());
    publish_video(&server, &auth.access_token, &format!("{token} walkthrough")).await;

    let response = server
        .get(&format!("/videos?query={}", token.to_uppercase()))
        .await
        .unwrap();
    let page: Page<VideoListing> = assert_data(response, StatusCode::OK).await.unwrap();

    assert_eq!(page.items.len(), 1);
    assert!(page.items[0].title.contains(&token));
    assert_eq!(page.items[0].owner.id, auth.user.id);
}

#[tokio::test]
async fn test_toggle_publish_hides_video() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (_, auth) = register(&server).await;
    let video = publish_video(&server, &auth.access_token, "Now You See Me").await;

    let response = server
        .patch_auth_empty(
            &format!("/videos/{}/toggle-publish", video.id),
            &auth.access_token,
        )
        .await
        .unwrap();
    let toggled: Video = assert_data(response, StatusCode::OK).await.unwrap();
    assert!(!toggled.is_published);

    // Hidden from everyone but the owner
    let response = server.get(&format!("/videos/{}", video.id)).await.unwrap();
    assert_failure(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .get_auth(&format!("/videos/{}", video.id), &auth.access_token)
        .await
        .unwrap();
    assert_data::<Video>(response, StatusCode::OK).await.unwrap();

    let response = server
        .patch_auth_empty(
            &format!("/videos/{}/toggle-publish", video.id),
            &auth.access_token,
        )
        .await
        .unwrap();
    let toggled: Video = assert_data(response, StatusCode::OK).await.unwrap();
    assert!(toggled.is_published);
}

#[tokio::test]
async fn test_update_video_non_owner_forbidden() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (_, owner) = register(&server).await;
    let (_, intruder) = register(&server).await;

    let video = publish_video(&server, &owner.access_token, "Owned Video").await;

    let form = reqwest::multipart::Form::new().text("title", "Hijacked");
    let response = server
        .patch_multipart_auth(
            &format!("/videos/{}", video.id),
            &intruder.access_token,
            form,
        )
        .await
        .unwrap();
    assert_failure(response, StatusCode::FORBIDDEN).await.unwrap();

    // Unchanged
    let response = server
        .get_auth(&format!("/videos/{}", video.id), &owner.access_token)
        .await
        .unwrap();
    let fetched: Video = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.title, "Owned Video");
}

#[tokio::test]
async fn test_get_video_malformed_id() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/videos/not-a-snowflake").await.unwrap();
    assert_failure(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_delete_video() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (_, auth) = register(&server).await;
    let video = publish_video(&server, &auth.access_token, "Short Lived").await;

    let response = server
        .delete_auth(&format!("/videos/{}", video.id), &auth.access_token)
        .await
        .unwrap();
    assert_ok(response, StatusCode::OK).await.unwrap();

    let response = server.get(&format!("/videos/{}", video.id)).await.unwrap();
    assert_failure(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Tweet Tests
// ============================================================================

#[tokio::test]
async fn test_create_tweet() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (_, auth) = register(&server).await;

    let request = CreateTweetRequest {
        content: "Hello, world!".to_string(),
    };
    let response = server
        .post_auth("/tweets", &auth.access_token, &request)
        .await
        .unwrap();
    let tweet: Tweet = assert_data(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(tweet.content, "Hello, world!");
    assert_eq!(tweet.owner_id, auth.user.id);
}

#[tokio::test]
async fn test_create_tweet_empty_content() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (_, auth) = register(&server).await;

    let request = CreateTweetRequest {
        content: String::new(),
    };
    let response = server
        .post_auth("/tweets", &auth.access_token, &request)
        .await
        .unwrap();
    assert_failure(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_tweet_pagination() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (_, auth) = register(&server).await;

    for i in 0..25 {
        let request = CreateTweetRequest {
            content: format!("Tweet number {i}"),
        };
        let response = server
            .post_auth("/tweets", &auth.access_token, &request)
            .await
            .unwrap();
        assert_data::<Tweet>(response, StatusCode::CREATED).await.unwrap();
    }

    let base = format!("/tweets/user/{}", auth.user.id);

    let response = server.get(&format!("{base}?page=1&limit=10")).await.unwrap();
    let first: Page<Tweet> = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(first.items.len(), 10);
    assert_eq!(first.total_items, 25);
    assert_eq!(first.total_pages, 3);
    assert_eq!(first.page_number, 1);
    assert_eq!(first.page_size, 10);

    let response = server.get(&format!("{base}?page=3&limit=10")).await.unwrap();
    let last: Page<Tweet> = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(last.items.len(), 5);
    assert_eq!(last.page_number, 3);

    // Past the end is an empty page, not an error
    let response = server.get(&format!("{base}?page=4&limit=10")).await.unwrap();
    let empty: Page<Tweet> = assert_data(response, StatusCode::OK).await.unwrap();
    assert!(empty.items.is_empty());
    assert_eq!(empty.total_items, 25);
}

#[tokio::test]
async fn test_update_tweet_non_owner_forbidden() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (_, owner) = register(&server).await;
    let (_, intruder) = register(&server).await;

    let request = CreateTweetRequest {
        content: "Original thought".to_string(),
    };
    let response = server
        .post_auth("/tweets", &owner.access_token, &request)
        .await
        .unwrap();
    let tweet: Tweet = assert_data(response, StatusCode::CREATED).await.unwrap();

    let request = CreateTweetRequest {
        content: "Stolen thought".to_string(),
    };
    let response = server
        .patch_auth(
            &format!("/tweets/{}", tweet.id),
            &intruder.access_token,
            &request,
        )
        .await
        .unwrap();
    assert_failure(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_delete_tweet() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (_, auth) = register(&server).await;

    let request = CreateTweetRequest {
        content: "Fleeting".to_string(),
    };
    let response = server
        .post_auth("/tweets", &auth.access_token, &request)
        .await
        .unwrap();
    let tweet: Tweet = assert_data(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .delete_auth(&format!("/tweets/{}", tweet.id), &auth.access_token)
        .await
        .unwrap();
    assert_ok(response, StatusCode::OK).await.unwrap();

    let response = server
        .get(&format!("/tweets/user/{}", auth.user.id))
        .await
        .unwrap();
    let page: Page<Tweet> = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.total_items, 0);
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_comment_lifecycle() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (user, auth) = register(&server).await;
    let video = publish_video(&server, &auth.access_token, "Commented Video").await;

    let request = CreateCommentRequest {
        content: "First!".to_string(),
    };
    let response = server
        .post_auth(
            &format!("/comments/video/{}", video.id),
            &auth.access_token,
            &request,
        )
        .await
        .unwrap();
    let comment: Comment = assert_data(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(comment.content, "First!");
    assert_eq!(comment.video_id, video.id);

    // Listed with the author's channel card
    let response = server
        .get(&format!("/comments/video/{}", video.id))
        .await
        .unwrap();
    let page: Page<CommentListing> = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].author.username, user.username);

    let request = CreateCommentRequest {
        content: "First! (edited)".to_string(),
    };
    let response = server
        .patch_auth(
            &format!("/comments/{}", comment.id),
            &auth.access_token,
            &request,
        )
        .await
        .unwrap();
    let updated: Comment = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.content, "First! (edited)");

    let response = server
        .delete_auth(&format!("/comments/{}", comment.id), &auth.access_token)
        .await
        .unwrap();
    assert_ok(response, StatusCode::OK).await.unwrap();

    let response = server
        .get(&format!("/comments/video/{}", video.id))
        .await
        .unwrap();
    let page: Page<CommentListing> = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.total_items, 0);
}

#[tokio::test]
async fn test_comment_on_missing_video() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (_, auth) = register(&server).await;

    let request = CreateCommentRequest {
        content: "Shouting into the void".to_string(),
    };
    let response = server
        .post_auth(
            "/comments/video/999999999999999999",
            &auth.access_token,
            &request,
        )
        .await
        .unwrap();
    assert_failure(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Blog Tests
// ============================================================================

#[tokio::test]
async fn test_blog_lifecycle() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (_, auth) = register(&server).await;

    let request = CreateBlogRequest::unique();
    let response = server
        .post_auth("/blogs", &auth.access_token, &request)
        .await
        .unwrap();
    let blog: Blog = assert_data(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(blog.title, request.title);
    assert_eq!(blog.owner_id, auth.user.id);

    let response = server.get("/blogs?limit=100").await.unwrap();
    let page: Page<Blog> = assert_data(response, StatusCode::OK).await.unwrap();
    assert!(page.items.iter().any(|b| b.id == blog.id));

    let response = server
        .patch_auth(
            &format!("/blogs/{}", blog.id),
            &auth.access_token,
            &json!({ "title": "Revised Title" }),
        )
        .await
        .unwrap();
    let updated: Blog = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.title, "Revised Title");
    assert_eq!(updated.content, blog.content);

    let response = server
        .delete_auth(&format!("/blogs/{}", blog.id), &auth.access_token)
        .await
        .unwrap();
    assert_ok(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Playlist Tests
// ============================================================================

#[tokio::test]
async fn test_playlist_lifecycle() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (_, auth) = register(&server).await;

    let request = CreatePlaylistRequest::unique();
    let response = server
        .post_auth("/playlists", &auth.access_token, &request)
        .await
        .unwrap();
    let playlist: Playlist = assert_data(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(playlist.name, request.name);

    // Detail view carries an empty page of member videos
    let response = server
        .get_auth(&format!("/playlists/{}", playlist.id), &auth.access_token)
        .await
        .unwrap();
    let detail: PlaylistDetail = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail.id, playlist.id);
    assert!(detail.videos.items.is_empty());
    assert_eq!(detail.videos.total_items, 0);

    let response = server
        .get(&format!("/playlists/user/{}", auth.user.id))
        .await
        .unwrap();
    let page: Page<Playlist> = assert_data(response, StatusCode::OK).await.unwrap();
    assert!(page.items.iter().any(|p| p.id == playlist.id));

    let response = server
        .patch_auth(
            &format!("/playlists/{}", playlist.id),
            &auth.access_token,
            &json!({ "name": "Renamed Playlist" }),
        )
        .await
        .unwrap();
    let updated: Playlist = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.name, "Renamed Playlist");

    let response = server
        .delete_auth(&format!("/playlists/{}", playlist.id), &auth.access_token)
        .await
        .unwrap();
    assert_ok(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth(&format!("/playlists/{}", playlist.id), &auth.access_token)
        .await
        .unwrap();
    assert_failure(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_playlist_membership_is_idempotent() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (_, auth) = register(&server).await;
    let video = publish_video(&server, &auth.access_token, "Playlist Material").await;

    let request = CreatePlaylistRequest::unique();
    let response = server
        .post_auth("/playlists", &auth.access_token, &request)
        .await
        .unwrap();
    let playlist: Playlist = assert_data(response, StatusCode::CREATED).await.unwrap();

    let path = format!("/playlists/{}/videos/{}", playlist.id, video.id);

    let response = server.post_auth_empty(&path, &auth.access_token).await.unwrap();
    let membership: PlaylistMembership = assert_data(response, StatusCode::OK).await.unwrap();
    assert!(membership.member);
    assert!(membership.changed);

    // Adding again changes nothing
    let response = server.post_auth_empty(&path, &auth.access_token).await.unwrap();
    let membership: PlaylistMembership = assert_data(response, StatusCode::OK).await.unwrap();
    assert!(membership.member);
    assert!(!membership.changed);

    let response = server
        .get_auth(&format!("/playlists/{}", playlist.id), &auth.access_token)
        .await
        .unwrap();
    let detail: PlaylistDetail = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail.videos.total_items, 1);

    let response = server.delete_auth(&path, &auth.access_token).await.unwrap();
    let membership: PlaylistMembership = assert_data(response, StatusCode::OK).await.unwrap();
    assert!(!membership.member);
    assert!(membership.changed);
}

// ============================================================================
// Like Tests
// ============================================================================

#[tokio::test]
async fn test_like_toggle_flips_state() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (_, auth) = register(&server).await;
    let video = publish_video(&server, &auth.access_token, "Likeable").await;

    let path = format!("/likes/toggle/video/{}", video.id);

    let response = server.post_auth_empty(&path, &auth.access_token).await.unwrap();
    let toggle: Toggle = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(toggle.target_kind, "video");
    assert_eq!(toggle.target_id, video.id);
    assert!(toggle.active);

    let response = server.post_auth_empty(&path, &auth.access_token).await.unwrap();
    let toggle: Toggle = assert_data(response, StatusCode::OK).await.unwrap();
    assert!(!toggle.active);

    let response = server.post_auth_empty(&path, &auth.access_token).await.unwrap();
    let toggle: Toggle = assert_data(response, StatusCode::OK).await.unwrap();
    assert!(toggle.active);
}

#[tokio::test]
async fn test_like_unknown_target() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (_, auth) = register(&server).await;

    let response = server
        .post_auth_empty("/likes/toggle/video/999999999999999999", &auth.access_token)
        .await
        .unwrap();
    assert_failure(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_liked_videos_listing() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (_, auth) = register(&server).await;
    let video = publish_video(&server, &auth.access_token, "Favorite Clip").await;

    let response = server
        .post_auth_empty(
            &format!("/likes/toggle/video/{}", video.id),
            &auth.access_token,
        )
        .await
        .unwrap();
    assert_data::<Toggle>(response, StatusCode::OK).await.unwrap();

    let response = server.get_auth("/likes/videos", &auth.access_token).await.unwrap();
    let page: Page<VideoListing> = assert_data(response, StatusCode::OK).await.unwrap();

    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].id, video.id);
}

// ============================================================================
// Subscription Tests
// ============================================================================

#[tokio::test]
async fn test_subscription_toggle() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (channel_user, channel) = register(&server).await;
    let (_, viewer) = register(&server).await;

    let path = format!("/subscriptions/toggle/{}", channel.user.id);

    let response = server.post_auth_empty(&path, &viewer.access_token).await.unwrap();
    let toggle: Toggle = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(toggle.target_kind, "channel");
    assert!(toggle.active);

    // Counter and flag visible on the channel profile
    let response = server
        .get_auth(
            &format!("/users/channel/{}", channel_user.username),
            &viewer.access_token,
        )
        .await
        .unwrap();
    let profile: ChannelProfile = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(profile.subscriber_count, 1);
    assert!(profile.is_subscribed);

    let response = server.post_auth_empty(&path, &viewer.access_token).await.unwrap();
    let toggle: Toggle = assert_data(response, StatusCode::OK).await.unwrap();
    assert!(!toggle.active);
}

#[tokio::test]
async fn test_cannot_subscribe_to_self() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (_, auth) = register(&server).await;

    let response = server
        .post_auth_empty(
            &format!("/subscriptions/toggle/{}", auth.user.id),
            &auth.access_token,
        )
        .await
        .unwrap();
    assert_failure(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_subscribed_channels_listing() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (channel_user, channel) = register(&server).await;
    let (_, viewer) = register(&server).await;

    let response = server
        .post_auth_empty(
            &format!("/subscriptions/toggle/{}", channel.user.id),
            &viewer.access_token,
        )
        .await
        .unwrap();
    assert_data::<Toggle>(response, StatusCode::OK).await.unwrap();

    let response = server
        .get(&format!("/subscriptions/subscribed/{}", viewer.user.id))
        .await
        .unwrap();
    let page: Page<ChannelSummary> = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].username, channel_user.username);

    let response = server
        .get(&format!("/subscriptions/subscribers/{}", channel.user.id))
        .await
        .unwrap();
    let page: Page<ChannelSummary> = assert_data(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.total_items, 1);
}

// ============================================================================
// Watch History Tests
// ============================================================================

#[tokio::test]
async fn test_watch_history_records_authenticated_views() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let (_, creator) = register(&server).await;
    let (_, viewer) = register(&server).await;

    let video = publish_video(&server, &creator.access_token, "Documentary").await;

    let response = server
        .get_auth(&format!("/videos/{}", video.id), &viewer.access_token)
        .await
        .unwrap();
    assert_data::<Video>(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth("/users/me/watch-history", &viewer.access_token)
        .await
        .unwrap();
    let page: Page<WatchedVideo> = assert_data(response, StatusCode::OK).await.unwrap();

    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].id, video.id);
    assert_eq!(page.items[0].title, "Documentary");
}
