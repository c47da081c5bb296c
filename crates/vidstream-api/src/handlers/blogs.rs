//! Blog handlers
//!
//! Long-form posts. The listing is global and public.

use axum::extract::State;

use vidstream_service::{
    BlogResponse, BlogService, CreateBlogRequest, PageResponse, UpdateBlogRequest,
};

use crate::extractors::{AuthUser, IdPath, Pagination, SnowflakePath, ValidatedJson};
use crate::response::{ApiJson, ApiResult, Created};
use crate::state::AppState;

/// List blog posts, newest first
///
/// GET /api/v1/blogs
pub async fn list_blogs(
    State(state): State<AppState>,
    Pagination(page): Pagination,
) -> ApiResult<ApiJson<PageResponse<BlogResponse>>> {
    let service = BlogService::new(state.service_context());
    let response = service.list(page).await?;
    Ok(ApiJson(response))
}

/// Publish a blog post
///
/// POST /api/v1/blogs
pub async fn create_blog(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateBlogRequest>,
) -> ApiResult<Created<BlogResponse>> {
    let service = BlogService::new(state.service_context());
    let response = service.create(auth.user_id, request).await?;
    Ok(Created(response))
}

/// Edit a blog post
///
/// PATCH /api/v1/blogs/{id}
pub async fn update_blog(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<IdPath>,
    ValidatedJson(request): ValidatedJson<UpdateBlogRequest>,
) -> ApiResult<ApiJson<BlogResponse>> {
    let blog_id = path.id()?;

    let service = BlogService::new(state.service_context());
    let response = service.update(blog_id, auth.user_id, request).await?;
    Ok(ApiJson(response))
}

/// Delete a blog post
///
/// DELETE /api/v1/blogs/{id}
pub async fn delete_blog(
    State(state): State<AppState>,
    auth: AuthUser,
    SnowflakePath(path): SnowflakePath<IdPath>,
) -> ApiResult<ApiJson<()>> {
    let blog_id = path.id()?;

    let service = BlogService::new(state.service_context());
    service.delete(blog_id, auth.user_id).await?;
    Ok(ApiJson(()))
}
