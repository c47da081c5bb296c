//! Blog service
//!
//! Long-form posts. Blogs are not a reaction target, so deletion has no
//! cleanup beyond the row itself.

use tracing::{info, instrument};
use validator::Validate;

use vidstream_core::entities::Blog;
use vidstream_core::error::DomainError;
use vidstream_core::query::PageRequest;
use vidstream_core::value_objects::Snowflake;

use crate::dto::requests::{CreateBlogRequest, UpdateBlogRequest};
use crate::dto::responses::{BlogResponse, PageResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Blog post management
pub struct BlogService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BlogService<'a> {
    /// Create a new blog service
    #[must_use]
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a blog post
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create(
        &self,
        owner_id: Snowflake,
        request: CreateBlogRequest,
    ) -> ServiceResult<BlogResponse> {
        request.validate()?;

        let blog = Blog::new(
            self.ctx.generate_id(),
            owner_id,
            request.title,
            request.content,
        );
        let created = self.ctx.blog_repo().create(&blog).await?;

        info!(blog_id = %created.id, owner_id = %owner_id, "blog post created");

        Ok(BlogResponse::from(&created))
    }

    /// Page through all blog posts, newest first
    #[instrument(skip(self))]
    pub async fn list(&self, page: PageRequest) -> ServiceResult<PageResponse<BlogResponse>> {
        let result = self.ctx.blog_repo().list(page).await?;
        Ok(PageResponse::from(result))
    }

    /// Edit a blog post's title and/or content
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        blog_id: Snowflake,
        actor_id: Snowflake,
        request: UpdateBlogRequest,
    ) -> ServiceResult<BlogResponse> {
        request.validate()?;

        let Some(mut blog) = self.ctx.blog_repo().find_by_id(blog_id).await? else {
            return Err(DomainError::BlogNotFound(blog_id).into());
        };
        if !blog.is_owned_by(actor_id) {
            return Err(DomainError::NotOwner.into());
        }

        blog.edit(request.title, request.content);
        let updated = self.ctx.blog_repo().update(&blog).await?;

        info!(blog_id = %blog_id, "blog post updated");

        Ok(BlogResponse::from(&updated))
    }

    /// Delete a blog post
    #[instrument(skip(self))]
    pub async fn delete(&self, blog_id: Snowflake, actor_id: Snowflake) -> ServiceResult<()> {
        let Some(blog) = self.ctx.blog_repo().find_by_id(blog_id).await? else {
            return Err(DomainError::BlogNotFound(blog_id).into());
        };
        if !blog.is_owned_by(actor_id) {
            return Err(DomainError::NotOwner.into());
        }

        self.ctx.blog_repo().delete(blog_id).await?;

        info!(blog_id = %blog_id, "blog post deleted");

        Ok(())
    }
}
