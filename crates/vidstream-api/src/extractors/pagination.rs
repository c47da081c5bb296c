//! Pagination extractor
//!
//! Parses `?page=` and `?limit=` query parameters into a validated
//! [`PageRequest`]. Missing parameters fall back to the first page with
//! the default page size; out-of-range values are a 400.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

use vidstream_core::query::{PageRequest, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

use crate::response::ApiError;

/// Raw pagination query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageParams {
    /// Convert into a validated page request
    pub fn into_page_request(self) -> Result<PageRequest, ApiError> {
        let page = self.page.unwrap_or(i64::from(DEFAULT_PAGE));
        let limit = self.limit.unwrap_or(i64::from(DEFAULT_PAGE_SIZE));
        PageRequest::new(page, limit).map_err(ApiError::from)
    }
}

/// Extractor yielding a validated [`PageRequest`]
#[derive(Debug, Clone, Copy)]
pub struct Pagination(pub PageRequest);

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PageParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        Ok(Self(params.into_page_request()?))
    }
}
