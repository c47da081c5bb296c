//! Multipart form extractor
//!
//! Collects a `multipart/form-data` body into named text fields and
//! file parts. Handlers pull out what they need with [`MultipartForm`]
//! accessors; a missing required part is a 400.

use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
};

use vidstream_service::dto::MediaUpload;

use crate::response::ApiError;

/// A fully buffered multipart form
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, MediaUpload>,
}

impl MultipartForm {
    /// A text field, if present and non-empty
    #[must_use]
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .filter(|value| !value.is_empty())
            .cloned()
    }

    /// A required text field
    pub fn require_text(&self, name: &str) -> Result<String, ApiError> {
        self.text(name)
            .ok_or_else(|| ApiError::invalid_query(format!("missing field `{name}`")))
    }

    /// Remove and return a file part, if present
    pub fn take_file(&mut self, name: &str) -> Option<MediaUpload> {
        self.files.remove(name)
    }

    /// Remove and return a required file part
    pub fn require_file(&mut self, name: &str) -> Result<MediaUpload, ApiError> {
        self.take_file(name)
            .ok_or_else(|| ApiError::invalid_query(format!("missing file `{name}`")))
    }
}

#[async_trait]
impl<S> FromRequest<S> for MultipartForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?
        {
            let Some(name) = field.name().map(ToString::to_string) else {
                continue;
            };

            if field.file_name().is_some() {
                let filename = field
                    .file_name()
                    .map_or_else(|| name.clone(), ToString::to_string);
                let content_type = field
                    .content_type()
                    .map_or_else(|| "application/octet-stream".to_string(), ToString::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::invalid_query(e.to_string()))?;

                form.files.insert(
                    name,
                    MediaUpload {
                        filename,
                        content_type,
                        data: data.to_vec(),
                    },
                );
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::invalid_query(e.to_string()))?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }
}
