//! Authentication service
//!
//! Registration, login, token rotation and password changes. The stored
//! refresh token is the single source of truth for a session: rotation
//! overwrites it, logout clears it, and a presented refresh token that
//! does not match the stored one is treated as revoked.

use tracing::{info, instrument, warn};
use validator::Validate;

use vidstream_common::auth::validate_password_strength;
use vidstream_common::error::AppError;
use vidstream_core::entities::User;
use vidstream_core::error::DomainError;
use vidstream_core::value_objects::Snowflake;

use crate::dto::requests::{
    ChangePasswordRequest, LoginRequest, MediaUpload, RefreshTokenRequest, RegisterRequest,
};
use crate::dto::responses::{AuthResponse, TokenPairResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Characters permitted in a username besides ASCII alphanumerics
const USERNAME_EXTRA_CHARS: &[char] = &['_', '-', '.'];

/// Authentication and session management
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new auth service
    #[must_use]
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new account and issue its first token pair
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        request.validate()?;
        validate_username_charset(&request.username)?;
        validate_password_strength(&request.password).map_err(map_password_error)?;

        let username = request.username.to_lowercase();
        let email = request.email.to_lowercase();

        if self.ctx.user_repo().find_by_username(&username).await?.is_some() {
            return Err(DomainError::UsernameAlreadyExists.into());
        }
        if self.ctx.user_repo().find_by_email(&email).await?.is_some() {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let password_hash = self.ctx.password_service().hash(&request.password)?;

        let mut user = User::new(
            self.ctx.generate_id(),
            username,
            email,
            request.full_name,
            password_hash,
        );

        if let Some(avatar) = request.avatar {
            user.set_avatar_url(self.store_upload(avatar).await?);
        }
        if let Some(cover) = request.cover_image {
            user.set_cover_image_url(self.store_upload(cover).await?);
        }

        let pair = self.ctx.jwt_service().generate_token_pair(user.id)?;
        user.set_refresh_token(pair.refresh_token.clone());

        let created = self.ctx.user_repo().create(&user).await?;

        info!(user_id = %created.id, "user registered");

        Ok(AuthResponse::new(pair, &created))
    }

    /// Authenticate with username or email and issue a token pair
    #[instrument(skip(self, request), fields(login = %request.login))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        request.validate()?;

        let login = request.login.to_lowercase();
        let Some(mut user) = self.ctx.user_repo().find_by_login(&login).await? else {
            warn!("login attempt for unknown account");
            return Err(AppError::InvalidCredentials.into());
        };

        if !self
            .ctx
            .password_service()
            .verify(&request.password, &user.password_hash)?
        {
            warn!(user_id = %user.id, "login attempt with wrong password");
            return Err(AppError::InvalidCredentials.into());
        }

        let pair = self.ctx.jwt_service().generate_token_pair(user.id)?;
        user.set_refresh_token(pair.refresh_token.clone());
        let updated = self.ctx.user_repo().update(&user).await?;

        info!(user_id = %updated.id, "user logged in");

        Ok(AuthResponse::new(pair, &updated))
    }

    /// Exchange a valid refresh token for a freshly rotated pair
    #[instrument(skip(self, request))]
    pub async fn refresh_tokens(
        &self,
        request: RefreshTokenRequest,
    ) -> ServiceResult<TokenPairResponse> {
        request.validate()?;

        let claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(&request.refresh_token)?;
        let user_id = claims.user_id()?;

        let Some(mut user) = self.ctx.user_repo().find_by_id(user_id).await? else {
            return Err(AppError::InvalidToken.into());
        };

        // A mismatch means the token was already rotated or the session
        // was logged out; reject rather than resurrect it.
        if !user.refresh_token_matches(&request.refresh_token) {
            warn!(user_id = %user.id, "refresh token mismatch, possible reuse");
            return Err(AppError::InvalidToken.into());
        }

        let pair = self.ctx.jwt_service().generate_token_pair(user.id)?;
        user.set_refresh_token(pair.refresh_token.clone());
        self.ctx.user_repo().update(&user).await?;

        info!(user_id = %user.id, "refresh token rotated");

        Ok(TokenPairResponse::from(pair))
    }

    /// Invalidate the current session's refresh token
    #[instrument(skip(self))]
    pub async fn logout(&self, user_id: Snowflake) -> ServiceResult<()> {
        let Some(mut user) = self.ctx.user_repo().find_by_id(user_id).await? else {
            return Err(DomainError::UserNotFound(user_id).into());
        };

        user.clear_refresh_token();
        self.ctx.user_repo().update(&user).await?;

        info!(user_id = %user_id, "user logged out");

        Ok(())
    }

    /// Change the password, revoking any active session
    #[instrument(skip(self, request))]
    pub async fn change_password(
        &self,
        user_id: Snowflake,
        request: ChangePasswordRequest,
    ) -> ServiceResult<()> {
        request.validate()?;
        validate_password_strength(&request.new_password).map_err(map_password_error)?;

        let Some(mut user) = self.ctx.user_repo().find_by_id(user_id).await? else {
            return Err(DomainError::UserNotFound(user_id).into());
        };

        self.ctx
            .password_service()
            .verify_or_error(&request.old_password, &user.password_hash)?;

        user.password_hash = self.ctx.password_service().hash(&request.new_password)?;
        user.clear_refresh_token();
        self.ctx.user_repo().update(&user).await?;

        info!(user_id = %user_id, "password changed");

        Ok(())
    }

    /// Validate an access token and return the account it identifies
    #[instrument(skip(self, token))]
    pub async fn authenticate(&self, token: &str) -> ServiceResult<User> {
        let claims = self.ctx.jwt_service().validate_access_token(token)?;
        let user_id = claims.user_id()?;

        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::InvalidToken.into())
    }

    async fn store_upload(&self, upload: MediaUpload) -> ServiceResult<String> {
        let stored = self
            .ctx
            .media_store()
            .store(&upload.filename, &upload.content_type, upload.data)
            .await?;
        Ok(stored.url)
    }
}

fn validate_username_charset(username: &str) -> ServiceResult<()> {
    let ok = username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || USERNAME_EXTRA_CHARS.contains(&c));
    if ok {
        Ok(())
    } else {
        Err(DomainError::InvalidUsername(username.to_string()).into())
    }
}

fn map_password_error(err: AppError) -> ServiceError {
    match err {
        AppError::Validation(msg) => DomainError::WeakPassword(msg).into(),
        other => ServiceError::App(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_charset() {
        assert!(validate_username_charset("alice_01").is_ok());
        assert!(validate_username_charset("a.b-c").is_ok());
        assert!(validate_username_charset("bad name").is_err());
        assert!(validate_username_charset("bad!name").is_err());
    }

    #[test]
    fn test_weak_password_maps_to_domain_error() {
        let err = map_password_error(AppError::Validation("too short".into()));
        assert!(matches!(
            err,
            ServiceError::Domain(DomainError::WeakPassword(_))
        ));
        assert_eq!(err.status_code(), 400);
    }
}
