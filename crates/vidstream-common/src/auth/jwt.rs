//! Signed-token issuance and verification
//!
//! Access and refresh tokens share one HS256 secret and one claims
//! shape; they differ only in lifetime and in the `token_type` claim.
//! The service layer pins the refresh token to the user row, so a
//! rotated-out refresh token fails there even though its signature
//! still verifies here.

use chrono::Utc;
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use vidstream_core::Snowflake;

use crate::error::AppError;

/// Which of the two token roles a claim set was minted for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Claims carried inside every issued token
///
/// `sub` holds the user id in its canonical decimal-string form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub token_type: TokenType,
}

impl Claims {
    fn minted(user_id: Snowflake, token_type: TokenType, lifetime_secs: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: user_id.to_string(),
            iat: now,
            exp: now + lifetime_secs,
            token_type,
        }
    }

    /// The user id the token was issued to
    ///
    /// # Errors
    /// Fails when the subject is not a decimal id, which only happens
    /// with a token minted by someone else holding the secret.
    pub fn user_id(&self) -> Result<Snowflake, AppError> {
        Snowflake::parse(&self.sub).map_err(|_| AppError::InvalidToken)
    }

    #[must_use]
    pub fn is_refresh_token(&self) -> bool {
        self.token_type == TokenType::Refresh
    }
}

/// An access/refresh pair as handed to the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

/// Mints and verifies the two token kinds
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
}

impl JwtService {
    #[must_use]
    pub fn new(secret: &str, access_token_expiry: i64, refresh_token_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expiry,
            refresh_token_expiry,
        }
    }

    fn lifetime(&self, token_type: TokenType) -> i64 {
        match token_type {
            TokenType::Access => self.access_token_expiry,
            TokenType::Refresh => self.refresh_token_expiry,
        }
    }

    fn mint(&self, user_id: Snowflake, token_type: TokenType) -> Result<String, AppError> {
        let claims = Claims::minted(user_id, token_type, self.lifetime(token_type));
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("token encoding failed: {e}")))
    }

    /// Mint a fresh access/refresh pair for a user
    ///
    /// # Errors
    /// Fails only when encoding fails, which signals a broken key.
    pub fn generate_token_pair(&self, user_id: Snowflake) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access_token: self.mint(user_id, TokenType::Access)?,
            refresh_token: self.mint(user_id, TokenType::Refresh)?,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
        })
    }

    /// Verify signature and expiry, then require the expected role
    fn verify(&self, token: &str, expected: TokenType) -> Result<Claims, AppError> {
        let data =
            decode::<Claims>(token, &self.decoding_key, &Validation::default()).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => AppError::TokenExpired,
                    _ => AppError::InvalidToken,
                }
            })?;

        if data.claims.token_type != expected {
            return Err(AppError::InvalidToken);
        }
        Ok(data.claims)
    }

    /// Verify a token presented as a bearer credential
    ///
    /// # Errors
    /// Returns `TokenExpired` past the expiry, `InvalidToken` for a bad
    /// signature, garbage input, or a refresh token used as access.
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, AppError> {
        self.verify(token, TokenType::Access)
    }

    /// Verify a token presented for rotation
    ///
    /// # Errors
    /// Returns `TokenExpired` past the expiry, `InvalidToken` for a bad
    /// signature, garbage input, or an access token used for rotation.
    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        self.verify(token, TokenType::Refresh)
    }
}

// The keys never appear in logs.
impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .finish_non_exhaustive()
    }
}
