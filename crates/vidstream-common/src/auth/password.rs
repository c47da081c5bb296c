//! Password hashing and strength rules
//!
//! Hashes use Argon2id with a fresh random salt per password. The
//! strength rules mirror what the registration form promises users.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::AppError;

/// Shortest password accepted at registration
pub const MIN_PASSWORD_LEN: usize = 8;
/// Longest password accepted at registration
pub const MAX_PASSWORD_LEN: usize = 72;

/// Argon2id hashing, wrapped so services take it by injection
#[derive(Debug, Clone, Default)]
pub struct PasswordService;

impl PasswordService {
    /// Create a new password service
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Hash a password with a fresh random salt
    ///
    /// # Errors
    /// Returns an error when the hasher itself fails
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(anyhow::anyhow!("password hashing failed: {e}")))
    }

    /// Check a password against a stored hash
    ///
    /// # Errors
    /// Returns an error when the stored hash cannot be parsed
    pub fn verify(&self, password: &str, stored: &str) -> Result<bool, AppError> {
        let parsed = PasswordHash::new(stored)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("stored hash unreadable: {e}")))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    /// Like [`verify`](Self::verify), but a mismatch becomes
    /// `InvalidCredentials`
    ///
    /// # Errors
    /// Returns `AppError::InvalidCredentials` when the password does
    /// not match
    pub fn verify_or_error(&self, password: &str, stored: &str) -> Result<(), AppError> {
        if self.verify(password, stored)? {
            Ok(())
        } else {
            Err(AppError::InvalidCredentials)
        }
    }
}

/// Reject passwords outside the length window or missing a character
/// class
///
/// Rules: [`MIN_PASSWORD_LEN`]..=[`MAX_PASSWORD_LEN`] bytes, at least
/// one uppercase letter, one lowercase letter and one digit.
///
/// # Errors
/// Returns a validation error naming the first rule that failed
pub fn validate_password_strength(password: &str) -> Result<(), AppError> {
    let failed = if password.len() < MIN_PASSWORD_LEN {
        Some(format!("must be at least {MIN_PASSWORD_LEN} characters"))
    } else if password.len() > MAX_PASSWORD_LEN {
        Some(format!("must be at most {MAX_PASSWORD_LEN} characters"))
    } else if !password.chars().any(char::is_uppercase) {
        Some("must contain an uppercase letter".to_string())
    } else if !password.chars().any(char::is_lowercase) {
        Some("must contain a lowercase letter".to_string())
    } else if !password.chars().any(|c| c.is_ascii_digit()) {
        Some("must contain a digit".to_string())
    } else {
        None
    };

    match failed {
        Some(rule) => Err(AppError::Validation(format!("Password {rule}"))),
        None => Ok(()),
    }
}
