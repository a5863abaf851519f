//! Authentication Module
//!
//! RSA-signed session tokens and Argon2 credential hashing.

mod password;
mod token;

pub use password::CredentialHasher;
pub use token::{TokenAuth, TokenClaims, DEFAULT_ISSUER, DEFAULT_TOKEN_TTL};

use thiserror::Error;

// == Auth Error Enum ==
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Key material could not be parsed or does not form a pair
    #[error("Key error: {0}")]
    KeyError(String),

    /// Token could not be parsed or failed claim validation
    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

impl AuthError {
    /// Returns `true` for failures caused by the presented token.
    pub fn is_token_error(&self) -> bool {
        matches!(
            self,
            AuthError::Malformed(_) | AuthError::InvalidSignature | AuthError::Expired
        )
    }
}
