//! Credential service: accounts, bearer tokens, and request authentication.
//!
//! Register and login hand out an access/refresh pair. Access tokens guard
//! the inventory endpoints; refresh tokens only mint new access tokens.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod credentials;
pub mod extractor;
pub mod tokens;

pub use credentials::LocalCredentialService;
pub use extractor::AuthenticatedUser;
pub use tokens::{Claims, TokenIssuer, TokenKind};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Please provide all required fields")]
    MissingFields,
    #[error("Username already exists")]
    UsernameTaken,
    #[error("Authentication credentials were not provided")]
    MissingCredentials,
    #[error("No active account found with the given credentials")]
    InvalidCredentials,
    #[error("Token is invalid or expired: {0}")]
    InvalidToken(String),
    #[error("token signing failed: {0}")]
    Signing(jsonwebtoken::errors::Error),
}

/// Access and refresh token minted together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub refresh: String,
    pub access: String,
}

/// Caller identity recovered from a verified access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: u64,
    pub username: String,
}

#[async_trait]
pub trait CredentialService: Send + Sync {
    /// Creates an account and returns its first token pair.
    async fn register(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<TokenPair, AuthError>;

    async fn login(&self, username: &str, password: &str) -> Result<TokenPair, AuthError>;

    /// Exchanges a refresh token for a new access token.
    async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError>;

    /// Verifies an access token.
    fn authenticate(&self, access_token: &str) -> Result<Principal, AuthError>;
}
