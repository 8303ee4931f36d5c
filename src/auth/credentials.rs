//! In-process account registry backed by a [`TokenIssuer`].

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::{AuthError, CredentialService, Principal, TokenIssuer, TokenKind, TokenPair};

#[derive(Debug, Clone)]
struct Account {
    id: u64,
    email: String,
    password_digest: String,
    date_joined: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Accounts {
    last_id: u64,
    by_username: HashMap<String, Account>,
}

pub struct LocalCredentialService {
    accounts: RwLock<Accounts>,
    issuer: TokenIssuer,
    pepper: String,
}

impl LocalCredentialService {
    /// `pepper` is mixed into every password digest.
    pub fn new(issuer: TokenIssuer, pepper: impl Into<String>) -> Self {
        Self {
            accounts: RwLock::new(Accounts::default()),
            issuer,
            pepper: pepper.into(),
        }
    }

    fn digest(&self, username: &str, password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.pepper.as_bytes());
        hasher.update(b"|");
        hasher.update(username.as_bytes());
        hasher.update(b"|");
        hasher.update(password.as_bytes());
        hex::encode(hasher.finalize())
    }

    fn pair_for(&self, principal: &Principal) -> Result<TokenPair, AuthError> {
        Ok(TokenPair {
            refresh: self.issuer.issue(principal, TokenKind::Refresh)?,
            access: self.issuer.issue(principal, TokenKind::Access)?,
        })
    }

    #[cfg(test)]
    async fn email_of(&self, username: &str) -> Option<String> {
        self.accounts
            .read()
            .await
            .by_username
            .get(username)
            .map(|account| account.email.clone())
    }
}

#[async_trait]
impl CredentialService for LocalCredentialService {
    async fn register(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<TokenPair, AuthError> {
        if username.is_empty() || password.is_empty() || email.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let principal = {
            let mut accounts = self.accounts.write().await;
            if accounts.by_username.contains_key(username) {
                return Err(AuthError::UsernameTaken);
            }
            accounts.last_id += 1;
            let account = Account {
                id: accounts.last_id,
                email: email.to_string(),
                password_digest: self.digest(username, password),
                date_joined: Utc::now(),
            };
            info!(
                user_id = account.id,
                username,
                joined = %account.date_joined,
                "account registered"
            );
            let principal = Principal {
                user_id: account.id,
                username: username.to_string(),
            };
            accounts.by_username.insert(username.to_string(), account);
            principal
        };

        self.pair_for(&principal)
    }

    async fn login(&self, username: &str, password: &str) -> Result<TokenPair, AuthError> {
        let principal = {
            let accounts = self.accounts.read().await;
            let account = accounts
                .by_username
                .get(username)
                .filter(|account| account.password_digest == self.digest(username, password))
                .ok_or_else(|| {
                    warn!(username, "login rejected");
                    AuthError::InvalidCredentials
                })?;
            debug!(user_id = account.id, username, email = %account.email, "login accepted");
            Principal {
                user_id: account.id,
                username: username.to_string(),
            }
        };

        self.pair_for(&principal)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        let claims = self.issuer.verify(refresh_token, TokenKind::Refresh)?;
        self.issuer.issue(&claims.principal(), TokenKind::Access)
    }

    fn authenticate(&self, access_token: &str) -> Result<Principal, AuthError> {
        Ok(self
            .issuer
            .verify(access_token, TokenKind::Access)?
            .principal())
    }
}
