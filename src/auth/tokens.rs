//! HS256 JWT minting and verification.
//!
//! Both token kinds share one secret; the `token_type` claim keeps a refresh
//! token from being accepted as an access token and vice versa.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::{AuthError, Principal};
use crate::config::MAX_TTL_SECS;

/// Clock skew tolerated on `exp`, in seconds.
const LEEWAY_SECS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub uid: u64,
    pub token_type: TokenKind,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn principal(&self) -> Principal {
        Principal {
            user_id: self.uid,
            username: self.sub.clone(),
        }
    }
}

#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, access_ttl_secs: u64, refresh_ttl_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl: lifetime(access_ttl_secs),
            refresh_ttl: lifetime(refresh_ttl_secs),
        }
    }

    pub fn issue(&self, principal: &Principal, kind: TokenKind) -> Result<String, AuthError> {
        let now = Utc::now();
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };
        let claims = Claims {
            sub: principal.username.clone(),
            uid: principal.user_id,
            token_type: kind,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };
        self.encode(&claims)
    }

    pub(crate) fn encode(&self, claims: &Claims) -> Result<String, AuthError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(AuthError::Signing)
    }

    /// Checks signature, expiry, and that the token is of the `expected` kind.
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = LEEWAY_SECS;

        let claims = jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|err| AuthError::InvalidToken(err.to_string()))?
            .claims;

        if claims.token_type != expected {
            return Err(AuthError::InvalidToken("wrong token type".to_string()));
        }
        Ok(claims)
    }
}

fn lifetime(secs: u64) -> Duration {
    // Capped value always fits in i64.
    Duration::seconds(secs.min(MAX_TTL_SECS) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("test-secret", 300, 86_400)
    }

    fn alice() -> Principal {
        Principal {
            user_id: 1,
            username: "alice".to_string(),
        }
    }

    #[test]
    fn access_token_round_trips_principal() {
        let issuer = issuer();
        let token = issuer.issue(&alice(), TokenKind::Access).unwrap();

        let claims = issuer.verify(&token, TokenKind::Access).unwrap();
        assert_eq!(claims.principal(), alice());
        assert_eq!(claims.exp - claims.iat, 300);
    }

    #[test]
    fn token_kinds_are_not_interchangeable() {
        let issuer = issuer();
        let refresh = issuer.issue(&alice(), TokenKind::Refresh).unwrap();
        let access = issuer.issue(&alice(), TokenKind::Access).unwrap();

        assert!(matches!(
            issuer.verify(&refresh, TokenKind::Access),
            Err(AuthError::InvalidToken(_))
        ));
        assert!(issuer.verify(&access, TokenKind::Refresh).is_err());
    }

    #[test]
    fn oversized_lifetime_is_capped() {
        let issuer = TokenIssuer::new("test-secret", u64::MAX, u64::MAX);
        let token = issuer.issue(&alice(), TokenKind::Refresh).unwrap();

        let claims = issuer.verify(&token, TokenKind::Refresh).unwrap();
        assert_eq!((claims.exp - claims.iat) as u64, MAX_TTL_SECS);
    }

    #[test]
    fn foreign_secret_is_rejected() {
        let token = TokenIssuer::new("other-secret", 300, 300)
            .issue(&alice(), TokenKind::Access)
            .unwrap();

        assert!(issuer().verify(&token, TokenKind::Access).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let issuer = issuer();
        let now = Utc::now().timestamp();
        let token = issuer
            .encode(&Claims {
                sub: "alice".to_string(),
                uid: 1,
                token_type: TokenKind::Access,
                iat: now - 600,
                exp: now - 120,
            })
            .unwrap();

        assert!(issuer.verify(&token, TokenKind::Access).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(issuer().verify("not.a.jwt", TokenKind::Access).is_err());
    }
}
