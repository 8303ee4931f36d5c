//! Request DTOs for the credential endpoints
//!
//! Fields are optional at the serde level so that a missing field produces
//! the API's own 400 instead of a JSON extractor rejection.

use serde::Deserialize;

/// Request body for POST /api/register/
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl RegisterRequest {
    /// Returns `(username, password, email)` when all three are present and non-empty.
    pub fn fields(&self) -> Option<(&str, &str, &str)> {
        Some((
            non_empty(&self.username)?,
            non_empty(&self.password)?,
            non_empty(&self.email)?,
        ))
    }
}

/// Request body for POST /api/login/
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn fields(&self) -> Option<(&str, &str)> {
        Some((non_empty(&self.username)?, non_empty(&self.password)?))
    }
}

/// Request body for POST /api/token/refresh/
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
