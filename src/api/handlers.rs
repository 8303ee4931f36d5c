//! API Handlers
//!
//! HTTP request handlers for the inventory and credential endpoints.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::warn;

use super::extract::{ApiJson, ApiPath};
use crate::auth::{
    AuthError, AuthenticatedUser, CredentialService, LocalCredentialService, TokenIssuer,
};
use crate::cache::InMemoryCache;
use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::inventory::InventoryService;
use crate::models::{
    AccessTokenResponse, HealthResponse, Inventory, InventoryPatch, LoginRequest, NewInventory,
    RefreshRequest, RegisterRequest, StatsResponse, TokenPairResponse,
};
use crate::store::{EntityStore, InMemoryStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub inventory: InventoryService,
    pub credentials: Arc<dyn CredentialService>,
    /// Concrete cache handle for stats and the sweeper; the service only sees the trait.
    pub cache: InMemoryCache,
    /// Whether update endpoints reject anonymous callers.
    pub update_requires_auth: bool,
}

impl AppState {
    pub fn new(
        inventory: InventoryService,
        credentials: Arc<dyn CredentialService>,
        cache: InMemoryCache,
    ) -> Self {
        Self {
            inventory,
            credentials,
            cache,
            update_requires_auth: false,
        }
    }

    pub fn with_update_auth(mut self, required: bool) -> Self {
        self.update_requires_auth = required;
        self
    }

    /// Wires the in-memory store, cache and credential service from configuration.
    pub fn from_config(config: &Config) -> Self {
        let cache = InMemoryCache::new(config.max_entries);
        let store: Arc<dyn EntityStore> = Arc::new(InMemoryStore::new());
        let inventory =
            InventoryService::new(store, Arc::new(cache.clone())).with_ttl(config.cache_ttl());

        let issuer = TokenIssuer::new(
            &config.jwt_secret,
            config.access_token_ttl,
            config.refresh_token_ttl,
        );
        let credentials = Arc::new(LocalCredentialService::new(
            issuer,
            config.jwt_secret.clone(),
        ));

        Self::new(inventory, credentials, cache).with_update_auth(config.update_requires_auth)
    }

    fn check_update_auth(&self, user: &Option<AuthenticatedUser>) -> Result<()> {
        if self.update_requires_auth && user.is_none() {
            return Err(AuthError::MissingCredentials.into());
        }
        Ok(())
    }
}

impl FromRef<AppState> for Arc<dyn CredentialService> {
    fn from_ref(state: &AppState) -> Self {
        state.credentials.clone()
    }
}

// == Inventory ==

/// GET /list
pub async fn list_handler(
    _user: AuthenticatedUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Inventory>>> {
    Ok(Json(state.inventory.list().await?))
}

/// GET /retrieve/:pk
///
/// An unknown id answers 404 with an empty body.
pub async fn retrieve_handler(
    _user: AuthenticatedUser,
    State(state): State<AppState>,
    ApiPath(pk): ApiPath<u64>,
) -> Result<Response> {
    Ok(match state.inventory.retrieve(pk).await? {
        Some(record) => Json(record).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    })
}

/// POST /create
pub async fn create_handler(
    _user: AuthenticatedUser,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewInventory>,
) -> Result<(StatusCode, Json<Inventory>)> {
    let record = state.inventory.create(payload).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /update/:pk
///
/// Anonymous callers are let through unless `update_requires_auth` is set.
pub async fn update_handler(
    user: Option<AuthenticatedUser>,
    State(state): State<AppState>,
    ApiPath(pk): ApiPath<u64>,
    ApiJson(payload): ApiJson<NewInventory>,
) -> Result<Json<Inventory>> {
    state.check_update_auth(&user)?;
    if user.is_none() {
        warn!(id = pk, "anonymous inventory update");
    }
    Ok(Json(state.inventory.update(pk, payload).await?))
}

/// PATCH /update/:pk
pub async fn patch_handler(
    user: Option<AuthenticatedUser>,
    State(state): State<AppState>,
    ApiPath(pk): ApiPath<u64>,
    ApiJson(patch): ApiJson<InventoryPatch>,
) -> Result<Json<Inventory>> {
    state.check_update_auth(&user)?;
    if user.is_none() {
        warn!(id = pk, "anonymous inventory update");
    }
    Ok(Json(state.inventory.partial_update(pk, patch).await?))
}

/// DELETE /delete/:pk
pub async fn delete_handler(
    _user: AuthenticatedUser,
    State(state): State<AppState>,
    ApiPath(pk): ApiPath<u64>,
) -> Result<StatusCode> {
    state.inventory.delete(pk).await?;
    Ok(StatusCode::NO_CONTENT)
}

// == Credentials ==

/// POST /api/register/
pub async fn register_handler(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<TokenPairResponse>)> {
    let (username, password, email) = req.fields().ok_or(AuthError::MissingFields)?;
    let pair = state.credentials.register(username, password, email).await?;
    Ok((StatusCode::CREATED, Json(pair.into())))
}

/// POST /api/login/
pub async fn login_handler(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<TokenPairResponse>> {
    let (username, password) = req.fields().ok_or(AuthError::MissingFields)?;
    let pair = state.credentials.login(username, password).await?;
    Ok(Json(pair.into()))
}

/// POST /api/token/refresh/
pub async fn refresh_handler(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RefreshRequest>,
) -> Result<Json<AccessTokenResponse>> {
    let token = req
        .refresh
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Validation("refresh token is required".to_string()))?;
    let access = state.credentials.refresh(token).await?;
    Ok(Json(AccessTokenResponse { access }))
}

// == Operations ==

/// GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache.stats().await.into())
}

/// GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.inventory.store().backend_name()))
}
