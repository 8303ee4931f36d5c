//! API Module
//!
//! HTTP handlers and routing for the inventory REST API.
//!
//! # Endpoints
//! - `GET /list`, `GET /retrieve/:pk`, `POST /create`, `PUT|PATCH /update/:pk`,
//!   `DELETE /delete/:pk` - Inventory operations
//! - `POST /api/register/`, `POST /api/login/`, `POST /api/token/refresh/` - Credentials
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod extract;
pub mod handlers;
pub mod routes;

pub use extract::{ApiJson, ApiPath};
pub use handlers::*;
pub use routes::create_router;
