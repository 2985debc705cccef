//! HTTP surface of the todo application.
//!
//! # Responsibility
//! - Expose core services through versioned REST routes (V1 bare JSON,
//!   V2 enveloped).
//! - Translate service failures into problem-details responses.
//! - Load server configuration.
//!
//! # Invariants
//! - Each request opens its own SQLite connection on the blocking pool;
//!   handlers share nothing but the database path.

pub mod config;
pub mod envelope;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::{ConfigurationError, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use routes::router;
pub use state::AppState;
