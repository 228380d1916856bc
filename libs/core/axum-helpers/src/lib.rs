//! # Axum Helpers
//!
//! Utilities and middleware shared by Axum-based HTTP services.
//!
//! ## Modules
//!
//! - **[`errors`]**: the `AppError` type and the wire error-body shapes
//! - **[`extractors`]**: custom extractors (validated JSON)
//! - **[`server`]**: server setup, health endpoint, graceful shutdown

pub mod errors;
pub mod extractors;
pub mod server;

// Re-export error types
pub use errors::{AppError, ErrorResponse};

// Re-export extractors
pub use extractors::ValidatedJson;

// Re-export server types
pub use server::{create_app, create_router, health_router, shutdown_signal, HealthResponse};
