//! Soul DSP Engine Library
//!
//! HTTP front end for the in-process DSP chain engine. Every backend call is
//! exposed as `POST /api/invoke/<call>` with a camelCase JSON body.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

// Re-export commonly used types for convenience
pub use api::create_router;
pub use config::EngineConfig;
pub use error::{Result, ServerError};
pub use state::AppState;
