//! Soul DSP Engine Client
//!
//! HTTP transport for the DSP chain backend contract. [`EngineClient`]
//! implements [`soul_dsp_sync::ChainBackend`], so a
//! [`ChainSync`](soul_dsp_sync::ChainSync) can mirror a remote engine the
//! same way it mirrors an in-process one.
//!
//! # Example
//!
//! ```ignore
//! use soul_dsp_client::{ClientConfig, EngineClient};
//!
//! let client = EngineClient::new(ClientConfig::new("http://127.0.0.1:8790"))?;
//! let health = client.health().await?;
//! println!("Engine {} ({})", health.version, health.status);
//! ```

mod client;
mod error;
mod types;

pub use client::EngineClient;
pub use error::{ClientError, Result};
pub use types::{ClientConfig, HealthResponse};
