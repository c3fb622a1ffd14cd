//! Soul DSP chain synchronization
//!
//! The contract between clients and the authoritative owner of the DSP
//! effect chain, plus both ends of it:
//!
//! - [`ChainBackend`]: one async method per named call
//! - [`ChainSync`]: client-side mirror with optimistic parameter edits
//! - [`DspEngine`]: in-process authoritative engine
//!
//! # Example
//!
//! ```rust,no_run
//! use soul_dsp::EffectKind;
//! use soul_dsp_sync::{ChainSync, DspEngine};
//! use std::sync::Arc;
//!
//! # async fn example() -> soul_dsp_sync::Result<()> {
//! let engine = Arc::new(DspEngine::new());
//! let mut sync = ChainSync::new(engine);
//! sync.mount().await;
//! sync.add_effect(0, EffectKind::Limiter).await?;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod confirm;
pub mod engine;
pub mod error;
pub mod notifications;
pub mod protocol;
pub mod sync;

pub use backend::ChainBackend;
pub use confirm::{ConfirmGate, CLEAR_CHAIN_PROMPT};
pub use engine::DspEngine;
pub use error::{Result, SyncError};
pub use notifications::{Notification, Notifications, NOTIFICATION_TTL};
pub use protocol::{StampSequencer, UpdateStamp};
pub use sync::ChainSync;
