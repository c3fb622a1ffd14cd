//! In-process DSP chain engine
//!
//! Authoritative owner of the effect chain and the chain preset store. It
//! validates every request the same way the audio engine does, records the
//! processing plan, and optionally persists a JSON snapshot after each
//! change. Sample processing itself lives elsewhere.

use crate::backend::ChainBackend;
use crate::error::{Result, SyncError};
use crate::protocol::UpdateStamp;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use soul_dsp::settings::eq::eq_presets;
use soul_dsp::{
    builtin_chain_presets, compressor_presets, crossfeed_presets, graphic_eq_presets,
    limiter_presets, stereo_presets, ChainError, ChainPreset, CompressorSettings,
    CrossfeedSettings, Effect, EffectChain, EffectKind, EffectSlot, EqBand, GraphicEqSettings,
    LimiterSettings, StereoSettings, SLOT_COUNT,
};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Persisted engine state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EngineSnapshot {
    chain: EffectChain,
    #[serde(default)]
    user_presets: Vec<ChainPreset>,
    #[serde(default = "first_user_preset_id")]
    next_preset_id: i64,
}

fn first_user_preset_id() -> i64 {
    builtin_chain_presets()
        .iter()
        .map(|p| p.id)
        .max()
        .unwrap_or(0)
        + 1
}

impl Default for EngineSnapshot {
    fn default() -> Self {
        Self {
            chain: EffectChain::new(),
            user_presets: Vec::new(),
            next_preset_id: first_user_preset_id(),
        }
    }
}

#[derive(Debug, Default)]
struct EngineState {
    snapshot: EngineSnapshot,
    /// Last stamp applied per slot
    stamps: [Option<UpdateStamp>; SLOT_COUNT],
}

/// Authoritative chain backend
#[derive(Debug, Default)]
pub struct DspEngine {
    state: Mutex<EngineState>,
    snapshot_path: Option<PathBuf>,
    /// Serializes snapshot writes so the newest state always lands last
    write_lock: tokio::sync::Mutex<()>,
}

impl DspEngine {
    /// Engine with an empty chain and no persistence
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine persisting to `path`, restoring the snapshot if one exists
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let snapshot = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let snapshot: EngineSnapshot = serde_json::from_slice(&bytes)?;
                tracing::info!(
                    path = %path.display(),
                    effects = snapshot.chain.populated_count(),
                    presets = snapshot.user_presets.len(),
                    "Restored DSP engine snapshot"
                );
                snapshot
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No DSP engine snapshot, starting empty");
                EngineSnapshot::default()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            state: Mutex::new(EngineState {
                snapshot,
                stamps: Default::default(),
            }),
            snapshot_path: Some(path),
            write_lock: tokio::sync::Mutex::new(()),
        })
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot_path.as_deref()
    }

    fn state(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current chain
    pub fn chain(&self) -> EffectChain {
        self.state().snapshot.chain.clone()
    }

    /// Effects that would run, in processing order
    pub fn processing_order(&self) -> Vec<(usize, EffectKind)> {
        self.state()
            .snapshot
            .chain
            .active_effects()
            .map(|(index, effect)| (index, effect.kind()))
            .collect()
    }

    /// Apply a mutation under the lock, then persist
    async fn mutate<T>(&self, f: impl FnOnce(&mut EngineState) -> Result<T>) -> Result<T> {
        let value = {
            let mut state = self.state();
            f(&mut *state)?
        };
        self.persist().await;
        Ok(value)
    }

    async fn persist(&self) {
        let Some(path) = &self.snapshot_path else {
            return;
        };
        let _guard = self.write_lock.lock().await;
        let bytes = {
            let state = self.state();
            serde_json::to_vec_pretty(&state.snapshot)
        };
        let result = match bytes {
            Ok(bytes) => tokio::fs::write(path, bytes).await.map_err(SyncError::from),
            Err(e) => Err(e.into()),
        };
        if let Err(e) = result {
            tracing::error!(path = %path.display(), error = %e, "Failed to persist DSP engine snapshot");
        }
    }

    fn all_presets(snapshot: &EngineSnapshot) -> Vec<ChainPreset> {
        let mut presets = builtin_chain_presets();
        let mut user = snapshot.user_presets.clone();
        user.sort_by(|a, b| a.name.cmp(&b.name));
        presets.extend(user);
        presets
    }
}

fn check_slot(slot_index: usize) -> Result<()> {
    if slot_index >= SLOT_COUNT {
        return Err(ChainError::InvalidSlot(slot_index).into());
    }
    Ok(())
}

#[async_trait]
impl ChainBackend for DspEngine {
    async fn get_dsp_chain(&self) -> Result<Vec<EffectSlot>> {
        Ok(self.state().snapshot.chain.to_vec())
    }

    async fn add_effect_to_chain(&self, slot_index: usize, effect: Effect) -> Result<()> {
        check_slot(slot_index)?;
        let kind = effect.kind();
        self.mutate(|state| {
            state.snapshot.chain.install(slot_index, effect.sanitized())?;
            Ok(())
        })
        .await?;
        tracing::info!(slot = slot_index, effect = %kind, "Effect added");
        Ok(())
    }

    async fn remove_effect_from_chain(&self, slot_index: usize) -> Result<()> {
        check_slot(slot_index)?;
        self.mutate(|state| {
            state.snapshot.chain.remove(slot_index)?;
            Ok(())
        })
        .await?;
        tracing::info!(slot = slot_index, "Effect removed");
        Ok(())
    }

    async fn toggle_effect(&self, slot_index: usize, enabled: bool) -> Result<()> {
        check_slot(slot_index)?;
        self.mutate(|state| {
            state.snapshot.chain.set_enabled(slot_index, enabled)?;
            Ok(())
        })
        .await?;
        tracing::info!(
            slot = slot_index,
            "{}",
            if enabled { "Effect enabled" } else { "Effect bypassed" }
        );
        Ok(())
    }

    async fn update_effect_parameters(
        &self,
        slot_index: usize,
        effect: Effect,
        stamp: Option<UpdateStamp>,
    ) -> Result<()> {
        check_slot(slot_index)?;
        let applied = self
            .mutate(|state| {
                if state.snapshot.chain.slot(slot_index)?.is_empty() {
                    return Err(ChainError::EmptySlot(slot_index).into());
                }
                if let Some(stamp) = stamp {
                    if stamp.is_stale_after(state.stamps[slot_index].as_ref()) {
                        return Ok(false);
                    }
                }
                // Rejects payloads for a different effect type
                state
                    .snapshot
                    .chain
                    .replace_effect(slot_index, effect.sanitized())?;
                if stamp.is_some() {
                    state.stamps[slot_index] = stamp;
                }
                Ok(true)
            })
            .await?;

        if applied {
            tracing::debug!(slot = slot_index, "Effect parameters updated");
        } else {
            tracing::debug!(slot = slot_index, ?stamp, "Dropped stale parameter update");
        }
        Ok(())
    }

    async fn clear_dsp_chain(&self) -> Result<()> {
        self.mutate(|state| {
            state.snapshot.chain.clear();
            Ok(())
        })
        .await?;
        tracing::info!("DSP chain cleared");
        Ok(())
    }

    async fn get_available_effects(&self) -> Result<Vec<String>> {
        Ok(EffectKind::ALL
            .iter()
            .map(|kind| kind.as_str().to_string())
            .collect())
    }

    async fn get_eq_presets(&self) -> Result<Vec<(String, Vec<EqBand>)>> {
        Ok(eq_presets())
    }

    async fn get_compressor_presets(&self) -> Result<Vec<(String, CompressorSettings)>> {
        Ok(compressor_presets())
    }

    async fn get_limiter_presets(&self) -> Result<Vec<(String, LimiterSettings)>> {
        Ok(limiter_presets())
    }

    async fn get_crossfeed_presets(&self) -> Result<Vec<(String, CrossfeedSettings)>> {
        Ok(crossfeed_presets())
    }

    async fn get_stereo_presets(&self) -> Result<Vec<(String, StereoSettings)>> {
        Ok(stereo_presets())
    }

    async fn get_graphic_eq_presets(&self) -> Result<Vec<(String, GraphicEqSettings)>> {
        Ok(graphic_eq_presets())
    }

    async fn get_dsp_chain_presets(&self) -> Result<Vec<ChainPreset>> {
        Ok(Self::all_presets(&self.state().snapshot))
    }

    async fn save_dsp_chain_preset(
        &self,
        name: String,
        description: Option<String>,
        effect_chain: Vec<Effect>,
    ) -> Result<i64> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(SyncError::Rejected("Preset name must not be empty".to_string()));
        }
        if effect_chain.len() > SLOT_COUNT {
            return Err(ChainError::TooManyEffects(effect_chain.len()).into());
        }
        if builtin_chain_presets().iter().any(|p| p.name == name) {
            return Err(SyncError::BuiltinPresetOverwrite(name));
        }

        let effect_chain: Vec<Effect> = effect_chain.into_iter().map(Effect::sanitized).collect();
        let now = chrono::Utc::now().timestamp();
        let id = self
            .mutate(|state| {
                let snapshot = &mut state.snapshot;
                if let Some(existing) = snapshot.user_presets.iter_mut().find(|p| p.name == name) {
                    existing.description = description;
                    existing.effect_chain = effect_chain;
                    existing.updated_at = now;
                    return Ok(existing.id);
                }

                let id = snapshot.next_preset_id;
                snapshot.next_preset_id += 1;
                snapshot.user_presets.push(ChainPreset {
                    id,
                    name: name.clone(),
                    description,
                    is_builtin: false,
                    effect_chain,
                    created_at: now,
                    updated_at: now,
                });
                Ok(id)
            })
            .await?;

        tracing::info!(preset_id = id, name = %name, "Chain preset saved");
        Ok(id)
    }

    async fn delete_dsp_chain_preset(&self, preset_id: i64) -> Result<()> {
        if builtin_chain_presets().iter().any(|p| p.id == preset_id) {
            return Err(SyncError::BuiltinPresetDelete);
        }
        self.mutate(|state| {
            let presets = &mut state.snapshot.user_presets;
            let before = presets.len();
            presets.retain(|p| p.id != preset_id);
            if presets.len() == before {
                return Err(SyncError::PresetNotFound(preset_id));
            }
            Ok(())
        })
        .await?;
        tracing::info!(preset_id, "Chain preset deleted");
        Ok(())
    }

    async fn load_dsp_chain_preset(&self, preset_id: i64) -> Result<()> {
        self.mutate(|state| {
            let preset = Self::all_presets(&state.snapshot)
                .into_iter()
                .find(|p| p.id == preset_id)
                .ok_or(SyncError::PresetNotFound(preset_id))?;
            state.snapshot.chain = preset.to_chain()?;
            Ok(())
        })
        .await?;
        tracing::info!(preset_id, "Chain preset loaded");
        Ok(())
    }
}
