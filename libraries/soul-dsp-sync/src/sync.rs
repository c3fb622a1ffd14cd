//! Chain synchronization adapter
//!
//! Keeps a local mirror of the engine's chain for a single client.
//!
//! - Structural changes (add, remove, toggle, clear, load preset) are sent
//!   first and the mirror is reloaded from the engine once they succeed.
//!   Failures push a notification and leave the mirror untouched.
//! - Parameter edits are applied to the mirror immediately and sent in the
//!   background. They are never rolled back; failures are only logged.
//! - Each parameter write carries an [`UpdateStamp`] so the engine can drop
//!   writes that arrive out of order.
//! - Structural changes wait for in-flight parameter writes first, so a late
//!   write never lands on the effect that replaced its target.

use crate::backend::ChainBackend;
use crate::confirm::{ConfirmGate, CLEAR_CHAIN_PROMPT};
use crate::error::{Result, SyncError};
use crate::notifications::{Notification, Notifications};
use crate::protocol::{StampSequencer, UpdateStamp};
use soul_dsp::settings::eq::EqBand;
use soul_dsp::{
    ChainError, ChainPreset, CompressorSettings, CrossfeedSettings, Effect, EffectChain,
    EffectKind, EffectSlot, GraphicEqSettings, LimiterSettings, StereoSettings,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Local mirror of the engine's effect chain
pub struct ChainSync<B> {
    backend: Arc<B>,
    chain: EffectChain,
    sequencer: StampSequencer,
    /// Held shared by every in-flight parameter write
    writes: Arc<RwLock<()>>,
    expanded_slot: Option<usize>,
    picker_slot: Option<usize>,
    is_loading: bool,
    notifications: Notifications,
}

impl<B> ChainSync<B>
where
    B: ChainBackend + 'static,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self::with_session(backend, Uuid::new_v4())
    }

    /// Adapter with a fixed session id for its parameter stamps
    pub fn with_session(backend: Arc<B>, session: Uuid) -> Self {
        Self {
            backend,
            chain: EffectChain::new(),
            sequencer: StampSequencer::with_session(session),
            writes: Arc::new(RwLock::new(())),
            expanded_slot: None,
            picker_slot: None,
            is_loading: false,
            notifications: Notifications::new(),
        }
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    pub fn session(&self) -> Uuid {
        self.sequencer.session()
    }

    pub fn chain(&self) -> &EffectChain {
        &self.chain
    }

    pub fn slots(&self) -> &[EffectSlot] {
        self.chain.slots()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn expanded_slot(&self) -> Option<usize> {
        self.expanded_slot
    }

    pub fn picker_slot(&self) -> Option<usize> {
        self.picker_slot
    }

    // ===== Lifecycle =====

    /// Initial load. A failure is logged and notified and leaves an empty chain.
    pub async fn mount(&mut self) {
        self.is_loading = true;
        if let Err(e) = self.reload().await {
            tracing::error!(error = %e, "Failed to load DSP chain");
            self.chain = EffectChain::new();
            self.notify(format!("Failed to load DSP chain: {e}"));
        }
        self.is_loading = false;
    }

    /// Replace the mirror with the engine's chain.
    ///
    /// A malformed response (wrong slot count or out-of-order indices) is
    /// rejected as a whole and the mirror is left as it was.
    pub async fn reload(&mut self) -> Result<()> {
        let slots = self.backend.get_dsp_chain().await?;
        let chain = EffectChain::from_slots(slots)
            .map_err(|e| SyncError::InvalidResponse(e.to_string()))?;
        tracing::debug!(effects = chain.populated_count(), "DSP chain reloaded");
        self.chain = chain;
        Ok(())
    }

    async fn reload_after(&mut self, action: &str) {
        if let Err(e) = self.reload().await {
            tracing::warn!(action, error = %e, "Reload after structural change failed");
            self.notify(format!("Failed to reload DSP chain: {e}"));
        }
    }

    // ===== Structural operations =====

    /// Add an effect with its default parameters
    pub async fn add_effect(&mut self, slot_index: usize, kind: EffectKind) -> Result<()> {
        let effect = kind.default_effect();
        self.settle_writes().await;
        if let Err(e) = self.backend.add_effect_to_chain(slot_index, effect).await {
            return Err(self.fail("Failed to add effect", e));
        }
        tracing::info!(slot = slot_index, effect = %kind, "Effect added");
        self.picker_slot = None;
        self.reload_after("add").await;
        Ok(())
    }

    pub async fn remove_effect(&mut self, slot_index: usize) -> Result<()> {
        if let Err(e) = self.require_effect(slot_index).map(|_| ()) {
            return Err(self.fail("Failed to remove effect", e));
        }
        self.settle_writes().await;
        if let Err(e) = self.backend.remove_effect_from_chain(slot_index).await {
            return Err(self.fail("Failed to remove effect", e));
        }
        tracing::info!(slot = slot_index, "Effect removed");
        if self.expanded_slot == Some(slot_index) {
            self.expanded_slot = None;
        }
        self.reload_after("remove").await;
        Ok(())
    }

    pub async fn toggle_effect(&mut self, slot_index: usize, enabled: bool) -> Result<()> {
        if let Err(e) = self.require_effect(slot_index).map(|_| ()) {
            return Err(self.fail("Failed to toggle effect", e));
        }
        if let Err(e) = self.backend.toggle_effect(slot_index, enabled).await {
            return Err(self.fail("Failed to toggle effect", e));
        }
        tracing::info!(slot = slot_index, enabled, "Effect toggled");
        self.reload_after("toggle").await;
        Ok(())
    }

    /// Clear every slot after the gate confirms. Returns `Ok(false)` when the
    /// user declined, in which case the backend is not contacted.
    pub async fn clear_chain(&mut self, gate: &impl ConfirmGate) -> Result<bool> {
        if !gate.confirm(CLEAR_CHAIN_PROMPT) {
            tracing::debug!("Clear chain cancelled");
            return Ok(false);
        }
        self.settle_writes().await;
        if let Err(e) = self.backend.clear_dsp_chain().await {
            return Err(self.fail("Failed to clear DSP chain", e));
        }
        tracing::info!("DSP chain cleared");
        self.expanded_slot = None;
        self.reload_after("clear").await;
        Ok(true)
    }

    // ===== Parameter edits =====

    /// Apply new parameters locally and send them in the background.
    ///
    /// The returned handle resolves once the write finished; callers may
    /// drop it. Write failures are logged and never rolled back.
    pub fn update_effect_parameters(
        &mut self,
        slot_index: usize,
        effect: Effect,
    ) -> Result<JoinHandle<()>> {
        let effect = effect.sanitized();
        if let Err(e) = self.chain.replace_effect(slot_index, effect.clone()) {
            tracing::warn!(slot = slot_index, error = %e, "Rejected parameter update");
            return Err(e.into());
        }
        let stamp = self.sequencer.next(slot_index);
        Ok(self.spawn_write(slot_index, effect, stamp))
    }

    /// Edit the slot's current payload in place, then send it like
    /// [`update_effect_parameters`](Self::update_effect_parameters)
    pub fn edit_effect(
        &mut self,
        slot_index: usize,
        edit: impl FnOnce(&mut Effect),
    ) -> Result<JoinHandle<()>> {
        let mut effect = self.require_effect(slot_index)?.clone();
        edit(&mut effect);
        self.update_effect_parameters(slot_index, effect)
    }

    /// Reset a slot's parameters to the defaults for its effect type
    pub fn reset_effect(&mut self, slot_index: usize) -> Result<JoinHandle<()>> {
        self.edit_effect(slot_index, Effect::reset_to_default)
    }

    fn spawn_write(
        &self,
        slot_index: usize,
        effect: Effect,
        stamp: Option<UpdateStamp>,
    ) -> JoinHandle<()> {
        let backend = Arc::clone(&self.backend);
        // Never contended: the exclusive side is only taken under `&mut self`
        let in_flight = Arc::clone(&self.writes).try_read_owned().ok();
        tokio::spawn(async move {
            let _in_flight = in_flight;
            if let Err(e) = backend
                .update_effect_parameters(slot_index, effect, stamp)
                .await
            {
                tracing::warn!(slot = slot_index, error = %e, "Failed to update effect parameters");
            }
        })
    }

    // ===== Chain presets =====

    /// Chain presets, or an empty list if the engine cannot provide them
    pub async fn chain_presets(&self) -> Vec<ChainPreset> {
        or_empty("chain", self.backend.get_dsp_chain_presets().await)
    }

    /// Save the populated effects, in slot order, as a named preset
    pub async fn save_chain_preset(
        &mut self,
        name: impl Into<String>,
        description: Option<String>,
    ) -> Result<i64> {
        let name = name.into();
        let effects = self.chain.effects();
        match self
            .backend
            .save_dsp_chain_preset(name.clone(), description, effects)
            .await
        {
            Ok(id) => {
                tracing::info!(preset_id = id, name = %name, "Chain preset saved");
                Ok(id)
            }
            Err(e) => Err(self.fail("Failed to save preset", e)),
        }
    }

    pub async fn delete_chain_preset(&mut self, preset_id: i64) -> Result<()> {
        if let Err(e) = self.backend.delete_dsp_chain_preset(preset_id).await {
            return Err(self.fail("Failed to delete preset", e));
        }
        tracing::info!(preset_id, "Chain preset deleted");
        Ok(())
    }

    pub async fn load_chain_preset(&mut self, preset_id: i64) -> Result<()> {
        self.settle_writes().await;
        if let Err(e) = self.backend.load_dsp_chain_preset(preset_id).await {
            return Err(self.fail("Failed to load preset", e));
        }
        tracing::info!(preset_id, "Chain preset loaded");
        self.expanded_slot = None;
        self.picker_slot = None;
        self.reload_after("load preset").await;
        Ok(())
    }

    // ===== Preset tables =====

    /// Effect types offered by the picker, in engine order
    pub async fn available_effects(&self) -> Vec<EffectKind> {
        or_empty("effect type", self.backend.get_available_effects().await)
            .into_iter()
            .filter_map(|tag| match tag.parse::<EffectKind>() {
                Ok(kind) => Some(kind),
                Err(e) => {
                    tracing::debug!(error = %e, "Skipping unknown effect type");
                    None
                }
            })
            .collect()
    }

    pub async fn eq_presets(&self) -> Vec<(String, Vec<EqBand>)> {
        or_empty("EQ", self.backend.get_eq_presets().await)
    }

    pub async fn compressor_presets(&self) -> Vec<(String, CompressorSettings)> {
        or_empty("compressor", self.backend.get_compressor_presets().await)
    }

    pub async fn limiter_presets(&self) -> Vec<(String, LimiterSettings)> {
        or_empty("limiter", self.backend.get_limiter_presets().await)
    }

    pub async fn crossfeed_presets(&self) -> Vec<(String, CrossfeedSettings)> {
        or_empty("crossfeed", self.backend.get_crossfeed_presets().await)
    }

    pub async fn stereo_presets(&self) -> Vec<(String, StereoSettings)> {
        or_empty("stereo", self.backend.get_stereo_presets().await)
    }

    pub async fn graphic_eq_presets(&self) -> Vec<(String, GraphicEqSettings)> {
        or_empty("graphic EQ", self.backend.get_graphic_eq_presets().await)
    }

    // ===== Editor state =====

    /// Open the editor for a slot, or close it if it is already open.
    /// At most one editor is open at a time.
    pub fn toggle_expanded(&mut self, slot_index: usize) {
        self.expanded_slot = if self.expanded_slot == Some(slot_index) {
            None
        } else {
            Some(slot_index)
        };
    }

    pub fn collapse(&mut self) {
        self.expanded_slot = None;
    }

    pub fn open_picker(&mut self, slot_index: usize) {
        self.picker_slot = Some(slot_index);
    }

    pub fn close_picker(&mut self) {
        self.picker_slot = None;
    }

    // ===== Notifications =====

    pub fn notifications(&self) -> &[Notification] {
        self.notifications.all()
    }

    /// Notifications still visible at `now`
    pub fn active_notifications(&self, now: Instant) -> Vec<&Notification> {
        self.notifications.active(now).collect()
    }

    pub fn dismiss_notification(&mut self, id: u64) -> bool {
        self.notifications.dismiss(id)
    }

    pub fn prune_notifications(&mut self, now: Instant) {
        self.notifications.prune(now);
    }

    fn notify(&mut self, message: String) {
        self.notifications.push(message, Instant::now());
    }

    /// Wait until every parameter write sent so far has finished
    async fn settle_writes(&self) {
        drop(self.writes.write().await);
    }

    /// Log and notify a structural failure, handing the error back
    fn fail(&mut self, action: &str, error: SyncError) -> SyncError {
        tracing::warn!(error = %error, "{action}");
        self.notify(format!("{action}: {error}"));
        error
    }

    fn require_effect(&self, slot_index: usize) -> Result<&Effect> {
        self.chain
            .slot(slot_index)?
            .effect
            .as_ref()
            .ok_or_else(|| ChainError::EmptySlot(slot_index).into())
    }
}

fn or_empty<T>(table: &str, result: Result<Vec<T>>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        tracing::warn!(table, error = %e, "Failed to fetch presets");
        Vec::new()
    })
}
