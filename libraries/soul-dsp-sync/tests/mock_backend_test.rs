//! Adapter behaviour against a mocked backend
//!
//! Covers the failure paths the in-process engine never produces:
//! unreachable backends, malformed snapshots and declined confirmations.

use async_trait::async_trait;
use mockall::mock;
use mockall::predicate::*;
use soul_dsp::{
    ChainPreset, CompressorSettings, CrossfeedSettings, Effect, EffectKind, EffectSlot, EqBand,
    GraphicEqSettings, LimiterSettings, StereoSettings,
};
use soul_dsp_sync::{ChainBackend, ChainSync, Result, SyncError, UpdateStamp, NOTIFICATION_TTL};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

mock! {
    pub Backend {}

    #[async_trait]
    impl ChainBackend for Backend {
        async fn get_dsp_chain(&self) -> Result<Vec<EffectSlot>>;
        async fn add_effect_to_chain(&self, slot_index: usize, effect: Effect) -> Result<()>;
        async fn remove_effect_from_chain(&self, slot_index: usize) -> Result<()>;
        async fn toggle_effect(&self, slot_index: usize, enabled: bool) -> Result<()>;
        async fn update_effect_parameters(
            &self,
            slot_index: usize,
            effect: Effect,
            stamp: Option<UpdateStamp>,
        ) -> Result<()>;
        async fn clear_dsp_chain(&self) -> Result<()>;
        async fn get_available_effects(&self) -> Result<Vec<String>>;
        async fn get_eq_presets(&self) -> Result<Vec<(String, Vec<EqBand>)>>;
        async fn get_compressor_presets(&self) -> Result<Vec<(String, CompressorSettings)>>;
        async fn get_limiter_presets(&self) -> Result<Vec<(String, LimiterSettings)>>;
        async fn get_crossfeed_presets(&self) -> Result<Vec<(String, CrossfeedSettings)>>;
        async fn get_stereo_presets(&self) -> Result<Vec<(String, StereoSettings)>>;
        async fn get_graphic_eq_presets(&self) -> Result<Vec<(String, GraphicEqSettings)>>;
        async fn get_dsp_chain_presets(&self) -> Result<Vec<ChainPreset>>;
        async fn save_dsp_chain_preset(
            &self,
            name: String,
            description: Option<String>,
            effect_chain: Vec<Effect>,
        ) -> Result<i64>;
        async fn delete_dsp_chain_preset(&self, preset_id: i64) -> Result<()>;
        async fn load_dsp_chain_preset(&self, preset_id: i64) -> Result<()>;
    }
}

fn empty_chain() -> Vec<EffectSlot> {
    (0..4).map(EffectSlot::empty).collect()
}

fn chain_with_limiter(slot: usize) -> Vec<EffectSlot> {
    let mut slots = empty_chain();
    slots[slot] = EffectSlot::with_effect(slot, EffectKind::Limiter.default_effect());
    slots
}

fn unreachable() -> SyncError {
    SyncError::Unreachable("connection refused".to_string())
}

// ===== Mount and reload =====

mod loading {
    use super::*;

    #[tokio::test]
    async fn test_mount_failure_notifies_and_leaves_empty_chain() {
        let mut backend = MockBackend::new();
        backend
            .expect_get_dsp_chain()
            .times(1)
            .returning(|| Err(unreachable()));

        let mut sync = ChainSync::new(Arc::new(backend));
        sync.mount().await;

        assert!(!sync.is_loading());
        assert!(sync.chain().is_empty());
        assert_eq!(sync.notifications().len(), 1);
        assert!(sync.notifications()[0]
            .message
            .starts_with("Failed to load DSP chain"));
    }

    #[tokio::test]
    async fn test_short_snapshot_rejected_as_whole() {
        let mut backend = MockBackend::new();
        let mut seq = mockall::Sequence::new();
        backend
            .expect_get_dsp_chain()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(chain_with_limiter(1)));
        backend
            .expect_get_dsp_chain()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| {
                Ok(vec![
                    EffectSlot::empty(0),
                    EffectSlot::empty(1),
                    EffectSlot::empty(2),
                ])
            });

        let mut sync = ChainSync::new(Arc::new(backend));
        sync.mount().await;
        assert_eq!(sync.chain().populated_count(), 1);

        let err = sync.reload().await.unwrap_err();
        assert!(matches!(err, SyncError::InvalidResponse(_)));
        // Mirror keeps the last good snapshot
        assert_eq!(sync.chain().populated_count(), 1);
    }

    #[tokio::test]
    async fn test_misindexed_snapshot_rejected() {
        let mut backend = MockBackend::new();
        backend.expect_get_dsp_chain().returning(|| {
            let mut slots = empty_chain();
            slots.swap(0, 1);
            Ok(slots)
        });

        let mut sync = ChainSync::new(Arc::new(backend));
        assert!(matches!(
            sync.reload().await,
            Err(SyncError::InvalidResponse(_))
        ));
    }
}

// ===== Structural failures =====

mod structural_failures {
    use super::*;

    #[tokio::test]
    async fn test_declined_clear_issues_no_call() {
        let mut backend = MockBackend::new();
        backend
            .expect_get_dsp_chain()
            .returning(|| Ok(chain_with_limiter(0)));
        backend.expect_clear_dsp_chain().never();

        let mut sync = ChainSync::new(Arc::new(backend));
        sync.mount().await;

        let cleared = sync.clear_chain(&|_: &str| false).await.unwrap();
        assert!(!cleared);
        assert_eq!(sync.chain().populated_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_add_leaves_chain_unchanged() {
        let mut backend = MockBackend::new();
        backend
            .expect_get_dsp_chain()
            .times(1)
            .returning(|| Ok(empty_chain()));
        backend
            .expect_add_effect_to_chain()
            .with(eq(2), always())
            .times(1)
            .returning(|_, _| Err(unreachable()));

        let mut sync = ChainSync::new(Arc::new(backend));
        sync.mount().await;
        sync.open_picker(2);

        assert!(sync.add_effect(2, EffectKind::Limiter).await.is_err());
        assert!(sync.chain().is_empty());
        assert_eq!(sync.picker_slot(), Some(2));
        assert_eq!(sync.notifications().len(), 1);
    }

    #[tokio::test]
    async fn test_add_sends_centralized_defaults() {
        let mut backend = MockBackend::new();
        let mut seq = mockall::Sequence::new();
        backend
            .expect_get_dsp_chain()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(empty_chain()));
        backend
            .expect_add_effect_to_chain()
            .with(eq(0), eq(EffectKind::Compressor.default_effect()))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        backend
            .expect_get_dsp_chain()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| {
                let mut slots = empty_chain();
                slots[0] =
                    EffectSlot::with_effect(0, EffectKind::Compressor.default_effect());
                Ok(slots)
            });

        let mut sync = ChainSync::new(Arc::new(backend));
        sync.mount().await;
        sync.add_effect(0, EffectKind::Compressor).await.unwrap();
        assert_eq!(sync.chain().populated_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_toggle_notifies_and_skips_reload() {
        let mut backend = MockBackend::new();
        backend
            .expect_get_dsp_chain()
            .times(1)
            .returning(|| Ok(chain_with_limiter(3)));
        backend
            .expect_toggle_effect()
            .with(eq(3), eq(false))
            .times(1)
            .returning(|_, _| Err(SyncError::Rejected("engine busy".to_string())));

        let mut sync = ChainSync::new(Arc::new(backend));
        sync.mount().await;

        assert!(sync.toggle_effect(3, false).await.is_err());
        assert!(sync.chain().slot(3).unwrap().enabled);
        assert!(sync.notifications()[0].message.contains("engine busy"));
    }

    #[tokio::test]
    async fn test_notifications_expire() {
        let mut backend = MockBackend::new();
        backend
            .expect_get_dsp_chain()
            .returning(|| Err(unreachable()));

        let mut sync = ChainSync::new(Arc::new(backend));
        sync.mount().await;
        assert_eq!(sync.active_notifications(Instant::now()).len(), 1);

        let later = Instant::now() + NOTIFICATION_TTL;
        assert!(sync.active_notifications(later).is_empty());
        sync.prune_notifications(later);
        assert!(sync.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_dismiss_notification() {
        let mut backend = MockBackend::new();
        backend
            .expect_get_dsp_chain()
            .returning(|| Err(unreachable()));

        let mut sync = ChainSync::new(Arc::new(backend));
        sync.mount().await;
        let id = sync.notifications()[0].id;
        assert!(sync.dismiss_notification(id));
        assert!(sync.notifications().is_empty());
    }
}

// ===== Parameter writes =====

mod parameter_writes {
    use super::*;

    #[tokio::test]
    async fn test_failed_write_only_logs() {
        let mut backend = MockBackend::new();
        backend
            .expect_get_dsp_chain()
            .times(1)
            .returning(|| Ok(chain_with_limiter(1)));
        backend
            .expect_update_effect_parameters()
            .times(1)
            .returning(|_, _, _| Err(unreachable()));

        let mut sync = ChainSync::new(Arc::new(backend));
        sync.mount().await;

        let soft = Effect::Limiter {
            settings: LimiterSettings::soft(),
        };
        sync.update_effect_parameters(1, soft.clone())
            .unwrap()
            .await
            .unwrap();

        // No rollback, no notification, no reload
        assert_eq!(sync.chain().slot(1).unwrap().effect, Some(soft));
        assert!(sync.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_writes_carry_increasing_stamps() {
        let session = Uuid::new_v4();
        let mut backend = MockBackend::new();
        backend
            .expect_get_dsp_chain()
            .times(1)
            .returning(|| Ok(chain_with_limiter(2)));
        backend
            .expect_update_effect_parameters()
            .with(eq(2), always(), eq(Some(UpdateStamp { session, seq: 1 })))
            .times(1)
            .returning(|_, _, _| Ok(()));
        backend
            .expect_update_effect_parameters()
            .with(eq(2), always(), eq(Some(UpdateStamp { session, seq: 2 })))
            .times(1)
            .returning(|_, _, _| Ok(()));

        let mut sync = ChainSync::with_session(Arc::new(backend), session);
        sync.mount().await;

        let first = sync
            .update_effect_parameters(2, EffectKind::Limiter.default_effect())
            .unwrap();
        let second = sync
            .update_effect_parameters(
                2,
                Effect::Limiter {
                    settings: LimiterSettings::brickwall(),
                },
            )
            .unwrap();
        first.await.unwrap();
        second.await.unwrap();
    }
}

// ===== Preset tables =====

mod preset_tables {
    use super::*;

    #[tokio::test]
    async fn test_lookup_failures_yield_empty_tables() {
        let mut backend = MockBackend::new();
        backend
            .expect_get_compressor_presets()
            .returning(|| Err(unreachable()));
        backend
            .expect_get_dsp_chain_presets()
            .returning(|| Err(unreachable()));
        backend
            .expect_get_available_effects()
            .returning(|| Ok(vec!["limiter".to_string(), "tape_delay".to_string()]));

        let sync = ChainSync::new(Arc::new(backend));
        assert!(sync.compressor_presets().await.is_empty());
        assert!(sync.chain_presets().await.is_empty());
        assert_eq!(sync.available_effects().await, vec![EffectKind::Limiter]);
        assert!(sync.notifications().is_empty());
    }
}
