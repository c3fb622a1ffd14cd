//! Adapter tests against the in-process engine
//!
//! Each test mounts a [`ChainSync`] on a fresh [`DspEngine`] and checks the
//! mirror, the editor state and what the engine ends up holding.

use soul_dsp::{
    CrossfeedPreset, CrossfeedSettings, Effect, EffectKind, GraphicEqSettings, LimiterSettings,
    SlotState,
};
use soul_dsp_sync::{ChainBackend, ChainSync, DspEngine, SyncError};
use std::sync::Arc;

async fn mounted() -> (Arc<DspEngine>, ChainSync<DspEngine>) {
    let engine = Arc::new(DspEngine::new());
    let mut sync = ChainSync::new(Arc::clone(&engine));
    sync.mount().await;
    (engine, sync)
}

// ===== Structural operations =====

mod structural {
    use super::*;

    #[tokio::test]
    async fn test_mount_loads_empty_chain() {
        let (_, sync) = mounted().await;
        assert!(!sync.is_loading());
        assert_eq!(sync.slots().len(), 4);
        assert!(sync.chain().is_empty());
        assert!(sync.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_add_limiter_then_reload_shows_defaults() {
        let (_, mut sync) = mounted().await;
        sync.open_picker(2);
        sync.add_effect(2, EffectKind::Limiter).await.unwrap();

        let slot = sync.chain().slot(2).unwrap();
        assert_eq!(slot.index, 2);
        assert!(slot.enabled);
        assert_eq!(
            slot.effect,
            Some(Effect::Limiter {
                settings: LimiterSettings {
                    threshold_db: -0.3,
                    release_ms: 50.0
                }
            })
        );
        assert_eq!(sync.picker_slot(), None);
        assert_eq!(sync.expanded_slot(), None);
    }

    #[tokio::test]
    async fn test_add_to_invalid_slot_notifies() {
        let (_, mut sync) = mounted().await;
        let err = sync.add_effect(7, EffectKind::Eq).await.unwrap_err();
        assert!(err.to_string().contains("Slot index must be 0-3"));
        assert_eq!(sync.notifications().len(), 1);
        assert!(sync.chain().is_empty());
    }

    #[tokio::test]
    async fn test_remove_collapses_open_editor() {
        let (engine, mut sync) = mounted().await;
        sync.add_effect(1, EffectKind::Compressor).await.unwrap();
        sync.toggle_expanded(1);
        assert_eq!(sync.expanded_slot(), Some(1));

        sync.remove_effect(1).await.unwrap();
        assert_eq!(sync.expanded_slot(), None);
        assert!(sync.chain().slot(1).unwrap().is_empty());
        assert!(engine.chain().is_empty());
    }

    #[tokio::test]
    async fn test_remove_keeps_other_editor_open() {
        let (_, mut sync) = mounted().await;
        sync.add_effect(0, EffectKind::Eq).await.unwrap();
        sync.add_effect(1, EffectKind::Limiter).await.unwrap();
        sync.toggle_expanded(0);

        sync.remove_effect(1).await.unwrap();
        assert_eq!(sync.expanded_slot(), Some(0));
    }

    #[tokio::test]
    async fn test_remove_empty_slot_is_rejected_locally() {
        let (_, mut sync) = mounted().await;
        let err = sync.remove_effect(3).await.unwrap_err();
        assert_eq!(err.to_string(), "No effect at slot 3");
        assert_eq!(sync.notifications().len(), 1);
    }

    #[tokio::test]
    async fn test_toggle_round_trip_preserves_payload() {
        let (_, mut sync) = mounted().await;
        sync.add_effect(0, EffectKind::GraphicEq).await.unwrap();
        let original = sync.chain().slot(0).unwrap().effect.clone();

        sync.toggle_effect(0, false).await.unwrap();
        assert_eq!(sync.chain().slot(0).unwrap().state(), SlotState::Bypassed);
        assert_eq!(sync.chain().slot(0).unwrap().effect, original);

        sync.toggle_effect(0, true).await.unwrap();
        assert_eq!(sync.chain().slot(0).unwrap().state(), SlotState::Enabled);
        assert_eq!(sync.chain().slot(0).unwrap().effect, original);
    }

    #[tokio::test]
    async fn test_confirmed_clear_empties_chain() {
        let (engine, mut sync) = mounted().await;
        sync.add_effect(0, EffectKind::Eq).await.unwrap();
        sync.add_effect(3, EffectKind::Stereo).await.unwrap();

        let cleared = sync.clear_chain(&|_: &str| true).await.unwrap();
        assert!(cleared);
        assert!(sync.chain().is_empty());
        assert!(engine.chain().is_empty());
    }

    #[tokio::test]
    async fn test_declined_clear_keeps_chain() {
        let (engine, mut sync) = mounted().await;
        sync.add_effect(0, EffectKind::Eq).await.unwrap();

        let cleared = sync.clear_chain(&|_: &str| false).await.unwrap();
        assert!(!cleared);
        assert_eq!(engine.chain().populated_count(), 1);
        assert_eq!(sync.chain().populated_count(), 1);
    }
}

// ===== Parameter edits =====

mod parameters {
    use super::*;

    #[tokio::test]
    async fn test_crossfeed_level_drag_becomes_custom() {
        let (engine, mut sync) = mounted().await;
        sync.add_effect(0, EffectKind::Crossfeed).await.unwrap();

        let handle = sync
            .edit_effect(0, |effect| {
                if let Effect::Crossfeed { settings } = effect {
                    settings.set_level_db(-8.0);
                }
            })
            .unwrap();

        let expected = Effect::Crossfeed {
            settings: CrossfeedSettings {
                preset: CrossfeedPreset::Custom.as_str().to_string(),
                level_db: -8.0,
                cutoff_hz: 700.0,
            },
        };
        // Local mirror changes before the write completes
        assert_eq!(sync.chain().slot(0).unwrap().effect, Some(expected.clone()));

        handle.await.unwrap();
        assert_eq!(engine.chain().slot(0).unwrap().effect, Some(expected));
    }

    #[tokio::test]
    async fn test_update_keeps_bypass_state() {
        let (engine, mut sync) = mounted().await;
        sync.add_effect(2, EffectKind::Limiter).await.unwrap();
        sync.toggle_effect(2, false).await.unwrap();

        sync.update_effect_parameters(
            2,
            Effect::Limiter {
                settings: LimiterSettings::brickwall(),
            },
        )
        .unwrap()
        .await
        .unwrap();

        assert!(!engine.chain().slot(2).unwrap().enabled);
        assert!(!sync.chain().slot(2).unwrap().enabled);
    }

    #[tokio::test]
    async fn test_update_empty_slot_fails_without_notification() {
        let (_, mut sync) = mounted().await;
        let result = sync.update_effect_parameters(1, EffectKind::Eq.default_effect());
        assert!(matches!(result, Err(SyncError::Chain(_))));
        assert!(sync.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_rapid_edits_end_on_last_value() {
        let (engine, mut sync) = mounted().await;
        sync.add_effect(0, EffectKind::GraphicEq).await.unwrap();

        let mut handles = Vec::new();
        for step in 0..10 {
            let handle = sync
                .edit_effect(0, |effect| {
                    if let Effect::GraphicEq { settings } = effect {
                        settings.set_band_gain(0, step as f32).unwrap();
                    }
                })
                .unwrap();
            handles.push(handle);
        }
        // Writes are stamped in edit order; the last edit is what sticks
        for handle in handles.into_iter().rev() {
            handle.await.unwrap();
        }

        let Some(Effect::GraphicEq { settings }) = engine.chain().slot(0).unwrap().effect.clone()
        else {
            panic!("expected graphic eq");
        };
        assert_eq!(settings.gains[0], 9.0);
        assert_eq!(sync.chain().slot(0).unwrap().effect, engine.chain().slot(0).unwrap().effect);
    }

    #[tokio::test]
    async fn test_reset_restores_defaults() {
        let (engine, mut sync) = mounted().await;
        sync.add_effect(1, EffectKind::GraphicEq).await.unwrap();
        sync.update_effect_parameters(
            1,
            Effect::GraphicEq {
                settings: GraphicEqSettings::from_preset(soul_dsp::GraphicEqPreset::Rock),
            },
        )
        .unwrap()
        .await
        .unwrap();

        sync.reset_effect(1).unwrap().await.unwrap();
        assert_eq!(
            engine.chain().slot(1).unwrap().effect,
            Some(EffectKind::GraphicEq.default_effect())
        );
    }

    #[tokio::test]
    async fn test_edits_are_not_reverted_by_reads() {
        let (engine, mut sync) = mounted().await;
        sync.add_effect(0, EffectKind::Limiter).await.unwrap();
        sync.update_effect_parameters(
            0,
            Effect::Limiter {
                settings: LimiterSettings::soft(),
            },
        )
        .unwrap()
        .await
        .unwrap();

        let engine_slots = engine.get_dsp_chain().await.unwrap();
        assert_eq!(engine_slots[0].effect, sync.chain().slot(0).unwrap().effect);
    }

    fn aggressive_compressor() -> Effect {
        Effect::Compressor {
            settings: soul_dsp::CompressorSettings::aggressive(),
        }
    }

    #[tokio::test]
    async fn test_pending_write_does_not_land_on_replacement_effect() {
        let (engine, mut sync) = mounted().await;
        sync.add_effect(0, EffectKind::Compressor).await.unwrap();

        let pending = sync
            .update_effect_parameters(0, aggressive_compressor())
            .unwrap();
        sync.remove_effect(0).await.unwrap();
        sync.add_effect(0, EffectKind::Limiter).await.unwrap();
        pending.await.unwrap();

        let expected = Some(EffectKind::Limiter.default_effect());
        assert_eq!(engine.chain().slot(0).unwrap().effect, expected);
        assert_eq!(sync.chain().slot(0).unwrap().effect, expected);
    }

    #[tokio::test]
    async fn test_pending_write_does_not_roll_back_readded_effect() {
        let (engine, mut sync) = mounted().await;
        sync.add_effect(0, EffectKind::Compressor).await.unwrap();

        let pending = sync
            .update_effect_parameters(0, aggressive_compressor())
            .unwrap();
        sync.remove_effect(0).await.unwrap();
        sync.add_effect(0, EffectKind::Compressor).await.unwrap();
        pending.await.unwrap();

        let expected = Some(EffectKind::Compressor.default_effect());
        assert_eq!(engine.chain().slot(0).unwrap().effect, expected);
        assert_eq!(sync.chain().slot(0).unwrap().effect, expected);
    }

    #[tokio::test]
    async fn test_pending_write_settles_before_clear_and_preset_load() {
        let (engine, mut sync) = mounted().await;
        sync.add_effect(0, EffectKind::Compressor).await.unwrap();

        let pending = sync
            .update_effect_parameters(0, aggressive_compressor())
            .unwrap();
        assert!(sync.clear_chain(&|_: &str| true).await.unwrap());
        pending.await.unwrap();
        assert!(engine.chain().is_empty());

        sync.add_effect(0, EffectKind::Compressor).await.unwrap();
        let pending = sync
            .update_effect_parameters(0, aggressive_compressor())
            .unwrap();
        sync.load_chain_preset(1).await.unwrap();
        pending.await.unwrap();
        assert_eq!(sync.chain(), &engine.chain());
    }
}

// ===== Chain presets =====

mod chain_presets {
    use super::*;

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let (_, mut sync) = mounted().await;
        sync.add_effect(0, EffectKind::Compressor).await.unwrap();
        sync.add_effect(2, EffectKind::Limiter).await.unwrap();

        let id = sync
            .save_chain_preset("Late Night", Some("Quiet".to_string()))
            .await
            .unwrap();
        let clear = |_: &str| true;
        sync.clear_chain(&clear).await.unwrap();
        sync.load_chain_preset(id).await.unwrap();

        // Populated effects are stored in slot order and load from slot 0
        let kinds: Vec<Option<EffectKind>> = sync
            .slots()
            .iter()
            .map(|slot| slot.effect.as_ref().map(Effect::kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                Some(EffectKind::Compressor),
                Some(EffectKind::Limiter),
                None,
                None
            ]
        );
    }

    #[tokio::test]
    async fn test_builtin_preset_cannot_be_deleted() {
        let (_, mut sync) = mounted().await;
        let presets = sync.chain_presets().await;
        let builtin = presets.iter().find(|p| p.is_builtin).unwrap();

        let err = sync.delete_chain_preset(builtin.id).await.unwrap_err();
        assert!(matches!(err, SyncError::BuiltinPresetDelete));
        assert_eq!(sync.notifications().len(), 1);
        assert_eq!(sync.chain_presets().await.len(), presets.len());
    }

    #[tokio::test]
    async fn test_unknown_preset_load_notifies() {
        let (_, mut sync) = mounted().await;
        let err = sync.load_chain_preset(999).await.unwrap_err();
        assert!(matches!(err, SyncError::PresetNotFound(999)));
        assert_eq!(sync.notifications().len(), 1);
    }

    #[tokio::test]
    async fn test_saving_same_name_overwrites() {
        let (_, mut sync) = mounted().await;
        sync.add_effect(0, EffectKind::Eq).await.unwrap();
        let first = sync.save_chain_preset("Mine", None).await.unwrap();
        sync.add_effect(1, EffectKind::Stereo).await.unwrap();
        let second = sync.save_chain_preset("Mine", None).await.unwrap();

        assert_eq!(first, second);
        let presets = sync.chain_presets().await;
        let mine: Vec<_> = presets.iter().filter(|p| p.name == "Mine").collect();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].effect_chain.len(), 2);
    }
}

// ===== Preset tables =====

mod preset_tables {
    use super::*;

    #[tokio::test]
    async fn test_tables_come_from_engine() {
        let (_, sync) = mounted().await;
        assert_eq!(sync.available_effects().await, EffectKind::ALL.to_vec());
        assert_eq!(sync.graphic_eq_presets().await.len(), 8);
        assert!(sync
            .crossfeed_presets()
            .await
            .iter()
            .any(|(name, _)| name == "meier"));
        assert!(!sync.compressor_presets().await.is_empty());
        assert!(!sync.limiter_presets().await.is_empty());
        assert!(!sync.stereo_presets().await.is_empty());
        assert!(!sync.eq_presets().await.is_empty());
    }
}
