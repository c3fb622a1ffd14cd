//! Wire format tests for effect payloads
//!
//! The engine and every client exchange effects as JSON objects tagged by
//! `type` with camelCase payload fields. These tests pin that format.

use serde_json::json;
use soul_dsp::{
    ChainPreset, CompressorSettings, Effect, EffectChain, EffectKind, EffectSlot, EqBand,
    GraphicEqSettings,
};

// ===== Effect payloads =====

mod payloads {
    use super::*;

    #[test]
    fn test_compressor_payload_uses_camel_case() {
        let json = serde_json::to_value(EffectKind::Compressor.default_effect()).unwrap();
        assert_eq!(
            json,
            json!({
                "type": "compressor",
                "settings": {
                    "thresholdDb": -20.0,
                    "ratio": 4.0,
                    "attackMs": 10.0,
                    "releaseMs": 100.0,
                    "kneeDb": 2.0,
                    "makeupGainDb": 0.0
                }
            })
        );
    }

    #[test]
    fn test_eq_payload_carries_bands_directly() {
        let json = serde_json::to_value(EffectKind::Eq.default_effect()).unwrap();
        assert_eq!(json["type"], "eq");
        assert!(json.get("settings").is_none());
        assert_eq!(json["bands"].as_array().map(Vec::len), Some(3));
        assert_eq!(json["bands"][1], json!({ "frequency": 1000.0, "gain": 0.0, "q": 1.0 }));
    }

    #[test]
    fn test_frontend_crossfeed_payload_parses() {
        let effect: Effect = serde_json::from_value(json!({
            "type": "crossfeed",
            "settings": { "preset": "relaxed", "levelDb": -6, "cutoffHz": 650 }
        }))
        .unwrap();
        let Effect::Crossfeed { settings } = effect else {
            panic!("expected crossfeed");
        };
        assert_eq!(settings.preset, "relaxed");
        assert_eq!(settings.level_db, -6.0);
        assert_eq!(settings.cutoff_hz, 650.0);
    }

    #[test]
    fn test_graphic_eq_payload_parses() {
        let effect: Effect = serde_json::from_value(json!({
            "type": "graphic_eq",
            "settings": { "preset": "Flat", "bandCount": 10, "gains": [0, 0, 0, 0, 0, 0, 0, 0, 0, 0] }
        }))
        .unwrap();
        assert_eq!(
            effect,
            Effect::GraphicEq {
                settings: GraphicEqSettings::default()
            }
        );
    }

    #[test]
    fn test_convolution_payload_parses() {
        let effect: Effect = serde_json::from_value(json!({
            "type": "convolution",
            "settings": {
                "irFilePath": "bundled://presets/plate.wav",
                "wetDryMix": 0.5,
                "preDelayMs": 10,
                "decay": 1.2
            }
        }))
        .unwrap();
        assert_eq!(effect.kind(), EffectKind::Convolution);
        assert_eq!(effect.preset_label().as_deref(), Some("Plate"));
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result: Result<Effect, _> =
            serde_json::from_value(json!({ "type": "reverb", "settings": {} }));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_payload_field_rejected() {
        let result: Result<Effect, _> = serde_json::from_value(json!({
            "type": "limiter",
            "settings": { "thresholdDb": -0.3 }
        }));
        assert!(result.is_err());
    }
}

// ===== Slots and chains =====

mod chains {
    use super::*;

    #[test]
    fn test_slot_field_names() {
        let slot = EffectSlot::with_effect(2, EffectKind::Limiter.default_effect());
        let json = serde_json::to_value(&slot).unwrap();
        assert_eq!(json["index"], 2);
        assert_eq!(json["enabled"], true);
        assert_eq!(json["effect"]["type"], "limiter");
        assert_eq!(json["effect"]["settings"]["thresholdDb"], -0.3_f32 as f64);
    }

    #[test]
    fn test_engine_chain_snapshot_parses() {
        let snapshot = json!([
            { "index": 0, "effect": { "type": "eq", "bands": [{ "frequency": 250.0, "gain": 3.0, "q": 0.7 }] }, "enabled": true },
            { "index": 1, "effect": null, "enabled": false },
            { "index": 2, "effect": { "type": "stereo", "settings": { "width": 1.5, "midGainDb": 0.0, "sideGainDb": 0.0, "balance": 0.0 } }, "enabled": false },
            { "index": 3, "effect": null, "enabled": false }
        ]);
        let chain: EffectChain = serde_json::from_value(snapshot).unwrap();
        assert_eq!(chain.populated_count(), 2);
        assert_eq!(
            chain.slot(0).unwrap().effect,
            Some(Effect::Eq {
                bands: vec![EqBand::new(250.0, 3.0, 0.7)]
            })
        );
        assert!(!chain.slot(2).unwrap().enabled);
        assert_eq!(chain.active_effects().count(), 1);
    }

    #[test]
    fn test_three_slot_snapshot_rejected() {
        let snapshot = json!([
            { "index": 0, "effect": null, "enabled": false },
            { "index": 1, "effect": null, "enabled": false },
            { "index": 2, "effect": null, "enabled": false }
        ]);
        let result: Result<EffectChain, _> = serde_json::from_value(snapshot);
        assert!(result.is_err());
    }

    #[test]
    fn test_chain_preset_field_names() {
        let preset = ChainPreset {
            id: 7,
            name: "Evening".to_string(),
            description: None,
            is_builtin: false,
            effect_chain: vec![Effect::Compressor {
                settings: CompressorSettings::gentle(),
            }],
            created_at: 1_700_000_000,
            updated_at: 1_700_000_000,
        };
        let json = serde_json::to_value(&preset).unwrap();
        assert_eq!(json["isBuiltin"], false);
        assert_eq!(json["effectChain"][0]["type"], "compressor");
        assert_eq!(json["createdAt"], 1_700_000_000_i64);
        assert!(json["description"].is_null());
    }
}
