/// Preset API routes: per-effect preset tables and whole-chain presets
use crate::{error::Result, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use soul_dsp::{
    ChainPreset, CompressorSettings, CrossfeedSettings, EqBand, GraphicEqSettings,
    LimiterSettings, StereoSettings,
};
use soul_dsp_sync::protocol::{PresetIdRequest, SavePresetRequest};
use soul_dsp_sync::ChainBackend;

type PresetTable<T> = Json<Vec<(String, T)>>;

/// POST /api/invoke/get_eq_presets
pub async fn get_eq_presets(State(app_state): State<AppState>) -> Result<PresetTable<Vec<EqBand>>> {
    Ok(Json(app_state.engine.get_eq_presets().await?))
}

/// POST /api/invoke/get_compressor_presets
pub async fn get_compressor_presets(
    State(app_state): State<AppState>,
) -> Result<PresetTable<CompressorSettings>> {
    Ok(Json(app_state.engine.get_compressor_presets().await?))
}

/// POST /api/invoke/get_limiter_presets
pub async fn get_limiter_presets(
    State(app_state): State<AppState>,
) -> Result<PresetTable<LimiterSettings>> {
    Ok(Json(app_state.engine.get_limiter_presets().await?))
}

/// POST /api/invoke/get_crossfeed_presets
pub async fn get_crossfeed_presets(
    State(app_state): State<AppState>,
) -> Result<PresetTable<CrossfeedSettings>> {
    Ok(Json(app_state.engine.get_crossfeed_presets().await?))
}

/// POST /api/invoke/get_stereo_presets
pub async fn get_stereo_presets(
    State(app_state): State<AppState>,
) -> Result<PresetTable<StereoSettings>> {
    Ok(Json(app_state.engine.get_stereo_presets().await?))
}

/// POST /api/invoke/get_graphic_eq_presets
pub async fn get_graphic_eq_presets(
    State(app_state): State<AppState>,
) -> Result<PresetTable<GraphicEqSettings>> {
    Ok(Json(app_state.engine.get_graphic_eq_presets().await?))
}

/// POST /api/invoke/get_dsp_chain_presets
/// Built-in presets first, then user presets by name
pub async fn get_dsp_chain_presets(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<ChainPreset>>> {
    Ok(Json(app_state.engine.get_dsp_chain_presets().await?))
}

/// POST /api/invoke/save_dsp_chain_preset
/// Saving under an existing user preset name overwrites it
pub async fn save_dsp_chain_preset(
    State(app_state): State<AppState>,
    Json(req): Json<SavePresetRequest>,
) -> Result<Json<i64>> {
    let id = app_state
        .engine
        .save_dsp_chain_preset(req.name, req.description, req.effect_chain)
        .await?;
    Ok(Json(id))
}

/// POST /api/invoke/delete_dsp_chain_preset
pub async fn delete_dsp_chain_preset(
    State(app_state): State<AppState>,
    Json(req): Json<PresetIdRequest>,
) -> Result<StatusCode> {
    app_state
        .engine
        .delete_dsp_chain_preset(req.preset_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/invoke/load_dsp_chain_preset
pub async fn load_dsp_chain_preset(
    State(app_state): State<AppState>,
    Json(req): Json<PresetIdRequest>,
) -> Result<StatusCode> {
    app_state.engine.load_dsp_chain_preset(req.preset_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
