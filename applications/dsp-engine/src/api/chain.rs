/// Effect chain API routes
use crate::{error::Result, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use soul_dsp::EffectSlot;
use soul_dsp_sync::protocol::{
    AddEffectRequest, SlotRequest, ToggleEffectRequest, UpdateEffectRequest,
};
use soul_dsp_sync::ChainBackend;

/// POST /api/invoke/get_dsp_chain
pub async fn get_dsp_chain(State(app_state): State<AppState>) -> Result<Json<Vec<EffectSlot>>> {
    Ok(Json(app_state.engine.get_dsp_chain().await?))
}

/// POST /api/invoke/add_effect_to_chain
pub async fn add_effect_to_chain(
    State(app_state): State<AppState>,
    Json(req): Json<AddEffectRequest>,
) -> Result<StatusCode> {
    app_state
        .engine
        .add_effect_to_chain(req.slot_index, req.effect)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/invoke/remove_effect_from_chain
pub async fn remove_effect_from_chain(
    State(app_state): State<AppState>,
    Json(req): Json<SlotRequest>,
) -> Result<StatusCode> {
    app_state
        .engine
        .remove_effect_from_chain(req.slot_index)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/invoke/toggle_effect
pub async fn toggle_effect(
    State(app_state): State<AppState>,
    Json(req): Json<ToggleEffectRequest>,
) -> Result<StatusCode> {
    app_state
        .engine
        .toggle_effect(req.slot_index, req.enabled)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/invoke/update_effect_parameters
/// Writes without a stamp are always applied
pub async fn update_effect_parameters(
    State(app_state): State<AppState>,
    Json(req): Json<UpdateEffectRequest>,
) -> Result<StatusCode> {
    app_state
        .engine
        .update_effect_parameters(req.slot_index, req.effect, req.stamp)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/invoke/clear_dsp_chain
pub async fn clear_dsp_chain(State(app_state): State<AppState>) -> Result<StatusCode> {
    app_state.engine.clear_dsp_chain().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/invoke/get_available_effects
pub async fn get_available_effects(State(app_state): State<AppState>) -> Result<Json<Vec<String>>> {
    Ok(Json(app_state.engine.get_available_effects().await?))
}
