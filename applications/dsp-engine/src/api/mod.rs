/// API route modules
pub mod chain;
pub mod health;
pub mod presets;

use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use soul_dsp_sync::protocol;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

fn invoke(call: &str) -> String {
    format!("/invoke/{call}")
}

/// Build the engine router: `GET /api/health` plus one
/// `POST /api/invoke/<call>` route per backend call
pub fn create_router(app_state: AppState) -> Router {
    let invoke_routes = Router::new()
        // Chain
        .route(&invoke(protocol::GET_DSP_CHAIN), post(chain::get_dsp_chain))
        .route(
            &invoke(protocol::ADD_EFFECT_TO_CHAIN),
            post(chain::add_effect_to_chain),
        )
        .route(
            &invoke(protocol::REMOVE_EFFECT_FROM_CHAIN),
            post(chain::remove_effect_from_chain),
        )
        .route(&invoke(protocol::TOGGLE_EFFECT), post(chain::toggle_effect))
        .route(
            &invoke(protocol::UPDATE_EFFECT_PARAMETERS),
            post(chain::update_effect_parameters),
        )
        .route(&invoke(protocol::CLEAR_DSP_CHAIN), post(chain::clear_dsp_chain))
        .route(
            &invoke(protocol::GET_AVAILABLE_EFFECTS),
            post(chain::get_available_effects),
        )
        // Preset tables
        .route(&invoke(protocol::GET_EQ_PRESETS), post(presets::get_eq_presets))
        .route(
            &invoke(protocol::GET_COMPRESSOR_PRESETS),
            post(presets::get_compressor_presets),
        )
        .route(
            &invoke(protocol::GET_LIMITER_PRESETS),
            post(presets::get_limiter_presets),
        )
        .route(
            &invoke(protocol::GET_CROSSFEED_PRESETS),
            post(presets::get_crossfeed_presets),
        )
        .route(
            &invoke(protocol::GET_STEREO_PRESETS),
            post(presets::get_stereo_presets),
        )
        .route(
            &invoke(protocol::GET_GRAPHIC_EQ_PRESETS),
            post(presets::get_graphic_eq_presets),
        )
        // Chain presets
        .route(
            &invoke(protocol::GET_DSP_CHAIN_PRESETS),
            post(presets::get_dsp_chain_presets),
        )
        .route(
            &invoke(protocol::SAVE_DSP_CHAIN_PRESET),
            post(presets::save_dsp_chain_preset),
        )
        .route(
            &invoke(protocol::DELETE_DSP_CHAIN_PRESET),
            post(presets::delete_dsp_chain_preset),
        )
        .route(
            &invoke(protocol::LOAD_DSP_CHAIN_PRESET),
            post(presets::load_dsp_chain_preset),
        );

    let api_routes = Router::new()
        .route("/health", get(health::health))
        .merge(invoke_routes);

    Router::new()
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
