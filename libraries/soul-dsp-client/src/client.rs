//! DSP engine HTTP client.

use crate::error::{ClientError, Result};
use crate::types::{ClientConfig, ErrorBody, HealthResponse};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use soul_dsp::{
    ChainPreset, CompressorSettings, CrossfeedSettings, Effect, EffectSlot, EqBand,
    GraphicEqSettings, LimiterSettings, StereoSettings,
};
use soul_dsp_sync::protocol::{
    self, AddEffectRequest, PresetIdRequest, SavePresetRequest, SlotRequest, ToggleEffectRequest,
    UpdateEffectRequest,
};
use soul_dsp_sync::{ChainBackend, UpdateStamp};
use tracing::{debug, info};

/// Chain backend reached over HTTP.
///
/// Every call is a `POST {url}/api/invoke/<call>` with an optional JSON body.
///
/// # Example
///
/// ```ignore
/// use soul_dsp_client::{ClientConfig, EngineClient};
/// use soul_dsp_sync::ChainSync;
/// use std::sync::Arc;
///
/// let client = EngineClient::new(ClientConfig::new("http://127.0.0.1:8790"))?;
/// let mut sync = ChainSync::new(Arc::new(client));
/// sync.mount().await;
/// ```
#[derive(Debug, Clone)]
pub struct EngineClient {
    http: Client,
    url: String,
}

impl EngineClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = config.url.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        url::Url::parse(&url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(format!("SoulDsp/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self { http, url })
    }

    /// Engine base URL without a trailing slash.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Check that the engine is up.
    pub async fn health(&self) -> Result<HealthResponse> {
        let url = format!("{}/api/health", self.url);
        debug!(url = %url, "Checking engine health");

        let response = Self::check(self.http.get(&url).send().await.map_err(send_error)?).await?;
        let health: HealthResponse = response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse health: {}", e)))?;

        info!(status = %health.status, version = %health.version, "Connected to engine");
        Ok(health)
    }

    fn post(&self, call: &str) -> RequestBuilder {
        self.http.post(format!("{}/api/invoke/{}", self.url, call))
    }

    async fn send(&self, call: &str, request: RequestBuilder) -> Result<Response> {
        debug!(call, "Invoking engine call");
        let response = request.send().await.map_err(send_error)?;
        Self::check(response).await
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or(text);
        Err(ClientError::ServerError {
            status: status.as_u16(),
            message,
        })
    }

    async fn fetch<R: DeserializeOwned>(&self, call: &str) -> Result<R> {
        let response = self.send(call, self.post(call)).await?;
        parse(call, response).await
    }

    async fn execute<B: Serialize + ?Sized>(&self, call: &str, body: &B) -> Result<()> {
        self.send(call, self.post(call).json(body)).await?;
        Ok(())
    }
}

fn send_error(e: reqwest::Error) -> ClientError {
    if e.is_connect() || e.is_timeout() {
        ClientError::ServerUnreachable(e.to_string())
    } else {
        ClientError::Request(e)
    }
}

async fn parse<R: DeserializeOwned>(call: &str, response: Response) -> Result<R> {
    response
        .json()
        .await
        .map_err(|e| ClientError::ParseError(format!("Failed to parse {} response: {}", call, e)))
}

#[async_trait]
impl ChainBackend for EngineClient {
    async fn get_dsp_chain(&self) -> soul_dsp_sync::Result<Vec<EffectSlot>> {
        Ok(self.fetch(protocol::GET_DSP_CHAIN).await?)
    }

    async fn add_effect_to_chain(
        &self,
        slot_index: usize,
        effect: Effect,
    ) -> soul_dsp_sync::Result<()> {
        let body = AddEffectRequest { slot_index, effect };
        Ok(self.execute(protocol::ADD_EFFECT_TO_CHAIN, &body).await?)
    }

    async fn remove_effect_from_chain(&self, slot_index: usize) -> soul_dsp_sync::Result<()> {
        let body = SlotRequest { slot_index };
        Ok(self
            .execute(protocol::REMOVE_EFFECT_FROM_CHAIN, &body)
            .await?)
    }

    async fn toggle_effect(&self, slot_index: usize, enabled: bool) -> soul_dsp_sync::Result<()> {
        let body = ToggleEffectRequest {
            slot_index,
            enabled,
        };
        Ok(self.execute(protocol::TOGGLE_EFFECT, &body).await?)
    }

    async fn update_effect_parameters(
        &self,
        slot_index: usize,
        effect: Effect,
        stamp: Option<UpdateStamp>,
    ) -> soul_dsp_sync::Result<()> {
        let body = UpdateEffectRequest {
            slot_index,
            effect,
            stamp,
        };
        Ok(self
            .execute(protocol::UPDATE_EFFECT_PARAMETERS, &body)
            .await?)
    }

    async fn clear_dsp_chain(&self) -> soul_dsp_sync::Result<()> {
        let call = protocol::CLEAR_DSP_CHAIN;
        self.send(call, self.post(call)).await?;
        Ok(())
    }

    async fn get_available_effects(&self) -> soul_dsp_sync::Result<Vec<String>> {
        Ok(self.fetch(protocol::GET_AVAILABLE_EFFECTS).await?)
    }

    async fn get_eq_presets(&self) -> soul_dsp_sync::Result<Vec<(String, Vec<EqBand>)>> {
        Ok(self.fetch(protocol::GET_EQ_PRESETS).await?)
    }

    async fn get_compressor_presets(
        &self,
    ) -> soul_dsp_sync::Result<Vec<(String, CompressorSettings)>> {
        Ok(self.fetch(protocol::GET_COMPRESSOR_PRESETS).await?)
    }

    async fn get_limiter_presets(&self) -> soul_dsp_sync::Result<Vec<(String, LimiterSettings)>> {
        Ok(self.fetch(protocol::GET_LIMITER_PRESETS).await?)
    }

    async fn get_crossfeed_presets(
        &self,
    ) -> soul_dsp_sync::Result<Vec<(String, CrossfeedSettings)>> {
        Ok(self.fetch(protocol::GET_CROSSFEED_PRESETS).await?)
    }

    async fn get_stereo_presets(&self) -> soul_dsp_sync::Result<Vec<(String, StereoSettings)>> {
        Ok(self.fetch(protocol::GET_STEREO_PRESETS).await?)
    }

    async fn get_graphic_eq_presets(
        &self,
    ) -> soul_dsp_sync::Result<Vec<(String, GraphicEqSettings)>> {
        Ok(self.fetch(protocol::GET_GRAPHIC_EQ_PRESETS).await?)
    }

    async fn get_dsp_chain_presets(&self) -> soul_dsp_sync::Result<Vec<ChainPreset>> {
        Ok(self.fetch(protocol::GET_DSP_CHAIN_PRESETS).await?)
    }

    async fn save_dsp_chain_preset(
        &self,
        name: String,
        description: Option<String>,
        effect_chain: Vec<Effect>,
    ) -> soul_dsp_sync::Result<i64> {
        let call = protocol::SAVE_DSP_CHAIN_PRESET;
        let body = SavePresetRequest {
            name,
            description,
            effect_chain,
        };
        let response = self.send(call, self.post(call).json(&body)).await?;
        Ok(parse(call, response).await?)
    }

    async fn delete_dsp_chain_preset(&self, preset_id: i64) -> soul_dsp_sync::Result<()> {
        let body = PresetIdRequest { preset_id };
        Ok(self
            .execute(protocol::DELETE_DSP_CHAIN_PRESET, &body)
            .await?)
    }

    async fn load_dsp_chain_preset(&self, preset_id: i64) -> soul_dsp_sync::Result<()> {
        let body = PresetIdRequest { preset_id };
        Ok(self.execute(protocol::LOAD_DSP_CHAIN_PRESET, &body).await?)
    }
}
