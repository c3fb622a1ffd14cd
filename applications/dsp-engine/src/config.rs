/// Engine configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default)]
    pub engine: EngineSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EngineSettings {
    #[serde(default)]
    pub snapshot: SnapshotSettings,
}

/// Where the chain and user presets are persisted
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SnapshotSettings {
    /// No path keeps everything in memory
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl EngineConfig {
    /// Load configuration from `config.toml` (if present) and environment
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration from an explicit file (or `config.toml`) and environment
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables (SOUL_DSP_SERVER_PORT, SOUL_DSP_ENGINE_SNAPSHOT_PATH, ...)
        settings = settings.add_source(
            config::Environment::with_prefix("SOUL_DSP")
                .separator("_")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.host.parse::<IpAddr>().is_err() {
            return Err(ServerError::Config(format!(
                "Invalid host address: {}",
                self.server.host
            )));
        }

        if let Some(path) = &self.engine.snapshot.path {
            if path.is_dir() {
                return Err(ServerError::Config(format!(
                    "Snapshot path {:?} is a directory",
                    path
                )));
            }
        }

        Ok(())
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.engine.snapshot.path.as_deref()
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8790
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            engine: EngineSettings::default(),
        }
    }
}
