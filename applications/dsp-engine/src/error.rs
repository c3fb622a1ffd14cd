/// Engine server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use soul_dsp::ChainError;
use soul_dsp_sync::SyncError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Sync(#[from] SyncError),
}

impl ServerError {
    fn status_and_message(self) -> (StatusCode, String) {
        match self {
            ServerError::Sync(e) => sync_status(e),
            ServerError::Config(msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
        }
    }
}

fn sync_status(error: SyncError) -> (StatusCode, String) {
    let status = match &error {
        SyncError::Chain(ChainError::EmptySlot(_)) | SyncError::PresetNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        SyncError::Chain(_) | SyncError::Rejected(_) => StatusCode::BAD_REQUEST,
        SyncError::BuiltinPresetDelete | SyncError::BuiltinPresetOverwrite(_) => {
            StatusCode::FORBIDDEN
        }
        SyncError::Unreachable(_)
        | SyncError::InvalidResponse(_)
        | SyncError::Io(_)
        | SyncError::Serialization(_) => {
            tracing::error!("Engine error: {:?}", error);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            );
        }
    };
    (status, error.to_string())
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = self.status_and_message();

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
