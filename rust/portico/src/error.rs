use axum::{extract::multipart::MultipartError, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::subscriber::SetGlobalDefaultError;
use utoipa::ToSchema;

#[derive(Debug, Error)]
pub enum PorticoError {
    #[error("No token provided")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("No file uploaded")]
    NoFileUploaded,
    #[error("No API description has been uploaded yet")]
    DocumentNotFound,
    #[error("{0}")]
    Storage(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Upstream request failed: {0}")]
    UpstreamError(String),
    #[error("An internal error occurred")]
    Internal(String),
}

impl From<std::net::AddrParseError> for PorticoError {
    fn from(value: std::net::AddrParseError) -> Self {
        PorticoError::InvalidConfiguration(format!("{}", value))
    }
}

impl From<std::io::Error> for PorticoError {
    fn from(value: std::io::Error) -> Self {
        error!("{}", value);
        PorticoError::Internal(format!("{}", value))
    }
}

impl From<MultipartError> for PorticoError {
    fn from(value: MultipartError) -> Self {
        warn!("{}", value);
        PorticoError::NoFileUploaded
    }
}

impl From<SetGlobalDefaultError> for PorticoError {
    fn from(value: SetGlobalDefaultError) -> Self {
        error!("{}", value);
        PorticoError::Internal(format!("{}", value))
    }
}

impl From<reqwest::Error> for PorticoError {
    fn from(value: reqwest::Error) -> Self {
        warn!("{}", value);
        PorticoError::UpstreamError(format!("{}", value))
    }
}

impl From<jsonwebtoken::errors::Error> for PorticoError {
    fn from(value: jsonwebtoken::errors::Error) -> Self {
        debug!("{}", value);
        PorticoError::InvalidToken
    }
}

impl IntoResponse for PorticoError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            PorticoError::MissingToken => StatusCode::UNAUTHORIZED,
            PorticoError::InvalidToken => StatusCode::UNAUTHORIZED,
            PorticoError::NoFileUploaded => StatusCode::BAD_REQUEST,
            PorticoError::DocumentNotFound => StatusCode::NOT_FOUND,
            PorticoError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PorticoError::InvalidConfiguration(_) => StatusCode::BAD_REQUEST,
            PorticoError::UpstreamError(_) => StatusCode::BAD_GATEWAY,
            PorticoError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        match self {
            // The upload form reads `message` from failed uploads.
            PorticoError::NoFileUploaded | PorticoError::Storage(_) => (
                status,
                Json(MessageResponse {
                    message: self.to_string(),
                }),
            )
                .into_response(),
            _ => (
                status,
                Json(ErrorResponse {
                    error: self.to_string(),
                }),
            )
                .into_response(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl IntoResponse for MessageResponse {
    fn into_response(self) -> axum::response::Response {
        Json(self).into_response()
    }
}
