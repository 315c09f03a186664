use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("Login failed: {0}")]
    AuthRedirect(String),
    #[error("Malformed session token: {0}")]
    TokenMalformed(String),
    #[error("Session token has expired")]
    TokenExpired,
    #[error("Request failed: {0}")]
    Network(String),
    #[error("{0}")]
    UploadRejected(String),
    #[error("Response example is not valid JSON: {0}")]
    MalformedResponseExample(String),
    #[error("Failed to serialize document: {0}")]
    Serialization(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(value: serde_json::Error) -> Self {
        error!("{}", value);
        CoreError::Serialization(format!("{}", value))
    }
}

impl From<base64::DecodeError> for CoreError {
    fn from(value: base64::DecodeError) -> Self {
        debug!("{}", value);
        CoreError::TokenMalformed(format!("{}", value))
    }
}

impl From<url::ParseError> for CoreError {
    fn from(value: url::ParseError) -> Self {
        warn!("{}", value);
        CoreError::InvalidConfiguration(format!("{}", value))
    }
}
