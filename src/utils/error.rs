use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Response declared JSON but could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid request URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("Invalid HTTP method: {method}")]
    InvalidMethod { method: String },

    #[error("Request with {method} method cannot have a body")]
    BodyNotAllowed { method: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl ApiError {
    /// True for failures of the request itself, before any body was decoded.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            ApiError::Network(_)
                | ApiError::InvalidUrl { .. }
                | ApiError::InvalidHeader { .. }
                | ApiError::InvalidMethod { .. }
                | ApiError::BodyNotAllowed { .. }
        )
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, ApiError::Decode(_))
    }

    pub fn is_config(&self) -> bool {
        matches!(
            self,
            ApiError::Io(_) | ApiError::ConfigError { .. } | ApiError::InvalidConfigValueError { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
