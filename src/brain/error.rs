// Error types for Brain module

use thiserror::Error;

/// Failures of a single call to the model endpoint
#[derive(Debug, Error)]
pub enum BrainError {
    /// 401 or 403
    #[error("Model endpoint rejected the credentials (HTTP {status}): {body}")]
    AuthenticationFailed { status: u16, body: String },

    #[error("Model endpoint rejected the request: {0}")]
    InvalidRequest(String),

    #[error("Account has no remaining credit: {0}")]
    InsufficientBalance(String),

    #[error("Rate limited by the model endpoint: {0}")]
    RateLimited(String),

    /// 5xx from the endpoint
    #[error("Model error: {0}")]
    ModelError(String),

    #[error("Unexpected HTTP {status} from the model endpoint: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Could not reach the model endpoint: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Malformed model response: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Errors building a Brain from configuration
#[derive(Debug, Error)]
pub enum BrainInitError {
    #[error("Environment variable {0} is not set")]
    ConfigMissing(String),

    #[error("Invalid model configuration: {0}")]
    ConfigInvalid(String),

    #[error("Failed to create HTTP client: {0}")]
    ClientError(#[from] reqwest::Error),
}
