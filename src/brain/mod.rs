// Brain module - LLM inference client
#![allow(unused_imports)]

pub mod builder;
pub mod client;
pub mod error;
pub mod types;

pub use builder::RequestBuilder;
pub use client::Brain;
pub use error::{BrainError, BrainInitError};
pub use types::{
    ContentBlock, Message, MessageRequest, MessageResponse, Role, StopReason, ToolDefinition,
};

/// Brain configuration
#[derive(Debug, Clone)]
pub struct BrainConfig {
    /// Inference backend URL
    pub endpoint: String,
    /// API key for authentication
    pub api_key: String,
    /// Default model identifier
    pub default_model: String,
    /// Request timeout in seconds (None = wait indefinitely)
    pub request_timeout_secs: Option<u64>,
    /// Maximum output tokens
    pub max_output_tokens: u32,
    /// Temperature (0.0-2.0, None = use model default)
    pub temperature: Option<f32>,
    /// Top-P nucleus sampling (0.0-1.0, None = use model default)
    pub top_p: Option<f32>,
    /// Top-K sampling (None = use model default)
    pub top_k: Option<u32>,
}

/// Parse an optional variable, warning and ignoring it when the value is invalid
fn optional_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    let value = std::env::var(name).ok()?;
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!(var = name, value = %value, "Invalid env var value, using default");
            None
        }
    }
}

fn required_env(name: &str) -> Result<String, BrainInitError> {
    std::env::var(name).map_err(|_| BrainInitError::ConfigMissing(name.into()))
}

impl BrainConfig {
    pub fn from_env() -> Result<Self, BrainInitError> {
        dotenvy::dotenv().ok();

        let endpoint = required_env("INFERENCE_ENDPOINT")?;
        let api_key = required_env("INFERENCE_API_KEY")?;
        let default_model = required_env("INFERENCE_MODEL")?;

        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(BrainInitError::ConfigInvalid(format!(
                "INFERENCE_ENDPOINT must be an http(s) URL, got '{}'",
                endpoint
            )));
        }

        Ok(Self {
            endpoint,
            api_key,
            default_model,
            request_timeout_secs: optional_env("INFERENCE_TIMEOUT_SECS"),
            max_output_tokens: optional_env("INFERENCE_MAX_TOKENS").unwrap_or(4096),
            temperature: optional_env("INFERENCE_TEMPERATURE"),
            top_p: optional_env("INFERENCE_TOP_P"),
            top_k: optional_env("INFERENCE_TOP_K"),
        })
    }
}
