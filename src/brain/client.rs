// Brain client - HTTP communication with inference backend

use super::{BrainConfig, BrainError, BrainInitError, MessageRequest, MessageResponse};
use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Brain client for LLM inference
#[derive(Clone)]
pub struct Brain {
    config: BrainConfig,
    client: Client,
}

impl Brain {
    /// Create a new Brain instance
    pub fn new(config: BrainConfig) -> Result<Self, BrainInitError> {
        info!(
            endpoint = %config.endpoint,
            model = %config.default_model,
            timeout_secs = ?config.request_timeout_secs,
            "initializing brain"
        );

        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self { config, client })
    }

    pub fn default_model(&self) -> &str {
        &self.config.default_model
    }

    pub fn config(&self) -> &BrainConfig {
        &self.config
    }

    /// Perform one inference call. Failures are returned immediately, never retried.
    pub async fn infer(&self, request: MessageRequest) -> Result<MessageResponse, BrainError> {
        info!(
            model = %request.model,
            messages_count = request.messages.len(),
            has_system = request.system.is_some(),
            tools = request.tools.as_ref().map_or(0, |t| t.len()),
            max_tokens = request.max_tokens,
            "starting inference"
        );

        let start = Instant::now();
        match self.send_request(&request).await {
            Ok(response) => {
                let (input_tokens, output_tokens) = response
                    .usage
                    .as_ref()
                    .map(|u| (u.input_tokens, u.output_tokens))
                    .unwrap_or((0, 0));

                info!(
                    model = %response.model,
                    input_tokens = input_tokens,
                    output_tokens = output_tokens,
                    latency_ms = start.elapsed().as_millis() as u64,
                    content_blocks = response.content.len(),
                    stop_reason = ?response.stop_reason,
                    "inference completed"
                );
                Ok(response)
            }
            Err(e) => {
                error!(
                    latency_ms = start.elapsed().as_millis() as u64,
                    error = %e,
                    "inference failed"
                );
                Err(e)
            }
        }
    }

    async fn send_request(&self, request: &MessageRequest) -> Result<MessageResponse, BrainError> {
        let url = format!("{}/v1/messages", self.config.endpoint.trim_end_matches('/'));

        debug!(url = %url, "sending HTTP request");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("Authorization", format!("Bearer {}", &self.config.api_key))
            .header("anthropic-version", "2023-06-01")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        debug!(status = status.as_u16(), "received HTTP response");

        if status.is_success() {
            let body = response.text().await?;
            debug!(
                response_preview = %body.chars().take(200).collect::<String>(),
                "response body received"
            );
            return Ok(serde_json::from_str(&body)?);
        }

        let body = response.text().await.unwrap_or_default();
        Err(match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BrainError::AuthenticationFailed {
                status: status.as_u16(),
                body,
            },
            StatusCode::BAD_REQUEST => BrainError::InvalidRequest(body),
            StatusCode::PAYMENT_REQUIRED => BrainError::InsufficientBalance(body),
            StatusCode::TOO_MANY_REQUESTS => BrainError::RateLimited(body),
            s if s.is_server_error() => BrainError::ModelError(body),
            s => BrainError::UnexpectedStatus {
                status: s.as_u16(),
                body,
            },
        })
    }
}
