// Agent module - chat agents and the tool-dispatch loop
#![allow(unused_imports)]

pub mod config;
pub mod error;
pub mod inference;
pub mod surfer;
pub mod types;

pub use config::{SurferConfig, SurferConfigError};
pub use error::AgentError;
pub use inference::BrainRef;
pub use surfer::FileSurfer;
pub use types::{AgentResponse, ChatMessage, ChatRole, GeneratedReply};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// A chat participant: receives messages, answers once, can be reset.
///
/// Calls take `&mut self`, so one agent handles one batch at a time.
#[async_trait]
pub trait ChatAgent: Send {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Handle incoming messages. Failures are reported in the returned message.
    async fn on_messages(
        &mut self,
        messages: &[ChatMessage],
        cancel: CancellationToken,
    ) -> AgentResponse;

    /// Clear the conversation history
    async fn on_reset(&mut self);
}
