// Model boundary - request construction and response classification

use crate::agent::types::{ChatMessage, ChatRole};
use crate::brain::{
    Brain, BrainError, ContentBlock, MessageRequest, MessageResponse, RequestBuilder,
    ToolDefinition,
};
use crate::tools::ToolCall;
use async_trait::async_trait;

/// Text returned when the model gives neither an answer nor tool calls
pub const TERMINATE: &str = "TERMINATE";

/// Trait for brain reference (for testing)
#[async_trait]
pub trait BrainRef: Send + Sync {
    async fn infer(&self, request: MessageRequest) -> Result<MessageResponse, BrainError>;
    fn model(&self) -> &str;
    fn max_output_tokens(&self) -> u32;
    fn temperature(&self) -> Option<f32>;
    fn top_p(&self) -> Option<f32>;
    fn top_k(&self) -> Option<u32>;
}

#[async_trait]
impl BrainRef for Brain {
    async fn infer(&self, request: MessageRequest) -> Result<MessageResponse, BrainError> {
        Brain::infer(self, request).await
    }

    fn model(&self) -> &str {
        self.default_model()
    }

    fn max_output_tokens(&self) -> u32 {
        self.config().max_output_tokens
    }

    fn temperature(&self) -> Option<f32> {
        self.config().temperature
    }

    fn top_p(&self) -> Option<f32> {
        self.config().top_p
    }

    fn top_k(&self) -> Option<u32> {
        self.config().top_k
    }
}

/// The shape of a model response
#[derive(Debug, Clone, PartialEq)]
pub enum ModelReply {
    /// Direct answer
    Text(String),
    /// Ordered batch of tool calls
    ToolCalls(Vec<ToolCall>),
    /// Neither text nor tool calls
    Empty,
}

/// Classify a response. Any tool call makes it a batch; text alongside it is dropped.
pub fn classify_response(response: &MessageResponse) -> ModelReply {
    let tool_calls = extract_tool_calls(response);
    if !tool_calls.is_empty() {
        return ModelReply::ToolCalls(tool_calls);
    }

    let text = extract_text(response);
    if text.trim().is_empty() {
        ModelReply::Empty
    } else {
        ModelReply::Text(text)
    }
}

/// Extract text content from response
fn extract_text(response: &MessageResponse) -> String {
    response
        .content
        .iter()
        .filter_map(|block| {
            if let ContentBlock::Text { text } = block {
                Some(text.as_str())
            } else {
                None
            }
        })
        .collect::<Vec<_>>()
        .join("")
}

/// Extract tool calls from response
fn extract_tool_calls(response: &MessageResponse) -> Vec<ToolCall> {
    response
        .content
        .iter()
        .filter_map(|block| {
            if let ContentBlock::ToolUse { id, name, input } = block {
                Some(ToolCall {
                    id: id.clone(),
                    name: name.clone(),
                    arguments: input.clone(),
                })
            } else {
                None
            }
        })
        .collect()
}

/// Build the inference request: history, then the viewport context, then the task.
/// System messages in the history are appended to the system prompt.
pub fn build_request<B: BrainRef>(
    brain: &B,
    system_prompt: &str,
    history: &[ChatMessage],
    context: &str,
    task: &str,
    tool_defs: &[ToolDefinition],
) -> Result<MessageRequest, &'static str> {
    let mut system = system_prompt.to_string();
    let mut builder = RequestBuilder::new(brain.model()).max_tokens(brain.max_output_tokens());

    for msg in history {
        builder = match msg.role {
            ChatRole::User => builder.user_text(msg.content.clone()),
            ChatRole::Assistant => builder.assistant_text(msg.content.clone()),
            ChatRole::System => {
                system.push_str("\n\n");
                system.push_str(&msg.content);
                builder
            }
        };
    }

    builder = builder
        .user_text(context)
        .user_text(task)
        .tools(tool_defs.to_vec());

    if !system.trim().is_empty() {
        builder = builder.system(system.trim().to_string());
    }
    if let Some(temp) = brain.temperature() {
        builder = builder.temperature(temp);
    }
    if let Some(tp) = brain.top_p() {
        builder = builder.top_p(tp);
    }
    if let Some(tk) = brain.top_k() {
        builder = builder.top_k(tk);
    }

    builder.build()
}
