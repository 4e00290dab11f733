// Data types for Brain module - Anthropic Messages API wire format

use serde::{Deserialize, Serialize};

/// Message role on the wire. System text travels in the request's `system` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Assistant,
}

/// A single message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: Vec<ContentBlock>,
}

/// Content block types
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        #[serde(default)]
        text: String,
    },

    /// Tool call requested by the model
    ToolUse {
        id: String,
        name: String,
        #[serde(default)]
        input: serde_json::Value,
    },

    /// Thinking, redacted and server-side blocks
    #[serde(other)]
    Other,
}

/// Stop reason from API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    EndTurn,
    ToolUse,
    MaxTokens,
    StopSequence,
}

/// Token usage statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub input_tokens: u32,
    #[serde(default)]
    pub output_tokens: u32,
}

/// Tool definition for model inference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

/// Complete request to inference backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRequest {
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,
    pub max_tokens: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
}

/// Response from inference backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub id: String,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    pub model: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub stop_reason: Option<StopReason>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_with_tool_use_parses() {
        let body = json!({
            "id": "msg_1",
            "type": "message",
            "model": "m",
            "role": "assistant",
            "stop_reason": "tool_use",
            "content": [
                {"type": "text", "text": "Opening it."},
                {"type": "tool_use", "id": "toolu_1", "name": "open_path", "input": {"path": "a.md"}},
                {"type": "server_tool_use"}
            ],
            "usage": {"input_tokens": 12, "output_tokens": 3}
        });

        let response: MessageResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.stop_reason, Some(StopReason::ToolUse));
        assert_eq!(response.content.len(), 3);
        assert!(matches!(
            &response.content[1],
            ContentBlock::ToolUse { name, .. } if name == "open_path"
        ));
        assert!(matches!(response.content[2], ContentBlock::Other));
    }

    #[test]
    fn test_request_skips_unset_fields() {
        let request = MessageRequest {
            model: "m".to_string(),
            system: None,
            messages: vec![Message {
                role: Role::User,
                content: vec![ContentBlock::Text {
                    text: "hi".to_string(),
                }],
            }],
            tools: None,
            max_tokens: 16,
            temperature: None,
            top_p: None,
            top_k: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("system").is_none());
        assert!(value.get("tools").is_none());
        assert_eq!(value["messages"][0]["content"][0]["type"], "text");
    }
}
