// RequestBuilder - chainable builder for MessageRequest
#![allow(dead_code)]

use super::{ContentBlock, Message, MessageRequest, Role, ToolDefinition};

pub struct RequestBuilder {
    model: String,
    system: Option<String>,
    messages: Vec<Message>,
    tools: Option<Vec<ToolDefinition>>,
    max_tokens: u32,
    temperature: Option<f32>,
    top_p: Option<f32>,
    top_k: Option<u32>,
}

impl RequestBuilder {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system: None,
            messages: Vec::new(),
            tools: None,
            max_tokens: 4096,
            temperature: None,
            top_p: None,
            top_k: None,
        }
    }

    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn user_text(mut self, content: impl Into<String>) -> Self {
        self.push_text(Role::User, content.into());
        self
    }

    pub fn assistant_text(mut self, content: impl Into<String>) -> Self {
        self.push_text(Role::Assistant, content.into());
        self
    }

    /// Consecutive texts with the same role are folded into one message
    fn push_text(&mut self, role: Role, text: String) {
        match self.messages.last_mut() {
            Some(last) if last.role == role => last.content.push(ContentBlock::Text { text }),
            _ => self.messages.push(Message {
                role,
                content: vec![ContentBlock::Text { text }],
            }),
        }
    }

    pub fn tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = Some(tools);
        self
    }

    pub fn tool(mut self, tool: ToolDefinition) -> Self {
        self.tools.get_or_insert_with(Vec::new).push(tool);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn build(self) -> Result<MessageRequest, &'static str> {
        if self.messages.is_empty() {
            return Err("messages cannot be empty");
        }

        if self.messages.first().map(|m| &m.role) != Some(&Role::User) {
            return Err("first message must have user role");
        }

        Ok(MessageRequest {
            model: self.model,
            system: self.system,
            messages: self.messages,
            tools: self.tools,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
            top_k: self.top_k,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_requires_user_first() {
        assert!(RequestBuilder::new("m").build().is_err());
        assert!(RequestBuilder::new("m").assistant_text("hi").build().is_err());
    }

    #[test]
    fn test_consecutive_roles_fold() {
        let request = RequestBuilder::new("m")
            .system("be brief")
            .user_text("one")
            .user_text("two")
            .assistant_text("three")
            .user_text("four")
            .max_tokens(64)
            .build()
            .unwrap();

        assert_eq!(request.messages.len(), 3);
        assert_eq!(request.messages[0].content.len(), 2);
        assert_eq!(request.messages[1].role, Role::Assistant);
        assert_eq!(request.system.as_deref(), Some("be brief"));
        assert_eq!(request.max_tokens, 64);
    }
}
