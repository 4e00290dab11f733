// File surfer agent - drives the viewport from model tool calls

use crate::agent::ChatAgent;
use crate::agent::config::SurferConfig;
use crate::agent::error::{AgentError, error_report};
use crate::agent::inference::{BrainRef, ModelReply, TERMINATE, build_request, classify_response};
use crate::agent::types::{AgentResponse, ChatMessage, ChatRole, GeneratedReply};
use crate::browser::{ContentRenderer, Viewport};
use crate::tools::{ActionOutcome, BrowserAction, ToolCall, ToolSet};

use async_trait::async_trait;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

const STATE_SEPARATOR: &str = "\n=======================\n";

/// Agent that previews local files, directories and web pages through a text viewport
pub struct FileSurfer<B: BrainRef> {
    name: String,
    description: String,
    system_prompt: String,
    brain: B,
    tools: ToolSet,
    viewport: Viewport,
    history: Vec<ChatMessage>,
}

impl<B: BrainRef> FileSurfer<B> {
    pub fn new(config: &SurferConfig, brain: B, renderer: Arc<dyn ContentRenderer>) -> Self {
        let tools = ToolSet::load(&config.tools_toml_path);
        Self::with_tools(config, brain, renderer, tools)
    }

    pub fn with_tools(
        config: &SurferConfig,
        brain: B,
        renderer: Arc<dyn ContentRenderer>,
        tools: ToolSet,
    ) -> Self {
        info!(
            name = %config.name,
            base_path = %config.base_path.display(),
            viewport_size = config.viewport_size,
            "file surfer created"
        );

        Self {
            name: config.name.clone(),
            description: config.description.clone(),
            system_prompt: config.system_prompt.clone(),
            brain,
            tools,
            viewport: Viewport::new(&config.base_path, config.viewport_size, renderer),
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Ask the model for the next step and apply it to the viewport.
    ///
    /// The last history message is the task. On success the reply is appended to
    /// the history as this agent's turn. Malformed or unknown tool calls abort the
    /// rest of the batch and come back as an error text, not as `Err`.
    pub async fn generate_reply(
        &mut self,
        cancel: &CancellationToken,
    ) -> Result<GeneratedReply, AgentError> {
        let (task, history) = match self.history.split_last() {
            Some((last, rest)) if last.role == ChatRole::User => (last.content.as_str(), rest),
            _ => return Err(AgentError::MissingTask),
        };

        let request = build_request(
            &self.brain,
            &self.system_prompt,
            history,
            &self.context_message(),
            task,
            self.tools.definitions(),
        )
        .map_err(AgentError::RequestBuild)?;

        if cancel.is_cancelled() {
            return Err(AgentError::Cancelled);
        }

        let response = tokio::select! {
            result = self.brain.infer(request) => result?,
            _ = cancel.cancelled() => {
                info!(agent = %self.name, "generation cancelled during inference");
                return Err(AgentError::Cancelled);
            }
        };

        let text = match classify_response(&response) {
            ModelReply::Text(text) => {
                info!(agent = %self.name, "model answered directly");
                text
            }
            ModelReply::ToolCalls(calls) => self.run_tool_calls(calls).await?,
            ModelReply::Empty => {
                warn!(agent = %self.name, "model returned neither text nor tool calls");
                TERMINATE.to_string()
            }
        };

        self.history
            .push(ChatMessage::assistant(self.name.clone(), text.clone()));
        Ok(GeneratedReply::new(text))
    }

    /// Execute a batch in order and render the resulting viewport state
    async fn run_tool_calls(&mut self, calls: Vec<ToolCall>) -> Result<String, AgentError> {
        for call in calls {
            let action = match BrowserAction::from_call(&call) {
                Ok(action) => action,
                Err(e) => {
                    warn!(tool = %call.name, id = %call.id, error = %e, "tool call rejected, aborting batch");
                    return Ok(format!(
                        "File surfer encountered an error decoding the tool call: {}",
                        e
                    ));
                }
            };

            info!(tool = %call.name, id = %call.id, "Executing tool");
            match action.apply(&mut self.viewport).await? {
                ActionOutcome::Search { found: false } => {
                    info!(tool = %call.name, "search found no match");
                }
                ActionOutcome::Search { found: true } | ActionOutcome::Moved => {}
            }
        }

        let (header, content) = self.browser_state();
        Ok(format!("{}{}{}", header.trim(), STATE_SEPARATOR, content))
    }

    fn context_message(&self) -> String {
        match self.viewport.path() {
            Some(path) => format!(
                "Your file viewer is currently open to the file or directory '{}' with path '{}'.",
                self.viewport.page_title().unwrap_or(path),
                path
            ),
            None => format!(
                "Your file viewer has no file or directory open. Relative paths are resolved against '{}'.",
                self.viewport.base_path().display()
            ),
        }
    }

    /// Header describing the viewport position, and the visible page text
    fn browser_state(&self) -> (String, String) {
        let Some(path) = self.viewport.path() else {
            return ("Path: (none)\nNo document is open.\n".to_string(), String::new());
        };

        let mut header = format!("Path: {}\n", path);
        if let Some(title) = self.viewport.page_title() {
            header.push_str(&format!("Title: {}\n", title));
        }

        let current_page = self.viewport.current_page().unwrap_or(0);
        header.push_str(&format!(
            "Viewport position: Showing page {} of {}.\n",
            current_page + 1,
            self.viewport.page_count()
        ));

        let content = self.viewport.page_content().unwrap_or_default().to_string();
        (header, content)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

#[async_trait]
impl<B: BrainRef> ChatAgent for FileSurfer<B> {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn on_messages(
        &mut self,
        messages: &[ChatMessage],
        cancel: CancellationToken,
    ) -> AgentResponse {
        self.history.extend(messages.iter().cloned());
        info!(agent = %self.name, incoming = messages.len(), history = self.history.len(), "handling messages");

        let result = AssertUnwindSafe(self.generate_reply(&cancel))
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| Err(AgentError::Panicked(panic_message(&*payload))));

        match result {
            Ok(reply) => {
                info!(agent = %self.name, is_final = reply.is_final, "reply generated");
                AgentResponse {
                    message: ChatMessage::assistant(self.name.clone(), reply.text),
                    is_error: false,
                }
            }
            Err(e) => {
                error!(agent = %self.name, error = %e, "file surfing failed");
                let report = error_report(&e);
                let message = ChatMessage::assistant(self.name.clone(), report);
                self.history.push(message.clone());
                AgentResponse {
                    message,
                    is_error: true,
                }
            }
        }
    }

    async fn on_reset(&mut self) {
        info!(agent = %self.name, cleared = self.history.len(), "resetting chat history");
        self.history.clear();
    }
}
