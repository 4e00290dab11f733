// Browser actions - typed decoding and dispatch of model tool calls

use crate::browser::{BrowserError, Viewport};
use crate::tools::error::ToolDecodeError;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

pub const OPEN_PATH: &str = "open_path";
pub const PAGE_UP: &str = "page_up";
pub const PAGE_DOWN: &str = "page_down";
pub const FIND_ON_PAGE: &str = "find_on_page_ctrl_f";
pub const FIND_NEXT: &str = "find_next";

/// Every tool name the model may call
pub const TOOL_NAMES: [&str; 5] = [OPEN_PATH, PAGE_UP, PAGE_DOWN, FIND_ON_PAGE, FIND_NEXT];

/// A tool call as emitted by the model
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: Value,
}

/// One navigation step against the viewport
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "name", content = "arguments", rename_all = "snake_case")]
pub enum BrowserAction {
    OpenPath {
        path: String,
    },
    PageUp {},
    PageDown {},
    #[serde(rename = "find_on_page_ctrl_f")]
    FindOnPage {
        search_string: String,
    },
    FindNext {},
}

/// What an action did to the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Moved,
    Search { found: bool },
}

impl BrowserAction {
    /// Decode a tool call. Unknown names are an error, never skipped.
    pub fn from_call(call: &ToolCall) -> Result<Self, ToolDecodeError> {
        if !TOOL_NAMES.contains(&call.name.as_str()) {
            return Err(ToolDecodeError::UnknownTool(call.name.clone()));
        }

        let invalid = |source| ToolDecodeError::InvalidArguments {
            tool: call.name.clone(),
            source,
        };

        let arguments = match &call.arguments {
            Value::Null => json!({}),
            // Some backends send arguments as an encoded JSON string
            Value::String(raw) if raw.trim().is_empty() => json!({}),
            Value::String(raw) => serde_json::from_str(raw).map_err(invalid)?,
            other => other.clone(),
        };

        serde_json::from_value(json!({ "name": call.name, "arguments": arguments }))
            .map_err(invalid)
    }

    pub fn name(&self) -> &'static str {
        match self {
            BrowserAction::OpenPath { .. } => OPEN_PATH,
            BrowserAction::PageUp {} => PAGE_UP,
            BrowserAction::PageDown {} => PAGE_DOWN,
            BrowserAction::FindOnPage { .. } => FIND_ON_PAGE,
            BrowserAction::FindNext {} => FIND_NEXT,
        }
    }

    /// Run the action against the viewport
    pub async fn apply(&self, viewport: &mut Viewport) -> Result<ActionOutcome, BrowserError> {
        debug!(tool = self.name(), "applying browser action");

        match self {
            BrowserAction::OpenPath { path } => {
                viewport.open_path(path).await?;
                Ok(ActionOutcome::Moved)
            }
            BrowserAction::PageUp {} => {
                viewport.page_up()?;
                Ok(ActionOutcome::Moved)
            }
            BrowserAction::PageDown {} => {
                viewport.page_down()?;
                Ok(ActionOutcome::Moved)
            }
            BrowserAction::FindOnPage { search_string } => {
                let found = viewport.find_on_page(search_string)?;
                Ok(ActionOutcome::Search { found })
            }
            BrowserAction::FindNext {} => {
                let found = viewport.find_next()?;
                Ok(ActionOutcome::Search { found })
            }
        }
    }
}
