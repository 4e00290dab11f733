// Tools module - browser tool set exposed to the model
#![allow(unused_imports)]

pub mod action;
pub mod definitions;
pub mod error;

pub use action::{ActionOutcome, BrowserAction, ToolCall};
pub use definitions::{ToolSet, load_tool_descriptions};
pub use error::{ToolConfigError, ToolDecodeError};
