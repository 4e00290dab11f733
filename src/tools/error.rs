// Error types for Tools module

use thiserror::Error;

/// Failure to turn a model tool call into a browser action
#[derive(Debug, Error)]
pub enum ToolDecodeError {
    #[error("unknown tool '{0}'")]
    UnknownTool(String),

    #[error("invalid arguments for tool '{tool}': {source}")]
    InvalidArguments {
        tool: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure to load tool descriptions
#[derive(Debug, Error)]
pub enum ToolConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}
