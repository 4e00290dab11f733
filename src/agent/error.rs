// Agent errors

use crate::brain::BrainError;
use crate::browser::BrowserError;
use std::fmt::Write;
use thiserror::Error;

/// Errors raised while generating a reply
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Inference failed")]
    Inference(#[from] BrainError),

    #[error("Request build error: {0}")]
    RequestBuild(&'static str),

    #[error(transparent)]
    Browser(#[from] BrowserError),

    #[error("The last message in the history is not a user task")]
    MissingTask,

    #[error("Generation cancelled")]
    Cancelled,

    #[error("Unexpected failure: {0}")]
    Panicked(String),
}

/// Render an error and its full source chain as a chat-visible report
pub fn error_report(err: &(dyn std::error::Error + 'static)) -> String {
    let mut report = format!("File surfing error:\n\n{}", err);

    let mut source = err.source();
    if source.is_some() {
        report.push_str("\n\nCaused by:");
    }
    let mut depth = 0;
    while let Some(cause) = source {
        let _ = write!(report, "\n    {}: {}", depth, cause);
        depth += 1;
        source = cause.source();
    }

    report
}
