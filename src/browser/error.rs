// Error types for Browser module

use thiserror::Error;

/// Viewport and renderer errors
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unsupported content type '{content_type}' at {location}")]
    UnsupportedType {
        location: String,
        content_type: String,
    },

    #[error("No document is open")]
    NoDocumentOpen,

    #[error("No active search, use find_on_page_ctrl_f first")]
    NoActiveSearch,

    #[error("HTTP {status} fetching {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("IO error reading {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, BrowserError>;
