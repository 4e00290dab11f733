// Content renderers - turn a path or URL into viewport text

use super::error::{BrowserError, Result};
use super::html::{extract_title, html_to_text};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use std::path::Path;
use tracing::{debug, info};

/// A document rendered to plain text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub text: String,
    pub title: Option<String>,
}

impl RenderedDocument {
    pub fn new(text: impl Into<String>, title: Option<String>) -> Self {
        Self {
            text: text.into(),
            title,
        }
    }
}

/// Renders a resolved location (local path or URL) to text
#[async_trait]
pub trait ContentRenderer: Send + Sync {
    async fn render(&self, location: &str) -> Result<RenderedDocument>;
}

/// Renderer for the local filesystem and plain HTTP(S) resources
#[derive(Clone, Default)]
pub struct LocalRenderer {
    client: Client,
}

impl LocalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    async fn render_path(&self, location: &str) -> Result<RenderedDocument> {
        let path = Path::new(location);
        let metadata = match tokio::fs::metadata(path).await {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(BrowserError::NotFound(location.to_string()));
            }
            Err(source) => {
                return Err(BrowserError::Io {
                    path: location.to_string(),
                    source,
                });
            }
        };

        if metadata.is_dir() {
            return render_directory(path).await;
        }

        let bytes = tokio::fs::read(path).await.map_err(|source| BrowserError::Io {
            path: location.to_string(),
            source,
        })?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| location.to_string());

        let text = String::from_utf8(bytes).map_err(|_| BrowserError::UnsupportedType {
            location: location.to_string(),
            content_type: extension_type(path),
        })?;

        let is_html = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("html") || e.eq_ignore_ascii_case("htm"));

        if is_html {
            let title = extract_title(&text).or(Some(file_name));
            return Ok(RenderedDocument::new(html_to_text(&text), title));
        }

        debug!(path = %location, chars = text.chars().count(), "rendered text file");
        Ok(RenderedDocument::new(text, Some(file_name)))
    }

    async fn render_url(&self, url: &str) -> Result<RenderedDocument> {
        info!(url = %url, "fetching url");

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
            return Err(BrowserError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(BrowserError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| {
                v.split(';')
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_ascii_lowercase()
            })
            .unwrap_or_else(|| "text/plain".to_string());

        let body = response.text().await?;
        debug!(url = %url, content_type = %content_type, bytes = body.len(), "url fetched");

        if content_type == "text/html" || content_type == "application/xhtml+xml" {
            let title = extract_title(&body).or_else(|| Some(url.to_string()));
            Ok(RenderedDocument::new(html_to_text(&body), title))
        } else if is_textual(&content_type) {
            Ok(RenderedDocument::new(body, Some(url.to_string())))
        } else {
            Err(BrowserError::UnsupportedType {
                location: url.to_string(),
                content_type,
            })
        }
    }
}

#[async_trait]
impl ContentRenderer for LocalRenderer {
    async fn render(&self, location: &str) -> Result<RenderedDocument> {
        if is_url(location) {
            return self.render_url(location).await;
        }
        if let Some(scheme) = url_scheme(location) {
            return Err(BrowserError::UnsupportedType {
                location: location.to_string(),
                content_type: format!("{} URL", scheme.to_ascii_lowercase()),
            });
        }
        self.render_path(location).await
    }
}

/// Whether a location names a network resource
pub fn is_url(location: &str) -> bool {
    let lower = location.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Scheme of a `scheme://` location, if it has one
pub fn url_scheme(location: &str) -> Option<&str> {
    location
        .split_once("://")
        .map(|(scheme, _)| scheme)
        .filter(|scheme| {
            !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        })
}

fn is_textual(content_type: &str) -> bool {
    content_type.starts_with("text/")
        || content_type == "application/json"
        || content_type == "application/xml"
        || content_type.ends_with("+json")
        || content_type.ends_with("+xml")
}

fn extension_type(path: &Path) -> String {
    path.extension()
        .map(|e| format!("binary .{}", e.to_string_lossy()))
        .unwrap_or_else(|| "binary".to_string())
}

/// Render a directory as a Markdown index sorted by name, directories marked with '/'.
/// Links are absolute so they open the same entry whatever the base path is.
async fn render_directory(path: &Path) -> Result<RenderedDocument> {
    let location = path.display().to_string();
    let io_err = |source| BrowserError::Io {
        path: location.clone(),
        source,
    };

    let mut entries = Vec::new();
    let mut dir = tokio::fs::read_dir(path).await.map_err(io_err)?;
    while let Some(entry) = dir.next_entry().await.map_err(io_err)? {
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_dir = entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false);
        entries.push((name, is_dir));
    }
    entries.sort();

    let parent = path.parent().unwrap_or(path);
    let mut text = format!("# Index of {}\n\n- [..]({})\n", location, parent.display());
    for (name, is_dir) in &entries {
        let target = path.join(name);
        if *is_dir {
            text.push_str(&format!("- [{}/]({}/)\n", name, target.display()));
        } else {
            text.push_str(&format!("- [{}]({})\n", name, target.display()));
        }
    }

    debug!(path = %location, entries = entries.len(), "rendered directory index");
    Ok(RenderedDocument::new(text, Some(format!("Index of {}", location))))
}
