// Document viewport - paging and searching over a rendered document

use super::error::{BrowserError, Result};
use super::renderer::{ContentRenderer, url_scheme};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Default characters per page
pub const DEFAULT_VIEWPORT_SIZE: usize = 1024 * 5;

/// Last successful search, used by find-next
#[derive(Debug, Clone, PartialEq, Eq)]
struct SearchState {
    term: String,
    page: usize,
}

/// The currently open document
#[derive(Debug, Clone)]
struct OpenDocument {
    path: String,
    title: Option<String>,
    pages: Vec<String>,
    current_page: usize,
    search: Option<SearchState>,
}

/// A fixed-size text viewport over one open document.
///
/// Starts with no document open. Every operation except [`Viewport::open_path`]
/// fails with [`BrowserError::NoDocumentOpen`] until a document has been opened.
pub struct Viewport {
    base_path: PathBuf,
    viewport_size: usize,
    renderer: Arc<dyn ContentRenderer>,
    document: Option<OpenDocument>,
}

impl Viewport {
    /// Create a viewport. A size of zero is clamped to one character per page.
    pub fn new(
        base_path: impl Into<PathBuf>,
        viewport_size: usize,
        renderer: Arc<dyn ContentRenderer>,
    ) -> Self {
        Self {
            base_path: base_path.into(),
            viewport_size: viewport_size.max(1),
            renderer,
            document: None,
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn viewport_size(&self) -> usize {
        self.viewport_size
    }

    #[allow(dead_code)]
    pub fn is_open(&self) -> bool {
        self.document.is_some()
    }

    /// Path or URL of the open document
    pub fn path(&self) -> Option<&str> {
        self.document.as_ref().map(|d| d.path.as_str())
    }

    pub fn page_title(&self) -> Option<&str> {
        self.document.as_ref().and_then(|d| d.title.as_deref())
    }

    /// Zero-based index of the visible page
    pub fn current_page(&self) -> Option<usize> {
        self.document.as_ref().map(|d| d.current_page)
    }

    pub fn page_count(&self) -> usize {
        self.document.as_ref().map_or(0, |d| d.pages.len())
    }

    #[allow(dead_code)]
    pub fn pages(&self) -> &[String] {
        self.document
            .as_ref()
            .map(|d| d.pages.as_slice())
            .unwrap_or_default()
    }

    /// Text of the visible page
    pub fn page_content(&self) -> Option<&str> {
        self.document
            .as_ref()
            .map(|d| d.pages[d.current_page].as_str())
    }

    /// Resolve a location against the base path. `scheme://` locations pass
    /// through untouched except `file://`, which is opened as a local path.
    pub fn resolve(&self, path: &str) -> String {
        let local = match path.strip_prefix("file://") {
            Some(local) => local,
            None if url_scheme(path).is_some() => return path.to_string(),
            None => path,
        };

        let local = Path::new(local);
        let joined = if local.is_absolute() {
            local.to_path_buf()
        } else {
            self.base_path.join(local)
        };
        // drops `.` segments so directory indexes link to clean paths
        joined.components().collect::<PathBuf>().display().to_string()
    }

    /// Open and render a path or URL, resetting the cursor and search state
    pub async fn open_path(&mut self, path: &str) -> Result<()> {
        let location = self.resolve(path);
        info!(requested = %path, location = %location, "opening path");

        let rendered = self.renderer.render(&location).await?;
        let pages = paginate(&rendered.text, self.viewport_size);

        debug!(
            location = %location,
            chars = rendered.text.chars().count(),
            pages = pages.len(),
            "document paginated"
        );

        self.document = Some(OpenDocument {
            path: location,
            title: rendered.title,
            pages,
            current_page: 0,
            search: None,
        });
        Ok(())
    }

    pub fn page_up(&mut self) -> Result<()> {
        let doc = self.document_mut()?;
        doc.current_page = doc.current_page.saturating_sub(1);
        Ok(())
    }

    pub fn page_down(&mut self) -> Result<()> {
        let doc = self.document_mut()?;
        if doc.current_page + 1 < doc.pages.len() {
            doc.current_page += 1;
        }
        Ok(())
    }

    /// Case-insensitive search starting at the current page, wrapping once.
    /// Returns false and leaves the viewport untouched if nothing matches.
    pub fn find_on_page(&mut self, term: &str) -> Result<bool> {
        let doc = self.document_mut()?;
        let start = doc.current_page;
        Ok(doc.seek(term, start))
    }

    /// Repeat the last successful search from the page after its match
    pub fn find_next(&mut self) -> Result<bool> {
        let doc = self.document_mut()?;
        let search = doc.search.clone().ok_or(BrowserError::NoActiveSearch)?;
        let start = (search.page + 1) % doc.pages.len();
        Ok(doc.seek(&search.term, start))
    }

    fn document_mut(&mut self) -> Result<&mut OpenDocument> {
        self.document.as_mut().ok_or(BrowserError::NoDocumentOpen)
    }
}

impl OpenDocument {
    fn seek(&mut self, term: &str, start: usize) -> bool {
        let needle = term.to_lowercase();
        let count = self.pages.len();

        let hit = (0..count)
            .map(|offset| (start + offset) % count)
            .find(|&idx| self.pages[idx].to_lowercase().contains(&needle));

        match hit {
            Some(idx) => {
                debug!(term = %term, page = idx, "search matched");
                self.current_page = idx;
                self.search = Some(SearchState {
                    term: term.to_string(),
                    page: idx,
                });
                true
            }
            None => {
                debug!(term = %term, "search found no match");
                false
            }
        }
    }
}

/// Split text into windows of `size` characters, ignoring word and line breaks.
/// Empty text yields a single empty page.
pub fn paginate(text: &str, size: usize) -> Vec<String> {
    let size = size.max(1);
    let mut pages = Vec::new();
    let mut current = String::new();
    let mut chars = 0;

    for ch in text.chars() {
        current.push(ch);
        chars += 1;
        if chars == size {
            pages.push(std::mem::take(&mut current));
            chars = 0;
        }
    }

    if !current.is_empty() || pages.is_empty() {
        pages.push(current);
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::renderer::RenderedDocument;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use tokio_test::{assert_err, assert_ok};

    /// Renderer serving fixed documents keyed by resolved location
    struct StaticRenderer {
        docs: HashMap<String, RenderedDocument>,
    }

    impl StaticRenderer {
        fn new(docs: &[(&str, &str)]) -> Arc<Self> {
            Arc::new(Self {
                docs: docs
                    .iter()
                    .map(|(path, text)| {
                        (
                            path.to_string(),
                            RenderedDocument::new(*text, Some(format!("title of {}", path))),
                        )
                    })
                    .collect(),
            })
        }
    }

    #[async_trait]
    impl ContentRenderer for StaticRenderer {
        async fn render(&self, location: &str) -> Result<RenderedDocument> {
            self.docs
                .get(location)
                .cloned()
                .ok_or_else(|| BrowserError::NotFound(location.to_string()))
        }
    }

    fn viewport(size: usize, docs: &[(&str, &str)]) -> Viewport {
        Viewport::new("/base", size, StaticRenderer::new(docs))
    }

    #[test]
    fn test_paginate_page_count_and_concat() {
        let text = "the quick brown fox jumps over the lazy dog";
        for size in [1, 3, 7, 10, 43, 100] {
            let pages = paginate(text, size);
            assert_eq!(pages.len(), text.len().div_ceil(size));
            assert_eq!(pages.concat(), text);
            assert!(pages.iter().all(|p| p.chars().count() <= size));
        }
    }

    #[test]
    fn test_paginate_empty() {
        assert_eq!(paginate("", 10), vec![String::new()]);
    }

    #[test]
    fn test_paginate_multibyte() {
        let pages = paginate("ñandú~ü", 2);
        assert_eq!(pages, vec!["ña", "nd", "ú~", "ü"]);
    }

    #[tokio::test]
    async fn test_open_and_page_scenario() {
        let mut vp = viewport(10, &[("/base/a.txt", "abcdefghijKLMNOPQRST")]);

        assert_ok!(vp.open_path("a.txt").await);
        assert_eq!(vp.pages(), &["abcdefghij", "KLMNOPQRST"]);
        assert_eq!(vp.current_page(), Some(0));
        assert_eq!(vp.path(), Some("/base/a.txt"));
        assert_eq!(vp.page_title(), Some("title of /base/a.txt"));

        vp.page_down().unwrap();
        assert_eq!(vp.current_page(), Some(1));
        assert_eq!(vp.page_content(), Some("KLMNOPQRST"));

        vp.page_down().unwrap();
        assert_eq!(vp.current_page(), Some(1));
    }

    #[tokio::test]
    async fn test_page_up_at_first_page_is_noop() {
        let mut vp = viewport(4, &[("/base/a", "0123456789")]);
        vp.open_path("/base/a").await.unwrap();

        vp.page_up().unwrap();
        assert_eq!(vp.current_page(), Some(0));

        vp.page_down().unwrap();
        vp.page_down().unwrap();
        vp.page_up().unwrap();
        assert_eq!(vp.current_page(), Some(1));
    }

    #[tokio::test]
    async fn test_operations_require_open_document() {
        let mut vp = viewport(10, &[]);

        assert!(matches!(vp.page_up(), Err(BrowserError::NoDocumentOpen)));
        assert!(matches!(vp.page_down(), Err(BrowserError::NoDocumentOpen)));
        assert!(matches!(
            vp.find_on_page("x"),
            Err(BrowserError::NoDocumentOpen)
        ));
        assert!(matches!(vp.find_next(), Err(BrowserError::NoDocumentOpen)));
        assert_eq!(vp.page_content(), None);
        assert_eq!(vp.page_count(), 0);
    }

    #[tokio::test]
    async fn test_open_missing_keeps_previous_document() {
        let mut vp = viewport(10, &[("/base/a", "abcdefghijklmnop")]);
        vp.open_path("a").await.unwrap();
        vp.page_down().unwrap();

        let err = assert_err!(vp.open_path("missing").await);
        assert!(matches!(err, BrowserError::NotFound(ref p) if p == "/base/missing"));
        assert_eq!(vp.path(), Some("/base/a"));
        assert_eq!(vp.current_page(), Some(1));
    }

    #[tokio::test]
    async fn test_open_resets_cursor_and_search() {
        let mut vp = viewport(5, &[("/base/a", "aaaaabbbbbsurf!"), ("/base/b", "surf")]);
        vp.open_path("a").await.unwrap();
        assert!(vp.find_on_page("SURF").unwrap());
        assert_eq!(vp.current_page(), Some(2));

        vp.open_path("a").await.unwrap();
        assert_eq!(vp.current_page(), Some(0));
        assert!(matches!(vp.find_next(), Err(BrowserError::NoActiveSearch)));

        vp.open_path("b").await.unwrap();
        assert_eq!(vp.current_page(), Some(0));
    }

    #[tokio::test]
    async fn test_find_on_page_wraps_from_current() {
        let mut vp = viewport(4, &[("/base/a", "Surfxxxxyyyysurf")]);
        vp.open_path("a").await.unwrap();
        vp.page_down().unwrap();

        assert!(vp.find_on_page("surf").unwrap());
        assert_eq!(vp.current_page(), Some(3));

        vp.page_up().unwrap();
        vp.page_up().unwrap();
        assert_eq!(vp.current_page(), Some(1));
        assert!(vp.find_on_page("SURF").unwrap());
        assert_eq!(vp.current_page(), Some(3));
    }

    #[tokio::test]
    async fn test_find_on_page_miss_leaves_state() {
        let mut vp = viewport(4, &[("/base/a", "tideswelwind")]);
        vp.open_path("a").await.unwrap();
        assert!(vp.find_on_page("wind").unwrap());
        let page = vp.current_page();

        assert!(!vp.find_on_page("offshore").unwrap());
        assert_eq!(vp.current_page(), page);

        // The earlier search is still active
        assert!(vp.find_next().unwrap());
    }

    #[tokio::test]
    async fn test_find_next_cycles_matches() {
        let mut vp = viewport(5, &[("/base/a", "wave.calm.wave.calm.WAVE.")]);
        vp.open_path("a").await.unwrap();

        assert!(vp.find_on_page("wave").unwrap());
        assert_eq!(vp.current_page(), Some(0));

        assert!(vp.find_next().unwrap());
        assert_eq!(vp.current_page(), Some(2));

        assert!(vp.find_next().unwrap());
        assert_eq!(vp.current_page(), Some(4));

        assert!(vp.find_next().unwrap());
        assert_eq!(vp.current_page(), Some(0));
    }

    #[tokio::test]
    async fn test_find_next_single_match_is_found_again() {
        let mut vp = viewport(3, &[("/base/a", "abcdefghi")]);
        vp.open_path("a").await.unwrap();
        assert!(vp.find_on_page("def").unwrap());
        assert!(vp.find_next().unwrap());
        assert_eq!(vp.current_page(), Some(1));
    }

    #[tokio::test]
    async fn test_find_next_without_search() {
        let mut vp = viewport(10, &[("/base/a", "text")]);
        vp.open_path("a").await.unwrap();
        assert!(matches!(vp.find_next(), Err(BrowserError::NoActiveSearch)));
    }

    #[test]
    fn test_resolve() {
        let vp = viewport(10, &[]);
        assert_eq!(vp.resolve("docs/a.md"), "/base/docs/a.md");
        assert_eq!(vp.resolve("/etc/hosts"), "/etc/hosts");
        assert_eq!(vp.resolve("file:///etc/hosts"), "/etc/hosts");
        assert_eq!(
            vp.resolve("https://www.surfline.com/"),
            "https://www.surfline.com/"
        );
        assert_eq!(vp.resolve("ftp://example.com/a.txt"), "ftp://example.com/a.txt");
        assert_eq!(vp.resolve("."), "/base");
        assert_eq!(vp.resolve("./docs/./a.md"), "/base/docs/a.md");
    }

    #[test]
    fn test_zero_size_is_clamped() {
        let vp = viewport(0, &[]);
        assert_eq!(vp.viewport_size(), 1);
    }
}
