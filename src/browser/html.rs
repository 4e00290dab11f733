// HTML to plain text conversion for the viewport

use regex::Regex;
use std::sync::LazyLock;

static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap());
static SCRIPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").unwrap());
static STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").unwrap());
static HEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<head\b[^>]*>.*?</head\s*>").unwrap());
static COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(p|div|li|tr|h[1-6]|section|article|header|footer|table|ul|ol|pre|blockquote)\s*>")
        .unwrap()
});
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());
static INLINE_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t\r\f]+").unwrap());
static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n+").unwrap());

/// Extract the contents of the `<title>` element, if any
pub fn extract_title(html: &str) -> Option<String> {
    TITLE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| decode_entities(m.as_str()).trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Render an HTML document as readable plain text.
///
/// Scripts, styles, the head and comments are dropped; block-level closing
/// tags become line breaks and every remaining tag is stripped.
pub fn html_to_text(html: &str) -> String {
    let text = COMMENT.replace_all(html, "");
    let text = HEAD.replace_all(&text, "");
    let text = SCRIPT.replace_all(&text, "");
    let text = STYLE.replace_all(&text, "");
    let text = BREAK.replace_all(&text, "\n");
    let text = TAG.replace_all(&text, "");
    let text = decode_entities(&text);

    let text = text
        .lines()
        .map(|line| INLINE_SPACE.replace_all(line, " ").trim().to_string())
        .collect::<Vec<_>>()
        .join("\n");

    BLANK_LINES.replace_all(&text, "\n\n").trim().to_string()
}

fn decode_entities(text: &str) -> String {
    // &amp; goes last so "&amp;lt;" stays "&lt;"
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
