//! Minimal inline markup transform.
//!
//! Turns the answer service's lightweight markdown into HTML: line breaks,
//! `**bold**`, `*italic*` and `` `code` `` spans, applied in that order.
//! Input is HTML-escaped first so message text can never inject tags.

use std::sync::LazyLock;

use regex::Regex;

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid regex"));
static ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.*?)\*").expect("valid regex"));
static CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`(.*?)`").expect("valid regex"));
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Escape the HTML metacharacters `&`, `<`, `>` and `"`.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

/// Render message text as inline HTML.
pub fn to_html(text: &str) -> String {
    let escaped = escape_html(text).replace('\n', "<br>");
    let bold = BOLD.replace_all(&escaped, "<strong>$1</strong>");
    let italic = ITALIC.replace_all(&bold, "<em>$1</em>");
    CODE.replace_all(&italic, "<code>$1</code>").into_owned()
}

/// Drop markup and collapse whitespace: the plain-text form used by exports.
///
/// Both the lightweight markers and HTML tags are removed, keeping the
/// inner text.
pub fn to_plain(text: &str) -> String {
    let bold = BOLD.replace_all(text, "$1");
    let italic = ITALIC.replace_all(&bold, "$1");
    let code = CODE.replace_all(&italic, "$1");
    let stripped = TAG.replace_all(&code, "");
    WHITESPACE.replace_all(&stripped, " ").trim().to_string()
}
