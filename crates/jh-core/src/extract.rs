//! Log text extraction from the log server's HTML page.
//!
//! The page carries no schema; the log body is whatever sits inside the first `<pre>` element.
//! Later `<pre>` blocks are ignored.

use std::sync::LazyLock;

use regex::Regex;

static PRE_BLOCK: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?is)<pre[^>]*>(.*?)</pre>").ok());

/// Entities the log server escapes, in the order they must be undone.
///
/// `&amp;` comes after `&lt;`/`&gt;` so that `&amp;lt;` decodes to the literal text `&lt;`.
const ENTITIES: [(&str, &str); 6] = [
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&amp;", "&"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&nbsp;", " "),
];

/// Text of the first `<pre>` block, unescaped and trimmed.
///
/// A page without a `<pre>` block yields an empty string: the container simply produced no
/// output of that type.
pub fn extract_pre(html: &str) -> String {
    let Some(re) = PRE_BLOCK.as_ref() else {
        return String::new();
    };
    let Some(body) = re.captures(html).and_then(|c| c.get(1)) else {
        return String::new();
    };
    unescape(body.as_str()).trim().to_string()
}

fn unescape(raw: &str) -> String {
    ENTITIES
        .iter()
        .fold(raw.to_string(), |acc, (from, to)| acc.replace(from, to))
}
