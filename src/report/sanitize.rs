//! One-way text cleanup for human-readable report bodies.
//!
//! AI-produced prose tends to embed markdown links and bare URLs. Body
//! text keeps only the link label and drops raw URLs entirely; this is
//! lossy on purpose. The dedicated Sources section never goes through
//! here — it gets link-aware rendering instead (see [`crate::report::sources`]).

use once_cell::sync::Lazy;
use regex::Regex;

static MARKDOWN_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap());

static BARE_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+").unwrap());

/// Replace `[text](url)` with `text`, strip bare `http(s)://` tokens, and
/// trim the result.
pub fn sanitize_text(text: &str) -> String {
    let without_links = MARKDOWN_LINK.replace_all(text, "$1");
    let without_urls = BARE_URL.replace_all(&without_links, "");
    without_urls.trim().to_string()
}

/// Turn a program key like `clean_air_act` into display form.
pub fn humanize_key(key: &str) -> String {
    key.replace('_', " ")
}
