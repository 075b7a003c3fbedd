//! Source-reference filtering and classification.
//!
//! Filtering runs once at the ingestion boundary, before anything is
//! rendered. Classification is used by link-aware renderers (the Sources
//! section keeps raw URLs that body sanitization would destroy).

use once_cell::sync::Lazy;
use regex::Regex;

/// Substrings that mark a junk source entry, matched case-insensitively.
const JUNK_MARKERS: &[&str] = &["turnosearch", "placeholder"];

/// Entries at or below this length carry no usable citation.
const MIN_SOURCE_LEN: usize = 10;

static LABELED_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());

static SEARCH_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[(.*?)\]$").unwrap());

/// Drop empty, too-short, and junk-marked entries. If nothing survives,
/// substitute the fixed default source list for the company.
pub fn filter_sources(sources: &[String], company_name: &str) -> Vec<String> {
    let kept: Vec<String> = sources
        .iter()
        .filter(|source| {
            let trimmed = source.trim();
            let lower = source.to_lowercase();
            !trimmed.is_empty()
                && source.len() > MIN_SOURCE_LEN
                && !JUNK_MARKERS.iter().any(|marker| lower.contains(marker))
        })
        .cloned()
        .collect();

    if kept.is_empty() {
        default_sources(company_name)
    } else {
        kept
    }
}

/// The fallback citation set used when the AI returns no usable sources.
pub fn default_sources(company_name: &str) -> Vec<String> {
    vec![
        format!("[{company_name} Website]"),
        format!("[Public financial filings for {company_name}]"),
        "[OSHA Establishment Search Database]".to_string(),
        "[EPA ECHO Database for environmental compliance]".to_string(),
    ]
}

/// The shapes a source string can take, each rendered distinctly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRef {
    /// `[text](url)` — hyperlink labeled with `text`.
    Labeled { text: String, url: String },
    /// Bare `http(s)://...` — hyperlink labeled with the URL itself.
    Bare(String),
    /// `[text]` with no trailing URL — link to a web search for `text`.
    Search(String),
    /// Anything else — literal text, no link.
    Plain(String),
}

impl SourceRef {
    pub fn classify(source: &str) -> SourceRef {
        if let Some(caps) = LABELED_LINK.captures(source) {
            return SourceRef::Labeled {
                text: caps[1].to_string(),
                url: caps[2].to_string(),
            };
        }
        if let Some(caps) = SEARCH_ONLY.captures(source.trim()) {
            return SourceRef::Search(caps[1].to_string());
        }
        let trimmed = source.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return SourceRef::Bare(trimmed.to_string());
        }
        SourceRef::Plain(source.to_string())
    }

    /// Target URL for link-aware rendering; `Plain` has none.
    pub fn href(&self) -> Option<String> {
        match self {
            SourceRef::Labeled { url, .. } => Some(url.clone()),
            SourceRef::Bare(url) => Some(url.clone()),
            SourceRef::Search(text) => Some(format!(
                "https://www.google.com/search?q={}",
                urlencoding::encode(text)
            )),
            SourceRef::Plain(_) => None,
        }
    }

    /// Visible label.
    pub fn label(&self) -> &str {
        match self {
            SourceRef::Labeled { text, .. } => text,
            SourceRef::Bare(url) => url,
            SourceRef::Search(text) => text,
            SourceRef::Plain(text) => text,
        }
    }
}
