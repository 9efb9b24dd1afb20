use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Best-effort extraction result. Fields the heuristics could not fill stay
/// `None`; extraction itself never fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedArticle {
    pub title: Option<String>,
    pub date: Option<String>,
    pub content: Option<String>,
}

static SPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());
static BLANK_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n+").unwrap());

/// Collapse runs of spaces/tabs to a single space and runs of blank lines to
/// a single blank line.
pub fn normalize_whitespace(text: &str) -> String {
    let text = text.trim();
    let spaced = SPACE_REGEX.replace_all(text, " ");
    BLANK_LINE_REGEX.replace_all(&spaced, "\n\n").trim().to_string()
}
