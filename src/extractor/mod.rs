pub mod model;

#[cfg(test)]
mod tests;

pub use model::ParsedArticle;

use model::normalize_whitespace;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::instrument;
use url::Url;

/// Title candidates in priority order. Semantic headings go first; the
/// generic class wildcard and the page title element are last because they
/// match on almost every site.
const TITLE_SELECTORS: &[&str] = &[
    "h1",
    "article h1",
    ".post-title",
    ".article-title",
    ".entry-title",
    "[class*='title']",
    "title",
];

/// Headings at or below this length are treated as noise (logos, section
/// labels) rather than article titles.
const MIN_TITLE_LENGTH: usize = 10;

/// Publication-date element candidates, machine-readable markup first.
const DATE_ELEMENT_SELECTORS: &[&str] = &[
    "time[datetime]",
    "time",
    "[class*='date']",
    "[class*='published']",
    "[class*='time']",
];

/// Structured-metadata date candidates, tried after the visible elements.
const DATE_META_SELECTORS: &[&str] = &[
    "meta[property='article:published_time']",
    "meta[name='publish-date']",
    "meta[name='date']",
];

/// Article container candidates, semantic containers before class wildcards.
const CONTENT_SELECTORS: &[&str] = &[
    "article",
    ".post",
    ".content",
    ".article-content",
    ".entry-content",
    ".post-content",
    "[class*='article']",
    "[class*='content']",
    "main",
    "[role='article']",
];

/// A container qualifies only if its cleaned text is longer than this.
const MIN_CONTENT_LENGTH: usize = 100;

const CONTAINER_NOISE_TAGS: &[&str] = &["script", "style", "nav", "aside"];
const CONTAINER_NOISE_CLASSES: &[&str] = &["ad", "advertisement", "sidebar"];

const BODY_NOISE_TAGS: &[&str] = &["script", "style", "nav", "header", "footer", "aside"];
const BODY_NOISE_CLASSES: &[&str] = &["ad"];

/// Extract `{title, date, content}` from raw article HTML.
///
/// Pure function of the input text: no network, no state. Fields the
/// heuristics cannot fill come back as `None`, never as an error.
#[instrument(skip(html), fields(url = %source_url, html_len = html.len()))]
pub fn extract(html: &str, source_url: &Url) -> ParsedArticle {
    let document = Html::parse_document(html);

    ParsedArticle {
        title: extract_title(&document),
        date: extract_date(&document),
        content: extract_content(&document),
    }
}

fn extract_title(document: &Html) -> Option<String> {
    for selector_str in TITLE_SELECTORS {
        if let Ok(selector) = Selector::parse(selector_str)
            && let Some(element) = document.select(&selector).next()
        {
            let text = element.text().collect::<String>().trim().to_string();
            if text.chars().count() > MIN_TITLE_LENGTH {
                return Some(text);
            }
        }
    }

    // No qualifying heading: fall back to Open Graph metadata, then the raw
    // page title.
    if let Some(title) = meta_content(document, "meta[property='og:title']") {
        return Some(title);
    }
    if let Ok(selector) = Selector::parse("title")
        && let Some(element) = document.select(&selector).next()
    {
        let text = element.text().collect::<String>().trim().to_string();
        if !text.is_empty() {
            return Some(text);
        }
    }

    None
}

fn extract_date(document: &Html) -> Option<String> {
    for selector_str in DATE_ELEMENT_SELECTORS {
        if let Ok(selector) = Selector::parse(selector_str)
            && let Some(element) = document.select(&selector).next()
        {
            let date = element
                .value()
                .attr("datetime")
                .or_else(|| element.value().attr("content"))
                .map(|attr| attr.to_string())
                .filter(|attr| !attr.is_empty())
                .or_else(|| {
                    let text = element.text().collect::<String>().trim().to_string();
                    (!text.is_empty()).then_some(text)
                });
            if date.is_some() {
                return date;
            }
        }
    }

    for selector_str in DATE_META_SELECTORS {
        if let Some(content) = meta_content(document, selector_str) {
            return Some(content);
        }
    }

    None
}

fn extract_content(document: &Html) -> Option<String> {
    for selector_str in CONTENT_SELECTORS {
        if let Ok(selector) = Selector::parse(selector_str)
            && let Some(container) = document.select(&selector).next()
        {
            let text = collect_text(container, CONTAINER_NOISE_TAGS, CONTAINER_NOISE_CLASSES);
            let cleaned = normalize_whitespace(&text);
            if cleaned.chars().count() > MIN_CONTENT_LENGTH {
                return Some(cleaned);
            }
        }
    }

    // No container qualified: strip the obvious boilerplate off the whole
    // body and take whatever remains.
    if let Ok(selector) = Selector::parse("body")
        && let Some(body) = document.select(&selector).next()
    {
        let cleaned = normalize_whitespace(&collect_text(body, BODY_NOISE_TAGS, BODY_NOISE_CLASSES));
        if !cleaned.is_empty() {
            return Some(cleaned);
        }
    }

    None
}

fn meta_content(document: &Html, selector_str: &str) -> Option<String> {
    let selector = Selector::parse(selector_str).ok()?;
    let element = document.select(&selector).next()?;
    let content = element.value().attr("content")?.to_string();
    (!content.is_empty()).then_some(content)
}

/// Concatenate the text of every descendant of `root`, skipping noise
/// subtrees entirely so ad and navigation text never leaks into the result.
fn collect_text(root: ElementRef<'_>, noise_tags: &[&str], noise_classes: &[&str]) -> String {
    let mut out = String::new();
    collect_text_into(root, noise_tags, noise_classes, &mut out);
    out
}

fn collect_text_into(
    element: ElementRef<'_>,
    noise_tags: &[&str],
    noise_classes: &[&str],
    out: &mut String,
) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                if let Some(child_ref) = ElementRef::wrap(child)
                    && !is_noise(child_ref, noise_tags, noise_classes)
                {
                    collect_text_into(child_ref, noise_tags, noise_classes, out);
                }
            }
            _ => {}
        }
    }
}

fn is_noise(element: ElementRef<'_>, noise_tags: &[&str], noise_classes: &[&str]) -> bool {
    let name = element.value().name();
    if noise_tags.contains(&name) {
        return true;
    }
    element
        .value()
        .classes()
        .any(|class| noise_classes.contains(&class))
}
