use std::fs;
use url::Url;

use crate::extractor::{ParsedArticle, extract};

fn extract_str(html: &str) -> ParsedArticle {
    let url = Url::parse("https://example.com/article").unwrap();
    extract(html, &url)
}

#[test]
fn test_extract_article_fixture() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/article.html")
        .expect("Failed to read test fixture");

    let article = extract_str(&html);

    assert_eq!(
        article.title.as_deref(),
        Some("Sample Article Headline About Renewable Energy")
    );
    assert_eq!(article.date.as_deref(), Some("2024-01-01"));

    let content = article.content.expect("content should be extracted");
    assert!(content.contains("first paragraph"));
    assert!(content.contains("second paragraph"));
    assert!(content.contains("third paragraph"));

    // Nothing from noise subtrees may leak into the content.
    assert!(!content.contains("analytics beacon"));
    assert!(!content.contains("display: none"));
    assert!(!content.contains("premium subscription"));
    assert!(!content.contains("Sponsored"));
    assert!(!content.contains("Trending now"));
    assert!(!content.contains("Related stories"));
    // The navigation sits outside the article container anyway.
    assert!(!content.contains("Politics"));
}

#[test]
fn test_meta_fallback_fixture() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/meta_fallback.html")
        .expect("Failed to read test fixture");

    let article = extract_str(&html);

    // Both the <h1> and the <title> are too short, so the Open Graph title
    // wins.
    assert_eq!(article.title.as_deref(), Some("Metadata Provided Headline"));
    // No date elements anywhere, so the meta tag is used.
    assert_eq!(article.date.as_deref(), Some("2023-11-05"));

    let content = article.content.expect("body fallback should produce content");
    assert!(content.contains("fall back to the page body"));
    assert!(!content.contains("Site header"));
    assert!(!content.contains("Menu"));
    assert!(!content.contains("Footer text"));
}

#[test]
fn test_title_skips_short_headings() {
    let html = r#"<html><body>
        <h1>Brief</h1>
        <div class="post-title">A Sufficiently Long Post Title</div>
        <p>text</p>
    </body></html>"#;

    let article = extract_str(html);
    assert_eq!(
        article.title.as_deref(),
        Some("A Sufficiently Long Post Title")
    );
}

#[test]
fn test_title_falls_back_to_page_title() {
    let html = "<html><head><title>Tiny</title></head><body><p>text</p></body></html>";
    let article = extract_str(html);
    // No heading qualifies and there is no og:title, but the page title is
    // non-empty.
    assert_eq!(article.title.as_deref(), Some("Tiny"));
}

#[test]
fn test_title_missing() {
    let html = "<html><body><p>just a paragraph</p></body></html>";
    let article = extract_str(html);
    assert_eq!(article.title, None);
}

#[test]
fn test_date_prefers_machine_readable_datetime() {
    let html = r#"<html><body>
        <span class="date">yesterday</span>
        <time datetime="2024-05-17T12:00:00Z">May 17</time>
    </body></html>"#;

    let article = extract_str(html);
    assert_eq!(article.date.as_deref(), Some("2024-05-17T12:00:00Z"));
}

#[test]
fn test_date_element_beats_meta_tag() {
    let html = r#"<html><head>
        <meta property="article:published_time" content="2024-01-01T00:00:00Z">
    </head><body>
        <span class="published">March 3, 2024</span>
    </body></html>"#;

    let article = extract_str(html);
    assert_eq!(article.date.as_deref(), Some("March 3, 2024"));
}

#[test]
fn test_date_from_meta_when_no_elements() {
    let html = r#"<html><head>
        <meta name="date" content="2022-08-09">
    </head><body><p>text</p></body></html>"#;

    let article = extract_str(html);
    assert_eq!(article.date.as_deref(), Some("2022-08-09"));
}

#[test]
fn test_content_skips_noise_inside_container() {
    let filler = "A sentence of article body text that contributes length. ".repeat(5);
    let html = format!(
        r#"<html><body><article>
            <p>{filler}</p>
            <script>var tracker = true;</script>
            <nav>Section menu</nav>
            <div class="sidebar">Widgets</div>
        </article></body></html>"#
    );

    let article = extract_str(&html);
    let content = article.content.unwrap();
    assert!(content.contains("article body text"));
    assert!(!content.contains("tracker"));
    assert!(!content.contains("Section menu"));
    assert!(!content.contains("Widgets"));
}

#[test]
fn test_content_falls_through_short_container() {
    let filler = "Enough words to clear the minimum content threshold comfortably. ".repeat(4);
    let html = format!(
        r#"<html><body>
            <article>too short</article>
            <div class="content"><p>{filler}</p></div>
        </body></html>"#
    );

    let article = extract_str(&html);
    let content = article.content.unwrap();
    assert!(content.contains("minimum content threshold"));
    assert!(!content.contains("too short"));
}

#[test]
fn test_body_fallback_strips_boilerplate() {
    let html = r#"<html><body>
        <header>Masthead</header>
        <nav>Links</nav>
        <p>Loose paragraph outside any recognizable container.</p>
        <footer>Imprint</footer>
    </body></html>"#;

    let article = extract_str(html);
    let content = article.content.unwrap();
    assert!(content.contains("Loose paragraph"));
    assert!(!content.contains("Masthead"));
    assert!(!content.contains("Links"));
    assert!(!content.contains("Imprint"));
}

#[test]
fn test_extraction_is_idempotent() {
    let html = fs::read_to_string("src/extractor/tests/fixtures/article.html")
        .expect("Failed to read test fixture");

    let first = extract_str(&html);
    let second = extract_str(&html);
    assert_eq!(first, second);
}

#[test]
fn test_malformed_html_does_not_panic() {
    let html = "<html><head><title>Broken page title</title><body><p>Unclosed tags<div>More content";
    let article = extract_str(html);
    assert_eq!(article.title.as_deref(), Some("Broken page title"));
}

#[test]
fn test_empty_input() {
    let article = extract_str("");
    assert_eq!(article.title, None);
    assert_eq!(article.date, None);
    assert_eq!(article.content, None);
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_extract_never_panics(
            html in ".*",
        ) {
            // Should never panic regardless of input
            let _ = extract_str(&html);
        }

        #[test]
        fn test_extract_idempotent(
            html in ".*",
        ) {
            prop_assert_eq!(extract_str(&html), extract_str(&html));
        }
    }
}
