//! Title and body extraction for article pages.
//!
//! The title comes from the first `<h1>`, then `<title>`, then a fixed
//! placeholder. The body is the longest text among a fixed list of common
//! article containers; an early selector often matches a teaser or an empty
//! wrapper while a broader one further down holds the real text.

use crate::models::Article;
use crate::utils::clean_text;
use once_cell::sync::Lazy;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

/// Title used when a page has neither `<h1>` nor `<title>`.
pub const UNTITLED: &str = "Sem título";

const BODY_SELECTORS: [&str; 9] = [
    "article",
    "div[itemprop='articleBody']",
    "div.td-post-content",
    "div.entry-content",
    "div.post-content",
    "section.article-content",
    "div#js-article-content",
    "div.content",
    "main",
];

static H1: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").expect("valid selector"));
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").expect("valid selector"));
static BODY: Lazy<Vec<Selector>> = Lazy::new(|| {
    BODY_SELECTORS
        .iter()
        .map(|s| Selector::parse(s).expect("valid selector"))
        .collect()
});

/// Parse an article page into a whitespace-normalized title and body.
///
/// The body is empty when no container selector matches.
#[instrument(level = "debug", skip_all)]
pub fn parse_article(html: &str) -> Article {
    let document = Html::parse_document(html);

    let title = match document.select(&H1).next() {
        Some(h1) => element_text(h1),
        None => document
            .select(&TITLE)
            .next()
            .map(element_text)
            .unwrap_or_else(|| UNTITLED.to_string()),
    };

    let mut body = String::new();
    let mut body_len = 0;
    for selector in BODY.iter() {
        if let Some(element) = document.select(selector).next() {
            let text = element_text(element);
            let len = text.chars().count();
            if len > body_len {
                body_len = len;
                body = text;
            }
        }
    }

    debug!(title_chars = title.chars().count(), body_chars = body_len, "Parsed article");
    Article { title, body }
}

/// Visible text of an element: text nodes joined by spaces, then cleaned.
///
/// Contents of `script`, `style`, `noscript` and `template` are skipped.
fn element_text(element: ElementRef<'_>) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for node in element.descendants() {
        if let Node::Text(text) = node.value() {
            let hidden = node
                .parent()
                .and_then(ElementRef::wrap)
                .is_some_and(|p| {
                    matches!(p.value().name(), "script" | "style" | "noscript" | "template")
                });
            if !hidden {
                parts.push(&**text);
            }
        }
    }
    clean_text(&parts.join(" "))
}
