//! Data models for crawled articles and the rendered digest.
//!
//! This module defines the core data structures used throughout the application:
//! - [`Article`]: Title and body text parsed from one fetched page
//! - [`Category`]: A topic label and the keywords that select it
//! - [`Item`]: A categorized, summarized article ready for the digest
//! - [`Digest`]: The rendered HTML document and its filename
//!
//! None of these outlive a single run; nothing is persisted between runs.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A parsed article page.
///
/// Both fields are whitespace-normalized. Either may be empty, in which
/// case the pipeline drops the article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// Best-guess headline.
    pub title: String,
    /// Best-guess body text.
    pub body: String,
}

/// A topic category and its keyword list.
///
/// Categories are kept in an ordered list; when several match an article,
/// the first one declared wins.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Category {
    /// Label shown on the digest badge.
    pub name: String,
    /// Substrings searched for, in order, within the lowercased article text.
    pub keywords: Vec<String>,
}

impl Category {
    pub fn new(name: &str, keywords: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// One entry of the digest.
///
/// Items are ordered by `(category, source, title)`, compared as plain
/// strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Cleaned article title, never empty.
    pub title: String,
    /// Absolute article URL, unique within a run.
    pub url: String,
    /// Sentence-truncated summary, never empty.
    pub summary: String,
    /// Name of the matching category.
    pub category: String,
    /// Host of the source homepage with any leading `www.` removed.
    pub source: String,
}

impl Item {
    /// Compare two items by the digest sort key.
    pub fn digest_order(&self, other: &Self) -> Ordering {
        (&self.category, &self.source, &self.title).cmp(&(
            &other.category,
            &other.source,
            &other.title,
        ))
    }
}

/// A rendered digest ready to be written to disk and mailed.
#[derive(Debug, Clone)]
pub struct Digest {
    /// `dailysummaryTI_<YYYY-MM-DD>_<HHMM>.html`
    pub filename: String,
    /// Complete HTML document.
    pub html: String,
}

impl Digest {
    /// Filename without its `.html` extension.
    pub fn stem(&self) -> &str {
        self.filename
            .strip_suffix(".html")
            .unwrap_or(&self.filename)
    }
}
