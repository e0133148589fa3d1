//! Keyword-based topic classification.

use crate::models::Category;

/// Assigns at most one category to an article by keyword containment.
///
/// Matching is a plain lowercase substring search, not a word-boundary
/// match: `"ransom"` matches inside `"ransomware"`. Categories and their
/// keywords are tried in declaration order and the first hit wins. An empty
/// keyword is a substring of every text and so always matches.
#[derive(Debug, Clone)]
pub struct Classifier {
    categories: Vec<Category>,
}

impl Classifier {
    pub fn new(categories: Vec<Category>) -> Self {
        let categories = categories
            .into_iter()
            .map(|c| Category {
                keywords: c
                    .keywords
                    .iter()
                    .map(|k| k.to_lowercase())
                    .collect(),
                name: c.name,
            })
            .collect();
        Self { categories }
    }

    /// Name of the first category whose keywords occur in `title` or `body`.
    pub fn categorize(&self, title: &str, body: &str) -> Option<&str> {
        let text = format!("{}\n{}", title, body).to_lowercase();
        self.categories
            .iter()
            .find(|c| c.keywords.iter().any(|k| text.contains(k.as_str())))
            .map(|c| c.name.as_str())
    }
}
