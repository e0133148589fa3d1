//! The crawl → extract → classify → summarize pipeline.
//!
//! A run walks the configured sources in order:
//! 1. **Indexing**: fetch the homepage and extract same-site links, capped
//!    per source
//! 2. **Filtering**: drop links already seen this run and noise URLs
//! 3. **Fetching**: download each remaining article, one at a time
//! 4. **Processing**: parse, classify and summarize into an [`Item`]
//!
//! Failures are local. A homepage that cannot be fetched skips its source,
//! an article that cannot be fetched, has no title or body, or matches no
//! category is skipped. The final list is sorted by
//! `(category, source, title)`.

use crate::classify::Classifier;
use crate::config::CrawlProfile;
use crate::models::Item;
use crate::scrapers::article::parse_article;
use crate::scrapers::fetch::Fetch;
use crate::scrapers::links::extract_links;
use crate::summarize::{DEFAULT_MAX_CHARS, summarize};
use crate::utils::{hostname, truncate_for_log};
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Drives one crawl over a [`CrawlProfile`].
#[derive(Debug)]
pub struct Pipeline<'a, F> {
    fetcher: &'a F,
    sources: &'a [String],
    noise_markers: &'a [String],
    classifier: Classifier,
    max_links_per_source: usize,
}

impl<'a, F: Fetch> Pipeline<'a, F> {
    pub fn new(fetcher: &'a F, profile: &'a CrawlProfile, max_links_per_source: usize) -> Self {
        Self {
            fetcher,
            sources: &profile.sources,
            noise_markers: &profile.noise_markers,
            classifier: Classifier::new(profile.categories.clone()),
            max_links_per_source,
        }
    }

    /// Crawl every source and return the sorted digest items.
    #[instrument(level = "info", skip_all, fields(sources = self.sources.len()))]
    pub async fn run(&self) -> Vec<Item> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut items = Vec::new();

        for source in self.sources {
            let urls = match self.index_source(source).await {
                Some(links) => self.filter_links(links, &mut seen),
                None => continue,
            };
            let mut fetched = self.fetch_items(source, urls).await;
            info!(%source, count = fetched.len(), "Collected items from source");
            items.append(&mut fetched);
        }

        items.sort_by(Item::digest_order);
        info!(count = items.len(), "Pipeline finished");
        items
    }

    /// Fetch a homepage and return its capped link list.
    #[instrument(level = "info", skip(self))]
    async fn index_source(&self, source: &str) -> Option<Vec<String>> {
        let html = match self.fetcher.fetch(source).await {
            Ok(html) => html,
            Err(e) => {
                warn!(error = %e, "Homepage fetch failed; skipping source");
                return None;
            }
        };
        let mut links = extract_links(&html, source);
        links.truncate(self.max_links_per_source);
        info!(count = links.len(), "Indexed article links");
        Some(links)
    }

    /// Drop links seen earlier in the run and noise URLs.
    ///
    /// Every link is marked seen, including the ones rejected as noise.
    fn filter_links(&self, links: Vec<String>, seen: &mut HashSet<String>) -> Vec<String> {
        links
            .into_iter()
            .filter(|url| seen.insert(url.clone()))
            .filter(|url| {
                let noisy = self.is_noise(url);
                if noisy {
                    debug!(%url, "Skipping noise URL");
                }
                !noisy
            })
            .collect()
    }

    fn is_noise(&self, url: &str) -> bool {
        let path = Url::parse(url)
            .map(|u| u.path().to_string())
            .unwrap_or_else(|_| url.to_string());
        self.noise_markers.iter().any(|m| path.contains(m.as_str()))
    }

    /// Fetch and process article URLs sequentially.
    async fn fetch_items(&self, source: &str, urls: Vec<String>) -> Vec<Item> {
        let source_host = hostname(source);
        stream::iter(urls)
            .then(|url| {
                let source_host = source_host.clone();
                async move { self.process_article(url, source_host).await }
            })
            .filter_map(|item| async move { item })
            .collect::<Vec<_>>()
            .await
    }

    #[instrument(level = "debug", skip(self, source))]
    async fn process_article(&self, url: String, source: String) -> Option<Item> {
        let html = match self.fetcher.fetch(&url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(%url, error = %e, "Article fetch failed; skipping");
                return None;
            }
        };

        let article = parse_article(&html);
        if article.title.is_empty() || article.body.is_empty() {
            debug!(%url, "Empty title or body; skipping");
            return None;
        }

        let Some(category) = self.classifier.categorize(&article.title, &article.body) else {
            debug!(%url, title = %truncate_for_log(&article.title, 80), "No category matched");
            return None;
        };

        let summary = summarize(
            &format!("{}. {}", article.title, article.body),
            DEFAULT_MAX_CHARS,
        );
        debug!(%url, %category, "Accepted article");

        Some(Item {
            title: article.title,
            url,
            summary,
            category: category.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::models::Category;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory pages; unknown URLs answer 404. Records every request.
    #[derive(Default)]
    struct FakeFetcher {
        pages: HashMap<String, String>,
        requests: RefCell<Vec<String>>,
    }

    impl FakeFetcher {
        fn page(mut self, url: &str, html: &str) -> Self {
            self.pages.insert(url.to_string(), html.to_string());
            self
        }

        fn count(&self, url: &str) -> usize {
            self.requests.borrow().iter().filter(|u| *u == url).count()
        }
    }

    impl Fetch for FakeFetcher {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.requests.borrow_mut().push(url.to_string());
            self.pages.get(url).cloned().ok_or_else(|| FetchError::Status {
                status: 404,
                url: url.to_string(),
            })
        }
    }

    fn article(title: &str, body: &str) -> String {
        format!("<html><body><h1>{}</h1><article>{}</article></body></html>", title, body)
    }

    fn profile(sources: &[&str]) -> CrawlProfile {
        CrawlProfile {
            sources: sources.iter().map(|s| s.to_string()).collect(),
            ..CrawlProfile::default()
        }
    }

    #[tokio::test]
    async fn test_end_to_end_single_source() {
        let fetcher = FakeFetcher::default()
            .page(
                "https://a.com/",
                r##"<a href="/noticia/123">n</a><a href="#top">t</a><a href="https://other.com/x">o</a>"##,
            )
            .page(
                "https://a.com/noticia/123",
                &article("Ataque de ransomware", "Um novo RANSOMWARE atingiu empresas. Saiba mais."),
            );
        let profile = profile(&["https://a.com/"]);
        let items = Pipeline::new(&fetcher, &profile, 30).run().await;

        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.url, "https://a.com/noticia/123");
        assert_eq!(item.category, "Segurança da Informação");
        assert_eq!(item.source, "a.com");
        assert_eq!(item.title, "Ataque de ransomware");
        assert_eq!(
            item.summary,
            "Ataque de ransomware. Um novo RANSOMWARE atingiu empresas. Saiba mais."
        );
        assert_eq!(fetcher.count("https://other.com/x"), 0);
    }

    #[tokio::test]
    async fn test_overlapping_sources_fetch_once() {
        let home = r#"<a href="https://www.a.com/shared">s</a>"#;
        let fetcher = FakeFetcher::default()
            .page("https://www.a.com/", home)
            .page("https://a.com/", home)
            .page("https://www.a.com/shared", &article("Nuvem", "Texto sobre cloud."));
        let profile = profile(&["https://www.a.com/", "https://a.com/"]);

        let items = Pipeline::new(&fetcher, &profile, 30).run().await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].source, "a.com");
        assert_eq!(fetcher.count("https://www.a.com/shared"), 1);
    }

    #[tokio::test]
    async fn test_homepage_failure_skips_source_only() {
        let fetcher = FakeFetcher::default()
            .page("https://b.com/", r#"<a href="/x">x</a>"#)
            .page("https://b.com/x", &article("Data center novo", "Infraestrutura de rede."));
        let profile = profile(&["https://down.com/", "https://b.com/"]);
        let items = Pipeline::new(&fetcher, &profile, 30).run().await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].source, "b.com");
    }

    #[tokio::test]
    async fn test_noise_and_failures_filtered() {
        let fetcher = FakeFetcher::default()
            .page(
                "https://a.com/",
                r#"
                <a href="/tag/cloud/">tag</a>
                <a href="/autor/joao/">autor</a>
                <a href="/missing">missing</a>
                <a href="/empty">empty</a>
                <a href="/offtopic">offtopic</a>
                <a href="/ok">ok</a>
                "#,
            )
            .page("https://a.com/tag/cloud/", &article("Cloud", "cloud cloud"))
            .page("https://a.com/empty", "<html><body><h1>Sem corpo</h1></body></html>")
            .page("https://a.com/offtopic", &article("Futebol", "O time venceu."))
            .page("https://a.com/ok", &article("AWS lança região", "Nova região."));
        let profile = profile(&["https://a.com/"]);
        let items = Pipeline::new(&fetcher, &profile, 30).run().await;

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].url, "https://a.com/ok");
        assert_eq!(items[0].category, "Cloud");
        assert_eq!(fetcher.count("https://a.com/tag/cloud/"), 0);
        assert_eq!(fetcher.count("https://a.com/autor/joao/"), 0);
        assert_eq!(fetcher.count("https://a.com/missing"), 1);
    }

    #[tokio::test]
    async fn test_link_cap_applies_per_source() {
        let fetcher = FakeFetcher::default()
            .page(
                "https://a.com/",
                r#"<a href="/1">1</a><a href="/2">2</a><a href="/3">3</a>"#,
            )
            .page("https://a.com/1", &article("Um", "cloud"))
            .page("https://a.com/2", &article("Dois", "cloud"))
            .page("https://a.com/3", &article("Tres", "cloud"));
        let profile = profile(&["https://a.com/"]);
        let items = Pipeline::new(&fetcher, &profile, 2).run().await;

        assert_eq!(items.len(), 2);
        assert_eq!(fetcher.count("https://a.com/3"), 0);
    }

    #[tokio::test]
    async fn test_items_sorted_by_category_source_title() {
        let fetcher = FakeFetcher::default()
            .page("https://b.com/", r#"<a href="/h">h</a><a href="/c2">c</a>"#)
            .page("https://a.com/", r#"<a href="/c1">c</a>"#)
            .page("https://b.com/h", &article("Grupo hacker", "Notícia."))
            .page("https://b.com/c2", &article("Beta nuvem", "Notícia."))
            .page("https://a.com/c1", &article("Zeta nuvem", "Notícia."));
        let profile = profile(&["https://b.com/", "https://a.com/"]);
        let items = Pipeline::new(&fetcher, &profile, 30).run().await;

        let keys: Vec<(&str, &str, &str)> = items
            .iter()
            .map(|i| (i.category.as_str(), i.source.as_str(), i.title.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("Cloud", "a.com", "Zeta nuvem"),
                ("Cloud", "b.com", "Beta nuvem"),
                ("Hackers", "b.com", "Grupo hacker"),
            ]
        );
    }

    #[tokio::test]
    async fn test_custom_categories() {
        let fetcher = FakeFetcher::default()
            .page("https://a.com/", r#"<a href="/r">r</a>"#)
            .page("https://a.com/r", &article("Rust 2024", "Cargo ficou mais rápido."));
        let profile = CrawlProfile {
            sources: vec!["https://a.com/".to_string()],
            categories: vec![Category::new("Rust", &["cargo"])],
            noise_markers: vec![],
        };
        let items = Pipeline::new(&fetcher, &profile, 30).run().await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].category, "Rust");
    }

    #[tokio::test]
    async fn test_no_sources_yields_empty() {
        let fetcher = FakeFetcher::default();
        let profile = profile(&[]);
        assert!(Pipeline::new(&fetcher, &profile, 30).run().await.is_empty());
    }
}
