//! Same-site link discovery on a homepage.
//!
//! Every `<a href>` is resolved against the homepage URL with standard URL
//! join rules, so relative (`/noticia/1`), protocol-relative
//! (`//site.com/x`) and absolute hrefs all work. Links are kept only when
//! their host, ignoring a leading `www.`, ends with the homepage's host.

use crate::utils::site_of;
use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, instrument};
use url::Url;

static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").expect("valid selector"));

/// Extract same-site absolute article candidates from homepage HTML.
///
/// Fragment-only hrefs (`#top`) are skipped and fragments are stripped
/// from kept URLs. The result is distinct and in document order.
/// An unparsable `base_url` yields no links.
#[instrument(level = "debug", skip(html))]
pub fn extract_links(html: &str, base_url: &str) -> Vec<String> {
    let Ok(base) = Url::parse(base_url) else {
        return Vec::new();
    };
    let Some(base_site) = site_of(&base) else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    let links: Vec<String> = document
        .select(&ANCHOR)
        .filter_map(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.starts_with('#'))
        .filter_map(|href| base.join(href).ok())
        .filter(|url| site_of(url).is_some_and(|site| site.ends_with(&base_site)))
        .map(|mut url| {
            url.set_fragment(None);
            url.to_string()
        })
        .unique()
        .collect();

    debug!(count = links.len(), "Extracted same-site links");
    links
}
