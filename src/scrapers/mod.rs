//! Page fetching and HTML extraction.
//!
//! Sources are generic news homepages, so instead of one scraper per outlet
//! this module holds the shared building blocks:
//!
//! | Module | Role |
//! |--------|------|
//! | [`fetch`] | [`fetch::Fetch`] trait and the `reqwest` implementation |
//! | [`links`] | Same-site link discovery on a homepage |
//! | [`article`] | Title and body heuristics for an article page |
//!
//! Extraction functions are pure: they take HTML text and never touch the
//! network, which keeps them testable with inline fixtures.

pub mod article;
pub mod fetch;
pub mod links;
