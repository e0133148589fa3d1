//! Utility functions for text cleanup, host handling, and file system checks.
//!
//! This module provides helper functions used throughout the application:
//! - Whitespace normalization for extracted page text
//! - Host comparison helpers that ignore a leading `www.`
//! - String truncation for log previews
//! - File system validation for the output directory

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};
use url::Url;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Collapse runs of whitespace into a single space and trim both ends.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(clean_text("  a \n\t b  "), "a b");
/// ```
pub fn clean_text(s: &str) -> String {
    WHITESPACE_RUN.replace_all(s, " ").trim().to_string()
}

/// Strip a single leading `www.` label from a host.
pub fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

/// Host and explicit port of a URL (`example.com:8080`), `www.` stripped.
///
/// Returns `None` for URLs without a host such as `mailto:` links.
pub fn site_of(url: &Url) -> Option<String> {
    let host = strip_www(url.host_str()?);
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// Hostname of a source URL with any leading `www.` removed.
///
/// Unparsable input yields an empty string.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(hostname("https://www.techtudo.com.br/"), "techtudo.com.br");
/// ```
pub fn hostname(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| site_of(&u))
        .unwrap_or_default()
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes (on a character boundary)
/// with an ellipsis and byte count indicator appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory (and parents) if missing, then performs a write
/// test by creating and immediately deleting a scratch file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or is not writable.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    let scratch_path = path.join("..__write_check__");
    match stdfs::File::create(&scratch_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&scratch_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}
