//! Runtime configuration.
//!
//! Two independent sources feed a run:
//! - [`Settings`]: scalars read from the environment (optionally seeded from
//!   a `.env` file by `dotenvy` in `main`)
//! - [`CrawlProfile`]: the sources to crawl, the ordered category table and
//!   the noise-URL markers; built-in defaults, optionally overridden by a
//!   YAML file passed with `--config`
//!
//! Integer variables that are missing or unparsable fall back to their
//! defaults instead of failing the run.

use crate::error::ConfigError;
use crate::models::Category;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use tracing::{info, instrument, warn};

pub const DEFAULT_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_MAX_LINKS_PER_SOURCE: usize = 30;
pub const DEFAULT_SMTP_PORT: u16 = 587;
pub const DEFAULT_MAIL_FROM: &str = "bot@example.com";
pub const DEFAULT_MAIL_TO: &str = "digest@example.com";

/// SMTP delivery settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: Option<String>,
    pub port: u16,
    pub user: Option<String>,
    pub pass: Option<String>,
    pub from: String,
    pub to: String,
}

impl SmtpSettings {
    /// User and password, only when both are set.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.user.as_deref(), self.pass.as_deref()) {
            (Some(user), Some(pass)) => Some((user, pass)),
            _ => None,
        }
    }
}

/// Scalar settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Per-request HTTP timeout in seconds.
    pub timeout_secs: u64,
    /// Cap on candidate links taken from each homepage.
    pub max_links_per_source: usize,
    pub smtp: SmtpSettings,
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let user = get("SMTP_USER");
        let from = get("MAIL_FROM")
            .or_else(|| user.clone())
            .unwrap_or_else(|| DEFAULT_MAIL_FROM.to_string());

        Self {
            timeout_secs: parse_or(get("TIMEOUT"), "TIMEOUT", DEFAULT_TIMEOUT_SECS),
            max_links_per_source: parse_or(
                get("MAX_LINKS_PER_SOURCE"),
                "MAX_LINKS_PER_SOURCE",
                DEFAULT_MAX_LINKS_PER_SOURCE,
            ),
            smtp: SmtpSettings {
                host: get("SMTP_HOST"),
                port: parse_or(get("SMTP_PORT"), "SMTP_PORT", DEFAULT_SMTP_PORT),
                user,
                pass: get("SMTP_PASS"),
                from,
                to: get("MAIL_TO").unwrap_or_else(|| DEFAULT_MAIL_TO.to_string()),
            },
        }
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    match raw {
        None => default,
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!(key, %value, "Not an integer; using default");
            default
        }),
    }
}

/// What to crawl and how to label it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlProfile {
    /// Homepages crawled in order.
    pub sources: Vec<String>,
    /// Categories in priority order.
    pub categories: Vec<Category>,
    /// URL path substrings that mark non-article pages.
    pub noise_markers: Vec<String>,
}

/// On-disk shape of a profile file; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProfileFile {
    sources: Option<Vec<String>>,
    categories: Option<Vec<Category>>,
    noise_markers: Option<Vec<String>>,
}

impl Default for CrawlProfile {
    fn default() -> Self {
        Self {
            sources: vec![
                "https://convergenciadigital.com.br/".to_string(),
                "https://www.techtudo.com.br/".to_string(),
                "https://olhardigital.com.br/".to_string(),
                "https://exame.com/tecnologia/".to_string(),
            ],
            categories: vec![
                Category::new(
                    "Segurança da Informação",
                    &[
                        "cibersegurança",
                        "segurança da informação",
                        "ransomware",
                        "vazamento",
                        "lgpd",
                        "ddos",
                        "phishing",
                        "malware",
                        "vulnerabilidade",
                        "zero-day",
                        "honeypot",
                        "ameaça",
                        "botnet",
                        "exploit",
                        "autenticação",
                        "mfa",
                        "2fa",
                    ],
                ),
                Category::new(
                    "Cloud",
                    &[
                        "cloud",
                        "nuvem",
                        "aws",
                        "azure",
                        "gcp",
                        "kubernetes",
                        "container",
                        "devops",
                        "terraform",
                        "iac",
                        "serverless",
                        "compute",
                        "s3",
                        "ec2",
                    ],
                ),
                Category::new(
                    "Hackers",
                    &[
                        "hacker",
                        "ataque",
                        "invasão",
                        "invasores",
                        "black hat",
                        "grupo",
                        "gangue",
                        "lockbit",
                        "lazarus",
                        "ransom",
                        "crackers",
                        "defacement",
                    ],
                ),
                Category::new(
                    "Infraestrutura",
                    &[
                        "infraestrutura",
                        "data center",
                        "datacenter",
                        "rede",
                        "redes",
                        "backbone",
                        "fibra",
                        "5g",
                        "edge",
                        "latência",
                        "disponibilidade",
                        "resiliência",
                    ],
                ),
            ],
            noise_markers: [
                "/tag/",
                "/tags/",
                "/autor/",
                "/sobre/",
                "/contato/",
                "/newsletter/",
                "/login/",
            ]
            .iter()
            .map(|m| m.to_string())
            .collect(),
        }
    }
}

impl CrawlProfile {
    /// Parse a YAML profile, filling omitted keys from the defaults.
    pub fn from_yaml(yaml: &str, path: &str) -> Result<Self, ConfigError> {
        let file: ProfileFile = serde_yaml::from_str(yaml).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })?;
        let defaults = Self::default();
        Ok(Self {
            sources: file.sources.unwrap_or(defaults.sources),
            categories: file.categories.unwrap_or(defaults.categories),
            noise_markers: file.noise_markers.unwrap_or(defaults.noise_markers),
        })
    }

    /// Load a profile file, or the defaults when no path is given.
    #[instrument(level = "info")]
    pub async fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let display = path.display().to_string();
        let yaml = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: display.clone(),
                source,
            })?;
        let profile = Self::from_yaml(&yaml, &display)?;
        info!(
            sources = profile.sources.len(),
            categories = profile.categories.len(),
            noise_markers = profile.noise_markers.len(),
            "Loaded crawl profile"
        );
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> Settings {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_settings_defaults() {
        let s = settings(&[]);
        assert_eq!(s.timeout_secs, 20);
        assert_eq!(s.max_links_per_source, 30);
        assert_eq!(s.smtp.port, 587);
        assert_eq!(s.smtp.host, None);
        assert_eq!(s.smtp.from, DEFAULT_MAIL_FROM);
        assert_eq!(s.smtp.to, DEFAULT_MAIL_TO);
    }

    #[test]
    fn test_settings_non_integer_falls_back() {
        let s = settings(&[
            ("TIMEOUT", "soon"),
            ("MAX_LINKS_PER_SOURCE", "-3"),
            ("SMTP_PORT", "abc"),
        ]);
        assert_eq!(s.timeout_secs, 20);
        assert_eq!(s.max_links_per_source, 30);
        assert_eq!(s.smtp.port, 587);
    }

    #[test]
    fn test_settings_overrides() {
        let s = settings(&[
            ("TIMEOUT", "5"),
            ("MAX_LINKS_PER_SOURCE", " 10 "),
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_PORT", "2525"),
            ("MAIL_TO", "ops@example.com"),
        ]);
        assert_eq!(s.timeout_secs, 5);
        assert_eq!(s.max_links_per_source, 10);
        assert_eq!(s.smtp.host.as_deref(), Some("smtp.example.com"));
        assert_eq!(s.smtp.port, 2525);
        assert_eq!(s.smtp.to, "ops@example.com");
    }

    #[test]
    fn test_empty_values_count_as_unset() {
        let s = settings(&[("MAIL_TO", ""), ("SMTP_HOST", "  "), ("TIMEOUT", "")]);
        assert_eq!(s.smtp.to, DEFAULT_MAIL_TO);
        assert_eq!(s.smtp.host, None);
        assert_eq!(s.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_mail_from_falls_back_to_user() {
        let s = settings(&[("SMTP_USER", "robot@example.com")]);
        assert_eq!(s.smtp.from, "robot@example.com");

        let s = settings(&[("SMTP_USER", "robot@example.com"), ("MAIL_FROM", "news@example.com")]);
        assert_eq!(s.smtp.from, "news@example.com");
    }

    #[test]
    fn test_credentials_require_both() {
        let s = settings(&[("SMTP_USER", "u")]);
        assert_eq!(s.smtp.credentials(), None);

        let s = settings(&[("SMTP_USER", "u"), ("SMTP_PASS", "p")]);
        assert_eq!(s.smtp.credentials(), Some(("u", "p")));
    }

    #[test]
    fn test_default_profile_category_order() {
        let profile = CrawlProfile::default();
        let names: Vec<&str> = profile.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Segurança da Informação", "Cloud", "Hackers", "Infraestrutura"]
        );
        assert_eq!(profile.sources.len(), 4);
        assert_eq!(profile.noise_markers.len(), 7);
    }

    #[test]
    fn test_profile_from_yaml_partial() {
        let yaml = r#"
sources:
  - https://example.com/
categories:
  - name: Rust
    keywords: [rust, cargo]
"#;
        let profile = CrawlProfile::from_yaml(yaml, "profile.yaml").unwrap();
        assert_eq!(profile.sources, vec!["https://example.com/"]);
        assert_eq!(profile.categories, vec![Category::new("Rust", &["rust", "cargo"])]);
        assert_eq!(profile.noise_markers, CrawlProfile::default().noise_markers);
    }

    #[test]
    fn test_profile_from_yaml_rejects_unknown_key() {
        let err = CrawlProfile::from_yaml("bogus: 1", "p.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_profile_load_without_path() {
        let profile = CrawlProfile::load(None).await.unwrap();
        assert_eq!(profile, CrawlProfile::default());
    }

    #[tokio::test]
    async fn test_profile_load_missing_file() {
        let err = CrawlProfile::load(Some(Path::new("/nonexistent/profile.yaml")))
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
