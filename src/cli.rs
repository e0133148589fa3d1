//! Command-line interface definitions for News Digest.
//!
//! Only the output directory is positional. SMTP and crawl limits come from
//! the environment (see [`crate::config::Settings`]).

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the News Digest application.
///
/// # Examples
///
/// ```sh
/// # Write the digest to the current directory and email it
/// news_digest
///
/// # Write to ./out, also dump JSON, and skip email
/// news_digest ./out -j ./json --no-email
///
/// # Crawl a custom source/category profile
/// news_digest ./out --config profile.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory the HTML digest is written to (created if missing)
    #[arg(default_value = ".")]
    pub output_dir: PathBuf,

    /// Optional YAML profile overriding sources, categories and noise markers
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Also write the digest items as JSON into this directory
    #[arg(short, long)]
    pub json_output_dir: Option<PathBuf>,

    /// Write the digest but do not email it
    #[arg(long)]
    pub no_email: bool,
}
