//! Error types for the digest pipeline.
//!
//! Only [`DeliveryError`] and filesystem errors are fatal to a run. A
//! [`FetchError`] is recovered by the pipeline, which skips the affected
//! source or link and keeps going.

use thiserror::Error;

/// Failure to download a page.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network failure, timeout, or an unreadable response body.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status code.
    #[error("unexpected HTTP status {status} for {url}")]
    Status { status: u16, url: String },
}

/// Failure to load a crawl profile file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read profile {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse profile {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Failure to deliver the digest by email.
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("SMTP_HOST is not configured")]
    MissingHost,

    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}
