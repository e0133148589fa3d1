//! JSON output of the digest items.
//!
//! The file lands in the directory given by `--json-output-dir` and shares
//! the digest's stem, so
//! `dailysummaryTI_2025-05-06_0830.html` pairs with
//! `dailysummaryTI_2025-05-06_0830.json`.

use crate::models::{Digest, Item};
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Write the sorted items as a JSON array.
///
/// # Returns
///
/// The path of the written file, or an error if directory creation,
/// serialization or writing fails.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir.display()))]
pub async fn write_items(
    items: &[Item],
    digest: &Digest,
    json_output_dir: &Path,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(items)?;

    info!("Ensuring JSON directory exists");
    if let Err(e) = fs::create_dir_all(json_output_dir).await {
        error!(error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = json_output_dir.join(format!("{}.json", digest.stem()));
    fs::write(&path, json).await?;
    info!(path = %path.display(), count = items.len(), "Wrote JSON items file");

    Ok(path)
}
