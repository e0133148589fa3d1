//! Output generation for the digest.
//!
//! # Submodules
//!
//! - [`html`]: Renders the item list into the HTML digest and its filename
//! - [`json`]: Optionally writes the same items as JSON
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! └── dailysummaryTI_2025-05-06_0830.html
//!
//! json_output_dir/            # only with --json-output-dir
//! └── dailysummaryTI_2025-05-06_0830.json
//! ```

pub mod html;
pub mod json;
