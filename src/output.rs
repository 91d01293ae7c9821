//! Conversion results and the output writer.
//!
//! [`ConversionOutput`] carries the collated text together with each page's
//! cleaned text and timing statistics. It derives serde traits so the CLI can
//! emit it verbatim with `--json`.

use crate::error::Pdf2TxtError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// The text recognised on a single page image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    /// 1-indexed position of the page in the collated output.
    pub page_num: usize,
    /// File name of the page image inside the workspace, e.g. `image-0-01.png`.
    pub image: String,
    /// Page text with trailing whitespace stripped from every line; each line
    /// ends with `\n`. The separator is not included.
    pub text: String,
}

/// Timing and size statistics for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Number of input files given.
    pub input_files: usize,
    /// Number of page images recognised.
    pub total_pages: usize,
    /// Wall-clock time spent staging inputs (rasterizing and copying).
    pub rasterize_duration_ms: u64,
    /// Wall-clock time spent in the OCR engine.
    pub ocr_duration_ms: u64,
    /// Wall-clock time of the whole run.
    pub total_duration_ms: u64,
}

/// The complete result of a conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// Collated text: every page followed by the separator line.
    pub text: String,
    /// Per-page text, in output order.
    pub pages: Vec<PageText>,
    pub stats: ConversionStats,
}

/// Write `text` to `path`, or to standard output when `path` is None.
///
/// The file is created or truncated in place; there is no atomic replace.
pub async fn write_output(text: &str, path: Option<&Path>) -> Result<(), Pdf2TxtError> {
    match path {
        Some(path) => {
            debug!("> write text to file: {}", crate::pipeline::command::quote_path(path));
            tokio::fs::write(path, text)
                .await
                .map_err(|e| Pdf2TxtError::OutputWriteFailed {
                    path: path.to_path_buf(),
                    source: e,
                })
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout
                .write_all(text.as_bytes())
                .await
                .map_err(|e| Pdf2TxtError::Internal(format!("failed to write to stdout: {e}")))?;
            stdout
                .flush()
                .await
                .map_err(|e| Pdf2TxtError::Internal(format!("failed to flush stdout: {e}")))
        }
    }
}
