//! Collation: join per-page OCR text into the final document.
//!
//! Each page contributes its lines with trailing whitespace removed, followed
//! by the separator line. The separator therefore also follows the last page,
//! and every line, separator included, ends with `\n`.

use crate::error::Pdf2TxtError;
use crate::output::PageText;
use crate::pipeline::command::quote_path;
use std::path::PathBuf;
use tracing::debug;

/// Strip trailing whitespace from every line and terminate each with `\n`.
pub fn clean_page(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for line in raw.lines() {
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Concatenate pages, appending `separator` as its own line after each one.
pub fn assemble<'a>(pages: impl IntoIterator<Item = &'a str>, separator: &str) -> String {
    let mut out = String::new();
    for page in pages {
        out.push_str(page);
        out.push_str(separator);
        out.push('\n');
    }
    out
}

/// Read every sidecar in order and return the cleaned text of each page.
///
/// Invalid UTF-8 in a sidecar is replaced rather than rejected.
pub async fn read_pages(sidecars: &[PathBuf]) -> Result<Vec<PageText>, Pdf2TxtError> {
    debug!(
        "> read and join texts from files: {}",
        sidecars
            .iter()
            .map(|p| quote_path(p))
            .collect::<Vec<_>>()
            .join(", ")
    );

    let mut pages = Vec::with_capacity(sidecars.len());
    for (i, sidecar) in sidecars.iter().enumerate() {
        let bytes = tokio::fs::read(sidecar)
            .await
            .map_err(|e| Pdf2TxtError::Io {
                path: sidecar.clone(),
                source: e,
            })?;
        let image = sidecar
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        pages.push(PageText {
            page_num: i + 1,
            image,
            text: clean_page(&String::from_utf8_lossy(&bytes)),
        });
    }
    Ok(pages)
}
