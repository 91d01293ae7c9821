//! # mc-pdf2txt
//!
//! Convert multi-column PDF (or image) files to plain text with `pdftoppm`
//! and `tesseract`.
//!
//! Text extractors that read the PDF's content stream often interleave the
//! columns of multi-column layouts. This crate instead rasterises each page,
//! lets tesseract's page segmentation find the columns, and joins the
//! per-page results with a separator line.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF / image files
//!  │
//!  ├─ 1. Preflight  tesseract and pdftoppm must be on PATH
//!  ├─ 2. Classify   .pdf vs .png/.jpg/.jpeg/.tif, anything else is rejected
//!  ├─ 3. Rasterize  pdftoppm -r <dpi> -gray -png into a temp workspace
//!  ├─ 4. OCR        tesseract once per page image, in file-name order
//!  ├─ 5. Collate    strip trailing whitespace, separator after each page
//!  └─ 6. Output     file or stdout
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mc_pdf2txt::{convert, ConversionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConversionConfig::builder().lang("eng").build()?;
//!     let output = convert(&["paper.pdf"], &config).await?;
//!     print!("{}", output.text);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `mc-pdf2txt` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ConversionConfig, ConversionConfigBuilder};
pub use convert::{convert, convert_sync, convert_to_file};
pub use error::Pdf2TxtError;
pub use output::{write_output, ConversionOutput, ConversionStats, PageText};
pub use progress::{ConversionProgressCallback, NoopProgressCallback, ProgressCallback};
