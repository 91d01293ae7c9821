//! Pipeline stages for PDF-to-text conversion.
//!
//! Each submodule implements exactly one step, and the steps run strictly in
//! sequence: nothing starts before the previous step has fully completed.
//!
//! ## Data Flow
//!
//! ```text
//! preflight ──▶ input ──▶ rasterize ──▶ ocr ──▶ collate
//! (PATH)       (classify) (pdftoppm)   (tesseract) (join)
//! ```
//!
//! 1. [`preflight`]: fail early when an external program is missing
//! 2. [`input`]    : classify each path as PDF or raster image
//! 3. [`rasterize`]: fill the [`workspace`] with page images
//! 4. [`ocr`]      : one OCR call per page image, one sidecar per call
//! 5. [`collate`]  : clean and join sidecar text with the page separator
//!
//! [`command`] runs the external programs and echoes their command lines.

pub mod collate;
pub mod command;
pub mod input;
pub mod ocr;
pub mod preflight;
pub mod rasterize;
pub mod workspace;
