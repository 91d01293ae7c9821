//! Progress-callback trait for per-input and per-page conversion events.
//!
//! Inject an [`Arc<dyn ConversionProgressCallback>`] via
//! [`crate::config::ConversionConfigBuilder::progress_callback`] to receive
//! events as the pipeline stages inputs and recognises each page.
//!
//! # Example
//!
//! ```rust
//! use mc_pdf2txt::{ConversionProgressCallback, ConversionConfig};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     completed: AtomicUsize,
//! }
//!
//! impl ConversionProgressCallback for CountingCallback {
//!     fn on_page_complete(&self, page_num: usize, total_pages: usize) {
//!         self.completed.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("Page {}/{} recognised", page_num, total_pages);
//!     }
//! }
//!
//! let counter = Arc::new(CountingCallback {
//!     completed: AtomicUsize::new(0),
//! });
//!
//! let config = ConversionConfig::builder()
//!     .progress_callback(counter as Arc<dyn ConversionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use std::path::Path;
use std::sync::Arc;

/// Called by the conversion pipeline as it works through inputs and pages.
///
/// The pipeline is sequential, so events arrive strictly in order, but the
/// trait is `Send + Sync` so a callback can be shared with other tasks.
/// All methods have default no-op implementations.
pub trait ConversionProgressCallback: Send + Sync {
    /// Called before an input is rasterized or copied into the workspace.
    ///
    /// # Arguments
    /// * `index`       : 0-based position of the input on the command line
    /// * `total_inputs`: number of inputs
    /// * `path`        : the input file
    fn on_input_start(&self, index: usize, total_inputs: usize, path: &Path) {
        let _ = (index, total_inputs, path);
    }

    /// Called once all inputs are staged, before the first OCR call.
    fn on_conversion_start(&self, total_pages: usize) {
        let _ = total_pages;
    }

    /// Called just before the OCR engine is started for a page (1-indexed).
    fn on_page_start(&self, page_num: usize, total_pages: usize) {
        let _ = (page_num, total_pages);
    }

    /// Called when the OCR engine finished a page (1-indexed).
    fn on_page_complete(&self, page_num: usize, total_pages: usize) {
        let _ = (page_num, total_pages);
    }

    /// Called once after collation.
    ///
    /// # Arguments
    /// * `total_pages`: pages recognised
    /// * `text_len`   : byte length of the collated text
    fn on_conversion_complete(&self, total_pages: usize, text_len: usize) {
        let _ = (total_pages, text_len);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ConversionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ConversionConfig`].
pub type ProgressCallback = Arc<dyn ConversionProgressCallback>;
