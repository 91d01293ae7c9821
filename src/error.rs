//! Error types for the mc-pdf2txt library.
//!
//! Every failure is fatal to the run: there is no partial-success mode and no
//! retry. [`Pdf2TxtError`] is returned from the top-level `convert*`
//! functions and its `Display` text is what the CLI prints before exiting
//! with a non-zero status, so each message is written to stand on its own
//! and, where possible, to tell the user what to do next.
//!
//! Variants wrapping an I/O error leave it out of their own message and expose
//! it through [`std::error::Error::source`] instead; the CLI joins the chain
//! into a single line.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// All errors returned by the mc-pdf2txt library.
#[derive(Debug, Error)]
pub enum Pdf2TxtError {
    // ── Preflight errors ──────────────────────────────────────────────────
    /// A required external program is not on the search path.
    #[error("command not found: {program} (perhaps need to install `{package}`)")]
    MissingDependency { program: String, package: String },

    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("input file not found: '{path}'")]
    FileNotFound { path: PathBuf },

    /// Input extension is neither a PDF nor a supported raster image.
    #[error("unrecognized file format: '{path}' (expected .pdf, .png, .jpg, .jpeg or .tif)")]
    UnrecognizedFormat { path: PathBuf },

    // ── External tool errors ──────────────────────────────────────────────
    /// The rasterizer did not finish within the configured timeout.
    #[error(
        "timeout expired after {secs}s rasterizing '{path}'. \
Re-try with a lower resolution (-r) or a larger timeout (--timeout)."
    )]
    RasterizeTimeout { path: PathBuf, secs: u64 },

    /// An external program ran but exited unsuccessfully.
    ///
    /// The program's own diagnostics were already written to stderr.
    #[error("`{program}` failed ({status})")]
    ToolFailed { program: String, status: ExitStatus },

    /// An external program could not be started at all.
    #[error("failed to run `{program}`")]
    ToolLaunchFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The OCR engine reported success but left no text sidecar behind.
    #[error("OCR produced no text file for page image '{image}'")]
    MissingSidecar { image: PathBuf },

    /// Staging finished without a single page image to recognise.
    #[error("no page images were produced from the given inputs")]
    NoPageImages,

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Creating or listing the temporary workspace failed.
    #[error("temporary workspace error")]
    Workspace {
        #[source]
        source: std::io::Error,
    },

    /// Copying an input or reading a sidecar failed.
    #[error("I/O error on '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not create or write the output text file.
    #[error("failed to write output file '{path}'")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("internal error: {0}")]
    Internal(String),
}
