//! Input classification: decide how each user-supplied file enters the
//! workspace.
//!
//! Classification runs over every input before the workspace exists, so an
//! unsupported or missing file aborts the run before any external program
//! is started.

use crate::error::Pdf2TxtError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extensions accepted as already-rasterized pages.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tif"];

/// How an input is turned into page images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Rasterized page by page by the external rasterizer.
    Pdf,
    /// A single page, copied into the workspace unchanged.
    Image,
}

/// A classified input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub path: PathBuf,
    pub kind: InputKind,
}

impl InputFile {
    /// The file extension as written by the user, if any.
    pub fn extension(&self) -> Option<&str> {
        self.path.extension().and_then(|e| e.to_str())
    }
}

/// Classify a single path by its extension (case-insensitive).
pub fn classify(path: &Path) -> Result<InputFile, Pdf2TxtError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let kind = match ext.as_deref() {
        Some("pdf") => InputKind::Pdf,
        Some(e) if IMAGE_EXTENSIONS.contains(&e) => InputKind::Image,
        _ => {
            return Err(Pdf2TxtError::UnrecognizedFormat {
                path: path.to_path_buf(),
            })
        }
    };

    if !path.is_file() {
        return Err(Pdf2TxtError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    debug!("Classified {} as {:?}", path.display(), kind);
    Ok(InputFile {
        path: path.to_path_buf(),
        kind,
    })
}

/// Classify every input, failing on the first unsupported or missing file.
pub fn classify_all<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<InputFile>, Pdf2TxtError> {
    paths.iter().map(|p| classify(p.as_ref())).collect()
}
