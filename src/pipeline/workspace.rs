//! The temporary workspace holding page images and OCR sidecars.
//!
//! ## Naming
//!
//! Page order is carried entirely by file names: input `i` of `n` becomes
//! `image-<i>` zero-padded to the decimal width of `n`, so a plain
//! lexicographic sort of the directory listing yields pages in input order.
//! The rasterizer appends its own zero-padded page suffix
//! (`image-3-07.png`), which keeps pages of one PDF in order too.
//!
//! ## Cleanup
//!
//! [`Workspace`] owns a [`TempDir`]; dropping it removes the directory and
//! everything in it, whether the pipeline finished or bailed out early.

use crate::error::Pdf2TxtError;
use crate::pipeline::command::quote_path;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

/// Extension the OCR engine appends to its output base.
pub const SIDECAR_EXTENSION: &str = "txt";

/// A process-scoped temporary directory, removed on drop.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Create a fresh workspace, inside `parent` if given.
    pub fn create(parent: Option<&Path>) -> Result<Self, Pdf2TxtError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("mc-pdf2txt-");
        let dir = match parent {
            Some(parent) => builder.tempdir_in(parent),
            None => builder.tempdir(),
        }
        .map_err(|e| Pdf2TxtError::Workspace { source: e })?;

        debug!("> make temporary dir: {}", quote_path(dir.path()));
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path prefix for input `index` of `total`, e.g. `<dir>/image-07`.
    pub fn page_prefix(&self, index: usize, total: usize) -> PathBuf {
        self.path().join(page_stem(index, total))
    }

    /// Page images currently in the workspace, sorted by file name.
    pub fn page_images(&self) -> Result<Vec<PathBuf>, Pdf2TxtError> {
        self.sorted_files(|p| !is_sidecar(p))
    }

    fn sorted_files(&self, keep: impl Fn(&Path) -> bool) -> Result<Vec<PathBuf>, Pdf2TxtError> {
        let entries =
            std::fs::read_dir(self.path()).map_err(|e| Pdf2TxtError::Workspace { source: e })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Pdf2TxtError::Workspace { source: e })?;
            let path = entry.path();
            if path.is_file() && keep(&path) {
                files.push(path);
            }
        }
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        debug!("> remove temporary dir: {}", quote_path(self.dir.path()));
    }
}

/// Number of decimal digits needed to write `n`.
pub fn digit_count(n: usize) -> usize {
    n.to_string().len()
}

/// File-name stem for input `index` of `total`: `image-<index>` zero-padded
/// to the width of `total`.
pub fn page_stem(index: usize, total: usize) -> String {
    format!("image-{:0width$}", index, width = digit_count(total))
}

/// Sidecar path the OCR engine writes for `image`: the image path plus `.txt`.
pub fn sidecar_path(image: &Path) -> PathBuf {
    let mut name = image.as_os_str().to_owned();
    name.push(".");
    name.push(SIDECAR_EXTENSION);
    PathBuf::from(name)
}

fn is_sidecar(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == SIDECAR_EXTENSION)
}
