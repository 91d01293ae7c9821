//! Preflight: make sure both external programs can be found before any work.
//!
//! Lookup mirrors what a shell does: a program name containing a path
//! separator is checked as-is, anything else is searched for in each
//! directory of `PATH`.

use crate::config::ConversionConfig;
use crate::error::Pdf2TxtError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One of the two external programs the pipeline drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// PDF rasterizer (`pdftoppm`).
    Rasterizer,
    /// OCR engine (`tesseract`).
    Ocr,
}

impl Tool {
    /// Distribution package that usually ships the tool.
    pub fn package_hint(self) -> &'static str {
        match self {
            Tool::Rasterizer => "poppler-utils",
            Tool::Ocr => "tesseract-ocr",
        }
    }

    /// The configured program for this tool.
    pub fn program(self, config: &ConversionConfig) -> &str {
        match self {
            Tool::Rasterizer => &config.rasterizer_program,
            Tool::Ocr => &config.ocr_program,
        }
    }
}

/// Verify the OCR engine and the rasterizer are both available, in that order.
pub fn check_dependencies(config: &ConversionConfig) -> Result<(), Pdf2TxtError> {
    for tool in [Tool::Ocr, Tool::Rasterizer] {
        let program = tool.program(config);
        match find_executable(program) {
            Some(found) => debug!("found {}: {}", program, found.display()),
            None => {
                return Err(Pdf2TxtError::MissingDependency {
                    program: program.to_string(),
                    package: tool.package_hint().to_string(),
                })
            }
        }
    }
    Ok(())
}

/// Locate `program` the way a shell would, returning the resolved path.
pub fn find_executable(program: &str) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }

    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .flat_map(|dir| executable_names(program).map(move |name| dir.join(name)))
        .find(|p| is_executable(p))
}

#[cfg(windows)]
fn executable_names(program: &str) -> impl Iterator<Item = String> + '_ {
    [String::new(), ".exe".to_string()]
        .into_iter()
        .map(move |ext| format!("{program}{ext}"))
}

#[cfg(not(windows))]
fn executable_names(program: &str) -> impl Iterator<Item = String> + '_ {
    std::iter::once(program.to_string())
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_hints() {
        assert_eq!(Tool::Rasterizer.package_hint(), "poppler-utils");
        assert_eq!(Tool::Ocr.package_hint(), "tesseract-ocr");
    }

    #[test]
    fn missing_program_is_not_found() {
        assert!(find_executable("no-such-program-mc-pdf2txt").is_none());
        assert!(find_executable("/definitely/not/here/tesseract").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn finds_shell_on_path() {
        let sh = find_executable("sh").expect("sh should be on PATH");
        assert!(sh.is_absolute() || sh.components().count() > 1);
    }

    #[cfg(unix)]
    #[test]
    fn explicit_path_requires_exec_bit() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("tool");
        std::fs::write(&script, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o644)).unwrap();
        assert!(find_executable(script.to_str().unwrap()).is_none());

        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        assert_eq!(find_executable(script.to_str().unwrap()), Some(script));
    }

    #[test]
    fn ocr_is_checked_first() {
        let config = ConversionConfig::builder()
            .ocr_program("no-such-ocr-mc-pdf2txt")
            .rasterizer_program("no-such-raster-mc-pdf2txt")
            .build()
            .unwrap();
        match check_dependencies(&config) {
            Err(Pdf2TxtError::MissingDependency { program, package }) => {
                assert_eq!(program, "no-such-ocr-mc-pdf2txt");
                assert_eq!(package, "tesseract-ocr");
            }
            other => panic!("expected MissingDependency, got {other:?}"),
        }
    }
}
