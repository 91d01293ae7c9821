//! OCR: run the external engine once per page image.
//!
//! The engine is called as `<ocr> [-l <lang>] --psm <n> <image> <image>`;
//! it appends `.txt` to the output base, so every image gets a sidecar right
//! next to it. Any failing call aborts the whole run.

use crate::config::ConversionConfig;
use crate::error::Pdf2TxtError;
use crate::pipeline::command::{self, RunError};
use crate::pipeline::workspace::sidecar_path;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::info;

/// OCR engine arguments for one page image.
pub fn ocr_args(lang: Option<&str>, psm: u32, image: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::with_capacity(6);
    if let Some(lang) = lang {
        args.push("-l".into());
        args.push(lang.into());
    }
    args.push("--psm".into());
    args.push(psm.to_string().into());
    args.push(image.as_os_str().to_owned());
    args.push(image.as_os_str().to_owned());
    args
}

/// Recognise every image in order, returning the sidecar paths in the same order.
pub async fn recognize_pages(
    images: &[PathBuf],
    config: &ConversionConfig,
) -> Result<Vec<PathBuf>, Pdf2TxtError> {
    let total = images.len();
    let mut sidecars = Vec::with_capacity(total);

    for (i, image) in images.iter().enumerate() {
        let page_num = i + 1;
        if let Some(ref cb) = config.progress_callback {
            cb.on_page_start(page_num, total);
        }

        let args = ocr_args(config.lang.as_deref(), config.psm, image);
        command::run(&config.ocr_program, &args, None)
            .await
            .map_err(|e| match e {
                RunError::Failed(status) => Pdf2TxtError::ToolFailed {
                    program: config.ocr_program.clone(),
                    status,
                },
                RunError::Launch(source) => Pdf2TxtError::ToolLaunchFailed {
                    program: config.ocr_program.clone(),
                    source,
                },
                RunError::Timeout => {
                    Pdf2TxtError::Internal("OCR call timed out without a limit".into())
                }
            })?;

        let sidecar = sidecar_path(image);
        if !sidecar.is_file() {
            return Err(Pdf2TxtError::MissingSidecar {
                image: image.clone(),
            });
        }
        sidecars.push(sidecar);

        if let Some(ref cb) = config.progress_callback {
            cb.on_page_complete(page_num, total);
        }
    }

    info!("Recognised {} page(s)", total);
    Ok(sidecars)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[OsString]) -> Vec<String> {
        args.iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn lang_is_optional() {
        let args = ocr_args(None, 3, Path::new("/w/image-0.png"));
        assert_eq!(
            strings(&args),
            ["--psm", "3", "/w/image-0.png", "/w/image-0.png"]
        );
    }

    #[test]
    fn lang_is_passed_verbatim() {
        let args = ocr_args(Some("eng+jpn"), 6, Path::new("p.png"));
        assert_eq!(
            strings(&args),
            ["-l", "eng+jpn", "--psm", "6", "p.png", "p.png"]
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_engine_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("image-0.png");
        std::fs::write(&image, b"x").unwrap();

        let config = ConversionConfig::builder()
            .ocr_program("false")
            .build()
            .unwrap();
        let err = recognize_pages(&[image], &config).await.unwrap_err();
        assert!(
            matches!(err, Pdf2TxtError::ToolFailed { ref program, .. } if program == "false"),
            "got {err:?}"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn sidecars_follow_the_given_image_order() {
        let dir = tempfile::tempdir().unwrap();
        let images = [dir.path().join("image-1.png"), dir.path().join("image-0.png")];
        for image in &images {
            std::fs::write(image, b"x").unwrap();
            std::fs::write(sidecar_path(image), b"text").unwrap();
        }

        let config = ConversionConfig::builder()
            .ocr_program("true")
            .build()
            .unwrap();
        let sidecars = recognize_pages(&images, &config).await.unwrap();
        assert_eq!(
            sidecars,
            [
                dir.path().join("image-1.png.txt"),
                dir.path().join("image-0.png.txt")
            ]
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn engine_without_sidecar_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("image-0.png");
        std::fs::write(&image, b"x").unwrap();

        let config = ConversionConfig::builder()
            .ocr_program("true")
            .build()
            .unwrap();
        let err = recognize_pages(&[image], &config).await.unwrap_err();
        assert!(matches!(err, Pdf2TxtError::MissingSidecar { .. }), "got {err:?}");
    }
}
