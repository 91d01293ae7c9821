//! Staging: turn every classified input into page images in the workspace.
//!
//! PDFs are handed to the external rasterizer, which writes one grayscale
//! PNG per page under the input's padded prefix. Raster images are copied
//! as a single page, keeping their original extension. Inputs are staged
//! strictly one after another in command-line order.

use crate::config::ConversionConfig;
use crate::error::Pdf2TxtError;
use crate::pipeline::command::{self, RunError};
use crate::pipeline::input::{InputFile, InputKind};
use crate::pipeline::workspace::Workspace;
use std::ffi::OsString;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Rasterizer arguments: `-r <dpi> -gray -png <input> <prefix>`.
pub fn rasterizer_args(resolution: u32, input: &Path, prefix: &Path) -> Vec<OsString> {
    vec![
        "-r".into(),
        resolution.to_string().into(),
        "-gray".into(),
        "-png".into(),
        input.as_os_str().to_owned(),
        prefix.as_os_str().to_owned(),
    ]
}

/// Stage all inputs into `workspace`, in order.
pub async fn stage_inputs(
    inputs: &[InputFile],
    workspace: &Workspace,
    config: &ConversionConfig,
) -> Result<(), Pdf2TxtError> {
    let total = inputs.len();
    for (index, input) in inputs.iter().enumerate() {
        if let Some(ref cb) = config.progress_callback {
            cb.on_input_start(index, total, &input.path);
        }

        let prefix = workspace.page_prefix(index, total);
        match input.kind {
            InputKind::Pdf => rasterize_pdf(&input.path, &prefix, config).await?,
            InputKind::Image => {
                let mut dest = prefix.into_os_string();
                if let Some(ext) = input.extension() {
                    dest.push(".");
                    dest.push(ext);
                }
                debug!("Copying {} into workspace", input.path.display());
                tokio::fs::copy(&input.path, &dest)
                    .await
                    .map_err(|e| Pdf2TxtError::Io {
                        path: input.path.clone(),
                        source: e,
                    })?;
            }
        }
    }
    info!("Staged {} input(s)", total);
    Ok(())
}

/// Rasterize one PDF to `<prefix>-<page>.png`, bounded by the configured timeout.
pub async fn rasterize_pdf(
    input: &Path,
    prefix: &Path,
    config: &ConversionConfig,
) -> Result<(), Pdf2TxtError> {
    let args = rasterizer_args(config.resolution, input, prefix);
    let timeout = Duration::from_secs(config.timeout_secs);

    command::run(&config.rasterizer_program, &args, Some(timeout))
        .await
        .map_err(|e| match e {
            RunError::Timeout => Pdf2TxtError::RasterizeTimeout {
                path: input.to_path_buf(),
                secs: config.timeout_secs,
            },
            RunError::Failed(status) => Pdf2TxtError::ToolFailed {
                program: config.rasterizer_program.clone(),
                status,
            },
            RunError::Launch(source) => Pdf2TxtError::ToolLaunchFailed {
                program: config.rasterizer_program.clone(),
                source,
            },
        })
}
