//! Conversion entry points.
//!
//! [`convert`] drives the whole pipeline and returns the collated text in
//! memory; [`convert_to_file`] additionally writes it out. The temporary
//! workspace lives only inside [`convert`], so it is gone by the time either
//! function returns, successfully or not.

use crate::config::ConversionConfig;
use crate::error::Pdf2TxtError;
use crate::output::{self, ConversionOutput, ConversionStats};
use crate::pipeline::workspace::Workspace;
use crate::pipeline::{collate, input, ocr, preflight, rasterize};
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Convert PDF and image files to plain text.
///
/// # Arguments
/// * `inputs`: PDF (`.pdf`) or raster image (`.png`, `.jpg`, `.jpeg`,
///   `.tif`) files, in output order
/// * `config`: Conversion configuration
///
/// # Errors
/// Every failure is fatal: a missing external program, an unsupported or
/// missing input, a rasterizer timeout, or any external program failing.
pub async fn convert<P: AsRef<Path>>(
    inputs: &[P],
    config: &ConversionConfig,
) -> Result<ConversionOutput, Pdf2TxtError> {
    let total_start = Instant::now();

    // ── Step 1: Preflight ────────────────────────────────────────────────
    preflight::check_dependencies(config)?;

    // ── Step 2: Classify inputs ──────────────────────────────────────────
    if inputs.is_empty() {
        return Err(Pdf2TxtError::InvalidConfig(
            "at least one input file is required".into(),
        ));
    }
    let classified = input::classify_all(inputs)?;
    info!("Starting conversion of {} input(s)", classified.len());

    // ── Step 3: Workspace ────────────────────────────────────────────────
    let workspace = Workspace::create(config.temp_dir.as_deref())?;

    // ── Step 4: Rasterize / copy ─────────────────────────────────────────
    let stage_start = Instant::now();
    rasterize::stage_inputs(&classified, &workspace, config).await?;
    let rasterize_duration_ms = stage_start.elapsed().as_millis() as u64;

    let images = workspace.page_images()?;
    if images.is_empty() {
        return Err(Pdf2TxtError::NoPageImages);
    }
    info!(
        "Staged {} page image(s) in {}ms",
        images.len(),
        rasterize_duration_ms
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_start(images.len());
    }

    // ── Step 5: OCR ──────────────────────────────────────────────────────
    let ocr_start = Instant::now();
    let sidecars = ocr::recognize_pages(&images, config).await?;
    let ocr_duration_ms = ocr_start.elapsed().as_millis() as u64;

    // ── Step 6: Collate ──────────────────────────────────────────────────
    if sidecars.len() != images.len() {
        return Err(Pdf2TxtError::Internal(format!(
            "{} page image(s) but {} OCR text file(s)",
            images.len(),
            sidecars.len()
        )));
    }
    let pages = collate::read_pages(&sidecars).await?;
    let text = collate::assemble(pages.iter().map(|p| p.text.as_str()), &config.page_separator);

    drop(workspace);

    let stats = ConversionStats {
        input_files: classified.len(),
        total_pages: pages.len(),
        rasterize_duration_ms,
        ocr_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Conversion complete: {} page(s), {}ms total",
        stats.total_pages, stats.total_duration_ms
    );

    if let Some(ref cb) = config.progress_callback {
        cb.on_conversion_complete(pages.len(), text.len());
    }

    Ok(ConversionOutput { text, pages, stats })
}

/// Convert and write the collated text to `output_path`.
///
/// The file is created or truncated; nothing is written if the conversion fails.
pub async fn convert_to_file<P: AsRef<Path>>(
    inputs: &[P],
    output_path: impl AsRef<Path>,
    config: &ConversionConfig,
) -> Result<ConversionStats, Pdf2TxtError> {
    let output = convert(inputs, config).await?;
    output::write_output(&output.text, Some(output_path.as_ref())).await?;
    Ok(output.stats)
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_sync<P: AsRef<Path>>(
    inputs: &[P],
    config: &ConversionConfig,
) -> Result<ConversionOutput, Pdf2TxtError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Pdf2TxtError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(convert(inputs, config))
}
