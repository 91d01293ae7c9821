//! Configuration types for PDF-to-text conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`], built
//! via its [`ConversionConfigBuilder`]. The defaults match the CLI defaults,
//! so `ConversionConfig::default()` behaves exactly like running the binary
//! with no options.

use crate::error::Pdf2TxtError;
use crate::progress::ProgressCallback;
use std::fmt;
use std::path::PathBuf;

/// Default rasterization resolution in dots per inch.
pub const DEFAULT_RESOLUTION: u32 = 600;

/// Default rasterization timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default line written after every page.
pub const DEFAULT_PAGE_SEPARATOR: &str = "---";

/// Default tesseract page-segmentation mode (fully automatic, no OSD).
pub const DEFAULT_PSM: u32 = 3;

/// Configuration for a PDF-to-text conversion.
///
/// # Example
/// ```rust
/// use mc_pdf2txt::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .lang("eng+jpn")
///     .resolution(300)
///     .page_separator("=====")
///     .build()
///     .unwrap();
/// assert_eq!(config.psm, 3);
/// ```
#[derive(Clone)]
pub struct ConversionConfig {
    /// OCR language, e.g. `eng`, `jpn` or `eng+jpn`. Passed verbatim.
    /// If None, the OCR engine uses its own default.
    pub lang: Option<String>,

    /// Rasterization resolution in DPI. Default: 600.
    ///
    /// Multi-column scans need small glyphs to survive rasterization, hence
    /// the high default. Lower it when the rasterizer times out on large
    /// documents.
    pub resolution: u32,

    /// Timeout for each rasterizer invocation, in seconds. Default: 60.
    ///
    /// Applies to the rasterization step only; OCR calls are unbounded.
    pub timeout_secs: u64,

    /// Line appended after every page, including the last. Default: `---`.
    pub page_separator: String,

    /// Tesseract page-segmentation mode, passed verbatim. Default: 3.
    pub psm: u32,

    /// Rasterizer program name or path. Default: `pdftoppm`.
    pub rasterizer_program: String,

    /// OCR program name or path. Default: `tesseract`.
    pub ocr_program: String,

    /// Parent directory for the temporary workspace.
    /// If None, the system temporary directory is used.
    pub temp_dir: Option<PathBuf>,

    /// Optional per-stage progress callback.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            lang: None,
            resolution: DEFAULT_RESOLUTION,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            page_separator: DEFAULT_PAGE_SEPARATOR.to_string(),
            psm: DEFAULT_PSM,
            rasterizer_program: "pdftoppm".to_string(),
            ocr_program: "tesseract".to_string(),
            temp_dir: None,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ConversionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionConfig")
            .field("lang", &self.lang)
            .field("resolution", &self.resolution)
            .field("timeout_secs", &self.timeout_secs)
            .field("page_separator", &self.page_separator)
            .field("psm", &self.psm)
            .field("rasterizer_program", &self.rasterizer_program)
            .field("ocr_program", &self.ocr_program)
            .field("temp_dir", &self.temp_dir)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn ConversionProgressCallback>"),
            )
            .finish()
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    /// OCR language; an empty value leaves the engine's default in place.
    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        let lang = lang.into();
        self.config.lang = if lang.trim().is_empty() { None } else { Some(lang) };
        self
    }

    pub fn resolution(mut self, dpi: u32) -> Self {
        self.config.resolution = dpi;
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    pub fn page_separator(mut self, sep: impl Into<String>) -> Self {
        self.config.page_separator = sep.into();
        self
    }

    pub fn psm(mut self, psm: u32) -> Self {
        self.config.psm = psm;
        self
    }

    pub fn rasterizer_program(mut self, program: impl Into<String>) -> Self {
        self.config.rasterizer_program = program.into();
        self
    }

    pub fn ocr_program(mut self, program: impl Into<String>) -> Self {
        self.config.ocr_program = program.into();
        self
    }

    pub fn temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.temp_dir = Some(dir.into());
        self
    }

    /// Attach a progress callback invoked as inputs and pages are processed.
    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Pdf2TxtError> {
        let c = &self.config;
        if c.resolution == 0 {
            return Err(Pdf2TxtError::InvalidConfig(
                "resolution must be a positive number of DPI".into(),
            ));
        }
        if c.timeout_secs == 0 {
            return Err(Pdf2TxtError::InvalidConfig(
                "timeout must be at least 1 second".into(),
            ));
        }
        if c.rasterizer_program.trim().is_empty() || c.ocr_program.trim().is_empty() {
            return Err(Pdf2TxtError::InvalidConfig(
                "external program names must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}
