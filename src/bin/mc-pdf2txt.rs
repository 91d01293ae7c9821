//! CLI binary for mc-pdf2txt.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and writes the result.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use mc_pdf2txt::{
    convert, write_output, ConversionConfig, ConversionProgressCallback, ProgressCallback,
};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"];

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a spinner while inputs are rasterized, then a
/// page bar while tesseract runs. Draws on stderr only, and not at all when
/// stderr is not a terminal.
struct CliProgressCallback {
    bar: ProgressBar,
    /// Start of the page currently being recognised.
    page_started: Mutex<Option<Instant>>,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(TICKS);

        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message("Checking inputs…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            page_started: Mutex::new(None),
        })
    }

    /// Switch to the page-counter style once the page total is known.
    fn activate_bar(&self, total: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} pages  \
             ⏱ {elapsed_precise}  ETA {eta_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(TICKS);

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Recognising");
        self.bar.reset_eta();
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_input_start(&self, index: usize, total_inputs: usize, path: &Path) {
        self.bar.set_prefix("Rasterizing");
        self.bar.set_message(format!(
            "{} ({}/{})",
            path.display(),
            index + 1,
            total_inputs
        ));
    }

    fn on_conversion_start(&self, total_pages: usize) {
        self.activate_bar(total_pages);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Running OCR on {total_pages} pages…"))
        ));
    }

    fn on_page_start(&self, _page_num: usize, _total_pages: usize) {
        if let Ok(mut started) = self.page_started.lock() {
            *started = Some(Instant::now());
        }
    }

    fn on_page_complete(&self, page_num: usize, total_pages: usize) {
        let elapsed_ms = self
            .page_started
            .lock()
            .ok()
            .and_then(|mut s| s.take())
            .map(|t| t.elapsed().as_millis())
            .unwrap_or(0);

        self.bar.println(format!(
            "  {} Page {:>3}/{:<3}  {}",
            green("✓"),
            page_num,
            total_pages,
            dim(&format!("{:.1}s", elapsed_ms as f64 / 1000.0)),
        ));
        self.bar.inc(1);
    }

    fn on_conversion_complete(&self, total_pages: usize, text_len: usize) {
        let hidden = self.bar.is_hidden();
        self.bar.finish_and_clear();
        if !hidden {
            eprintln!(
                "{} {} pages recognised  {}",
                green("✔"),
                bold(&total_pages.to_string()),
                dim(&format!("{text_len} bytes of text")),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Basic conversion (stdout)
  mc-pdf2txt paper.pdf

  # Japanese + English, written to a file
  mc-pdf2txt -l jpn+eng paper.pdf -o paper.txt

  # Several inputs, pages joined in command-line order
  mc-pdf2txt cover.png body.pdf appendix.pdf -o book.txt

  # Faster run on a long document
  mc-pdf2txt -r 300 --timeout 300 long.pdf

  # Show every pdftoppm / tesseract command line
  mc-pdf2txt --verbose paper.pdf

REQUIREMENTS:
  pdftoppm    from poppler-utils
  tesseract   from tesseract-ocr (plus the language data you pass with -l)
"#;

/// Convert multi-column PDF files to text with pdftoppm and tesseract.
#[derive(Parser, Debug)]
#[command(
    name = "mc-pdf2txt",
    version,
    about = "Convert multi-column PDF files to text with pdftoppm and tesseract",
    long_about = "Convert multi-column PDF (or image) files to plain text. Each PDF page is \
rasterized with pdftoppm, recognised with tesseract, and the page texts are joined with a \
separator line.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Input PDF or image (.png, .jpg, .jpeg, .tif) files.
    #[arg(required = true, num_args = 1..)]
    input: Vec<PathBuf>,

    /// OCR language, such as `eng`, `jpn`, or `eng+jpn`.
    #[arg(short, long, env = "MC_PDF2TXT_LANG")]
    lang: Option<String>,

    /// Write text to this file instead of stdout.
    #[arg(short, long, env = "MC_PDF2TXT_OUTPUT")]
    output: Option<PathBuf>,

    /// Resolution of the temporary page images, in DPI.
    #[arg(short, long, env = "MC_PDF2TXT_RESOLUTION", default_value_t = 600,
          value_parser = clap::value_parser!(u32).range(1..))]
    resolution: u32,

    /// Timeout in seconds for each pdftoppm run.
    #[arg(long, env = "MC_PDF2TXT_TIMEOUT", default_value_t = 60,
          value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// Line written after every page.
    #[arg(long, env = "MC_PDF2TXT_PAGE_SEPARATOR", default_value = "---",
          allow_hyphen_values = true)]
    page_separator: String,

    /// Tesseract page segmentation mode.
    #[arg(long, env = "MC_PDF2TXT_PSM", default_value_t = 3)]
    psm: u32,

    /// Echo external commands and workspace events to stderr.
    #[arg(long, env = "MC_PDF2TXT_VERBOSE")]
    verbose: bool,

    /// Rasterizer program.
    #[arg(long, env = "MC_PDF2TXT_PDFTOPPM", default_value = "pdftoppm")]
    pdftoppm: String,

    /// OCR program.
    #[arg(long, env = "MC_PDF2TXT_TESSERACT", default_value = "tesseract")]
    tesseract: String,

    /// Directory in which the temporary workspace is created.
    #[arg(long, env = "MC_PDF2TXT_TEMP_DIR")]
    temp_dir: Option<PathBuf>,

    /// Output structured JSON (ConversionOutput) instead of text.
    #[arg(long, env = "MC_PDF2TXT_JSON")]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "MC_PDF2TXT_NO_PROGRESS")]
    no_progress: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "MC_PDF2TXT_QUIET")]
    quiet: bool,
}

/// Exit status after SIGINT, as a shell reports it.
const INTERRUPTED: u8 = 130;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    // ── Logging setup ────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&cli, std::env::var("RUST_LOG").ok().as_deref())?)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    // The bar would interleave with the verbose command echo, so it is only
    // shown in the default mode.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.verbose;
    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn ConversionProgressCallback>)
    } else {
        None
    };

    let config = build_config(&cli, progress_cb)?;

    // ── Run conversion ───────────────────────────────────────────────────
    // Dropping the conversion future removes the workspace and kills the
    // running child. The signal branch is polled first so the handler is
    // installed before any child is spawned.
    let output = tokio::select! {
        biased;
        Ok(()) = tokio::signal::ctrl_c() => {
            eprintln!("Interrupted");
            return Ok(ExitCode::from(INTERRUPTED));
        }
        result = convert(cli.input.as_slice(), &config) => result?,
    };

    let payload = if cli.json {
        let mut json =
            serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        json.push('\n');
        json
    } else {
        output.text
    };

    write_output(&payload, cli.output.as_deref()).await?;
    Ok(ExitCode::SUCCESS)
}

/// Log filter: `RUST_LOG` when set and valid, otherwise a level derived from
/// `--quiet`. `--verbose` always enables the library's debug events on top,
/// since they carry the command echo.
fn log_filter(cli: &Cli, rust_log: Option<&str>) -> Result<EnvFilter> {
    let level = if cli.quiet { "error" } else { "warn" };
    let filter = rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(format!("warn,mc_pdf2txt={level}")));

    if cli.verbose {
        let echo: Directive = "mc_pdf2txt=debug"
            .parse()
            .context("Invalid log directive")?;
        Ok(filter.add_directive(echo))
    } else {
        Ok(filter)
    }
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ConversionConfig> {
    let mut builder = ConversionConfig::builder()
        .resolution(cli.resolution)
        .timeout_secs(cli.timeout)
        .page_separator(cli.page_separator.clone())
        .psm(cli.psm)
        .rasterizer_program(cli.pdftoppm.clone())
        .ocr_program(cli.tesseract.clone());

    if let Some(lang) = cli.lang.as_deref().filter(|l| !l.trim().is_empty()) {
        builder = builder.lang(lang);
    }
    if let Some(ref dir) = cli.temp_dir {
        builder = builder.temp_dir(dir.clone());
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    Ok(builder.build()?)
}
