//! Shared helpers: fake `pdftoppm` / `tesseract` scripts and input fixtures.
//!
//! The fake rasterizer writes two "page images" per PDF; each is a small text
//! file. The fake OCR engine copies the image content into the sidecar and
//! logs its arguments, so the collated output is fully predictable.

#![allow(dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tempfile::TempDir;

static SERIAL: Mutex<()> = Mutex::new(());

/// Serialise tests that write and then execute scripts.
///
/// Executing a script while another thread of the same process is forking
/// with the script's write handle open fails with ETXTBSY.
pub fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

pub const TWO_PAGE_RASTERIZER: &str = r#"#!/bin/sh
while [ $# -gt 2 ]; do shift; done
printf 'first page of %s  \n' "$(basename "$1")" > "$2-1.png"
printf 'second page\t\n' > "$2-2.png"
"#;

pub const SLOW_RASTERIZER: &str = "#!/bin/sh\nexec sleep 30\n";

/// A rasterizer that records its pid in `pid_file` and then hangs.
pub fn pid_recording_rasterizer(pid_file: &Path) -> String {
    format!(
        "#!/bin/sh\necho $$ > '{}.tmp'\nmv '{}.tmp' '{}'\nexec sleep 30\n",
        pid_file.display(),
        pid_file.display(),
        pid_file.display()
    )
}

/// Whether `pid` is still a live (non-zombie) process.
pub fn process_alive(pid: u32) -> bool {
    let signalled = std::process::Command::new("kill")
        .args(["-0", &pid.to_string()])
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false);
    let zombie = std::fs::read_to_string(format!("/proc/{pid}/stat"))
        .map(|stat| stat.rsplit_once(')').is_some_and(|(_, rest)| rest.trim_start().starts_with('Z')))
        .unwrap_or(false);
    signalled && !zombie
}

pub const FAILING_RASTERIZER: &str = "#!/bin/sh\necho 'Syntax Error: broken PDF' >&2\nexit 99\n";

/// Directory holding fake tools plus a log of every OCR invocation.
pub struct FakeTools {
    pub dir: TempDir,
    pub pdftoppm: PathBuf,
    pub tesseract: PathBuf,
    pub ocr_log: PathBuf,
}

impl FakeTools {
    pub fn new() -> Self {
        Self::with_rasterizer(TWO_PAGE_RASTERIZER)
    }

    pub fn with_rasterizer(rasterizer: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let ocr_log = dir.path().join("ocr.log");
        let pdftoppm = write_script(dir.path(), "pdftoppm", rasterizer);
        let tesseract = write_script(
            dir.path(),
            "tesseract",
            &format!(
                "#!/bin/sh\necho \"$*\" >> '{}'\nwhile [ $# -gt 2 ]; do shift; done\ncat \"$1\" > \"$2.txt\"\n",
                ocr_log.display()
            ),
        );
        Self {
            dir,
            pdftoppm,
            tesseract,
            ocr_log,
        }
    }

    /// Arguments of every OCR call so far, one line per call.
    pub fn ocr_calls(&self) -> Vec<String> {
        std::fs::read_to_string(&self.ocr_log)
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Write an input file with the given content and return its path.
pub fn input(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Entries left in `dir`.
pub fn leftovers(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect()
}
