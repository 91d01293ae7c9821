//! External process execution with command echo and optional timeout.
//!
//! Every external program is awaited to completion before the caller moves
//! on. The child's stderr is inherited so the tool's own diagnostics reach
//! the user unchanged; its stdout is redirected to our stderr so it can never
//! end up mixed into text written to standard output.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::ffi::OsString;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Why a command did not complete successfully.
#[derive(Debug)]
pub enum RunError {
    /// The program could not be started.
    Launch(std::io::Error),
    /// The program ran longer than the allowed time and was killed.
    Timeout,
    /// The program exited with a failing status.
    Failed(ExitStatus),
}

static RE_SHELL_SAFE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\w@%+=:,./-]+$").unwrap());

/// Quote a single argument for display in a POSIX shell.
///
/// Arguments made only of shell-safe characters are returned unchanged.
pub fn quote(arg: &str) -> Cow<'_, str> {
    if arg.is_empty() {
        Cow::Borrowed("''")
    } else if RE_SHELL_SAFE.is_match(arg) {
        Cow::Borrowed(arg)
    } else {
        Cow::Owned(format!("'{}'", arg.replace('\'', r#"'"'"'"#)))
    }
}

/// Shell-quote a path for display.
pub fn quote_path(path: &Path) -> String {
    quote(&path.to_string_lossy()).into_owned()
}

/// Render a full command line, each word shell-quoted.
pub fn command_line(program: &str, args: &[OsString]) -> String {
    let mut line = quote(program).into_owned();
    for arg in args {
        line.push(' ');
        line.push_str(&quote(&arg.to_string_lossy()));
    }
    line
}

/// Run `program` with `args` and wait for it to exit.
///
/// With a `timeout`, a child still running when it expires is killed and
/// [`RunError::Timeout`] is returned.
pub async fn run(
    program: &str,
    args: &[OsString],
    timeout: Option<Duration>,
) -> Result<(), RunError> {
    debug!("> exec: {}", command_line(program, args));

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(std::io::stderr())
        .stderr(Stdio::inherit())
        .kill_on_drop(true)
        .spawn()
        .map_err(RunError::Launch)?;

    let status = match timeout {
        Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
            Ok(status) => status.map_err(RunError::Launch)?,
            Err(_) => {
                debug!("`{}` exceeded {}s, killing it", program, limit.as_secs());
                // The child may have exited between the timeout and the kill.
                let _ = child.kill().await;
                return Err(RunError::Timeout);
            }
        },
        None => child.wait().await.map_err(RunError::Launch)?,
    };

    if status.success() {
        Ok(())
    } else {
        Err(RunError::Failed(status))
    }
}
