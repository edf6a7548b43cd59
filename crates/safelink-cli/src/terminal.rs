//! Terminal-side collaborators: the system browser and clipboard tools.

use std::io::Write;
use std::process::{Command, ExitStatus, Stdio};

use safelink_core::error::AppError;
use safelink_core::result::AppResult;
use safelink_core::traits::{Clipboard, NavigationMode, Navigator, VerificationOpener};

/// Opens URLs in the user's default browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser;

impl SystemBrowser {
    fn launch(url: &str) -> std::io::Result<ExitStatus> {
        let (program, args) = launcher_command(std::env::consts::OS, url);
        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
    }
}

/// Program and arguments that open `url` on `os`.
///
/// The URL is always a single argument and never passes through a shell,
/// so `&`, `|` and `^` in a query string stay part of the URL.
fn launcher_command<'a>(os: &str, url: &'a str) -> (&'static str, Vec<&'a str>) {
    match os {
        "windows" => ("rundll32", vec!["url.dll,FileProtocolHandler", url]),
        "macos" => ("open", vec![url]),
        _ => ("xdg-open", vec![url]),
    }
}

impl VerificationOpener for SystemBrowser {
    fn open(&self, url: &str) -> AppResult<()> {
        match Self::launch(url) {
            Ok(status) if status.success() => Ok(()),
            Ok(status) => Err(AppError::verification_unavailable(format!(
                "Browser launcher exited with {status}"
            ))),
            Err(e) => Err(AppError::verification_unavailable(format!(
                "Could not start a browser: {e}"
            ))),
        }
    }
}

impl Navigator for SystemBrowser {
    fn navigate(&self, url: &str, _mode: NavigationMode) -> AppResult<()> {
        match Self::launch(url) {
            Ok(status) if status.success() => Ok(()),
            Ok(status) => Err(AppError::external_service(format!(
                "Browser launcher exited with {status}"
            ))),
            Err(e) => Err(AppError::external_service(format!(
                "Could not start a browser: {e}"
            ))),
        }
    }
}

/// Prints URLs instead of opening them.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintOnly;

impl VerificationOpener for PrintOnly {
    fn open(&self, url: &str) -> AppResult<()> {
        println!("  Verification page: {url}");
        Ok(())
    }
}

impl Navigator for PrintOnly {
    fn navigate(&self, url: &str, _mode: NavigationMode) -> AppResult<()> {
        println!("{url}");
        Ok(())
    }
}

/// Writes to the system clipboard through the platform's copy tool.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

const WINDOWS_TOOLS: [(&str, &[&str]); 1] = [("clip", &[])];

const MACOS_TOOLS: [(&str, &[&str]); 1] = [("pbcopy", &[])];

const UNIX_TOOLS: [(&str, &[&str]); 3] = [
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

impl SystemClipboard {
    fn candidates() -> &'static [(&'static str, &'static [&'static str])] {
        if cfg!(target_os = "windows") {
            &WINDOWS_TOOLS
        } else if cfg!(target_os = "macos") {
            &MACOS_TOOLS
        } else {
            &UNIX_TOOLS
        }
    }

    fn pipe_to(program: &str, args: &[&str], text: &str) -> std::io::Result<bool> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };

        // Reap the child even when the write failed.
        let status = child.wait()?;
        written?;
        Ok(status.success())
    }
}

impl Clipboard for SystemClipboard {
    fn copy(&self, text: &str) -> AppResult<()> {
        for (program, args) in Self::candidates() {
            match Self::pipe_to(program, args, text) {
                Ok(true) => return Ok(()),
                Ok(false) => tracing::debug!(program, "Clipboard tool failed"),
                Err(e) => tracing::debug!(program, error = %e, "Clipboard tool unavailable"),
            }
        }
        Err(AppError::external_service("no clipboard tool available"))
    }
}
