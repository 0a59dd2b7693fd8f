//! User-facing dialog boxes via `kdialog`.
//!
//! Every wrapper degrades to plain terminal output when `kdialog` is not
//! installed, so the tool stays usable outside a KDE session.

use log::debug;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Shows an error box; falls back to stderr.
pub fn error(message: &str) {
    show(&["--error", message]).unwrap_or_else(|| eprintln!("{message}"));
}

/// Shows a "sorry" box; falls back to stderr.
pub fn sorry(message: &str) {
    show(&["--sorry", message]).unwrap_or_else(|| eprintln!("{message}"));
}

/// Shows a titled message box; falls back to stdout.
pub fn message(title: &str, message: &str) {
    show(&["--title", title, "--msgbox", message]).unwrap_or_else(|| println!("{message}"));
}

/// Prompts the user to pick an existing directory, starting at `start`.
/// Returns `None` when the user cancels or no dialog program is available.
pub fn pick_directory(start: &Path) -> Option<PathBuf> {
    let output = Command::new("kdialog")
        .arg("--getexistingdirectory")
        .arg(start)
        .output();
    match output {
        Ok(out) if out.status.success() => {
            let chosen = String::from_utf8_lossy(&out.stdout).trim().to_string();
            if chosen.is_empty() {
                None
            } else {
                Some(PathBuf::from(chosen))
            }
        }
        Ok(_) => None,
        Err(err) => {
            if err.kind() == ErrorKind::NotFound {
                eprintln!("kdialog not found; pass the target directory as an argument instead");
            } else {
                debug!("kdialog failed: {err}");
            }
            None
        }
    }
}

/// Runs kdialog with `args`; `Some(())` if it could be spawned at all,
/// `None` when it is missing so the caller can print instead.
fn show(args: &[&str]) -> Option<()> {
    match Command::new("kdialog").args(args).status() {
        Ok(_) => Some(()),
        Err(err) => {
            debug!("kdialog unavailable: {err}");
            None
        }
    }
}
