//! System clipboard integration.
//!
//! The document is handed to an external clipboard helper. Candidates are
//! tried in order; a helper that is not installed (`NotFound` on spawn)
//! falls through to the next one, and when none is available the user gets
//! a notice instead of a crash. No candidate is a hard dependency.

use crate::dialog;
use anyhow::{Context, Result};
use log::{debug, info};
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

/// Clipboard-setting programs in preference order: X11 first, Wayland
/// second. Each reads the payload from stdin.
const CANDIDATES: &[(&str, &[&str])] = &[
    ("xclip", &["-selection", "clipboard"]),
    ("wl-copy", &[]),
];

/// Sends `text` to the system clipboard through the first available
/// helper. A missing helper is not an error; the user is notified and the
/// process exits normally.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    for &(program, args) in CANDIDATES {
        match pipe_to(program, args, text) {
            Ok(()) => {
                info!("copied {} byte(s) via {}", text.len(), program);
                return Ok(());
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("{program} not installed, trying next candidate");
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to run {program}"));
            }
        }
    }

    dialog::error("xclip or wl-copy not found.\nInstall: sudo apt install xclip");
    Ok(())
}

fn pipe_to(program: &str, args: &[&str], text: &str) -> std::io::Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .spawn()?;
    if let Some(stdin) = child.stdin.as_mut() {
        stdin.write_all(text.as_bytes())?;
    }
    // stdin must be dropped before wait, or the helper never sees EOF
    drop(child.stdin.take());
    child.wait()?;
    Ok(())
}
