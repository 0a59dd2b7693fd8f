//! KDE service-menu descriptor generation.
//!
//! Regenerates the two `.desktop` files that surface the tool in the file
//! manager's context menu: one bound to text-ish MIME types, one bound to
//! directories. The menus reflect the current collection — one remove
//! action per stored item plus a metrics entry carrying the item count —
//! so they are rewritten after every mutation.

use crate::cli::Config;
use crate::store::Collection;
use anyhow::{Context, Result};
use log::{debug, info};
use std::fmt::Write as _;
use std::process::{Command, Stdio};

const FILE_MIME_TYPES: &str = "text/plain;text/x-python;text/x-c++;application/x-shellscript;\
text/markdown;application/json;text/x-tex;text/x-csrc;text/x-chdr;text/html;text/css;\
application/javascript;text/x-java;application/x-yaml;";

/// Writes both descriptor files under the configured servicemenu directory
/// and asks KDE to refresh its cache (best effort).
pub fn regenerate(items: &Collection, config: &Config) -> Result<()> {
    let exec = config.exec_path.to_string_lossy();

    let mut file_actions = vec!["AddToCollection", "CopyCollection"];
    let mut folder_actions = vec!["AddToCollection", "CopyCollection", "DropCollection"];

    let mut manage_actions = String::new();
    let remove_names: Vec<String> = (0..items.len()).map(|i| format!("RemoveItem{i}")).collect();
    if !items.is_empty() {
        file_actions.push("SeparatorFiles");
        folder_actions.push("SeparatorFiles");
        manage_actions
            .push_str("\n[Desktop Action SeparatorFiles]\nName=--- Stored Files ---\nExec=/bin/true\n");
        for (item, action) in items.iter().zip(&remove_names) {
            file_actions.push(action.as_str());
            folder_actions.push(action.as_str());
            let _ = write!(
                manage_actions,
                "\n[Desktop Action {action}]\nName=❌ {}\nIcon=edit-delete\nExec={exec} remove {}\n",
                item.name,
                shell_quote(&item.path),
            );
        }
    }

    let metrics_label = if items.is_empty() {
        "📊 Metrics (Empty)".to_string()
    } else {
        format!("📊 Metrics ({} files)", items.len())
    };
    let _ = write!(
        manage_actions,
        "\n[Desktop Action ShowMetrics]\nName={metrics_label}\nIcon=view-statistics\nExec={exec} metrics\n\
         \n[Desktop Action ClearAll]\nName=🗑️ Clear Collection\nIcon=edit-clear-all\nExec={exec} clear\n",
    );

    let common_actions = format!(
        "\n[Desktop Action AddToCollection]\nName=➕ Add to Collection\nIcon=document-save\nExec={exec} store %U\n\
         \n[Desktop Action CopyCollection]\nName=📋 Copy Collection to Clipboard\nIcon=edit-copy\nExec={exec} copy\n\
         \n[Desktop Action DropCollection]\nName=📁 Drop Collection Here\nIcon=document-export\nExec={exec} drop %f\n",
    );

    let file_menu = format!(
        "[Desktop Entry]\nType=Service\nX-KDE-ServiceTypes=KonqPopupMenu/Plugin\n\
         MimeType={FILE_MIME_TYPES}\nActions={}\n{common_actions}{manage_actions}",
        file_actions.join(";"),
    );
    let folder_menu = format!(
        "[Desktop Entry]\nType=Service\nX-KDE-ServiceTypes=KonqPopupMenu/Plugin\n\
         MimeType=inode/directory;\nActions={}\n{common_actions}{manage_actions}",
        folder_actions.join(";"),
    );

    std::fs::create_dir_all(&config.menu_dir).with_context(|| {
        format!(
            "Failed to create servicemenu directory {}",
            config.menu_dir.display()
        )
    })?;
    let files_path = config.menu_dir.join("mdcollect-files.desktop");
    let folders_path = config.menu_dir.join("mdcollect-folders.desktop");
    std::fs::write(&files_path, file_menu)
        .with_context(|| format!("Failed to write {}", files_path.display()))?;
    std::fs::write(&folders_path, folder_menu)
        .with_context(|| format!("Failed to write {}", folders_path.display()))?;
    info!("servicemenus regenerated for {} item(s)", items.len());

    refresh_menu_cache();
    Ok(())
}

/// Fire-and-forget KDE menu cache rebuild; absence or failure is ignored.
fn refresh_menu_cache() {
    match Command::new("kbuildsycoca5")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
    {
        Ok(status) => debug!("kbuildsycoca5 exited with {status}"),
        Err(err) => debug!("kbuildsycoca5 unavailable: {err}"),
    }
}

/// Quotes a string for use in a shell command line, shlex-style: safe
/// strings pass through, everything else is single-quoted with embedded
/// quotes escaped.
fn shell_quote(s: &str) -> String {
    let safe = |c: char| c.is_ascii_alphanumeric() || "_@%+=:,./-".contains(c);
    if !s.is_empty() && s.chars().all(safe) {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', "'\\''"))
    }
}
