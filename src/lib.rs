//! # mdcollect Library
//!
//! This crate can be used to:
//!
//! - Accumulate text files and folder contents into a persistent collection
//! - Render the collection as one Markdown document with fenced code blocks
//! - Ship the document to the clipboard or drop it into a directory
//!
//! Each binary invocation performs one operation and exits; the collection
//! lives in a JSON state file between invocations, and the file manager's
//! context menus are regenerated after every mutation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mdcollect::cli::{Action, Config};
//! use mdcollect::run;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     run(Action::Store(vec!["/home/me/notes.md".into()]), &config).await?;
//!     run(Action::Copy, &config).await
//! }
//! ```

pub mod classifier;
pub mod cli;
pub mod clipboard;
pub mod dialog;
pub mod metrics;
pub mod renderer;
pub mod servicemenu;
pub mod store;
pub mod utils;

pub use classifier::is_text_file;
pub use cli::{Action, Config};
pub use metrics::Metrics;
pub use renderer::render;
pub use store::{Collection, CollectionItem, CollectionStore};

use anyhow::{Context, Result};
use log::info;
use std::path::Path;

/// Name of the document written by the `drop` operation.
pub const DROP_FILE_NAME: &str = "temp_collection.md";

/// Executes one operation against the persisted collection.
pub async fn run(action: Action, config: &Config) -> Result<()> {
    let store = CollectionStore::new(config.state_path.clone());
    match action {
        Action::Store(paths) => {
            let items = store.add(&paths)?;
            servicemenu::regenerate(&items, config)?;
        }
        Action::Copy => {
            let md = render(&store.load());
            clipboard::copy_to_clipboard(&md)?;
        }
        Action::Drop(dir) => {
            drop_collection(&store, &dir, config).await?;
        }
        Action::DropDialog => {
            if store.load().is_empty() {
                dialog::sorry("No files stored!");
            } else if let Some(dir) = dialog::pick_directory(&config.home) {
                drop_collection(&store, &dir, config).await?;
            }
        }
        Action::Metrics => {
            let items = store.load();
            if items.is_empty() {
                dialog::message("Metrics", "No files stored!");
            } else {
                dialog::message("Metrics", &metrics::report(&items));
            }
        }
        Action::Remove(path) => {
            let items = store.remove(&path)?;
            servicemenu::regenerate(&items, config)?;
        }
        Action::Clear => {
            let items = store.clear()?;
            servicemenu::regenerate(&items, config)?;
        }
        Action::Init => {
            servicemenu::regenerate(&store.load(), config)?;
            println!("✅ mdcollect installed! File manager menu updated.");
        }
    }
    Ok(())
}

/// Writes the rendered document into `dir`, then clears the collection.
/// An empty collection writes nothing and clears nothing.
async fn drop_collection(store: &CollectionStore, dir: &Path, config: &Config) -> Result<()> {
    let items = store.load();
    if items.is_empty() {
        return Ok(());
    }

    let output_path = dir.join(DROP_FILE_NAME);
    tokio::fs::write(&output_path, render(&items))
        .await
        .with_context(|| format!("Failed to write {}", output_path.display()))?;
    info!("dropped {} item(s) to {}", items.len(), output_path.display());

    let emptied = store.clear()?;
    servicemenu::regenerate(&emptied, config)?;
    Ok(())
}
