//! Persistent collection state.
//!
//! The collection is a single ordered list of captured files, stored as a
//! pretty-printed JSON array in one well-known file. Every mutation is a
//! whole-state read-modify-write: load the full collection, change it in
//! memory, write it back. There is no locking; two concurrent invocations
//! race last-writer-wins, which is accepted for a single-user desktop tool.

use crate::classifier::is_text_file;
use anyhow::{Context, Result};
use encoding_rs::mem::decode_latin1;
use ignore::WalkBuilder;
use log::{debug, warn};
use memmap2::MmapOptions;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};

/// One captured file: absolute path (unique key), display name and the
/// full text content at capture time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollectionItem {
    pub path: String,
    pub content: String,
    pub name: String,
}

/// The ordered, path-deduplicated list of captured files.
pub type Collection = Vec<CollectionItem>;

/// Read/write access to the persisted collection.
pub struct CollectionStore {
    state_path: PathBuf,
}

impl CollectionStore {
    pub fn new(state_path: PathBuf) -> Self {
        Self { state_path }
    }

    /// Loads the persisted collection. A missing or unreadable state file
    /// and corrupt JSON all yield an empty collection; `load` never fails.
    pub fn load(&self) -> Collection {
        let Ok(raw) = std::fs::read_to_string(&self.state_path) else {
            return Collection::new();
        };
        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(err) => {
                warn!(
                    "corrupt state file {}, starting empty: {}",
                    self.state_path.display(),
                    err
                );
                Collection::new()
            }
        }
    }

    /// Replaces the persisted state with `items`. An unwritable state path
    /// is a fatal condition and propagates.
    pub fn save(&self, items: &Collection) -> Result<()> {
        let json = serde_json::to_string_pretty(items).context("Failed to serialize collection")?;
        std::fs::write(&self.state_path, json).with_context(|| {
            format!("Failed to write state file {}", self.state_path.display())
        })?;
        debug!(
            "saved {} item(s) to {}",
            items.len(),
            self.state_path.display()
        );
        Ok(())
    }

    /// Classifies and appends new files from `inputs` (paths or `file://`
    /// URIs; directories are walked recursively). Already-present paths are
    /// skipped and never re-read. Returns the saved collection.
    pub fn add(&self, inputs: &[String]) -> Result<Collection> {
        let mut items = self.load();
        let mut seen: HashSet<String> = items.iter().map(|item| item.path.clone()).collect();

        let mut direct_files = Vec::new();
        let mut directories = Vec::new();
        for raw in inputs {
            let path = PathBuf::from(raw.strip_prefix("file://").unwrap_or(raw));
            if path.is_file() {
                direct_files.push(path);
            } else if path.is_dir() {
                directories.push(path);
            } else {
                debug!("skipping {}: not a file or directory", path.display());
            }
        }

        let mut accepted = Vec::new();
        for file in direct_files {
            let key = file.to_string_lossy().into_owned();
            if seen.insert(key) && is_text_file(&file) {
                accepted.push(file);
            }
        }
        for dir in &directories {
            for file in walk_files(dir) {
                let key = file.to_string_lossy().into_owned();
                if is_text_file(&file) && seen.insert(key) {
                    accepted.push(file);
                }
            }
        }

        for file in accepted {
            let content = read_file_content(&file);
            let name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            debug!("adding {}", file.display());
            items.push(CollectionItem {
                path: file.to_string_lossy().into_owned(),
                content,
                name,
            });
        }

        self.save(&items)?;
        Ok(items)
    }

    /// Removes the item whose path equals `path`; a no-op when absent.
    /// Returns the saved collection.
    pub fn remove(&self, path: &str) -> Result<Collection> {
        let mut items = self.load();
        items.retain(|item| item.path != path);
        self.save(&items)?;
        Ok(items)
    }

    /// Empties the collection. Returns the saved (empty) collection.
    pub fn clear(&self) -> Result<Collection> {
        let items = Collection::new();
        self.save(&items)?;
        Ok(items)
    }
}

/// Enumerates every descendant file of `dir`, hidden files included and no
/// gitignore semantics, in filesystem order. Walk errors are reported and
/// skipped.
fn walk_files(dir: &Path) -> Vec<PathBuf> {
    let mut builder = WalkBuilder::new(dir);
    builder
        .hidden(false)
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .parents(false);

    let mut files = Vec::new();
    for result in builder.build() {
        match result {
            Ok(entry) => {
                let path = entry.path();
                if path.is_file() {
                    files.push(path.to_path_buf());
                }
            }
            Err(err) => {
                warn!("error walking {}: {}", dir.display(), err);
            }
        }
    }
    files
}

/// Reads a file's content as text: UTF-8 first, then a Latin-1 fallback
/// (which cannot fail). An I/O failure produces a visible placeholder so
/// the item still lands in the collection.
pub fn read_file_content(path: &Path) -> String {
    match read_bytes(path) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => {
                debug!("{}: not UTF-8, decoding as Latin-1", path.display());
                decode_latin1(err.as_bytes()).into_owned()
            }
        },
        Err(err) => format!("[read error: {err}]"),
    }
}

fn read_bytes(path: &Path) -> std::io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let len = file.metadata()?.len();
    // Mapping a zero-length file fails; an empty file is just empty text.
    if len == 0 {
        return Ok(Vec::new());
    }
    let mmap = unsafe { MmapOptions::new().map(&file)? };
    Ok(mmap.to_vec())
}
