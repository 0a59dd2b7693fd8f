//! Markdown rendering.
//!
//! Turns the collection into one Markdown document: a header, an item
//! count, then each captured file as a heading, its path, and a fenced
//! code block. Pure function of the collection value — same input, byte
//! identical output, no timestamps.

use crate::store::{Collection, CollectionItem};
use crate::utils::language_tag;
use std::path::Path;

const HEADER: &str = "# 📚 Temporary Files Collection\n\n";

/// Renders the whole collection as a Markdown document. An empty
/// collection yields a short document saying so, never an error.
pub fn render(items: &Collection) -> String {
    if items.is_empty() {
        return format!("{HEADER}*No files stored yet*\n");
    }

    let mut md = String::from(HEADER);
    md.push_str(&format!("*Generated from {} file(s)*\n\n", items.len()));
    md.push_str("---\n\n");
    for item in items {
        md.push_str(&render_item(item));
    }
    md
}

/// One file as a Markdown section: heading with the base name, the full
/// path, and the raw content in a fenced block tagged by extension.
fn render_item(item: &CollectionItem) -> String {
    let tag = language_tag(Path::new(&item.path));
    format!(
        "### 📄 {}\n**Path:** `{}`\n\n```{}\n{}\n```\n\n",
        item.name, item.path, tag, item.content
    )
}
