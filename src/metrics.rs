//! Derived collection metrics.
//!
//! Read-only view over the collection: file count, total line count and
//! the byte size the rendered Markdown document would have. Never mutates
//! anything.

use crate::renderer::render;
use crate::store::Collection;
use crate::utils::human_size;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    /// Number of stored items.
    pub files: usize,
    /// Sum of per-item line counts; a file with no newline counts as 1.
    pub total_lines: usize,
    /// Byte length of the rendered Markdown document.
    pub markdown_bytes: usize,
}

impl Metrics {
    pub fn compute(items: &Collection) -> Self {
        Self {
            files: items.len(),
            total_lines: items.iter().map(|item| line_count(&item.content)).sum(),
            markdown_bytes: render(items).len(),
        }
    }
}

/// Lines in `content`, counting a final unterminated line.
pub fn line_count(content: &str) -> usize {
    content.matches('\n').count() + 1
}

/// The metrics report shown to the user: a framed summary plus the list of
/// stored file names.
pub fn report(items: &Collection) -> String {
    let metrics = Metrics::compute(items);
    let mut out = String::new();
    out.push_str("═══════════════════════════\n");
    out.push_str("📊 Collection Metrics\n");
    out.push_str("═══════════════════════════\n\n");
    let _ = writeln!(out, "📁 Files stored: {}", metrics.files);
    let _ = writeln!(out, "📝 Total lines: {}", with_thousands(metrics.total_lines));
    let _ = writeln!(out, "💾 MD size: {}", human_size(metrics.markdown_bytes));
    out.push_str("\nFiles list:\n");
    for item in items {
        let _ = writeln!(out, "  • {}", item.name);
    }
    out
}

/// Groups digits with commas: 1234567 → "1,234,567".
fn with_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CollectionItem;

    fn item(name: &str, content: &str) -> CollectionItem {
        CollectionItem {
            path: format!("/tmp/{name}"),
            content: content.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn line_count_convention() {
        assert_eq!(line_count(""), 1);
        assert_eq!(line_count("one line, no newline"), 1);
        assert_eq!(line_count("one line\n"), 2);
        assert_eq!(line_count("a\nb\nc"), 3);
    }

    #[test]
    fn compute_sums_over_items() {
        let items = vec![item("a.txt", "1\n2\n3"), item("b.txt", "solo")];
        let metrics = Metrics::compute(&items);
        assert_eq!(metrics.files, 2);
        assert_eq!(metrics.total_lines, 4);
        assert_eq!(metrics.markdown_bytes, render(&items).len());
    }

    #[test]
    fn compute_does_not_mutate() {
        let items = vec![item("a.txt", "x")];
        let before = items.clone();
        Metrics::compute(&items);
        assert_eq!(items, before);
    }

    #[test]
    fn report_lists_file_names() {
        let out = report(&vec![item("a.txt", "x\n"), item("b.txt", "y")]);
        assert!(out.contains("📁 Files stored: 2"));
        assert!(out.contains("📝 Total lines: 3"));
        assert!(out.contains("  • a.txt\n"));
        assert!(out.contains("  • b.txt\n"));
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(with_thousands(0), "0");
        assert_eq!(with_thousands(999), "999");
        assert_eq!(with_thousands(1000), "1,000");
        assert_eq!(with_thousands(1234567), "1,234,567");
    }
}
