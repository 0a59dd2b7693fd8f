//! Text-file classification.
//!
//! Decides whether a filesystem path should be treated as text and pulled
//! into the collection. The decision chain, first match wins:
//!
//! 1. `.env.example` / `env.example` by name
//! 2. extensionless special names (`Makefile`, `Dockerfile`, ...)
//! 3. a fixed extension allow-list
//! 4. a MIME-by-extension lookup (`text/*` top-level type)
//! 5. a bounded content sniff for small regular files
//!
//! This is a heuristic, not a guarantee; misclassification is acceptable
//! and any I/O error while probing counts as "not text".

use log::debug;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Extensions (lowercase, no leading dot) always treated as text.
const TEXT_EXTENSIONS: &[&str] = &[
    "txt", "md", "py", "js", "java", "c", "cpp", "h", "hpp", "css", "html", "xml", "json", "yaml",
    "yml", "toml", "ini", "sh", "bash", "zsh", "fish", "conf", "cfg", "log", "rs", "go", "php",
    "rb", "pl", "lua", "vim", "tex", "sql", "r", "m", "swift", "kt", "ts", "tsx", "jsx", "vue",
    "svelte", "gradle", "cmake", "makefile", "dockerfile", "gitignore", "gitattributes",
    "editorconfig",
];

/// Names that denote text files without carrying an extension.
const SPECIAL_NAMES: &[&str] = &["makefile", "dockerfile", "rakefile", "gemfile"];

/// Files under 4 KiB are eligible for the content sniff.
const SNIFF_MAX_SIZE: u64 = 4 * 1024;

/// Bytes of the file read by the content sniff.
const SNIFF_SAMPLE_LEN: usize = 512;

/// Returns true if `path` should be collected as a text file.
pub fn is_text_file(path: &Path) -> bool {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if name == ".env.example" || name == "env.example" {
        return true;
    }

    let undotted = name.strip_prefix('.').unwrap_or(&name);
    if SPECIAL_NAMES.contains(&name.as_str()) || SPECIAL_NAMES.contains(&undotted) {
        return true;
    }

    if let Some(ext) = path.extension() {
        let ext = ext.to_string_lossy().to_lowercase();
        if TEXT_EXTENSIONS.contains(&ext.as_str()) {
            return true;
        }
        if let Some(mime) = mime_for_extension(&ext) {
            if mime.starts_with("text/") {
                return true;
            }
            debug!("{}: non-text MIME {}", path.display(), mime);
        }
    }

    sniff_looks_text(path)
}

/// Static MIME-by-extension lookup standing in for a system MIME database.
/// Covers the common `text/*` registrations plus well-known binary types;
/// anything unlisted falls through to the content sniff.
fn mime_for_extension(ext: &str) -> Option<&'static str> {
    let mime = match ext {
        "bat" | "ksh" | "srt" => "text/plain",
        "csv" => "text/csv",
        "tsv" => "text/tab-separated-values",
        "htm" => "text/html",
        "markdown" => "text/markdown",
        "rst" => "text/x-rst",
        "rtx" => "text/richtext",
        "vtt" => "text/vtt",
        "ics" => "text/calendar",
        "vcf" => "text/vcard",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "psd" => "image/vnd.adobe.photoshop",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        "tar" => "application/x-tar",
        "mp3" => "audio/mpeg",
        "mp4" => "video/mp4",
        "exe" => "application/x-msdownload",
        "so" | "o" | "bin" => "application/octet-stream",
        _ => return None,
    };
    Some(mime)
}

/// Content sniff for files no other rule matched: a small regular file is
/// text if its first bytes, decoded as lossy UTF-8, contain no control
/// characters below code point 9 other than `\n`, `\r` or `\t`. Only files
/// strictly between 0 and 4096 bytes are sniffed; everything else, and any
/// I/O failure, is "not text".
fn sniff_looks_text(path: &Path) -> bool {
    let Ok(meta) = path.metadata() else {
        return false;
    };
    if !meta.is_file() {
        return false;
    }
    let size = meta.len();
    if size == 0 || size >= SNIFF_MAX_SIZE {
        return false;
    }

    let Ok(file) = File::open(path) else {
        return false;
    };
    let mut sample = Vec::with_capacity(SNIFF_SAMPLE_LEN);
    if file
        .take(SNIFF_SAMPLE_LEN as u64)
        .read_to_end(&mut sample)
        .is_err()
    {
        return false;
    }

    let text = String::from_utf8_lossy(&sample);
    text.chars()
        .all(|ch| (ch as u32) >= 9 || matches!(ch, '\n' | '\r' | '\t'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn special_names_are_text() {
        assert!(is_text_file(Path::new("Makefile")));
        assert!(is_text_file(Path::new("dockerfile")));
        assert!(is_text_file(Path::new(".Gemfile")));
        assert!(is_text_file(Path::new("/srv/app/Rakefile")));
    }

    #[test]
    fn env_example_is_text() {
        assert!(is_text_file(Path::new(".env.example")));
        assert!(is_text_file(Path::new("env.example")));
        assert!(is_text_file(Path::new("/etc/app/.ENV.EXAMPLE")));
    }

    #[test]
    fn allow_listed_extensions_are_text() {
        assert!(is_text_file(Path::new("notes.md")));
        assert!(is_text_file(Path::new("main.RS")));
        assert!(is_text_file(Path::new("/tmp/conf.YAML")));
    }

    #[test]
    fn mime_probe_catches_text_types_outside_the_allow_list() {
        assert!(is_text_file(Path::new("data.csv")));
        assert!(is_text_file(Path::new("index.HTM")));
    }

    #[test]
    fn binary_extensions_are_rejected_without_touching_disk() {
        // Nonexistent paths: the sniff cannot rescue these.
        assert!(!is_text_file(Path::new("art.psd")));
        assert!(!is_text_file(Path::new("photo.jpg")));
        assert!(!is_text_file(Path::new("archive.zip")));
    }

    #[test]
    fn sniff_accepts_small_plain_files_with_unknown_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.xyz");
        fs::write(&path, "hello\nworld\n").unwrap();
        assert!(is_text_file(&path));
    }

    #[test]
    fn sniff_rejects_small_files_with_control_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blob.xyz");
        fs::write(&path, b"\x00\x01\x02payload").unwrap();
        assert!(!is_text_file(&path));
    }

    #[test]
    fn sniff_skips_empty_and_large_files() {
        let dir = tempdir().unwrap();

        let empty = dir.path().join("empty.xyz");
        fs::write(&empty, "").unwrap();
        assert!(!is_text_file(&empty));

        let large = dir.path().join("large.xyz");
        fs::write(&large, "a".repeat(4096)).unwrap();
        assert!(!is_text_file(&large));
    }

    #[test]
    fn missing_file_with_unknown_extension_is_not_text() {
        assert!(!is_text_file(Path::new("/nonexistent/mystery.qqq")));
    }
}
