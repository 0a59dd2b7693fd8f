use std::path::Path;

/// Picks the fence language tag for a file: its extension without the dot
/// (original case), the literal `env.example` for env templates, `txt` for
/// extensionless files. A best-effort hint for syntax highlighting, not
/// validated against any registry.
pub fn language_tag(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    if name == ".env.example" || name == "env.example" {
        return "env.example".to_string();
    }
    match path.extension() {
        Some(ext) if !ext.is_empty() => ext.to_string_lossy().into_owned(),
        _ => "txt".to_string(),
    }
}

/// Formats a byte count as B, KB or MB with one decimal place.
pub fn human_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
