use std::path::Path;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Paths in a configuration file are relative to the directory of that file.
pub fn resolve_path(root: Option<&Path>, path: &str) -> String {
    match root {
        Some(r) if Path::new(path).is_relative() => r.join(path).to_string_lossy().to_string(),
        _ => path.to_string(),
    }
}

/// Guesses the input provider from the extension. Anything but `.csv` is read as a workbook.
pub fn infer_provider(path: &str) -> &'static str {
    match Path::new(path).extension().and_then(|s| s.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => "csv",
        _ => "xlsx",
    }
}
