//! Text sources
//!
//! The extraction seam: the scanner consumes anything implementing
//! [`TextSource`]. The built-in [`PlainTextFile`] covers plain-text formats;
//! word-processor, spreadsheet and PDF extraction is delegated to external
//! tooling that plugs in through the same trait.

use crate::config::ScanConfig;
use crate::domain::{FileCategory, Result, VeilleError};
use std::path::{Path, PathBuf};

/// One document whose text can be extracted
pub trait TextSource: Send + Sync {
    /// Stable identifier, usually the file path
    fn id(&self) -> &str;

    /// Coarse document category
    fn category(&self) -> FileCategory;

    /// Extract the document's plain text
    ///
    /// Returning an empty string is a valid outcome for unreadable or empty
    /// documents; errors are reserved for genuine extraction failures.
    fn text(&self) -> Result<String>;
}

/// Plain-text file source (txt, log, csv)
pub struct PlainTextFile {
    path: PathBuf,
    id: String,
}

impl PlainTextFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let id = path.display().to_string();
        Self { path, id }
    }
}

impl TextSource for PlainTextFile {
    fn id(&self) -> &str {
        &self.id
    }

    fn category(&self) -> FileCategory {
        FileCategory::from_path(&self.path)
    }

    fn text(&self) -> Result<String> {
        let bytes = std::fs::read(&self.path)
            .map_err(|e| VeilleError::Io(format!("{}: {e}", self.path.display())))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Extensions the built-in plain-text source can read
const PLAIN_TEXT_EXTENSIONS: [&str; 3] = ["txt", "log", "csv"];

/// Temp/lock file name endings
const TEMP_SUFFIXES: [&str; 6] = [".tmp", ".bak", ".swp", ".temp", ".part", "~"];

/// Whether a path names a temporary or lock file that must not be analyzed
pub fn is_temp_file(path: &Path) -> bool {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_lowercase();

    // Office lock files and unix editor droppings
    if name.starts_with("~$") || name.starts_with(".#") {
        return true;
    }
    if TEMP_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) {
        return true;
    }
    name.contains("_temp")
}

/// Whether a file should be skipped before any read happens
///
/// Skips temp/lock files, hidden files, files with an excluded extension,
/// files over the size cap, and files whose size cannot be determined.
pub fn should_skip_file(path: &Path, config: &ScanConfig) -> Option<String> {
    if is_temp_file(path) {
        return Some("temporary or lock file".to_string());
    }

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    if name.starts_with('.') {
        return Some("hidden file".to_string());
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default();
    if config
        .excluded_extensions
        .iter()
        .any(|excluded| excluded.to_lowercase() == extension)
    {
        return Some(format!("excluded extension {extension}"));
    }

    match std::fs::metadata(path) {
        Ok(meta) if meta.len() > config.max_file_size => {
            Some(format!("file larger than {} bytes", config.max_file_size))
        }
        Ok(_) => None,
        Err(e) => Some(format!("unreadable metadata: {e}")),
    }
}

/// Collect the plain-text files under `dir` that pass the skip rules
///
/// Returns readable candidates and the skipped paths with their reasons.
pub fn collect_plain_text_files(
    dir: &Path,
    config: &ScanConfig,
) -> Result<(Vec<PathBuf>, Vec<(PathBuf, String)>)> {
    let mut files = Vec::new();
    let mut skipped = Vec::new();
    let mut stack = vec![dir.to_path_buf()];

    while let Some(current) = stack.pop() {
        let entries = std::fs::read_dir(&current)
            .map_err(|e| VeilleError::Scan(format!("{}: {e}", current.display())))?;
        for entry in entries {
            let entry = entry.map_err(|e| VeilleError::Scan(e.to_string()))?;
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
                continue;
            }

            let extension = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_lowercase())
                .unwrap_or_default();
            if !PLAIN_TEXT_EXTENSIONS.contains(&extension.as_str()) {
                continue;
            }

            match should_skip_file(&path, config) {
                Some(reason) => skipped.push((path, reason)),
                None => files.push(path),
            }
        }
    }

    files.sort();
    Ok((files, skipped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_temp_file_detection() {
        assert!(is_temp_file(Path::new("~$rapport.docx")));
        assert!(is_temp_file(Path::new("notes.tmp")));
        assert!(is_temp_file(Path::new("backup.BAK")));
        assert!(is_temp_file(Path::new("draft~")));
        assert!(is_temp_file(Path::new(".#lock")));
        assert!(is_temp_file(Path::new("export_temp.csv")));
        assert!(!is_temp_file(Path::new("rapport.docx")));
        assert!(!is_temp_file(Path::new("temperatures.csv")));
    }

    #[test]
    fn test_should_skip_hidden_and_excluded() {
        let config = ScanConfig::default();
        assert!(should_skip_file(Path::new(".env"), &config).is_some());

        let mut config = ScanConfig::default();
        config.excluded_extensions = vec![".log".to_string()];
        // metadata check is never reached for excluded extensions
        assert_eq!(
            should_skip_file(Path::new("server.log"), &config).as_deref(),
            Some("excluded extension .log")
        );
    }

    #[test]
    fn test_plain_text_file_reads_lossy() {
        let mut file = tempfile::NamedTempFile::with_suffix(".txt").unwrap();
        file.write_all(b"bonjour \xff monde").unwrap();
        let source = PlainTextFile::new(file.path());
        let text = source.text().unwrap();
        assert!(text.starts_with("bonjour "));
        assert!(text.ends_with(" monde"));
    }

    #[test]
    fn test_collect_plain_text_files_filters_and_recurses() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();
        std::fs::write(dir.path().join("a.txt"), "contenu").unwrap();
        std::fs::write(sub.join("b.csv"), "col;val").unwrap();
        std::fs::write(dir.path().join("c.pdf"), "%PDF").unwrap();
        std::fs::write(dir.path().join("~$lock.txt"), "").unwrap();

        let (files, skipped) =
            collect_plain_text_files(dir.path(), &ScanConfig::default()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, ["a.txt", "b.csv"]);
        assert_eq!(skipped.len(), 1);
    }
}
