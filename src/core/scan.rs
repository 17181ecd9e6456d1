use std::path::{Path, PathBuf};

use colored::Colorize;
use glob::Pattern;
use walkdir::WalkDir;

pub const BUNDLE_EXTENSION: &str = "properties";

/// A bundle file and the dotted name it is addressed by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleSource {
    /// Dotted name, e.g. `com.example.messages`.
    pub name: String,
    pub path: PathBuf,
}

impl BundleSource {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Source for a dotted bundle name under `source_root`.
    pub fn from_name(source_root: &Path, name: &str) -> Self {
        Self::new(name, bundle_path(source_root, name))
    }
}

/// `com.example.messages` -> `<source_root>/com/example/messages.properties`
pub fn bundle_path(source_root: &Path, name: &str) -> PathBuf {
    let mut path = source_root.to_path_buf();
    path.extend(name.split('.'));
    path.set_extension(BUNDLE_EXTENSION);
    path
}

/// Inverse of [`bundle_path`] for a file found under `source_root`.
pub fn bundle_name(source_root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(source_root).ok()?.with_extension("");
    let segments: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if segments.is_empty() {
        return None;
    }
    Some(segments.join("."))
}

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning a source root.
pub struct ScanResult {
    /// Sorted by path.
    pub bundles: Vec<BundleSource>,
    pub skipped_count: usize,
}

pub fn scan_bundles(source_root: &Path, ignore_patterns: &[String], verbose: bool) -> ScanResult {
    let mut bundles = Vec::new();
    let mut skipped_count = 0;

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => {
                    if verbose {
                        eprintln!(
                            "{} Invalid ignore pattern '{}': {}",
                            "warning:".bold().yellow(),
                            p,
                            e
                        );
                    }
                }
            }
        } else {
            literal_ignore_paths.push(source_root.join(p));
        }
    }

    for entry in WalkDir::new(source_root) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                if verbose {
                    eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                }
                continue;
            }
        };
        let path = entry.path();

        if literal_ignore_paths
            .iter()
            .any(|ignore_path| path.starts_with(ignore_path))
        {
            continue;
        }

        // Globs apply to the path relative to the source root.
        let relative = path.strip_prefix(source_root).unwrap_or(path);
        if glob_patterns
            .iter()
            .any(|p| p.matches_path(relative) || p.matches_path(path))
        {
            continue;
        }

        if !entry.file_type().is_file() || !is_bundle_file(path) {
            continue;
        }

        match bundle_name(source_root, path) {
            Some(name) => bundles.push(BundleSource::new(name, path)),
            None => skipped_count += 1,
        }
    }

    bundles.sort_by(|a, b| a.path.cmp(&b.path));

    ScanResult {
        bundles,
        skipped_count,
    }
}

fn is_bundle_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(BUNDLE_EXTENSION)
}
