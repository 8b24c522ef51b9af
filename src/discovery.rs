//! File discovery.
//!
//! Recursively walks a directory and produces the ordered list of PHP
//! files fed to the export pipeline.  A file is included only when its
//! extension is `php`, it matches at least one include pattern (if any
//! were given), and it matches none of the ignore patterns.  Patterns
//! are case-insensitive regexes matched against the full forward-slash
//! path.
//!
//! A directory that cannot be traversed aborts discovery entirely with a
//! [`DiscoveryError`] naming the offending path — no partial file list
//! is returned.

use std::fmt;
use std::path::{Path, PathBuf};

use regex::{Regex, RegexBuilder};
use walkdir::WalkDir;

/// A directory could not be traversed.
#[derive(Debug)]
pub struct DiscoveryError {
    /// The path that failed, when the walker could name one; otherwise
    /// the scanned root.
    pub path: PathBuf,
    pub source: walkdir::Error,
}

impl fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot traverse {}: {}", self.path.display(), self.source)
    }
}

impl std::error::Error for DiscoveryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Compile user-supplied filter patterns as case-insensitive regexes.
pub fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>, regex::Error> {
    patterns
        .iter()
        .map(|pattern| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
        })
        .collect()
}

/// Walk `directory` and return every matching PHP file, sorted by path
/// so repeated runs over the same tree export identically.
pub fn discover(
    directory: &Path,
    ignore: &[Regex],
    include: &[Regex],
) -> Result<Vec<PathBuf>, DiscoveryError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(directory).sort_by_file_name() {
        let entry = entry.map_err(|source| {
            let path = source
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| directory.to_path_buf());
            DiscoveryError { path, source }
        })?;

        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let is_php = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("php"));
        if !is_php {
            continue;
        }

        let haystack = path.to_string_lossy().replace('\\', "/");
        if !include.is_empty() && !include.iter().any(|re| re.is_match(&haystack)) {
            continue;
        }
        if ignore.iter().any(|re| re.is_match(&haystack)) {
            continue;
        }

        files.push(path.to_path_buf());
    }

    Ok(files)
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn tree(files: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        for rel_path in files {
            let full = dir.path().join(rel_path);
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).expect("failed to create dirs");
            }
            fs::write(&full, "<?php\n").expect("failed to write file");
        }
        dir
    }

    #[test]
    fn only_php_files_are_discovered() {
        let dir = tree(&["a.php", "b.txt", "sub/c.php", "sub/d.js"]);
        let files = discover(dir.path(), &[], &[]).expect("discovery succeeds");
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.php", "c.php"]);
    }

    #[test]
    fn ignore_patterns_drop_matches() {
        let dir = tree(&["keep.php", "vendor/skip.php"]);
        let ignore = compile_patterns(&["vendor".to_string()]).expect("pattern compiles");
        let files = discover(dir.path(), &ignore, &[]).expect("discovery succeeds");
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("keep.php"));
    }

    #[test]
    fn include_patterns_require_a_match() {
        let dir = tree(&["admin/load.php", "public/index.php"]);
        let include = compile_patterns(&["ADMIN".to_string()]).expect("pattern compiles");
        let files = discover(dir.path(), &[], &include).expect("discovery succeeds");
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("admin/load.php"));
    }

    #[test]
    fn discovery_order_is_sorted() {
        let dir = tree(&["zz.php", "aa.php", "mm.php"]);
        let files = discover(dir.path(), &[], &[]).expect("discovery succeeds");
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["aa.php", "mm.php", "zz.php"]);
    }
}
