#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use phpreflect::export::{Exporter, FileRecord};

/// Create a temp workspace containing the given files, returning the
/// tempdir guard (the tree is removed when it drops).
pub fn create_tree(files: &[(&str, &str)]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    for (rel_path, content) in files {
        let full = dir.path().join(rel_path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).expect("failed to create dirs");
        }
        fs::write(&full, content).expect("failed to write PHP file");
    }
    dir
}

/// Write one PHP source file into a temp tree and export it with the
/// default exporter (no version handling, identity formatter).
pub fn export_source(source: &str) -> FileRecord {
    let dir = create_tree(&[("input.php", source)]);
    let path = dir.path().join("input.php");
    Exporter::new(dir.path(), false)
        .export_file(&path)
        .expect("reflection succeeds")
}

/// Write files into a temp tree and export them all in the given order.
pub fn export_tree(
    files: &[(&str, &str)],
    use_versions: bool,
) -> (tempfile::TempDir, Vec<FileRecord>) {
    let dir = create_tree(files);
    let paths: Vec<PathBuf> = files.iter().map(|(rel, _)| dir.path().join(rel)).collect();
    let records = Exporter::new(dir.path(), use_versions).export_files(&paths);
    (dir, records)
}
