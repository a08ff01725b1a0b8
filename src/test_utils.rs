//! Test utilities for temporary source trees and fake site-packages.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory for testing.
///
/// The directory is automatically cleaned up when dropped.
pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Install a fake `<name>-<version>.dist-info` into `site`.
    ///
    /// `top_level` lists the importable modules; an empty slice writes no
    /// `top_level.txt`.
    pub fn add_dist_info(&self, site: &str, name: &str, version: &str, top_level: &[&str]) -> PathBuf {
        let dist_info = format!("{}/{}-{}.dist-info", site, name.replace('-', "_"), version);
        self.add_file(
            &format!("{}/METADATA", dist_info),
            &format!(
                "Metadata-Version: 2.1\nName: {}\nVersion: {}\nSummary: test fixture\n\nLong description.\n",
                name, version
            ),
        );
        if !top_level.is_empty() {
            let mut listing = top_level.join("\n");
            listing.push('\n');
            self.add_file(&format!("{}/top_level.txt", dist_info), &listing);
        }
        self.dir.path().join(dist_info)
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}
