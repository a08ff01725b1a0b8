//! Writing requirements files without overwriting existing ones
//!
//! Names are probed as `requirements.txt`, then `requirements0.txt`,
//! `requirements1.txt`, and so on. Repeated runs in one directory leave a
//! trail of numbered files; none is ever replaced.

use std::collections::BTreeSet;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::WriteError;

pub const DEFAULT_BASE_NAME: &str = "requirements";
pub const DEFAULT_EXTENSION: &str = ".txt";

/// Directory and file name pattern for output files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub dir: PathBuf,
    pub base_name: String,
    /// Extension including the leading dot
    pub extension: String,
}

impl Default for OutputTarget {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            base_name: DEFAULT_BASE_NAME.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl OutputTarget {
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Default::default()
        }
    }

    /// File name for a probe step: `None` is the unnumbered name.
    fn candidate(&self, counter: Option<u64>) -> PathBuf {
        let name = match counter {
            None => format!("{}{}", self.base_name, self.extension),
            Some(n) => format!("{}{}{}", self.base_name, n, self.extension),
        };
        self.dir.join(name)
    }

    /// First candidate path that nothing occupies yet.
    pub fn unique_path(&self) -> PathBuf {
        let mut counter = None;
        loop {
            let path = self.candidate(counter);
            if !is_occupied(&path) {
                return path;
            }
            counter = Some(next_counter(counter));
        }
    }

    /// Create the first free candidate file.
    ///
    /// `create_new` closes the gap between probing and creating: a file
    /// that appears in between sends the probe on to the next number.
    fn create_unique(&self) -> Result<(PathBuf, File), WriteError> {
        let mut counter = None;
        loop {
            let path = self.candidate(counter);
            if !is_occupied(&path) {
                match OpenOptions::new().write(true).create_new(true).open(&path) {
                    Ok(file) => return Ok((path, file)),
                    Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
                    Err(source) => return Err(WriteError::Create { path, source }),
                }
            }
            counter = Some(next_counter(counter));
        }
    }
}

fn next_counter(counter: Option<u64>) -> u64 {
    counter.map_or(0, |n| n + 1)
}

/// A name is taken if any directory entry holds it, including a dangling
/// symlink that `Path::exists` would report as free.
fn is_occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Write requirement lines, sorted, one per line, to a new file.
///
/// Returns the path of the file written. Failures are logged here so
/// callers only need to report them.
pub fn write_requirements(
    requirements: &BTreeSet<String>,
    target: &OutputTarget,
) -> Result<PathBuf, WriteError> {
    let result = write_new_file(requirements, target);
    match &result {
        Ok(path) => info!(file = %path.display(), lines = requirements.len(), "wrote requirements"),
        Err(e) => warn!("Error writing to file: {}", e),
    }
    result
}

fn write_new_file(
    requirements: &BTreeSet<String>,
    target: &OutputTarget,
) -> Result<PathBuf, WriteError> {
    let (path, file) = target.create_unique()?;
    let mut out = BufWriter::new(file);

    // BTreeSet iterates in ascending byte order
    let written = requirements
        .iter()
        .try_for_each(|line| writeln!(out, "{}", line))
        .and_then(|()| out.flush());

    match written {
        Ok(()) => Ok(path),
        Err(source) => Err(WriteError::Write { path, source }),
    }
}
