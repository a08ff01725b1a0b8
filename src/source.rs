//! Python source file detection
//!
//! A dropped path is only processed when its name ends in one of the
//! recognized Python suffixes. The match is exact and case-sensitive.

use std::path::Path;

/// File name suffixes accepted as Python source.
pub const PYTHON_SUFFIXES: &[&str] = &[".py", ".pyw"];

/// Check whether a path names a Python source file by suffix alone.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use reqdrop::source::has_python_suffix;
///
/// assert!(has_python_suffix(Path::new("app.py")));
/// assert!(has_python_suffix(Path::new("gui.pyw")));
/// assert!(!has_python_suffix(Path::new("notes.txt")));
/// ```
pub fn has_python_suffix(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    PYTHON_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

/// Check whether a path is an existing regular file with a Python suffix.
pub fn is_python_source_file(path: &Path) -> bool {
    has_python_suffix(path) && path.is_file()
}
