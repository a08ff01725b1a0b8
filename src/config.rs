//! Configuration for the drop pipeline

use std::path::PathBuf;

use crate::writer::OutputTarget;

/// Default interpreter asked for `sys.path` when no site-packages
/// directories are configured.
pub const DEFAULT_PYTHON: &str = "python3";

/// Settings shared by the window and headless modes.
#[derive(Debug, Clone)]
pub struct Config {
    /// Where and under what name requirements files are written
    pub output: OutputTarget,
    /// Site-packages directories to index, in precedence order.
    /// Empty means ask `python` for its `sys.path`.
    pub site_packages: Vec<PathBuf>,
    pub python: String,
    /// Drop standard library modules before resolution
    pub exclude_stdlib: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: OutputTarget::default(),
            site_packages: Vec::new(),
            python: DEFAULT_PYTHON.to_string(),
            exclude_stdlib: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.python, "python3");
        assert!(config.site_packages.is_empty());
        assert!(!config.exclude_stdlib);
        assert_eq!(config.output.base_name, "requirements");
        assert_eq!(config.output.extension, ".txt");
    }
}
