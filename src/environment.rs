//! Locating the site-packages directories to index
//!
//! Explicitly configured directories always win. Otherwise the configured
//! Python interpreter is asked for its `sys.path`, which is the same view
//! of installed packages the interpreter itself would use.

use std::path::PathBuf;
use std::process::Command;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::distribution::InstalledDistributions;
use crate::error::DiscoveryError;

const SYS_PATH_SCRIPT: &str = "import sys; print('\\n'.join(sys.path))";

/// Ask a Python interpreter for the directories on its `sys.path`.
///
/// Entries that are not existing directories (zip imports, the empty
/// string for the current directory) are dropped.
pub fn interpreter_sys_path(python: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
    let output = Command::new(python)
        .args(["-c", SYS_PATH_SCRIPT])
        .output()
        .map_err(|source| DiscoveryError::Spawn {
            python: python.to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(DiscoveryError::Status {
            python: python.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(parse_sys_path(&String::from_utf8_lossy(&output.stdout)))
}

fn parse_sys_path(stdout: &str) -> Vec<PathBuf> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .filter(|path| path.is_dir())
        .collect()
}

/// Pick the directories to index for this configuration.
pub fn site_dirs(config: &Config) -> Vec<PathBuf> {
    if !config.site_packages.is_empty() {
        debug!(dirs = ?config.site_packages, "using configured site-packages");
        return config.site_packages.clone();
    }

    match interpreter_sys_path(&config.python) {
        Ok(dirs) => {
            debug!(python = %config.python, dirs = ?dirs, "discovered sys.path");
            dirs
        }
        Err(e) => {
            warn!("cannot discover installed packages: {}", e);
            Vec::new()
        }
    }
}

/// Build the distribution index for this configuration.
pub fn load_installed(config: &Config) -> InstalledDistributions {
    let index = InstalledDistributions::from_site_dirs(site_dirs(config));
    info!(count = index.len(), "indexed installed distributions");
    index
}
