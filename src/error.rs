//! Error types for each stage of the drop pipeline
//!
//! Every error here is contained by the stage that produces it: extraction
//! degrades to an empty import set, discovery to an empty index, and writing
//! to a failure status. None of them reach the window event loop.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to read or parse a dropped source file.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is {size} bytes, over the {limit} byte limit", path.display())]
    TooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("invalid Python syntax: {0}")]
    Parse(String),
}

/// Failure to write a requirements file.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("cannot create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure to ask a Python interpreter for its `sys.path`.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("cannot run `{python}`: {source}")]
    Spawn {
        python: String,
        #[source]
        source: io::Error,
    },

    #[error("`{python}` exited with {status}: {stderr}")]
    Status {
        python: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
}

/// Failure to start or run the desktop window.
#[cfg(feature = "gui")]
#[derive(Debug, Error)]
#[error("window error: {0}")]
pub struct GuiError(#[from] pub eframe::Error);
