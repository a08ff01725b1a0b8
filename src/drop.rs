//! Handling a dropped file from payload to status message
//!
//! Each drop runs the whole pipeline synchronously: validate, extract,
//! resolve, write. The outcome is reduced to one of three fixed status
//! messages for the window or the terminal.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::distribution::DistributionLookup;
use crate::imports::extract_imports;
use crate::resolver::resolve_requirements;
use crate::source::is_python_source_file;
use crate::stdlib::is_stdlib_module;
use crate::writer::write_requirements;

pub const REJECTED_MESSAGE: &str = "Please drop a valid .py or .pyw file.";
pub const WRITE_FAILED_MESSAGE: &str = "Error writing requirements.";

/// Manual steps for installing a generated requirements file.
pub const INSTALL_INSTRUCTIONS: &str = "\
To install the requirements from requirements.txt:
1. Open your command prompt or terminal.
2. Navigate to the directory where requirements.txt is located:
   cd path/to/your/directory
3. Run the following command:
   pip install -r requirements.txt
";

/// Result of handling one drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DropOutcome {
    Written { path: PathBuf },
    WriteFailed,
    Rejected,
}

impl DropOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, DropOutcome::Written { .. })
    }

    /// Status line shown to the user.
    pub fn message(&self) -> String {
        match self {
            DropOutcome::Written { path } => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                format!("Requirements written to {}", name)
            }
            DropOutcome::WriteFailed => WRITE_FAILED_MESSAGE.to_string(),
            DropOutcome::Rejected => REJECTED_MESSAGE.to_string(),
        }
    }
}

impl fmt::Display for DropOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Strip the braces some platforms wrap around dropped paths.
///
/// # Examples
///
/// ```
/// use reqdrop::drop::clean_drop_payload;
///
/// assert_eq!(clean_drop_payload("{/home/me/my app.py}"), "/home/me/my app.py");
/// assert_eq!(clean_drop_payload("/tmp/plain.py"), "/tmp/plain.py");
/// ```
pub fn clean_drop_payload(payload: &str) -> &str {
    payload.trim_matches(|c| c == '{' || c == '}')
}

/// Runs the pipeline for dropped files against one distribution lookup.
pub struct DropHandler {
    config: Config,
    lookup: Box<dyn DistributionLookup>,
}

impl DropHandler {
    pub fn new(config: Config, lookup: impl DistributionLookup + 'static) -> Self {
        Self {
            config,
            lookup: Box::new(lookup),
        }
    }

    /// Validate a raw drop payload and process it if it names a Python file.
    pub fn handle(&self, payload: &str) -> DropOutcome {
        let path = Path::new(clean_drop_payload(payload));
        if !is_python_source_file(path) {
            return DropOutcome::Rejected;
        }
        self.process_file(path)
    }

    /// Extract, resolve and write requirements for an accepted file.
    pub fn process_file(&self, path: &Path) -> DropOutcome {
        let mut modules = extract_imports(path);
        if self.config.exclude_stdlib {
            modules = filter_stdlib(modules);
        }

        let requirements = resolve_requirements(&modules, self.lookup.as_ref());
        match write_requirements(&requirements, &self.config.output) {
            Ok(written) => DropOutcome::Written { path: written },
            Err(_) => DropOutcome::WriteFailed,
        }
    }
}

fn filter_stdlib(modules: BTreeSet<String>) -> BTreeSet<String> {
    modules
        .into_iter()
        .filter(|module| {
            let stdlib = is_stdlib_module(module);
            if stdlib {
                debug!(module = %module, "dropping stdlib import");
            }
            !stdlib
        })
        .collect()
}
