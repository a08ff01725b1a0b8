//! reqdrop - drop a Python file, get a requirements.txt

pub mod config;
pub mod distribution;
pub mod drop;
pub mod environment;
pub mod error;
pub mod file_utils;
#[cfg(feature = "gui")]
pub mod gui;
pub mod imports;
pub mod resolver;
pub mod source;
pub mod stdlib;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod writer;

pub use config::Config;
pub use distribution::{Distribution, DistributionLookup, InstalledDistributions};
pub use drop::{DropHandler, DropOutcome};
pub use environment::load_installed;
pub use error::{DiscoveryError, ExtractError, WriteError};
pub use imports::{extract_imports, parse_imports};
pub use resolver::{Requirement, resolve_requirements};
pub use writer::{OutputTarget, write_requirements};
