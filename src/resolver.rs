//! Mapping imported module names to requirement lines

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::distribution::DistributionLookup;

/// One line of a requirements file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Requirement {
    /// An installed distribution pinned to its version
    Pinned { name: String, version: String },
    /// A module with no matching distribution, emitted as written
    Bare { module: String },
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Pinned { name, version } => write!(f, "{}=={}", name, version),
            Requirement::Bare { module } => f.write_str(module),
        }
    }
}

/// Resolve one module name.
///
/// The lookup key is the literal token, so `x.y` is looked up as `x.y`
/// and usually falls back to a bare `x.y` line.
pub fn resolve_module(module: &str, lookup: &dyn DistributionLookup) -> Requirement {
    match lookup.lookup(module) {
        Some(dist) => Requirement::Pinned {
            name: dist.name,
            version: dist.version,
        },
        None => {
            debug!(module, "no installed distribution; keeping bare name");
            Requirement::Bare {
                module: module.to_string(),
            }
        }
    }
}

/// Resolve a set of module names into a set of requirement lines.
///
/// Modules that map to the same distribution collapse into one line.
pub fn resolve_requirements<'a, I>(modules: I, lookup: &dyn DistributionLookup) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a String>,
{
    modules
        .into_iter()
        .map(|module| resolve_module(module, lookup).to_string())
        .collect()
}
