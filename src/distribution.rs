//! Installed distribution metadata
//!
//! Reads `*.dist-info` and `*.egg-info` entries from site-packages
//! directories into an in-memory index. The index is the lookup capability
//! handed to the resolver; tests hand it closures or hand-built indexes
//! instead of a real environment.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

/// An installed distribution's name and version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Distribution {
    /// Project name after the safe-name rule
    pub name: String,
    pub version: String,
}

impl Distribution {
    pub fn new(name: impl AsRef<str>, version: impl Into<String>) -> Self {
        Self {
            name: safe_name(name.as_ref()),
            version: version.into(),
        }
    }
}

/// Something that can find the installed distribution for an import name.
pub trait DistributionLookup {
    fn lookup(&self, module: &str) -> Option<Distribution>;
}

impl<F> DistributionLookup for F
where
    F: Fn(&str) -> Option<Distribution>,
{
    fn lookup(&self, module: &str) -> Option<Distribution> {
        self(module)
    }
}

static UNSAFE_NAME_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^A-Za-z0-9.]+").expect("UNSAFE_NAME_CHARS regex is invalid")
});

/// Replace each run of characters outside `[A-Za-z0-9.]` with a single `-`.
///
/// # Examples
///
/// ```
/// use reqdrop::distribution::safe_name;
///
/// assert_eq!(safe_name("typing_extensions"), "typing-extensions");
/// assert_eq!(safe_name("zope.interface"), "zope.interface");
/// ```
pub fn safe_name(name: &str) -> String {
    UNSAFE_NAME_CHARS.replace_all(name, "-").into_owned()
}

/// Key used to match import names against distribution names.
///
/// This is the safe name lowercased, so `PyYAML`, `pyyaml` and `PYYAML`
/// share a key while dotted names keep their dots.
pub fn lookup_key(name: &str) -> String {
    safe_name(name).to_lowercase()
}

/// Index of the distributions installed in a set of site-packages
/// directories.
#[derive(Debug, Clone, Default)]
pub struct InstalledDistributions {
    by_key: HashMap<String, Distribution>,
    by_module: HashMap<String, Distribution>,
}

impl InstalledDistributions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from directories in precedence order.
    pub fn from_site_dirs<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut index = Self::new();
        for dir in dirs {
            index.scan_dir(dir.as_ref());
        }
        index
    }

    /// Add every distribution found directly inside `dir`.
    ///
    /// Distributions already indexed from an earlier directory are kept.
    pub fn scan_dir(&mut self, dir: &Path) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(dir = %dir.display(), error = %e, "skipping unreadable site directory");
                return;
            }
        };

        let mut paths: Vec<_> = entries.flatten().map(|entry| entry.path()).collect();
        paths.sort();

        for path in paths {
            if let Some((dist, top_level)) = read_metadata_entry(&path) {
                self.insert(dist, top_level);
            }
        }
    }

    /// Add one distribution and the top-level modules it provides.
    pub fn insert<I>(&mut self, dist: Distribution, top_level: I)
    where
        I: IntoIterator<Item = String>,
    {
        for module in top_level {
            self.by_module.entry(module).or_insert_with(|| dist.clone());
        }
        self.by_key.entry(lookup_key(&dist.name)).or_insert(dist);
    }

    /// Number of distinct distributions indexed.
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

impl DistributionLookup for InstalledDistributions {
    fn lookup(&self, module: &str) -> Option<Distribution> {
        self.by_key
            .get(&lookup_key(module))
            .or_else(|| self.by_module.get(module))
            .cloned()
    }
}

/// Read a `*.dist-info` or `*.egg-info` entry.
///
/// Returns `None` for other entries and for metadata without a usable
/// version.
fn read_metadata_entry(path: &Path) -> Option<(Distribution, Vec<String>)> {
    let file_name = path.file_name()?.to_str()?;

    let (stem, metadata_path, info_dir) = if let Some(stem) = file_name.strip_suffix(".dist-info") {
        (stem, path.join("METADATA"), Some(path))
    } else if let Some(stem) = file_name.strip_suffix(".egg-info") {
        if path.is_dir() {
            (stem, path.join("PKG-INFO"), Some(path))
        } else {
            (stem, path.to_path_buf(), None)
        }
    } else {
        return None;
    };

    let (header_name, header_version) = match fs::read_to_string(&metadata_path) {
        Ok(contents) => parse_metadata_headers(&contents),
        Err(e) => {
            debug!(path = %metadata_path.display(), error = %e, "unreadable distribution metadata");
            (None, None)
        }
    };
    let (stem_name, stem_version) = split_stem(stem);

    let name = header_name.unwrap_or(stem_name);
    let version = header_version.or(stem_version)?;
    if name.is_empty() {
        return None;
    }

    let top_level = info_dir.map(read_top_level).unwrap_or_default();
    Some((Distribution::new(name, version), top_level))
}

/// Pull `Name:` and `Version:` out of the header block of a METADATA or
/// PKG-INFO file.
fn parse_metadata_headers(contents: &str) -> (Option<String>, Option<String>) {
    let mut name = None;
    let mut version = None;
    for line in contents.lines() {
        // Headers end at the first blank line; the rest is the long description
        if line.trim().is_empty() {
            break;
        }
        if name.is_none() {
            if let Some(value) = line.strip_prefix("Name:") {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    name = Some(trimmed.to_string());
                }
            }
        }
        if version.is_none() {
            if let Some(value) = line.strip_prefix("Version:") {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    version = Some(trimmed.to_string());
                }
            }
        }
        if name.is_some() && version.is_some() {
            break;
        }
    }
    (name, version)
}

/// Split `name-version[-pyX.Y]` as found in metadata directory names.
fn split_stem(stem: &str) -> (String, Option<String>) {
    let mut parts = stem.split('-');
    let name = parts.next().unwrap_or_default().to_string();
    let version = parts.next().filter(|v| !v.is_empty()).map(str::to_string);
    (name, version)
}

fn read_top_level(info_dir: &Path) -> Vec<String> {
    let Ok(contents) = fs::read_to_string(info_dir.join("top_level.txt")) else {
        return Vec::new();
    };
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.replace('/', "."))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestDir;

    #[test]
    fn test_safe_name_and_lookup_key() {
        assert_eq!(safe_name("my_package"), "my-package");
        assert_eq!(safe_name("odd  name!!"), "odd-name-");
        assert_eq!(lookup_key("PyYAML"), "pyyaml");
        assert_eq!(lookup_key("Typing_Extensions"), "typing-extensions");
        assert_eq!(lookup_key("x.y"), "x.y");
    }

    #[test]
    fn test_parse_metadata_headers() {
        let contents = "Metadata-Version: 2.1\nName: requests\nVersion: 2.31.0\nSummary: HTTP\n\nName: not-this\n";
        let (name, version) = parse_metadata_headers(contents);
        assert_eq!(name.as_deref(), Some("requests"));
        assert_eq!(version.as_deref(), Some("2.31.0"));
    }

    #[test]
    fn test_headers_stop_at_body() {
        let contents = "Metadata-Version: 2.1\nName: demo\n\nVersion: 9.9.9\n";
        let (name, version) = parse_metadata_headers(contents);
        assert_eq!(name.as_deref(), Some("demo"));
        assert_eq!(version, None);
    }

    #[test]
    fn test_split_stem() {
        assert_eq!(split_stem("requests-2.31.0"), ("requests".to_string(), Some("2.31.0".to_string())));
        assert_eq!(split_stem("six-1.16.0-py3.11"), ("six".to_string(), Some("1.16.0".to_string())));
        assert_eq!(split_stem("devpkg"), ("devpkg".to_string(), None));
    }

    #[test]
    fn test_scan_dist_info() {
        let dir = TestDir::new();
        dir.add_dist_info("site", "requests", "2.31.0", &[]);
        dir.add_dist_info("site", "typing_extensions", "4.9.0", &[]);

        let index = InstalledDistributions::from_site_dirs([dir.path().join("site")]);
        assert_eq!(index.len(), 2);
        assert_eq!(
            index.lookup("requests"),
            Some(Distribution::new("requests", "2.31.0"))
        );
        let dist = index.lookup("typing_extensions").unwrap();
        assert_eq!(dist.name, "typing-extensions");
        assert_eq!(dist.version, "4.9.0");
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let dir = TestDir::new();
        dir.add_dist_info("site", "PyYAML", "6.0.1", &[]);

        let index = InstalledDistributions::from_site_dirs([dir.path().join("site")]);
        let dist = index.lookup("pyyaml").unwrap();
        assert_eq!(dist.name, "PyYAML");
    }

    #[test]
    fn test_lookup_through_top_level() {
        let dir = TestDir::new();
        dir.add_dist_info("site", "PyYAML", "6.0.1", &["_yaml", "yaml"]);
        dir.add_dist_info("site", "beautifulsoup4", "4.12.2", &["bs4"]);

        let index = InstalledDistributions::from_site_dirs([dir.path().join("site")]);
        assert_eq!(index.lookup("yaml").unwrap().name, "PyYAML");
        assert_eq!(index.lookup("bs4").unwrap().name, "beautifulsoup4");
        assert_eq!(index.lookup("bs4.element"), None);
    }

    #[test]
    fn test_earlier_directory_wins() {
        let dir = TestDir::new();
        dir.add_dist_info("venv", "requests", "2.31.0", &[]);
        dir.add_dist_info("system", "requests", "2.25.1", &[]);

        let index = InstalledDistributions::from_site_dirs([
            dir.path().join("venv"),
            dir.path().join("system"),
        ]);
        assert_eq!(index.lookup("requests").unwrap().version, "2.31.0");
    }

    #[test]
    fn test_scan_egg_info_variants() {
        let dir = TestDir::new();
        dir.add_file(
            "site/legacy-1.0-py3.11.egg-info/PKG-INFO",
            "Metadata-Version: 1.1\nName: legacy\nVersion: 1.0\n",
        );
        dir.add_file(
            "site/flatpkg-0.3-py3.11.egg-info",
            "Metadata-Version: 1.0\nName: flatpkg\nVersion: 0.3\n",
        );

        let index = InstalledDistributions::from_site_dirs([dir.path().join("site")]);
        assert_eq!(index.lookup("legacy").unwrap().version, "1.0");
        assert_eq!(index.lookup("flatpkg").unwrap().version, "0.3");
    }

    #[test]
    fn test_version_falls_back_to_directory_name() {
        let dir = TestDir::new();
        dir.add_file("site/bare-0.5.0.dist-info/METADATA", "Metadata-Version: 2.1\n");

        let index = InstalledDistributions::from_site_dirs([dir.path().join("site")]);
        assert_eq!(index.lookup("bare"), Some(Distribution::new("bare", "0.5.0")));
    }

    #[test]
    fn test_missing_directory_is_skipped() {
        let dir = TestDir::new();
        let index = InstalledDistributions::from_site_dirs([dir.path().join("nope")]);
        assert!(index.is_empty());
    }

    #[test]
    fn test_closure_lookup() {
        let lookup = |name: &str| (name == "flask").then(|| Distribution::new("Flask", "3.0.0"));
        assert_eq!(lookup.lookup("flask").unwrap().name, "Flask");
        assert_eq!(lookup.lookup("django"), None);
    }
}
