//! Configuration file handling.
//!
//! This module provides loading of reactscan configuration from a TOML file.
//! Every field is optional; command-line flags take precedence.
//!
//! # Configuration Location
//!
//! The configuration file is stored at:
//! - Linux: `~/.config/reactscan/config.toml`
//! - macOS: `~/Library/Application Support/reactscan/config.toml`
//! - Windows: `%APPDATA%\reactscan\config.toml`
//!
//! # Example Configuration
//!
//! ```toml
//! max_depth = 10
//! remediation_timeout_secs = 60
//! excluded_dirs = ["node_modules", ".git", ".next", "dist", "build", ".cache"]
//! package_manager = "npm"
//! scan_system_paths = false
//!
//! [ignore]
//! paths = ["/home/*/archive*", "/srv/legacy"]
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::platform;

/// Directory names never descended into.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &["node_modules", ".git", ".next", "dist", "build", ".cache"];

/// Application configuration.
///
/// # Example
///
/// ```no_run
/// use reactscan::Config;
///
/// let config = Config::load().unwrap();
///
/// println!("Max depth: {}", config.max_depth);
/// println!("Timeout: {:?}", config.remediation_timeout());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How many directory levels below each root are descended into.
    ///
    /// Default: 10
    pub max_depth: usize,

    /// How long a single package-manager invocation may run, in seconds.
    ///
    /// Default: 60
    pub remediation_timeout_secs: u64,

    /// Directory names skipped during the walk.
    pub excluded_dirs: Vec<String>,

    /// Package manager used for remediation.
    ///
    /// Default: "npm"
    pub package_manager: String,

    /// Whether to scan the well-known system locations even when not
    /// running as root.
    ///
    /// Default: false
    pub scan_system_paths: bool,

    #[serde(default)]
    pub ignore: IgnoreConfig,
}

/// Findings to suppress, for projects that are known and accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnoreConfig {
    /// Project directories to drop from the results.
    ///
    /// Supports `*` wildcards (e.g., "/home/*/archive*").
    pub paths: Vec<String>,
}

impl IgnoreConfig {
    /// Check if a project directory should be ignored.
    pub fn should_ignore_path(&self, dir: &Path) -> bool {
        let text = dir.to_string_lossy();
        self.paths.iter().any(|pattern| {
            if pattern.contains('*') {
                glob_match(pattern, &text)
            } else {
                Path::new(pattern) == dir
            }
        })
    }
}

/// `*` matches any run of characters, `/` included.
fn glob_match(pattern: &str, text: &str) -> bool {
    let mut segments = pattern.split('*');
    let head = segments.next().unwrap_or_default();
    let Some(mut rest) = text.strip_prefix(head) else {
        return false;
    };

    let tail: Vec<&str> = segments.collect();
    let Some((last, middle)) = tail.split_last() else {
        return rest.is_empty();
    };

    for segment in middle {
        match rest.find(segment) {
            Some(pos) => rest = &rest[pos + segment.len()..],
            None => return false,
        }
    }
    rest.ends_with(last)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: 10,
            remediation_timeout_secs: 60,
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
            package_manager: "npm".to_string(),
            scan_system_paths: false,
            ignore: IgnoreConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config file.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from an explicit path, falling back to defaults
    /// when the file is absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Returns the path to the configuration file.
    ///
    /// # Example
    ///
    /// ```
    /// use reactscan::Config;
    ///
    /// let path = Config::config_path();
    /// assert!(path.ends_with("config.toml"));
    /// ```
    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }

    pub fn remediation_timeout(&self) -> Duration {
        Duration::from_secs(self.remediation_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_without_wildcard_is_exact() {
        assert!(glob_match("/srv/app", "/srv/app"));
        assert!(!glob_match("/srv/app", "/srv/app2"));
        assert!(!glob_match("/srv/app", "/srv"));
    }

    #[test]
    fn test_glob_wildcards() {
        assert!(glob_match("/srv/legacy*", "/srv/legacy"));
        assert!(glob_match("/srv/legacy*", "/srv/legacy-shop"));
        assert!(glob_match("/home/*/archive", "/home/alice/archive"));
        assert!(glob_match("*fixtures*", "/home/dev/repo/test/fixtures/app"));
        assert!(!glob_match("/srv/legacy*", "/opt/legacy"));
        assert!(!glob_match("/home/*/archive", "/home/alice/current"));
    }

    #[test]
    fn test_glob_segments_do_not_overlap() {
        assert!(!glob_match("*app*app", "/srv/app"));
        assert!(glob_match("*app*app", "/srv/app/app"));
    }

    #[test]
    fn test_ignore_config_paths() {
        let config = IgnoreConfig {
            paths: vec!["/srv/legacy".to_string(), "/home/*/archive*".to_string()],
        };

        assert!(config.should_ignore_path(Path::new("/srv/legacy")));
        assert!(config.should_ignore_path(Path::new("/home/alice/archive-old")));
        assert!(!config.should_ignore_path(Path::new("/srv/legacy/nested")));
        assert!(!config.should_ignore_path(Path::new("/home/alice/shop")));
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.max_depth, 10);
        assert_eq!(config.remediation_timeout(), Duration::from_secs(60));
        assert_eq!(config.package_manager, "npm");
        assert!(!config.scan_system_paths);
        assert_eq!(config.excluded_dirs.len(), 6);
        assert!(config.excluded_dirs.iter().any(|d| d == "node_modules"));
        assert!(config.ignore.paths.is_empty());
    }

    #[test]
    fn test_load_from_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "max_depth = 3\n\n[ignore]\npaths = [\"/srv/legacy\"]\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.remediation_timeout_secs, 60);
        assert_eq!(config.ignore.paths, vec!["/srv/legacy".to_string()]);
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.max_depth, 10);
    }

    #[test]
    fn test_load_from_invalid_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "max_depth = \"deep\"").unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}
