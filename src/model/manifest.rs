use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which dependency map a version was declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyGroup {
    Runtime,
    Development,
}

impl DependencyGroup {
    /// The `package.json` key for this group.
    pub fn manifest_key(&self) -> &'static str {
        match self {
            DependencyGroup::Runtime => "dependencies",
            DependencyGroup::Development => "devDependencies",
        }
    }
}

impl std::fmt::Display for DependencyGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.manifest_key())
    }
}

/// The declared version of the target package in one manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRecord {
    pub path: PathBuf,
    pub declared_version: Option<String>,
    pub group: Option<DependencyGroup>,
}

impl ManifestRecord {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            declared_version: None,
            group: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>, group: DependencyGroup) -> Self {
        self.declared_version = Some(version.into());
        self.group = Some(group);
        self
    }

    /// Directory holding the manifest, where the package manager has to run.
    pub fn directory(&self) -> PathBuf {
        self.path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
