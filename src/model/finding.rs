use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::DependencyGroup;

/// A project whose declared React version is affected and needs upgrading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VulnerabilityFinding {
    pub directory: PathBuf,
    pub manifest: PathBuf,
    pub declared_version: String,
    pub remediation_version: String,
    pub group: DependencyGroup,
}

/// Accumulated result of scanning one or more roots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub scan_time: DateTime<Utc>,
    pub roots: Vec<PathBuf>,
    pub manifests_scanned: usize,
    pub manifests_skipped: usize,
    pub findings: Vec<VulnerabilityFinding>,
    #[serde(skip)]
    seen: HashSet<PathBuf>,
}

impl ScanReport {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            scan_time: Utc::now(),
            roots,
            manifests_scanned: 0,
            manifests_skipped: 0,
            findings: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Marks a manifest as visited. Returns false if an earlier root
    /// already covered it.
    pub fn mark_scanned(&mut self, manifest: &Path) -> bool {
        if !self.seen.insert(manifest.to_path_buf()) {
            return false;
        }
        self.manifests_scanned += 1;
        true
    }

    pub fn mark_skipped(&mut self) {
        self.manifests_skipped += 1;
    }

    pub fn push_finding(&mut self, finding: VulnerabilityFinding) {
        self.findings.push(finding);
    }

    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}
