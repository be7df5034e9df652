//! Manifest discovery and classification.
//!
//! The [`Scanner`] walks each root with a [`ManifestWalker`], reads every
//! `package.json` it finds, and classifies the declared version of the
//! advisory's package. Unreadable directories and malformed manifests are
//! skipped; a scan never fails as a whole.
//!
//! # Example
//!
//! ```no_run
//! use reactscan::{checker::default_advisory, Config, Scanner};
//! use std::path::PathBuf;
//!
//! let scanner = Scanner::new(default_advisory(), &Config::default());
//! let report = scanner.scan(&[PathBuf::from("/srv")]);
//!
//! for finding in &report.findings {
//!     println!("{} -> {}", finding.directory.display(), finding.remediation_version);
//! }
//! ```

mod manifest;
mod walker;

pub use manifest::{parse_manifest, read_manifest};
pub use walker::{find_manifests, ManifestWalker, MANIFEST_FILE_NAME};

use crate::checker::Advisory;
use crate::config::{Config, IgnoreConfig};
use crate::model::{ManifestRecord, ScanReport, VulnerabilityFinding};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Progress notifications emitted by [`Scanner::scan_with`].
#[derive(Debug)]
pub enum ScanEvent<'e> {
    RootMissing(&'e Path),
    RootStarted(&'e Path),
    /// Carries the findings first reported under this root.
    RootFinished {
        root: &'e Path,
        findings: &'e [VulnerabilityFinding],
    },
}

pub struct Scanner<'a> {
    advisory: &'a Advisory,
    walker: ManifestWalker,
    ignore: IgnoreConfig,
}

impl<'a> Scanner<'a> {
    pub fn new(advisory: &'a Advisory, config: &Config) -> Self {
        Self {
            advisory,
            walker: ManifestWalker::new(config.max_depth)
                .with_excluded_dirs(config.excluded_dirs.clone()),
            ignore: config.ignore.clone(),
        }
    }

    /// Scans every root in order and returns the combined report.
    pub fn scan(&self, roots: &[PathBuf]) -> ScanReport {
        self.scan_with(roots, |_| {})
    }

    /// Like [`Scanner::scan`], reporting progress for each root as it goes.
    pub fn scan_with<F>(&self, roots: &[PathBuf], mut on_event: F) -> ScanReport
    where
        F: FnMut(ScanEvent<'_>),
    {
        let mut report = ScanReport::new(roots.to_vec());

        for root in roots {
            if !root.exists() {
                debug!(root = %root.display(), "Scan root does not exist");
                on_event(ScanEvent::RootMissing(root.as_path()));
                continue;
            }

            on_event(ScanEvent::RootStarted(root.as_path()));
            let before = report.findings.len();
            self.scan_root(root, &mut report);
            on_event(ScanEvent::RootFinished {
                root: root.as_path(),
                findings: &report.findings[before..],
            });
        }

        report
    }

    /// Scans a single root, appending to `report`.
    ///
    /// Manifests already seen through an earlier, overlapping root are not
    /// reported twice.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn scan_root(&self, root: &Path, report: &mut ScanReport) {
        for path in self.walker.walk(root) {
            if !report.mark_scanned(&path) {
                continue;
            }

            let record = match read_manifest(&path, self.advisory.package) {
                Ok(record) => record,
                Err(err) => {
                    debug!(error = %err, "Skipping manifest");
                    report.mark_skipped();
                    continue;
                }
            };

            if let Some(finding) = self.inspect(&record) {
                info!(
                    directory = %finding.directory.display(),
                    declared = %finding.declared_version,
                    fixed_in = %finding.remediation_version,
                    "Vulnerable installation"
                );
                report.push_finding(finding);
            }
        }
    }

    /// Classifies one manifest, honouring the ignore list.
    pub fn inspect(&self, record: &ManifestRecord) -> Option<VulnerabilityFinding> {
        let declared = record.declared_version.as_deref()?;
        let group = record.group?;
        let fixed_in = self.advisory.classify(declared)?;

        let directory = record.directory();
        if self.ignore.should_ignore_path(&directory) {
            debug!(directory = %directory.display(), "Ignoring finding per config");
            return None;
        }

        Some(VulnerabilityFinding {
            directory,
            manifest: record.path.clone(),
            declared_version: declared.to_string(),
            remediation_version: fixed_in.to_string(),
            group,
        })
    }
}
