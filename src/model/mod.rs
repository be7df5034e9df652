//! Core data types for manifests, findings, and scan results.
//!
//! - [`ManifestRecord`] - what was read out of one `package.json`
//! - [`VulnerabilityFinding`] - a manifest that needs upgrading
//! - [`ScanReport`] - everything a scan produced, in discovery order
//!
//! # Example
//!
//! ```
//! use reactscan::{ScanReport, VulnerabilityFinding};
//! use reactscan::model::DependencyGroup;
//! use std::path::PathBuf;
//!
//! let mut report = ScanReport::new(vec![PathBuf::from("/srv")]);
//! report.push_finding(VulnerabilityFinding {
//!     directory: PathBuf::from("/srv/app"),
//!     manifest: PathBuf::from("/srv/app/package.json"),
//!     declared_version: "^19.1.0".to_string(),
//!     remediation_version: "19.1.2".to_string(),
//!     group: DependencyGroup::Runtime,
//! });
//!
//! assert_eq!(report.findings.len(), 1);
//! ```

mod finding;
mod manifest;

pub use finding::*;
pub use manifest::*;
