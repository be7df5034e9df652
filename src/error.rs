//! Error types for the scan and remediation seams.
//!
//! None of these abort a run on their own. Manifest and backup errors are
//! logged and skipped, remediation errors are reported per finding. Only a
//! [`PromptError`] propagates to the binary.

use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;

use thiserror::Error;

/// Failure to read or decode a single `package.json`.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure to copy a manifest aside before it is modified.
#[derive(Debug, Error)]
#[error("could not back up {}: {source}", .path.display())]
pub struct BackupError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

#[derive(Debug, Error)]
pub enum RemediationError {
    #[error("invalid version string: {0}")]
    InvalidVersion(String),

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("command exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },
}

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt interrupted")]
    Interrupted,

    #[error("failed to read answer: {0}")]
    Io(#[from] std::io::Error),

    #[error("terminal prompt failed: {0}")]
    Terminal(String),
}
