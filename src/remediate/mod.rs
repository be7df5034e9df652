//! Interactive remediation of findings.
//!
//! [`RemediationLoop`] walks the findings one at a time: print the project,
//! ask for confirmation, and on a yes back up the manifest and hand the
//! project to a [`Remediator`]. Failures are counted, never retried, and
//! never stop the loop. In dry-run mode nothing is written and nothing is
//! executed; confirmed findings are only counted as planned.

mod backup;
mod npm;
mod prompt;

pub use backup::{backup_path, create_backup};
pub use npm::NpmRemediator;
pub use prompt::{is_affirmative, LinePrompter, Prompter, TerminalPrompter};

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{PromptError, RemediationError};
use crate::model::VulnerabilityFinding;
use crate::output::cli;

/// Something that can upgrade a vulnerable project in place.
#[async_trait]
pub trait Remediator: Send + Sync {
    /// Human-readable command, shown in dry-run mode.
    fn command_line(&self, finding: &VulnerabilityFinding) -> String;

    async fn remediate(&self, finding: &VulnerabilityFinding) -> Result<(), RemediationError>;
}

/// Outcome counts of one remediation loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RemediationTally {
    pub updated: usize,
    pub failed: usize,
    pub skipped: usize,
    /// Confirmed in dry-run mode.
    pub planned: usize,
}

impl RemediationTally {
    /// Findings still vulnerable after the loop.
    pub fn remaining(&self, found: usize) -> usize {
        found.saturating_sub(self.updated)
    }
}

pub struct RemediationLoop<'a> {
    remediator: &'a dyn Remediator,
    dry_run: bool,
}

impl<'a> RemediationLoop<'a> {
    pub fn new(remediator: &'a dyn Remediator, dry_run: bool) -> Self {
        Self {
            remediator,
            dry_run,
        }
    }

    /// Prompts for each finding in order.
    ///
    /// # Errors
    ///
    /// Only a failed or interrupted prompt aborts the loop.
    pub async fn run(
        &self,
        findings: &[VulnerabilityFinding],
        prompter: &mut dyn Prompter,
    ) -> Result<RemediationTally, PromptError> {
        let mut tally = RemediationTally::default();
        let total = findings.len();

        for (index, finding) in findings.iter().enumerate() {
            cli::print_project_header(index + 1, total, finding);
            let answer = prompter.ask(&cli::update_question(finding))?;

            if !is_affirmative(&answer) {
                cli::print_skipped();
                tally.skipped += 1;
            } else if self.dry_run {
                cli::print_update_start(finding);
                cli::print_dry_run_command(&self.remediator.command_line(finding));
                tally.planned += 1;
            } else {
                cli::print_update_start(finding);
                if self.apply(finding).await {
                    tally.updated += 1;
                } else {
                    tally.failed += 1;
                }
            }
            println!();
        }

        Ok(tally)
    }

    async fn apply(&self, finding: &VulnerabilityFinding) -> bool {
        // A failed backup does not block the upgrade.
        match create_backup(&finding.manifest) {
            Ok(path) => {
                info!(backup = %path.display(), "Manifest backed up");
                cli::print_backup_created(&path);
            }
            Err(err) => {
                warn!(error = %err, "Proceeding without backup");
                cli::print_backup_failed(&err);
            }
        }

        match self.remediator.remediate(finding).await {
            Ok(()) => {
                info!(directory = %finding.directory.display(), version = %finding.remediation_version, "Project updated");
                cli::print_update_success();
                true
            }
            Err(err) => {
                warn!(directory = %finding.directory.display(), error = %err, "Update failed");
                cli::print_update_failure(&err);
                false
            }
        }
    }
}
