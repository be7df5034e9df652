use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::checker::{is_valid_version, Advisory};
use crate::error::RemediationError;
use crate::model::VulnerabilityFinding;

/// Upgrades a project with `npm install <pkg>@<version>... --save --legacy-peer-deps`,
/// run inside the project directory.
pub struct NpmRemediator {
    program: String,
    packages: Vec<&'static str>,
    timeout: Duration,
}

impl NpmRemediator {
    pub fn new(program: impl Into<String>, advisory: &Advisory, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            packages: advisory.packages().collect(),
            timeout,
        }
    }

    fn args(&self, version: &str) -> Vec<String> {
        let mut args = vec!["install".to_string()];
        args.extend(self.packages.iter().map(|p| format!("{}@{}", p, version)));
        args.push("--save".to_string());
        args.push("--legacy-peer-deps".to_string());
        args
    }
}

/// Revalidates a target version before it reaches a command line.
fn checked_version(version: &str) -> Result<&str, RemediationError> {
    if is_valid_version(version) && semver::Version::parse(version).is_ok() {
        Ok(version)
    } else {
        Err(RemediationError::InvalidVersion(version.to_string()))
    }
}

#[async_trait]
impl super::Remediator for NpmRemediator {
    fn command_line(&self, finding: &VulnerabilityFinding) -> String {
        format!(
            "{} {}",
            self.program,
            self.args(&finding.remediation_version).join(" ")
        )
    }

    async fn remediate(&self, finding: &VulnerabilityFinding) -> Result<(), RemediationError> {
        let version = checked_version(&finding.remediation_version)?;
        let args = self.args(version);
        debug!(program = %self.program, ?args, cwd = %finding.directory.display(), "Running package manager");

        let child = Command::new(&self.program)
            .args(&args)
            .current_dir(&finding.directory)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| RemediationError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| RemediationError::Timeout(self.timeout))?
            .map_err(|source| RemediationError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(status = %output.status, "Package manager failed");
            return Err(RemediationError::Failed {
                status: output.status,
                stderr,
            });
        }

        Ok(())
    }
}
