use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

use crate::checker::Advisory;
use crate::error::{BackupError, RemediationError};
use crate::model::{ScanReport, VulnerabilityFinding};
use crate::remediate::RemediationTally;

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

const RULE: &str = "═══════════════════════════════════════════════════════════";

#[derive(Tabled)]
struct FindingRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Project")]
    directory: String,
    #[tabled(rename = "Declared")]
    declared: String,
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Fixed In")]
    fixed_in: String,
}

pub fn print_banner(advisory: &Advisory, dry_run: bool) {
    let title = format!(
        "React {} Vulnerability Scanner ({})",
        advisory.id, advisory.alias
    );
    let width = title.chars().count() + 4;
    println!("{CYAN}╔{}╗{RESET}", "═".repeat(width));
    println!("{CYAN}║  {title}  ║{RESET}");
    println!("{CYAN}╚{}╝{RESET}", "═".repeat(width));
    println!();

    if dry_run {
        println!("{BLUE}[DRY-RUN MODE] - No changes will be made{RESET}");
        println!();
    }

    println!(
        "{YELLOW}⚠️  {}: CRITICAL (CVSS {:.1}){RESET}",
        advisory.id, advisory.cvss
    );
    println!("{}", advisory.summary);
    println!();
}

pub fn print_scan_plan(roots: &[PathBuf]) {
    println!("=== Scanning for Vulnerable React Installations ===");
    println!();
    println!("Scanning directories:");
    for root in roots {
        println!("  • {}", root.display());
    }
    println!();
}

pub fn print_root_missing(root: &Path) {
    println!("{YELLOW}Skipping {} (not found){RESET}", root.display());
}

pub fn print_finding(finding: &VulnerabilityFinding, advisory: &Advisory) {
    println!(
        "{RED}⚠️  VULNERABLE: React {}{RESET}",
        finding.declared_version
    );
    println!("   📁 Location: {}", finding.directory.display());
    println!("   🔒 {}: Remote Code Execution", advisory.id);
    println!("   📦 Update to: {}", finding.remediation_version);
    println!();
}

pub fn print_findings_table(report: &ScanReport) {
    let rows: Vec<FindingRow> = report
        .findings
        .iter()
        .enumerate()
        .map(|(i, f)| FindingRow {
            index: i + 1,
            directory: truncate(&f.directory.display().to_string(), 60),
            declared: f.declared_version.clone(),
            group: f.group.to_string(),
            fixed_in: f.remediation_version.clone(),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);
    println!();
}

pub fn print_critical_header(found: usize, advisory: &Advisory) {
    println!();
    println!("{RED}{RULE}{RESET}");
    println!("{RED}  CRITICAL: {found} Vulnerable Installation(s) Found{RESET}");
    println!("{RED}{RULE}{RESET}");
    println!();
    println!("These installations are vulnerable to {}:", advisory.id);
    println!("• {}", advisory.summary);
    println!("• CVSS Score: {:.1} (CRITICAL)", advisory.cvss);
    println!("• Actively exploited in the wild");
    println!();
    println!("=== Update Vulnerable Projects ===");
    println!();
}

pub fn print_project_header(index: usize, total: usize, finding: &VulnerabilityFinding) {
    println!(
        "{YELLOW}Project {index}/{total}: {}{RESET}",
        finding.directory.display()
    );
}

pub fn update_question(finding: &VulnerabilityFinding) -> String {
    format!(
        "   Update to React {}? (y/n): ",
        finding.remediation_version
    )
}

pub fn print_update_start(finding: &VulnerabilityFinding) {
    println!();
    println!("📦 Updating React to {}...", finding.remediation_version);
    println!("   📁 In: {}", finding.directory.display());
}

pub fn print_dry_run_command(command: &str) {
    println!("{BLUE}   [DRY-RUN] Would execute: {command}{RESET}");
}

pub fn print_backup_created(path: &Path) {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    println!("   💾 Backup created: {name}");
}

pub fn print_backup_failed(err: &BackupError) {
    println!("{YELLOW}⚠️  Could not create backup: {}{RESET}", err.source);
}

pub fn print_update_success() {
    println!("{GREEN}   ✅ Successfully updated!{RESET}");
}

pub fn print_update_failure(err: &RemediationError) {
    println!("{RED}   ❌ Update failed: {err}{RESET}");
}

pub fn print_skipped() {
    println!("   ⏭️  Skipped");
}

pub fn print_summary(report: &ScanReport, tally: &RemediationTally, advisory: &Advisory) {
    let found = report.findings.len();

    println!();
    println!("{RULE}");
    println!("                         SUMMARY");
    println!("{RULE}");
    println!(
        "Scanned {} manifest(s) under {} root(s)",
        report.manifests_scanned,
        report.roots.len()
    );
    if report.manifests_skipped > 0 {
        println!(
            "{YELLOW}{} manifest(s) could not be parsed{RESET}",
            report.manifests_skipped
        );
    }

    if found == 0 {
        println!("{GREEN}✅ No vulnerable versions found!{RESET}");
        println!("Your system is protected against {}", advisory.id);
    } else {
        println!("{RED}⚠️  {found} vulnerable installation(s) found{RESET}");
        println!("{GREEN}✅ {} project(s) updated{RESET}", tally.updated);
        if tally.failed > 0 {
            println!("{RED}❌ {} update(s) failed{RESET}", tally.failed);
        }
        if tally.planned > 0 {
            println!(
                "{BLUE}[DRY-RUN] {} update(s) would have been applied{RESET}",
                tally.planned
            );
        }

        let remaining = tally.remaining(found);
        if remaining > 0 {
            println!("{YELLOW}⚠️  {remaining} project(s) remain vulnerable{RESET}");
            println!();
            println!("IMMEDIATE ACTION REQUIRED:");
            println!("• Update remaining projects manually");
            println!("• Review security logs for exploitation attempts");
            println!("• Consider temporary mitigations (WAF rules, network isolation)");
        }
    }
    println!("{RULE}");
    println!();
}

/// Shortens from the left so the project name stays visible.
fn truncate(s: &str, max_len: usize) -> String {
    let len = s.chars().count();
    if len <= max_len {
        s.to_string()
    } else {
        let tail: String = s.chars().skip(len - (max_len - 3)).collect();
        format!("...{}", tail)
    }
}
