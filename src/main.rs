use anyhow::Result;
use clap::{ArgAction, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use reactscan::{
    checker::{default_advisory, Advisory},
    config::Config,
    model::ScanReport,
    output::{cli, print_json, OutputFormat},
    platform,
    remediate::{NpmRemediator, RemediationLoop, RemediationTally, TerminalPrompter},
    scanner::{ScanEvent, Scanner},
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const ERROR: u8 = 1;
}

#[derive(Parser)]
#[command(name = "reactscan")]
#[command(
    author,
    version,
    about = "Find and fix React installations affected by CVE-2025-55182 (React2Shell)",
    long_about = "Scans for package.json files declaring a vulnerable React 19 release and \
                  offers to upgrade each project with npm.\n\n\
                  Scans your home directory by default. Run as root (or pass --system) to \
                  also scan system-wide locations such as /opt, /srv and /var/lib/docker."
)]
struct Cli {
    /// Preview changes without making modifications
    #[arg(long)]
    dry_run: bool,

    /// Directory to scan; may be repeated (default: home directory)
    #[arg(short, long = "path", value_name = "DIR")]
    paths: Vec<PathBuf>,

    /// Also scan well-known system locations
    #[arg(long)]
    system: bool,

    /// Maximum directory depth below each root
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Seconds to allow each npm install before giving up
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Output format (table, json); json never prompts
    #[arg(short, long)]
    format: Option<String>,

    /// Read configuration from this file instead of the default location
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("reactscan={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run() -> Result<u8> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(depth) = cli.max_depth {
        config.max_depth = depth;
    }
    if let Some(secs) = cli.timeout {
        config.remediation_timeout_secs = secs;
    }

    let format = OutputFormat::from_str(cli.format.as_deref().unwrap_or("table"))
        .map_err(|e| anyhow::anyhow!(e))?;
    let is_interactive = format == OutputFormat::Table;

    let scan_system = cli.system || config.scan_system_paths || platform::is_elevated();
    let roots = resolve_roots(&cli.paths, scan_system);
    if roots.is_empty() {
        anyhow::bail!("No directory to scan: home directory is unknown, pass --path");
    }

    let advisory = default_advisory();
    if is_interactive {
        cli::print_banner(advisory, cli.dry_run);
        cli::print_scan_plan(&roots);
    }

    let scanner = Scanner::new(advisory, &config);
    let report = scan_roots(&scanner, &roots, advisory, is_interactive);

    if format == OutputFormat::Json {
        print_json(&report, advisory)?;
        return Ok(exit_codes::SUCCESS);
    }

    let tally = if report.is_clean() {
        RemediationTally::default()
    } else {
        cli::print_critical_header(report.findings.len(), advisory);
        cli::print_findings_table(&report);

        let remediator = NpmRemediator::new(
            platform::package_manager_program(&config.package_manager),
            advisory,
            config.remediation_timeout(),
        );
        let mut prompter = TerminalPrompter;
        RemediationLoop::new(&remediator, cli.dry_run)
            .run(&report.findings, &mut prompter)
            .await?
    };

    cli::print_summary(&report, &tally, advisory);
    Ok(exit_codes::SUCCESS)
}

/// Explicit paths, else the home directory, plus the system locations when
/// requested. Duplicates are dropped.
fn resolve_roots(explicit: &[PathBuf], scan_system: bool) -> Vec<PathBuf> {
    let mut roots: Vec<PathBuf> = if explicit.is_empty() {
        platform::home_dir().into_iter().collect()
    } else {
        explicit.to_vec()
    };

    if scan_system {
        for path in platform::system_scan_paths() {
            if !roots.contains(&path) {
                roots.push(path);
            }
        }
    }

    roots
}

/// Scan roots one after another, reporting findings as each root completes.
fn scan_roots(
    scanner: &Scanner,
    roots: &[PathBuf],
    advisory: &Advisory,
    is_interactive: bool,
) -> ScanReport {
    if !is_interactive {
        return scanner.scan(roots);
    }

    let mut progress: Option<ProgressBar> = None;
    scanner.scan_with(roots, |event| match event {
        ScanEvent::RootMissing(root) => cli::print_root_missing(root),
        ScanEvent::RootStarted(root) => {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
                pb.set_style(style);
            }
            pb.enable_steady_tick(Duration::from_millis(100));
            pb.set_message(format!("Scanning {}...", root.display()));
            progress = Some(pb);
        }
        ScanEvent::RootFinished { findings, .. } => {
            if let Some(pb) = progress.take() {
                pb.finish_and_clear();
            }
            for finding in findings {
                cli::print_finding(finding, advisory);
            }
        }
    })
}
