use crate::checker::Advisory;
use crate::model::ScanReport;
use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
struct JsonReport<'a> {
    advisory: &'a str,
    package: &'a str,
    #[serde(flatten)]
    report: &'a ScanReport,
}

pub fn format_json(report: &ScanReport, advisory: &Advisory) -> Result<String> {
    let doc = JsonReport {
        advisory: advisory.id,
        package: advisory.package,
        report,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

pub fn print_json(report: &ScanReport, advisory: &Advisory) -> Result<()> {
    println!("{}", format_json(report, advisory)?);
    Ok(())
}
