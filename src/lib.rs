pub mod checker;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod platform;
pub mod remediate;
pub mod scanner;

pub use checker::{classify, Advisory};
pub use config::Config;
pub use model::{ManifestRecord, ScanReport, VulnerabilityFinding};
pub use scanner::{ScanEvent, Scanner};
