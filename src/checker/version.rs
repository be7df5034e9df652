use once_cell::sync::Lazy;
use regex::Regex;

/// Accepted shape of a declared version: optional `^`/`~`, then
/// `major.minor.patch`. Anything may follow the patch digits.
static VERSION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[~^]?\d+\.\d+\.\d+").expect("valid version pattern"));

/// One affected release and the release that fixes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VulnerableVersion {
    pub major: &'static str,
    pub minor: &'static str,
    pub patch: &'static str,
    pub fixed_in: &'static str,
}

impl VulnerableVersion {
    const fn new(
        major: &'static str,
        minor: &'static str,
        patch: &'static str,
        fixed_in: &'static str,
    ) -> Self {
        Self {
            major,
            minor,
            patch,
            fixed_in,
        }
    }

    fn matches(&self, major: &str, minor: &str, patch: &str) -> bool {
        self.major == major && self.minor == minor && self.patch == patch
    }
}

/// React releases affected by CVE-2025-55182.
pub const VULNERABLE_VERSIONS: &[VulnerableVersion] = &[
    VulnerableVersion::new("19", "0", "0", "19.0.1"),
    VulnerableVersion::new("19", "1", "0", "19.1.2"),
    VulnerableVersion::new("19", "1", "1", "19.1.2"),
    VulnerableVersion::new("19", "2", "0", "19.2.1"),
];

/// Returns true if `version` looks like `[^~]X.Y.Z...`.
///
/// This is also the guard applied before a version is interpolated into a
/// package-manager command line.
pub fn is_valid_version(version: &str) -> bool {
    VERSION_PATTERN.is_match(version)
}

/// Splits a declared version into its major, minor and patch components.
///
/// Components are kept as strings: `19.01.0` is not the same release as
/// `19.1.0` for matching purposes.
pub fn version_components(version: &str) -> Option<(&str, &str, &str)> {
    if !is_valid_version(version) {
        return None;
    }

    let clean = version
        .strip_prefix(|c: char| c == '^' || c == '~')
        .unwrap_or(version)
        .split('-')
        .next()
        .unwrap_or_default();

    let mut parts = clean.split('.');
    let major = parts.next()?;
    let minor = parts.next()?;
    let patch = parts.next().unwrap_or("0");
    Some((major, minor, patch))
}

/// Looks `version` up in `table` and returns the fixed release if it is
/// affected.
pub fn classify_with(table: &'static [VulnerableVersion], version: &str) -> Option<&'static str> {
    let (major, minor, patch) = version_components(version)?;
    table
        .iter()
        .find(|v| v.matches(major, minor, patch))
        .map(|v| v.fixed_in)
}

/// Classifies a declared React version against [`VULNERABLE_VERSIONS`].
///
/// # Example
///
/// ```
/// use reactscan::checker::classify;
///
/// assert_eq!(classify("^19.1.0"), Some("19.1.2"));
/// assert_eq!(classify("19.2.1"), None);
/// assert_eq!(classify("latest"), None);
/// ```
pub fn classify(version: &str) -> Option<&'static str> {
    classify_with(VULNERABLE_VERSIONS, version)
}
