//! Advisory data and the version matcher.
//!
//! There is exactly one advisory: CVE-2025-55182, the React Server
//! Components remote code execution. Its affected releases are listed in
//! [`VULNERABLE_VERSIONS`].

mod version;

pub use version::{
    classify, classify_with, is_valid_version, version_components, VulnerableVersion,
    VULNERABLE_VERSIONS,
};

/// A hard-coded advisory: which package it affects and how to fix it.
#[derive(Debug, Clone, Copy)]
pub struct Advisory {
    pub id: &'static str,
    pub alias: &'static str,
    pub cvss: f32,
    pub summary: &'static str,
    /// Dependency name looked up in each manifest.
    pub package: &'static str,
    /// Packages upgraded in lockstep with [`package`](Self::package).
    pub companion_packages: &'static [&'static str],
    pub table: &'static [VulnerableVersion],
}

impl Advisory {
    /// Returns the fixed release for `version`, or `None` if it is not
    /// affected.
    pub fn classify(&self, version: &str) -> Option<&'static str> {
        classify_with(self.table, version)
    }

    /// Every package that has to be installed at the fixed release.
    pub fn packages(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.package).chain(self.companion_packages.iter().copied())
    }
}

pub static REACT2SHELL: Advisory = Advisory {
    id: "CVE-2025-55182",
    alias: "React2Shell",
    cvss: 10.0,
    summary: "Unauthenticated Remote Code Execution in React Server Components",
    package: "react",
    companion_packages: &["react-dom"],
    table: VULNERABLE_VERSIONS,
};

pub fn default_advisory() -> &'static Advisory {
    &REACT2SHELL
}
