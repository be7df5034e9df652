//! Cross-platform path and process resolution.
//!
//! Knows where to start scanning on each operating system, whether the
//! process is privileged enough for a system-wide scan, and which package
//! manager executable to call.

use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOS,
    Windows,
}

impl Platform {
    pub fn current() -> Self {
        #[cfg(target_os = "windows")]
        return Platform::Windows;
        #[cfg(target_os = "macos")]
        return Platform::MacOS;
        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        return Platform::Linux;
    }
}

/// Returns the user's home directory, the default scan root.
pub fn home_dir() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Well-known locations where deployed Node.js applications live.
///
/// Platform-specific locations:
/// - Linux/macOS: `/root`, `/home`, `/var/lib/docker`, `/opt`, `/srv`, `/usr/local`
/// - Windows: `C:\Users`, `C:\Program Files`, `C:\Program Files (x86)`, `C:\ProgramData`
///
/// Paths are returned whether or not they exist.
pub fn system_scan_paths() -> Vec<PathBuf> {
    let paths: &[&str] = match Platform::current() {
        Platform::Windows => &[
            r"C:\Users",
            r"C:\Program Files",
            r"C:\Program Files (x86)",
            r"C:\ProgramData",
        ],
        Platform::Linux | Platform::MacOS => &[
            "/root",
            "/home",
            "/var/lib/docker",
            "/opt",
            "/srv",
            "/usr/local",
        ],
    };
    paths.iter().map(PathBuf::from).collect()
}

/// Returns true when running as root.
///
/// Always false on Windows, where access is left to the OS.
pub fn is_elevated() -> bool {
    #[cfg(unix)]
    {
        nix::unistd::geteuid().is_root()
    }
    #[cfg(not(unix))]
    {
        false
    }
}

/// Resolves the executable name for a package manager.
///
/// npm ships as a `.cmd` shim on Windows, which `Command` will not find
/// without the extension.
pub fn package_manager_program(name: &str) -> String {
    if Platform::current() == Platform::Windows && !name.contains('.') {
        format!("{}.cmd", name)
    } else {
        name.to_string()
    }
}

/// Returns the directory holding `reactscan/config.toml`.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("reactscan")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_scan_paths_not_empty() {
        let paths = system_scan_paths();
        assert_eq!(paths.len(), if cfg!(windows) { 4 } else { 6 });
    }

    #[test]
    fn test_package_manager_program() {
        if cfg!(target_os = "windows") {
            assert_eq!(package_manager_program("npm"), "npm.cmd");
        } else {
            assert_eq!(package_manager_program("npm"), "npm");
        }
        assert_eq!(package_manager_program("npm.exe"), "npm.exe");
    }

    #[test]
    fn test_config_dir_ends_with_crate_name() {
        assert!(config_dir().ends_with("reactscan"));
    }

    #[cfg(unix)]
    #[test]
    fn test_is_elevated_matches_file_owner() {
        use std::os::unix::fs::MetadataExt;

        // New files are owned by the effective uid.
        let file = tempfile::NamedTempFile::new().unwrap();
        let owner = file.as_file().metadata().unwrap().uid();
        assert_eq!(is_elevated(), owner == 0);
    }
}
