use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::error::ManifestError;
use crate::model::{DependencyGroup, ManifestRecord};

const LOOKUP_ORDER: [DependencyGroup; 2] = [DependencyGroup::Runtime, DependencyGroup::Development];

/// Reads `path` and extracts the declared version of `package`.
///
/// Runtime dependencies win over development dependencies. Empty and
/// non-string values are treated as absent.
pub fn read_manifest(path: &Path, package: &str) -> Result<ManifestRecord, ManifestError> {
    let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_manifest(path, &content, package)
}

pub fn parse_manifest(
    path: &Path,
    content: &str,
    package: &str,
) -> Result<ManifestRecord, ManifestError> {
    let value: Value = serde_json::from_str(content).map_err(|source| ManifestError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let record = ManifestRecord::new(path);
    Ok(match declared_version(&value, package) {
        Some((version, group)) => record.with_version(version, group),
        None => record,
    })
}

fn declared_version(manifest: &Value, package: &str) -> Option<(String, DependencyGroup)> {
    LOOKUP_ORDER.into_iter().find_map(|group| {
        manifest
            .get(group.manifest_key())
            .and_then(|deps| deps.get(package))
            .and_then(Value::as_str)
            .filter(|version| !version.is_empty())
            .map(|version| (version.to_string(), group))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> ManifestRecord {
        parse_manifest(Path::new("/app/package.json"), content, "react").unwrap()
    }

    #[test]
    fn test_runtime_dependency() {
        let record = parse(r#"{"name":"app","dependencies":{"react":"^19.1.0"}}"#);
        assert_eq!(record.declared_version.as_deref(), Some("^19.1.0"));
        assert_eq!(record.group, Some(DependencyGroup::Runtime));
        assert_eq!(record.directory(), Path::new("/app"));
    }

    #[test]
    fn test_dev_dependency_fallback() {
        let record = parse(r#"{"dependencies":{"lodash":"4.17.21"},"devDependencies":{"react":"19.0.0"}}"#);
        assert_eq!(record.declared_version.as_deref(), Some("19.0.0"));
        assert_eq!(record.group, Some(DependencyGroup::Development));
    }

    #[test]
    fn test_runtime_wins_over_dev() {
        let record = parse(
            r#"{"dependencies":{"react":"18.3.1"},"devDependencies":{"react":"19.0.0"}}"#,
        );
        assert_eq!(record.declared_version.as_deref(), Some("18.3.1"));
        assert_eq!(record.group, Some(DependencyGroup::Runtime));
    }

    #[test]
    fn test_empty_or_non_string_version_falls_through() {
        let record = parse(r#"{"dependencies":{"react":""},"devDependencies":{"react":"19.2.0"}}"#);
        assert_eq!(record.declared_version.as_deref(), Some("19.2.0"));

        let record = parse(r#"{"dependencies":{"react":19}}"#);
        assert_eq!(record.declared_version, None);
    }

    #[test]
    fn test_missing_package_or_groups() {
        assert_eq!(parse(r#"{"name":"lib"}"#).declared_version, None);
        assert_eq!(parse(r#"{"dependencies":[]}"#).declared_version, None);
        assert_eq!(parse("[]").declared_version, None);
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = parse_manifest(Path::new("/app/package.json"), "{ not json", "react").unwrap_err();
        assert!(matches!(err, ManifestError::Parse { .. }));
    }

    #[test]
    fn test_unreadable_file_is_read_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = read_manifest(&tmp.path().join("package.json"), "react").unwrap_err();
        assert!(matches!(err, ManifestError::Read { .. }));
    }
}
