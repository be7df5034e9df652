use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

use crate::config::DEFAULT_EXCLUDED_DIRS;

pub const MANIFEST_FILE_NAME: &str = "package.json";

/// Depth-bounded directory walker that collects `package.json` files.
///
/// The root is depth 0. Directories up to `max_depth` are read, so a
/// manifest can sit at most `max_depth + 1` components below the root.
/// Symbolic links are never followed and unreadable entries are skipped.
#[derive(Debug, Clone)]
pub struct ManifestWalker {
    max_depth: usize,
    excluded_dirs: Vec<String>,
}

impl ManifestWalker {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
        }
    }

    pub fn with_excluded_dirs(mut self, dirs: Vec<String>) -> Self {
        self.excluded_dirs = dirs;
        self
    }

    pub fn walk(&self, root: &Path) -> Vec<PathBuf> {
        let mut manifests = Vec::new();
        let mut excluded_count = 0usize;

        let walker = WalkDir::new(root)
            .follow_links(false)
            .max_depth(self.max_depth.saturating_add(1))
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() > 0 && self.is_excluded(entry) {
                    trace!(path = %entry.path().display(), "Excluding entry");
                    excluded_count += 1;
                    return false;
                }
                true
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    debug!(error = %err, "Skipping unreadable entry");
                    continue;
                }
            };

            if entry.file_type().is_file() && entry.file_name() == MANIFEST_FILE_NAME {
                trace!(path = %entry.path().display(), "Found manifest");
                manifests.push(entry.into_path());
            }
        }

        debug!(
            root = %root.display(),
            manifests = manifests.len(),
            excluded = excluded_count,
            "Walk completed"
        );
        manifests
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        entry
            .file_name()
            .to_str()
            .map(|name| self.excluded_dirs.iter().any(|d| d == name))
            .unwrap_or(false)
    }
}

/// Collects every manifest below `root` using the default exclusion list.
pub fn find_manifests(root: &Path, max_depth: usize) -> Vec<PathBuf> {
    ManifestWalker::new(max_depth).walk(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch_manifest(dir: &Path) -> PathBuf {
        fs::create_dir_all(dir).unwrap();
        let path = dir.join(MANIFEST_FILE_NAME);
        fs::write(&path, "{}").unwrap();
        path
    }

    fn sorted(mut paths: Vec<PathBuf>) -> Vec<PathBuf> {
        paths.sort();
        paths
    }

    #[test]
    fn test_finds_nested_manifests() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        let top = touch_manifest(root);
        let nested = touch_manifest(&root.join("apps").join("web"));
        fs::write(root.join("apps").join("README.md"), "docs").unwrap();

        let found = sorted(find_manifests(root, 10));
        assert_eq!(found, sorted(vec![top, nested]));
    }

    #[test]
    fn test_skips_excluded_directories() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        let app = touch_manifest(&root.join("app"));
        for excluded in DEFAULT_EXCLUDED_DIRS {
            touch_manifest(&root.join("app").join(excluded).join("pkg"));
            touch_manifest(&root.join(excluded));
        }

        let found = find_manifests(root, 10);
        assert_eq!(found, vec![app]);
    }

    #[test]
    fn test_custom_exclusions_replace_defaults() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        let in_node_modules = touch_manifest(&root.join("node_modules").join("react"));
        touch_manifest(&root.join("vendor"));

        let walker = ManifestWalker::new(10).with_excluded_dirs(vec!["vendor".to_string()]);
        assert_eq!(walker.walk(root), vec![in_node_modules]);
    }

    #[test]
    fn test_root_named_like_excluded_dir_is_walked() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("build");
        let manifest = touch_manifest(&root);

        assert_eq!(find_manifests(&root, 10), vec![manifest]);
    }

    #[test]
    fn test_respects_max_depth() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        let depth1 = touch_manifest(root);
        let depth2 = touch_manifest(&root.join("a"));
        let depth3 = touch_manifest(&root.join("a").join("b"));

        assert_eq!(find_manifests(root, 0), vec![depth1.clone()]);
        assert_eq!(
            sorted(find_manifests(root, 1)),
            sorted(vec![depth1.clone(), depth2.clone()])
        );
        assert_eq!(
            sorted(find_manifests(root, 2)),
            sorted(vec![depth1, depth2, depth3])
        );
    }

    #[test]
    fn test_missing_root_yields_nothing() {
        let tmp = TempDir::new().unwrap();
        assert!(find_manifests(&tmp.path().join("does-not-exist"), 10).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_does_not_follow_symlinks() {
        use std::os::unix::fs::symlink;

        let tmp = TempDir::new().unwrap();
        let outside = tmp.path().join("outside");
        let outside_manifest = touch_manifest(&outside);

        let root = tmp.path().join("root");
        let real = touch_manifest(&root.join("real"));
        symlink(&outside, root.join("linked-dir")).unwrap();
        fs::create_dir_all(root.join("linked-file")).unwrap();
        symlink(&outside_manifest, root.join("linked-file").join(MANIFEST_FILE_NAME)).unwrap();
        // A cycle back to the root must not hang the walk.
        symlink(&root, root.join("real").join("loop")).unwrap();

        assert_eq!(find_manifests(&root, 10), vec![real]);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_does_not_hide_siblings() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        let open = touch_manifest(&root.join("open"));
        let locked = root.join("locked");
        touch_manifest(&locked);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let found = find_manifests(root, 10);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        // root ignores directory permissions
        if crate::platform::is_elevated() {
            return;
        }
        assert_eq!(found, vec![open]);
    }
}
