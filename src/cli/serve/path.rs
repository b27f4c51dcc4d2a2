//! Request path to static file resolution.

use std::path::{Path, PathBuf};

/// Resolve a decoded request path to a file under `static_root`.
///
/// Rejects anything that would leave the root, whether through `..` or a
/// symlink. Directories resolve to their `index.html`.
pub fn resolve_path(path: &str, static_root: &Path) -> Option<PathBuf> {
    let clean = path.trim_matches('/');
    if clean.is_empty() || clean.split('/').any(|seg| seg == "..") || clean.contains('\\') {
        return None;
    }

    let canonical = static_root.join(clean).canonicalize().ok()?;
    let root_canonical = static_root.canonicalize().ok()?;
    if !canonical.starts_with(&root_canonical) {
        return None;
    }

    if canonical.is_file() {
        return Some(canonical);
    }
    let index = canonical.join("index.html");
    index.is_file().then_some(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn static_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("styles.css"), "body{}").unwrap();
        fs::create_dir(dir.path().join("icons")).unwrap();
        fs::write(dir.path().join("icons/icon-192.png"), [0u8; 4]).unwrap();
        dir
    }

    #[test]
    fn test_resolve_file() {
        let dir = static_dir();
        let found = resolve_path("/styles.css", dir.path()).unwrap();
        assert!(found.ends_with("styles.css"));
        assert!(resolve_path("/icons/icon-192.png", dir.path()).is_some());
    }

    #[test]
    fn test_resolve_missing() {
        let dir = static_dir();
        assert_eq!(resolve_path("/logo.svg", dir.path()), None);
        assert_eq!(resolve_path("/", dir.path()), None);
        // a directory without index.html
        assert_eq!(resolve_path("/icons", dir.path()), None);
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let dir = static_dir();
        let inner = dir.path().join("public");
        fs::create_dir(&inner).unwrap();
        assert_eq!(resolve_path("/../styles.css", &inner), None);
        assert_eq!(resolve_path("/icons/../../etc/passwd", dir.path()), None);
    }

    #[test]
    fn test_resolve_missing_root() {
        assert_eq!(
            resolve_path("/styles.css", Path::new("/nonexistent-static-root")),
            None
        );
    }
}
