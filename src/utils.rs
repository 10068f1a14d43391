use std::env;
use std::path::{Component, Path, PathBuf};
use tracing::warn;

/// Lexically folds `.` and `..` components out of a path without touching
/// the filesystem.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Makes a path absolute against the current directory, then normalizes it
/// lexically. Symlinks are left alone and the path does not have to exist.
///
/// Returns `None` when a relative path cannot be resolved because the
/// current directory is unavailable.
pub fn absolutize(path: &Path) -> Option<PathBuf> {
    if path.is_absolute() {
        return Some(normalize_path(path));
    }
    match env::current_dir() {
        Ok(cwd) => Some(normalize_path(&cwd.join(path))),
        Err(err) => {
            warn!(
                "Cannot resolve {:?} against the current directory: {}",
                path, err
            );
            None
        }
    }
}
