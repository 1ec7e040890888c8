//! Filesystem checks and cleanup

use std::fs;
use std::io;
use std::path::Path;

pub fn is_file(path: &Path) -> bool {
    fs::metadata(path).map(|meta| meta.is_file()).unwrap_or(false)
}

pub fn path_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// A directory that is empty or only holds `.git`.
pub fn is_empty_dir(path: &Path) -> io::Result<bool> {
    let names: Vec<_> =
        fs::read_dir(path)?.map(|entry| entry.map(|e| e.file_name())).collect::<io::Result<_>>()?;
    Ok(names.is_empty() || (names.len() == 1 && names[0] == ".git"))
}

/// First of `files` that exists as a regular file.
pub fn find_exists<P: AsRef<Path>>(files: &[P]) -> Option<&Path> {
    files.iter().map(|file| file.as_ref()).find(|file| is_file(file))
}

/// Remove everything inside `dir`, keeping `dir` itself. Best effort.
pub fn empty_dir(dir: &Path) {
    if !path_exists(dir) {
        return;
    }

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::debug!(dir = %dir.display(), error = %err, "Failed to empty dir");
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        let removed = if is_dir { fs::remove_dir_all(&path) } else { fs::remove_file(&path) };
        if let Err(err) = removed {
            tracing::debug!(path = %path.display(), error = %err, "Failed to empty dir");
        }
    }
}
