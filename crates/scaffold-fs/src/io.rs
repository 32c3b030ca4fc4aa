//! Atomic text I/O

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};

use crate::{Error, NormalizedPath, Result};

/// Write content atomically to a file.
///
/// Uses write-to-temp-then-rename strategy to prevent partial writes.
/// Parent directories are created as needed.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    // Temp file lives in the same directory so the rename stays on one filesystem
    let temp_name = format!(
        ".{}.{}.tmp",
        native_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = native_path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(&temp_path, e))?;
    temp_file
        .sync_all()
        .map_err(|e| Error::io(&temp_path, e))?;
    drop(temp_file);

    fs::rename(&temp_path, &native_path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        Error::io(&native_path, e)
    })?;

    Ok(())
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Read a file's bytes, returning `None` when it does not exist.
pub fn read_if_exists(path: &NormalizedPath) -> Result<Option<Vec<u8>>> {
    let native_path = path.to_native();
    match fs::read(&native_path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(&native_path, e)),
    }
}

/// Write text content to a file atomically.
pub fn write_text(path: &NormalizedPath, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Remove a file. Returns `false` if it was already gone.
pub fn remove_file(path: &NormalizedPath) -> Result<bool> {
    let native_path = path.to_native();
    match fs::remove_file(&native_path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::io(&native_path, e)),
    }
}

/// Remove empty directories from `dir` upwards, stopping at `root`.
///
/// `root` itself is never removed. Returns the directories that were removed.
pub fn prune_empty_dirs(dir: &NormalizedPath, root: &NormalizedPath) -> Result<Vec<NormalizedPath>> {
    let mut removed = Vec::new();
    let mut current = dir.clone();
    let prefix = format!("{}/", root.as_str().trim_end_matches('/'));
    let inside = |path: &NormalizedPath| root.as_str() == "." || path.as_str().starts_with(&prefix);

    while current != *root && inside(&current) && current.is_dir() {
        let native = current.to_native();
        let mut entries = fs::read_dir(&native).map_err(|e| Error::io(&native, e))?;
        if entries.next().is_some() {
            break;
        }
        fs::remove_dir(&native).map_err(|e| Error::io(&native, e))?;
        tracing::debug!(dir = %current, "Removed empty directory");
        removed.push(current.clone());

        match current.parent() {
            Some(parent) => current = parent,
            None => break,
        }
    }

    Ok(removed)
}
