//! File helpers for environment storage.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};

/// Write `contents` to `path` so readers never observe a partial file.
///
/// Writes a sibling temporary file, flushes it and renames it over the
/// target. On Unix the file is created with mode `0600`.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let tmp = temp_path(path);
    let write_failed = |source| StoreError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let mut options = fs::OpenOptions::new();
    options.create(true).truncate(true).write(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let result = options.open(&tmp).and_then(|mut file| {
        file.write_all(contents)?;
        file.sync_all()
    });
    if let Err(e) = result {
        let _ = fs::remove_file(&tmp);
        return Err(write_failed(e).into());
    }

    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        write_failed(e)
    })?;
    Ok(())
}

/// Read a file to a string, mapping errors to `StoreError::ReadFailed`.
pub fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| {
        StoreError::ReadFailed {
            path: path.to_path_buf(),
            source,
        }
        .into()
    })
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}
