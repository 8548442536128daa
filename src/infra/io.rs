use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::{GenError, Result};

/// Read a source file as UTF-8.
pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| GenError::FileUnreadable {
        path: path.to_path_buf(),
        source,
    })
}

/// Replace `path` with `data` via a temp file in the same directory, so a
/// failed write never leaves a truncated source file behind.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let fail = |source: std::io::Error| GenError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    // Same directory keeps the final rename on one filesystem
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    // Preserve original permissions
    let perms = fs::metadata(path).map(|m| m.permissions()).ok();

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(fail)?;
    tmp.write_all(data).map_err(fail)?;
    tmp.as_file().sync_all().map_err(fail)?;

    if let Some(perms) = perms {
        fs::set_permissions(tmp.path(), perms).map_err(fail)?;
    }

    tmp.persist(path).map_err(|e| fail(e.error))?;

    Ok(())
}
