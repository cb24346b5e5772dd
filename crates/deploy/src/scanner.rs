//! Asset scanning for upload.
//!
//! Recursively walks the built site directory and produces file entries
//! with relative paths normalized to forward slashes.

use std::path::Path;

use crate::error::DeployError;
use crate::types::SiteFile;

/// Scans a directory recursively and returns entries for upload.
///
/// Relative paths use `/` as separator (even on Windows) so they can be
/// used directly as object keys. Returns the file list and the total
/// size in bytes.
pub fn scan_site_files(root: &Path) -> Result<(Vec<SiteFile>, u64), DeployError> {
    let mut files = Vec::new();
    let mut total_size = 0u64;

    walk_dir(root, root, &mut files, &mut total_size)?;

    Ok((files, total_size))
}

fn walk_dir(
    root: &Path,
    current: &Path,
    files: &mut Vec<SiteFile>,
    total_size: &mut u64,
) -> Result<(), DeployError> {
    let entries = std::fs::read_dir(current)?;

    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        let metadata = entry.metadata()?;

        if metadata.is_dir() {
            walk_dir(root, &path, files, total_size)?;
        } else if metadata.is_file() {
            let rel_path = path.strip_prefix(root).map_err(std::io::Error::other)?;

            // Normalize to forward slashes.
            let rel_str = rel_path.to_string_lossy().replace('\\', "/");
            let size = metadata.len();

            files.push(SiteFile {
                relative_path: rel_str,
                path,
                size,
            });
            *total_size += size;
        }
    }

    Ok(())
}
