//! Image persistence.
//!
//! This module handles writing the finished image to disk as an executable.

use anyhow::{Context, Result};
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

/// Write an image to disk and mark it executable.
pub fn write_executable(output_path: &Path, image: &[u8]) -> Result<()> {
    std::fs::write(output_path, image)
        .with_context(|| format!("failed to write {}", output_path.display()))?;

    let mut perms = std::fs::metadata(output_path)?.permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(output_path, perms)?;

    Ok(())
}
