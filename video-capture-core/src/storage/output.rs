use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::models::config::SessionConfiguration;
use crate::models::error::CaptureError;

/// Directory containing the running executable.
pub fn executable_directory() -> Result<PathBuf, CaptureError> {
    let exe = std::env::current_exe()
        .map_err(|e| CaptureError::StorageError(format!("failed to locate executable: {}", e)))?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| CaptureError::StorageError(format!("executable has no parent: {}", exe.display())))
}

/// Where the clip is saved: the configured directory, or the executable's
/// directory, joined with the clip file name.
pub fn clip_path(config: &SessionConfiguration) -> Result<PathBuf, CaptureError> {
    let directory = match &config.output_directory {
        Some(dir) => dir.clone(),
        None => executable_directory()?,
    };
    Ok(directory.join(&config.clip_file_name))
}

/// Delete the file at `path` if there is one. Returns whether a file was
/// removed.
pub fn remove_existing(path: &Path) -> Result<bool, CaptureError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(CaptureError::StorageError(format!(
            "failed to remove {}: {}",
            path.display(),
            e
        ))),
    }
}
