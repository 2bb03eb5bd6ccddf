//! Local directories used by the application.

use std::path::PathBuf;

use crate::error::AppError;

/// Get the path to the log directory.
pub fn log_directory(app_dir: &str) -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(std::env::temp_dir);
    base.join(app_dir).join("logs")
}

/// Initialize the log directory.
pub fn init_log_directory(app_dir: &str) -> Result<PathBuf, AppError> {
    let log_dir = log_directory(app_dir);
    if !log_dir.exists() {
        std::fs::create_dir_all(&log_dir)?;
    }
    Ok(log_dir)
}
