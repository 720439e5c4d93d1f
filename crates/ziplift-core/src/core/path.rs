use crate::core::error::{ZipliftError, ZipliftResult};
use std::path::PathBuf;

/// Get the ziplift home directory
///
/// Platform-specific locations:
/// - Windows: %APPDATA%\ziplift
/// - Linux: ~/.config/ziplift
/// - macOS: ~/Library/Application Support/ziplift
pub fn ziplift_home() -> ZipliftResult<PathBuf> {
    let config_dir = dirs::config_dir().ok_or_else(|| {
        ZipliftError::Config("Could not determine config directory".to_string())
    })?;
    Ok(config_dir.join("ziplift"))
}

/// Get the config file path (`<ziplift_home>/config.yaml`)
pub fn config_file() -> ZipliftResult<PathBuf> {
    Ok(ziplift_home()?.join("config.yaml"))
}
