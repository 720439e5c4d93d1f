pub mod check;
pub mod config;
pub mod inspect;
pub mod prompt;
pub mod upload;

use std::path::Path;
use ziplift::config::Config;
use ziplift::core::ZipliftResult;

/// Load config from `--config`, or the platform default location
pub fn load_config(path: Option<&Path>) -> ZipliftResult<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}
