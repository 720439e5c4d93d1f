use std::path::Path;
use ziplift::core::path::config_file;
use ziplift::core::{ZipliftError, ZipliftResult};

/// Print the effective config as YAML
pub fn show(config_path: Option<&Path>) -> ZipliftResult<()> {
    let config = super::load_config(config_path)?;
    let yaml = serde_yaml::to_string(&config)
        .map_err(|e| ZipliftError::Config(format!("Failed to serialize config: {}", e)))?;
    print!("{}", yaml);
    Ok(())
}

/// Print where the config file is read from
pub fn path(config_path: Option<&Path>) -> ZipliftResult<()> {
    match config_path {
        Some(path) => println!("{}", path.display()),
        None => println!("{}", config_file()?.display()),
    }
    Ok(())
}
