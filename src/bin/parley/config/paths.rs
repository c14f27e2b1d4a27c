use std::path::PathBuf;

use super::error::ConfigError;

const APP_DIR: &str = "parley";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub config_file: PathBuf,
    pub logs_dir: PathBuf,
}

impl ConfigPaths {
    pub fn resolve(config_override: Option<PathBuf>) -> Result<Self, ConfigError> {
        let data_dir = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or(ConfigError::MissingHome)?
            .join(APP_DIR);
        let config_file = match config_override {
            Some(path) => path,
            None => dirs::config_dir()
                .ok_or(ConfigError::MissingHome)?
                .join(APP_DIR)
                .join(CONFIG_FILE),
        };
        Ok(Self {
            config_file,
            logs_dir: data_dir.join("logs"),
        })
    }
}
