use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data: DataConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory where built-in catalog datasets are stored.
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig {
                data_dir: default_data_dir(),
            },
        }
    }
}

fn default_data_dir() -> PathBuf {
    #[allow(deprecated)]
    let home = std::env::home_dir();
    home.unwrap_or_else(std::env::temp_dir).join(".rateset")
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("RATESET"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_data_dir_is_hidden_under_home() {
        let config = Config::default();
        assert!(config.data.data_dir.ends_with(".rateset"));
    }
}
