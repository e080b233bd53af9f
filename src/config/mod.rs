use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
    #[serde(default = "default_seed_defaults")]
    pub seed_defaults: bool,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_export_dir() -> String {
    ".".to_string()
}
fn default_seed_defaults() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            export_dir: default_export_dir(),
            seed_defaults: default_seed_defaults(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory (`~/.sitecycle`).
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".sitecycle")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("sitecycle.conf")
    }

    /// Return the default path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("sitecycle.sqlite")
    }

    /// Load the configuration file, or defaults if it does not exist.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Create the config directory and, unless `is_test`, write the config
    /// file. `custom_db` overrides the database path; a relative name is
    /// placed inside the config directory.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let database = match custom_db {
            Some(name) if Path::new(name).is_absolute() => name.to_string(),
            Some(name) => dir.join(name).to_string_lossy().to_string(),
            None => default_database(),
        };

        let config = Config {
            database,
            ..Self::default()
        };

        if !is_test {
            fs::write(Self::config_file(), config.to_yaml()?)?;
        }

        Ok(config)
    }
}
