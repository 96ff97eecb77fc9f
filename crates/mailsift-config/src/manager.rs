use crate::{AppConfig, ConfigError};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

const ORG: &str = "io";
const AUTHOR: &str = "MailSift";
const APP: &str = "MailSift";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
    data_dir: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, ConfigError> {
        let dirs = ProjectDirs::from(ORG, AUTHOR, APP).ok_or(ConfigError::MissingDirectories)?;
        Self::at(dirs.config_dir(), dirs.data_dir())
    }

    /// Root both directories at explicit paths. Used by tests and by shells
    /// that manage their own profile layout.
    pub fn at(config_dir: &Path, data_dir: &Path) -> Result<Self, ConfigError> {
        fs::create_dir_all(config_dir)?;
        fs::create_dir_all(data_dir)?;

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            let initial = AppConfig::default();
            fs::write(&config_path, toml::to_string_pretty(&initial)?)?;
            tracing::info!(path = %config_path.display(), "wrote default config");
        }

        Ok(Self {
            config_path,
            data_dir: data_dir.to_path_buf(),
        })
    }

    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let content = fs::read_to_string(&self.config_path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        fs::write(&self.config_path, toml::to_string_pretty(config)?)?;
        Ok(())
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Location of the optional persisted session file.
    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join("session.json")
    }
}
