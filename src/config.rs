use std::path::{Path, PathBuf};

use color_eyre::Result;
use color_eyre::eyre::{Context, eyre};
use serde::{Deserialize, Serialize};

const APP_DIR: &str = "venue-listings";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Path of the SQLite database file. `~/` is expanded.
    #[serde(default = "default_database")]
    database: String,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            server: ServerConfig::default(),
        }
    }
}

fn default_database() -> String {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR).join("listings.db"))
        .unwrap_or_else(|| PathBuf::from("listings.db"))
        .to_string_lossy()
        .to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Config {
    /// Load config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .context(format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Default location of the config file
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|path| path.join(APP_DIR).join("config.toml"))
    }

    /// Load the config from its default location, falling back to defaults
    /// when no file exists yet.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                log::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Write the default config to its default location, if it doesn't exist
    pub fn create_default() -> Result<PathBuf> {
        let path = Self::config_path().ok_or_else(|| eyre!("No config directory available"))?;
        Self::default().write_new(&path)?;
        Ok(path)
    }

    fn write_new(&self, path: &Path) -> Result<()> {
        if path.exists() {
            log::info!("Config file already exists at: {}", path.display());
            return Ok(());
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context(format!(
                "Failed to create config directory: {}",
                parent.display()
            ))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, contents)
            .context(format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Expand ~ to home directory
    fn expand_path(&self, path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/")
            && let Some(home) = dirs::home_dir()
        {
            return home.join(rest);
        }
        PathBuf::from(path)
    }

    /// Get expanded database path
    pub fn database_path(&self) -> PathBuf {
        self.expand_path(&self.database)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_from_file_reads_all_sections() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
database = "/var/lib/listings/listings.db"

[server]
host = "0.0.0.0"
port = 8080
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(
            config.database_path(),
            PathBuf::from("/var/lib/listings/listings.db")
        );
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 9000\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.database, default_database());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "server = 5").unwrap();

        assert!(Config::from_file(&path).is_err());
        assert!(Config::from_file(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn test_write_new_round_trips_and_keeps_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.server.port = 6000;
        config.write_new(&path).unwrap();
        assert_eq!(Config::from_file(&path).unwrap(), config);

        // A second write leaves the existing file alone
        Config::default().write_new(&path).unwrap();
        assert_eq!(Config::from_file(&path).unwrap().server.port, 6000);
    }

    #[test]
    fn test_expand_path_home() {
        let config = Config::default();
        if let Some(home) = dirs::home_dir() {
            assert_eq!(config.expand_path("~/db.sqlite"), home.join("db.sqlite"));
        }
        assert_eq!(config.expand_path("/tmp/db.sqlite"), PathBuf::from("/tmp/db.sqlite"));
    }
}
