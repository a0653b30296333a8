//! Configuration file management
//!
//! TOML configuration loaded from `~/.cinedb/config.toml`. Both sections are
//! optional; a missing file yields the defaults.
//!
//! # Configuration Format
//!
//! ```toml
//! [connection]
//! host = "localhost"
//! port = 5432
//! dbname = "cinema_db"
//! user = "cinema_user"
//! password = "secret"
//!
//! [ui]
//! color = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// CLI configuration loaded from TOML file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database connection settings
    pub connection: Option<ConnectionConfig>,

    /// UI preferences
    pub ui: Option<UiConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_dbname")]
    pub dbname: String,

    #[serde(default = "default_user")]
    pub user: String,

    /// Omitted when the server trusts the client or PGPASSFILE applies
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Enable colored output
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    5432
}

fn default_dbname() -> String {
    "cinema_db".to_string()
}

fn default_user() -> String {
    "cinema_user".to_string()
}

fn default_color() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            connection: Some(ConnectionConfig {
                host: default_host(),
                port: default_port(),
                dbname: default_dbname(),
                user: default_user(),
                password: None,
            }),
            ui: Some(UiConfig {
                color: default_color(),
            }),
        }
    }
}

pub fn expand_config_path(path: &Path) -> PathBuf {
    let path_str = path.to_str().unwrap_or("~/.cinedb/config.toml");
    if let Some(rest) = path_str.strip_prefix("~/") {
        if let Some(home_dir) = dirs::home_dir() {
            return home_dir.join(rest);
        }
    }
    path.to_path_buf()
}

pub fn default_config_path() -> PathBuf {
    expand_config_path(Path::new("~/.cinedb/config.toml"))
}

impl Config {
    /// Load configuration from file
    ///
    /// Returns default configuration if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        let path = expand_config_path(path);

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let path = expand_config_path(path);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::error::CliError::Config(format!("Failed to serialize: {}", e)))?;

        std::fs::write(&path, contents)?;
        Ok(())
    }

    pub fn resolved_connection(&self) -> ConnectionConfig {
        self.connection.clone().unwrap_or(ConnectionConfig {
            host: default_host(),
            port: default_port(),
            dbname: default_dbname(),
            user: default_user(),
            password: None,
        })
    }

    pub fn resolved_ui(&self) -> UiConfig {
        self.ui.clone().unwrap_or(UiConfig {
            color: default_color(),
        })
    }
}

impl ConnectionConfig {
    /// Build the libpq-style connection string the store connects with.
    pub fn connection_string(&self) -> String {
        let mut s = format!(
            "host={} port={} dbname={} user={}",
            self.host, self.port, self.dbname, self.user
        );
        if let Some(ref password) = self.password {
            s.push_str(&format!(" password={}", password));
        }
        s
    }
}
