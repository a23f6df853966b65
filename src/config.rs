//! Application configuration.
//!
//! Settings persist as JSON in the user's home directory. Command-line flags
//! win over environment variables, which win over the file, which wins over
//! built-in defaults.

use crate::consts::dashboard_consts::market::DEFAULT_PRIMARY_EXCHANGE;
use crate::consts::dashboard_consts::network::DEFAULT_SERVER_URL;
use crate::consts::dashboard_consts::timing::refresh_ack_timeout;
use crate::dashboard::DashboardOptions;
use crate::format::NumberLocale;
use crate::push::WebSocketSource;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs, io};

pub const SERVER_URL_ENV: &str = "MARKET_DASHBOARD_URL";
pub const WS_URL_ENV: &str = "MARKET_DASHBOARD_WS_URL";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Root URL of the dashboard server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,
    /// Push channel URL. Derived from `server_url` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ws_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_exchange: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_ack_timeout_secs: Option<u64>,
}

impl Config {
    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Load the file if there is one; a missing or unreadable file yields defaults.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Config::default();
        }
        Config::load_from_file(path).unwrap_or_else(|e| {
            crate::print_cmd_warn!("Ignoring config file", "{}: {}", path.display(), e);
            Config::default()
        })
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if writing to file fails or serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Remove the configuration file. A missing file is not an error.
    pub fn clear(path: &Path) -> Result<(), io::Error> {
        match fs::remove_file(path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }

    /// Overlay the fields set in `other`.
    pub fn merge(&mut self, other: Config) {
        if other.server_url.is_some() {
            self.server_url = other.server_url;
        }
        if other.ws_url.is_some() {
            self.ws_url = other.ws_url;
        }
        if other.locale.is_some() {
            self.locale = other.locale;
        }
        if other.primary_exchange.is_some() {
            self.primary_exchange = other.primary_exchange;
        }
        if other.refresh_ack_timeout_secs.is_some() {
            self.refresh_ack_timeout_secs = other.refresh_ack_timeout_secs;
        }
    }
}

/// Location of the config file: `~/.market-dashboard/config.json`.
pub fn get_config_path() -> Result<PathBuf, io::Error> {
    let home = home::home_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "Home directory not found"))?;
    Ok(home.join(".market-dashboard").join("config.json"))
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub server_url: Option<String>,
    pub ws_url: Option<String>,
    pub locale: Option<String>,
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub server_url: String,
    pub ws_url: String,
    pub locale: NumberLocale,
    pub primary_exchange: String,
    pub refresh_ack_timeout: Duration,
}

impl Settings {
    pub fn resolve(overrides: &Overrides, config: &Config) -> Self {
        Self::resolve_with_env(overrides, config, |key| env::var(key).ok())
    }

    fn resolve_with_env(
        overrides: &Overrides,
        config: &Config,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let server_url = overrides
            .server_url
            .clone()
            .or_else(|| env(SERVER_URL_ENV))
            .or_else(|| config.server_url.clone())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        let ws_url = overrides
            .ws_url
            .clone()
            .or_else(|| env(WS_URL_ENV))
            .or_else(|| config.ws_url.clone())
            .unwrap_or_else(|| WebSocketSource::url_for_server(&server_url));

        let locale = overrides
            .locale
            .as_deref()
            .or(config.locale.as_deref())
            .map(NumberLocale::resolve)
            .unwrap_or_default();

        Self {
            server_url,
            ws_url,
            locale,
            primary_exchange: config
                .primary_exchange
                .clone()
                .unwrap_or_else(|| DEFAULT_PRIMARY_EXCHANGE.to_string()),
            refresh_ack_timeout: config
                .refresh_ack_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or_else(refresh_ack_timeout),
        }
    }

    pub fn dashboard_options(&self) -> DashboardOptions {
        DashboardOptions {
            locale: self.locale,
            primary_exchange: self.primary_exchange.clone(),
            refresh_ack_timeout: self.refresh_ack_timeout,
            ..DashboardOptions::default()
        }
    }
}
