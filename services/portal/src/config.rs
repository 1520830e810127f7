//! services/portal/src/config.rs
//!
//! Defines the portal's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    /// Base URL of the campus REST backend. When absent the portal serves the
    /// in-memory demo data instead.
    pub campus_api_url: Option<String>,
    pub campus_api_token: Option<String>,
    /// Restricts the HoD approval queues to one department.
    pub hod_department: Option<String>,
    pub log_level: Level,
    pub settings_dir: PathBuf,
    pub frontend_origin: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Server Settings ---
        let bind_address_str =
            lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Campus Backend ---
        let campus_api_url = match lookup("CAMPUS_API_URL") {
            Some(url) if url.trim().is_empty() => None,
            Some(url) if !url.starts_with("http://") && !url.starts_with("https://") => {
                return Err(ConfigError::InvalidValue(
                    "CAMPUS_API_URL".to_string(),
                    format!("'{}' is not an http(s) URL", url),
                ))
            }
            Some(url) => Some(url.trim_end_matches('/').to_string()),
            None => None,
        };
        let campus_api_token = lookup("CAMPUS_API_TOKEN").filter(|t| !t.is_empty());
        let hod_department = lookup("HOD_DEPARTMENT").filter(|d| !d.trim().is_empty());

        // --- Local Storage & Browser Access ---
        let settings_dir = lookup("SETTINGS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./settings"));
        let frontend_origin =
            lookup("FRONTEND_ORIGIN").unwrap_or_else(|| "http://localhost:5173".to_string());

        Ok(Self {
            bind_address,
            campus_api_url,
            campus_api_token,
            hod_department,
            log_level,
            settings_dir,
            frontend_origin,
        })
    }

    /// True when no backend URL is configured.
    pub fn demo_mode(&self) -> bool {
        self.campus_api_url.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_address.port(), 3000);
        assert_eq!(config.log_level, Level::INFO);
        assert!(config.demo_mode());
        assert_eq!(config.settings_dir, PathBuf::from("./settings"));
    }

    #[test]
    fn backend_url_is_normalised() {
        let config = Config::from_lookup(lookup(&[
            ("CAMPUS_API_URL", "https://campus.example.edu/api/"),
            ("CAMPUS_API_TOKEN", ""),
        ]))
        .unwrap();
        assert_eq!(
            config.campus_api_url.as_deref(),
            Some("https://campus.example.edu/api")
        );
        assert!(config.campus_api_token.is_none());
        assert!(config.hod_department.is_none());
        assert!(!config.demo_mode());
    }

    #[test]
    fn invalid_values_are_reported() {
        assert!(matches!(
            Config::from_lookup(lookup(&[("BIND_ADDRESS", "nowhere")])),
            Err(ConfigError::InvalidValue(ref var, _)) if var == "BIND_ADDRESS"
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("CAMPUS_API_URL", "ftp://campus")])),
            Err(ConfigError::InvalidValue(ref var, _)) if var == "CAMPUS_API_URL"
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("RUST_LOG", "chatty")])),
            Err(ConfigError::InvalidValue(ref var, _)) if var == "RUST_LOG"
        ));
    }
}
