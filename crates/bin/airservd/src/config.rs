//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `airserv.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use serde::Deserialize;

use airserv_app::housekeeping::HousekeepingConfig;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Background maintenance settings.
    pub housekeeping: HousekeepingSection,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Housekeeping loop configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HousekeepingSection {
    /// Run the loop at all.
    pub enabled: bool,
    /// Seconds between two sweeps.
    pub interval_secs: u64,
    /// Age in days after which activity entries are purged. `0` keeps them.
    pub activity_retention_days: u32,
    /// Recompute every service status on each sweep.
    pub reconcile_on_sweep: bool,
}

impl Config {
    /// Load configuration from `airserv.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("airserv.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("AIRSERV_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("AIRSERV_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("AIRSERV_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("AIRSERV_DATABASE_URL") {
            self.database.url = val;
        }
        if let Some(val) = var("AIRSERV_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(days) = var("AIRSERV_ACTIVITY_RETENTION_DAYS").and_then(|val| val.parse().ok())
        {
            self.housekeeping.activity_retention_days = days;
        }
        if let Some(secs) =
            var("AIRSERV_HOUSEKEEPING_INTERVAL_SECS").and_then(|val| val.parse().ok())
        {
            self.housekeeping.interval_secs = secs;
        }
        if let Some(flag) = var("AIRSERV_RECONCILE_ON_SWEEP").and_then(|val| val.parse().ok()) {
            self.housekeeping.reconcile_on_sweep = flag;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.housekeeping.enabled && self.housekeeping.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "housekeeping interval must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    /// Housekeeping loop settings, `None` when the loop is disabled.
    #[must_use]
    pub fn housekeeping(&self) -> Option<HousekeepingConfig> {
        let section = &self.housekeeping;
        section.enabled.then(|| HousekeepingConfig {
            interval: Duration::from_secs(section.interval_secs),
            activity_retention: (section.activity_retention_days > 0)
                .then(|| chrono::Duration::days(i64::from(section.activity_retention_days))),
            reconcile: section.reconcile_on_sweep,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:airserv.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "airservd=info,airserv=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for HousekeepingSection {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 3600,
            activity_retention_days: 90,
            reconcile_on_sweep: true,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.url, "sqlite:airserv.db?mode=rwc");
        assert!(config.housekeeping.enabled);
        assert_eq!(config.housekeeping.activity_retention_days, 90);
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9090

            [database]
            url = 'sqlite:test.db'

            [logging]
            filter = 'debug'

            [housekeeping]
            enabled = true
            interval_secs = 60
            activity_retention_days = 7
            reconcile_on_sweep = false
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.database.url, "sqlite:test.db");
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.housekeeping.interval_secs, 60);
        assert_eq!(config.housekeeping.activity_retention_days, 7);
        assert!(!config.housekeeping.reconcile_on_sweep);
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_interval_only_when_enabled() {
        let mut config = Config::default();
        config.housekeeping.interval_secs = 0;
        assert!(config.validate().is_err());

        config.housekeeping.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_format_bind_addr() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn should_apply_environment_overrides() {
        let mut config = Config::default();
        config.apply_overrides(env(&[
            ("AIRSERV_BIND", "127.0.0.1:8088"),
            ("AIRSERV_DATABASE_URL", "sqlite::memory:"),
            ("AIRSERV_LOG", "warn"),
            ("AIRSERV_ACTIVITY_RETENTION_DAYS", "30"),
            ("AIRSERV_HOUSEKEEPING_INTERVAL_SECS", "120"),
            ("AIRSERV_RECONCILE_ON_SWEEP", "false"),
        ]));

        assert_eq!(config.bind_addr(), "127.0.0.1:8088");
        assert_eq!(config.database_url(), "sqlite::memory:");
        assert_eq!(config.logging.filter, "warn");
        assert_eq!(config.housekeeping.activity_retention_days, 30);
        assert_eq!(config.housekeeping.interval_secs, 120);
        assert!(!config.housekeeping.reconcile_on_sweep);
    }

    #[test]
    fn should_prefer_rust_log_over_airserv_log() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("AIRSERV_LOG", "warn"), ("RUST_LOG", "trace")]));
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_ignore_unparsable_port_override() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("AIRSERV_PORT", "http")]));
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_build_housekeeping_config() {
        let mut config = Config::default();
        let housekeeping = config.housekeeping().unwrap();
        assert_eq!(housekeeping.interval, Duration::from_secs(3600));
        assert_eq!(
            housekeeping.activity_retention,
            Some(chrono::Duration::days(90))
        );
        assert!(housekeeping.reconcile);

        config.housekeeping.activity_retention_days = 0;
        assert!(config.housekeeping().unwrap().activity_retention.is_none());

        config.housekeeping.enabled = false;
        assert!(config.housekeeping().is_none());
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
