use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use crate::services::geolocation::{GeolocationOptions, DEFAULT_LATITUDE, DEFAULT_LONGITUDE};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub location: LocationSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// No geolocation support: always use the default area
    None,
    /// Ask the JSON lookup endpoint in `provider_url`
    Http,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationSettings {
    #[serde(default = "default_latitude")]
    pub default_latitude: f64,
    #[serde(default = "default_longitude")]
    pub default_longitude: f64,
    #[serde(default = "default_provider")]
    pub provider: ProviderKind,
    pub provider_url: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_maximum_age_secs")]
    pub maximum_age_secs: u64,
    #[serde(default = "default_true")]
    pub high_accuracy: bool,
}

impl Default for LocationSettings {
    fn default() -> Self {
        Self {
            default_latitude: default_latitude(),
            default_longitude: default_longitude(),
            provider: default_provider(),
            provider_url: None,
            timeout_ms: default_timeout_ms(),
            maximum_age_secs: default_maximum_age_secs(),
            high_accuracy: true,
        }
    }
}

impl LocationSettings {
    pub fn geolocation_options(&self) -> GeolocationOptions {
        GeolocationOptions {
            timeout: Duration::from_millis(self.timeout_ms),
            maximum_age: Duration::from_secs(self.maximum_age_secs),
            high_accuracy: self.high_accuracy,
        }
    }
}

fn default_latitude() -> f64 { DEFAULT_LATITUDE }
fn default_longitude() -> f64 { DEFAULT_LONGITUDE }
fn default_provider() -> ProviderKind { ProviderKind::None }
fn default_timeout_ms() -> u64 { 5000 }
fn default_maximum_age_secs() -> u64 { 60 }
fn default_true() -> bool { true }

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_radius_km")]
    pub default_radius_km: f64,
    #[serde(default = "default_max_radius_km")]
    pub max_radius_km: f64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_radius_km: default_radius_km(),
            max_radius_km: default_max_radius_km(),
        }
    }
}

fn default_radius_km() -> f64 { 1.0 }
fn default_max_radius_km() -> f64 { 100.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_true")]
    pub include_samples: bool,
    pub feed_path: Option<String>,
    pub current_member_id: Option<i64>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            include_samples: true,
            feed_path: None,
            current_member_id: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from files and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SKILLSWAP_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., SKILLSWAP__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        settings.try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("SKILLSWAP")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_location() {
        let location = LocationSettings::default();
        assert_eq!(location.default_latitude, 28.6139);
        assert_eq!(location.default_longitude, 77.209);
        assert_eq!(location.provider, ProviderKind::None);

        let options = location.geolocation_options();
        assert_eq!(options.timeout, Duration::from_secs(5));
        assert_eq!(options.maximum_age, Duration::from_secs(60));
        assert!(options.high_accuracy);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(
            &path,
            r#"
[server]
port = 9090

[location]
provider = "http"
provider_url = "https://ipapi.co/json"
timeout_ms = 2500

[search]
max_radius_km = 50.0
"#,
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();

        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.location.provider, ProviderKind::Http);
        assert_eq!(settings.location.timeout_ms, 2500);
        assert_eq!(settings.location.maximum_age_secs, 60);
        assert_eq!(settings.search.max_radius_km, 50.0);
        assert_eq!(settings.search.default_radius_km, 1.0);
        assert!(settings.catalog.include_samples);
    }
}
