//! Process configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::cache::CacheConfig;
use crate::geocode::GeocodeConfig;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Errors from reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}={value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Configuration for the trip server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// JSON file holding saved trips
    pub data_path: PathBuf,
    /// Directory of static front-end assets
    pub static_dir: PathBuf,
    pub geocode: GeocodeConfig,
    pub cache: CacheConfig,
}

impl ServerConfig {
    /// Read configuration from environment variables, using defaults for
    /// anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(value) = var("TRIP_BIND_ADDR") {
            let addr: SocketAddr = value.trim().parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::Invalid {
                    var: "TRIP_BIND_ADDR",
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?;
            config = config.with_bind_addr(addr);
        }
        if let Some(path) = var("TRIP_DATA_PATH") {
            config = config.with_data_path(path);
        }
        if let Some(dir) = var("TRIP_STATIC_DIR") {
            config = config.with_static_dir(dir);
        }

        let mut geocode = config.geocode.clone();
        if let Some(url) = var("GEOCODE_SEARCH_URL") {
            geocode = geocode.with_search_url(url);
        }
        if let Some(url) = var("GEOCODE_REVERSE_URL") {
            geocode = geocode.with_reverse_url(url);
        }
        if let Some(code) = var("GEOCODE_COUNTRY_CODE") {
            geocode.country_code = code;
        }
        if let Some(name) = var("GEOCODE_COUNTRY_NAME") {
            geocode.country_name = name;
        }
        if let Some(agent) = var("GEOCODE_USER_AGENT") {
            geocode = geocode.with_user_agent(agent);
        }

        Ok(config.with_geocode(geocode))
    }

    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = dir.into();
        self
    }

    pub fn with_geocode(mut self, geocode: GeocodeConfig) -> Self {
        self.geocode = geocode;
        self
    }

    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            data_path: PathBuf::from("trips.json"),
            static_dir: PathBuf::from("public"),
            geocode: GeocodeConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}
