//! Application configuration loaded from environment variables.

use std::path::PathBuf;

use cart::{CartConfig, RemoveNotice};

/// Host configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `3000`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `CATALOG_URL` — catalog API root (default: `"http://localhost:3333"`)
/// - `CART_STORAGE_PATH` — local storage document (default: `"rocketshoes-storage.json"`)
/// - `CART_REMOVE_NOTICE` — `always` or `on-miss` (default: `always`)
/// - `CATALOG_SEED` — optional `db.json`; when set, the catalog is served
///   from memory and `CATALOG_URL` is ignored
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub catalog_url: String,
    pub storage_path: PathBuf,
    pub catalog_seed: Option<PathBuf>,
    pub remove_notice: RemoveNotice,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary variable source.
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            catalog_url: lookup("CATALOG_URL").unwrap_or(defaults.catalog_url),
            storage_path: lookup("CART_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_path),
            catalog_seed: lookup("CATALOG_SEED")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            remove_notice: lookup("CART_REMOVE_NOTICE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.remove_notice),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the cart store configuration.
    pub fn cart_config(&self) -> CartConfig {
        CartConfig::default().with_remove_notice(self.remove_notice)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            catalog_url: "http://localhost:3333".to_string(),
            storage_path: PathBuf::from("rocketshoes-storage.json"),
            catalog_seed: None,
            remove_notice: RemoveNotice::Always,
        }
    }
}
