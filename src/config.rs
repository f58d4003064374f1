use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cache::{FreshnessPolicy, DEFAULT_CACHE_VERSION, DEFAULT_NAMESPACE};
use crate::executor::ExecutorDelays;
use crate::place::MAX_PHOTOS;

/// Environment variable holding the provider API key unless overridden.
const DEFAULT_API_KEY_ENV: &str = "PLACECACHE_API_KEY";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub provider: ProviderConfig,
  /// Remote document store; without one, fallbacks always miss
  #[serde(default)]
  pub remote_store: Option<RemoteStoreConfig>,
  #[serde(default)]
  pub cache: CacheConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
  /// Base URL of the details API (e.g. "https://maps.example.com/api/place/")
  pub url: String,
  /// Name of the environment variable holding the API key
  #[serde(default)]
  pub api_key_env: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteStoreConfig {
  pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
  /// When false, nothing is read from or written to local storage
  pub enabled: bool,
  /// Bump to purge every cached entry on next access
  pub version: String,
  /// Key prefix for cached entries
  pub namespace: String,
  /// Database path (defaults to the platform data directory)
  pub path: Option<PathBuf>,
  pub data_ttl_secs: u64,
  pub photo_ttl_secs: u64,
  pub aging_threshold_secs: u64,
  pub max_photos: usize,
  pub photo_refresh_delay_ms: u64,
  pub aging_refresh_delay_ms: u64,
}

impl Default for CacheConfig {
  fn default() -> Self {
    let policy = FreshnessPolicy::default();
    let delays = ExecutorDelays::default();

    Self {
      enabled: true,
      version: DEFAULT_CACHE_VERSION.to_string(),
      namespace: DEFAULT_NAMESPACE.to_string(),
      path: None,
      data_ttl_secs: policy.data_ttl.num_seconds() as u64,
      photo_ttl_secs: policy.photo_ttl.num_seconds() as u64,
      aging_threshold_secs: policy.aging_threshold.num_seconds() as u64,
      max_photos: MAX_PHOTOS,
      photo_refresh_delay_ms: delays.photo_repair.as_millis() as u64,
      aging_refresh_delay_ms: delays.aging_refresh.as_millis() as u64,
    }
  }
}

impl CacheConfig {
  pub fn freshness_policy(&self) -> FreshnessPolicy {
    FreshnessPolicy {
      data_ttl: secs(self.data_ttl_secs),
      photo_ttl: secs(self.photo_ttl_secs),
      aging_threshold: secs(self.aging_threshold_secs),
    }
  }

  pub fn executor_delays(&self) -> ExecutorDelays {
    ExecutorDelays {
      photo_repair: Duration::from_millis(self.photo_refresh_delay_ms),
      aging_refresh: Duration::from_millis(self.aging_refresh_delay_ms),
      ..ExecutorDelays::default()
    }
  }
}

/// Out-of-range values saturate instead of overflowing.
fn secs(value: u64) -> chrono::Duration {
  i64::try_from(value)
    .ok()
    .and_then(chrono::Duration::try_seconds)
    .unwrap_or(chrono::Duration::MAX)
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./placecache.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/placecache/config.yaml
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    match path {
      Some(p) => Self::load_from_path(&p),
      None => Err(eyre!(
        "No configuration file found. Create one at ~/.config/placecache/config.yaml"
      )),
    }
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("placecache.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("placecache").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::from_yaml(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  pub fn from_yaml(contents: &str) -> Result<Self> {
    serde_yaml::from_str(contents).map_err(|e| eyre!("{}", e))
  }

  /// Get the provider API key from the environment.
  pub fn get_api_key(&self) -> Result<String> {
    let var = self
      .provider
      .api_key_env
      .as_deref()
      .unwrap_or(DEFAULT_API_KEY_ENV);

    std::env::var(var).map_err(|_| eyre!("Provider API key not found. Set the {} environment variable.", var))
  }
}
