//! Application configuration for ReviewHarvest.
//!
//! User config lives at `~/.reviewharvest/reviewharvest.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{HarvestError, Result};
use crate::regions::STOREFRONTS;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "reviewharvest.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".reviewharvest";

/// Lookup endpoint used by the availability probe.
const DEFAULT_LOOKUP_URL: &str = "https://itunes.apple.com/lookup";

/// Base URL of the per-region customer review feeds.
const DEFAULT_FEED_BASE_URL: &str = "https://itunes.apple.com";

/// Upper bound for every pacing and backoff setting, in seconds.
pub const MAX_DELAY_SECS: f64 = 3600.0;

// ---------------------------------------------------------------------------
// Config structs (matching reviewharvest.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Harvest defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// HTTP client and retry settings.
    #[serde(default)]
    pub http: HttpConfig,

    /// Remote endpoints.
    #[serde(default)]
    pub endpoints: EndpointsConfig,

    /// Storefront codes to scan. Defaults to the full storefront list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regions: Option<Vec<String>>,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Maximum in-window entries scanned per region.
    #[serde(default = "default_per_region_cap")]
    pub per_region_cap: u32,

    /// Recency window in days.
    #[serde(default = "default_recency_days")]
    pub recency_days: u32,

    /// Minimum target-script ratio for a review to be kept.
    #[serde(default = "default_language_threshold")]
    pub language_threshold: f64,

    /// Lower bound of the randomized pause between feed requests, in seconds.
    #[serde(default = "default_min_delay")]
    pub min_delay_secs: f64,

    /// Upper bound of the randomized pause between feed requests, in seconds.
    #[serde(default = "default_max_delay")]
    pub max_delay_secs: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            per_region_cap: default_per_region_cap(),
            recency_days: default_recency_days(),
            language_threshold: default_language_threshold(),
            min_delay_secs: default_min_delay(),
            max_delay_secs: default_max_delay(),
        }
    }
}

fn default_per_region_cap() -> u32 {
    50
}
fn default_recency_days() -> u32 {
    7
}
fn default_language_threshold() -> f64 {
    0.55
}
fn default_min_delay() -> f64 {
    0.25
}
fn default_max_delay() -> f64 {
    0.55
}

/// `[http]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Total attempts per request, including the first one.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Base of the exponential backoff, in seconds.
    #[serde(default = "default_base_delay")]
    pub base_delay_secs: f64,

    /// Upper bound of the random jitter added to each backoff, in seconds.
    #[serde(default = "default_jitter")]
    pub jitter_secs: f64,

    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
            base_delay_secs: default_base_delay(),
            jitter_secs: default_jitter(),
            user_agent: default_user_agent(),
        }
    }
}

impl HttpConfig {
    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_timeout_secs() -> u64 {
    25
}
fn default_max_attempts() -> u32 {
    6
}
fn default_base_delay() -> f64 {
    0.75
}
fn default_jitter() -> f64 {
    0.25
}
fn default_user_agent() -> String {
    concat!("ReviewHarvest/", env!("CARGO_PKG_VERSION")).into()
}

/// `[endpoints]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsConfig {
    /// Availability lookup endpoint.
    #[serde(default = "default_lookup_url")]
    pub lookup_url: Url,

    /// Base URL the per-region feed paths are appended to.
    #[serde(default = "default_feed_base_url")]
    pub feed_base_url: Url,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            lookup_url: default_lookup_url(),
            feed_base_url: default_feed_base_url(),
        }
    }
}

fn default_lookup_url() -> Url {
    Url::parse(DEFAULT_LOOKUP_URL).expect("valid default lookup URL")
}
fn default_feed_base_url() -> Url {
    Url::parse(DEFAULT_FEED_BASE_URL).expect("valid default feed URL")
}

// ---------------------------------------------------------------------------
// Harvest config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime harvest configuration - merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    /// Maximum in-window entries scanned per region.
    pub per_region_cap: u32,
    /// Recency window in days.
    pub recency_days: u32,
    /// Minimum target-script ratio, in (0, 1].
    pub language_threshold: f64,
    /// Lower pacing bound in seconds.
    pub min_delay_secs: f64,
    /// Upper pacing bound in seconds.
    pub max_delay_secs: f64,
    /// HTTP client and retry settings.
    pub http: HttpConfig,
    /// Remote endpoints.
    pub endpoints: EndpointsConfig,
    /// Storefront codes in enumeration order.
    pub regions: Vec<String>,
}

impl From<&AppConfig> for HarvestConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            per_region_cap: config.defaults.per_region_cap,
            recency_days: config.defaults.recency_days,
            language_threshold: config.defaults.language_threshold,
            min_delay_secs: config.defaults.min_delay_secs,
            max_delay_secs: config.defaults.max_delay_secs,
            http: config.http.clone(),
            endpoints: config.endpoints.clone(),
            regions: config
                .regions
                .clone()
                .unwrap_or_else(|| STOREFRONTS.iter().map(|r| r.to_string()).collect()),
        }
    }
}

impl HarvestConfig {
    /// Check every option against its allowed range.
    pub fn validate(&self) -> Result<()> {
        if self.per_region_cap == 0 {
            return Err(HarvestError::config("per_region_cap must be a positive integer"));
        }
        if self.recency_days == 0 {
            return Err(HarvestError::config("recency_days must be a positive integer"));
        }
        if !(self.language_threshold > 0.0 && self.language_threshold <= 1.0) {
            return Err(HarvestError::config(format!(
                "language_threshold must be in (0, 1], got {}",
                self.language_threshold
            )));
        }
        for (name, value) in [
            ("min_delay_secs", self.min_delay_secs),
            ("max_delay_secs", self.max_delay_secs),
            ("base_delay_secs", self.http.base_delay_secs),
            ("jitter_secs", self.http.jitter_secs),
        ] {
            if !(0.0..=MAX_DELAY_SECS).contains(&value) {
                return Err(HarvestError::config(format!(
                    "{name} must be between 0 and {MAX_DELAY_SECS} seconds, got {value}"
                )));
            }
        }
        if self.min_delay_secs > self.max_delay_secs {
            return Err(HarvestError::config(format!(
                "min_delay_secs ({}) must not exceed max_delay_secs ({})",
                self.min_delay_secs, self.max_delay_secs
            )));
        }
        if self.http.max_attempts == 0 {
            return Err(HarvestError::config("http.max_attempts must be at least 1"));
        }
        if self.http.timeout_secs == 0 {
            return Err(HarvestError::config("http.timeout_secs must be at least 1"));
        }
        if self.regions.is_empty() {
            return Err(HarvestError::config("region list is empty"));
        }
        if let Some(bad) = self
            .regions
            .iter()
            .find(|r| r.len() != 2 || !r.bytes().all(|b| b.is_ascii_lowercase()))
        {
            return Err(HarvestError::config(format!(
                "invalid storefront code '{bad}': expected two lowercase letters"
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.reviewharvest/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| HarvestError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.reviewharvest/reviewharvest.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| HarvestError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| HarvestError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| HarvestError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| HarvestError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| HarvestError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("per_region_cap"));
        assert!(toml_str.contains("itunes.apple.com/lookup"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.defaults.per_region_cap, 50);
        assert_eq!(parsed.http.max_attempts, 6);
        assert!(parsed.regions.is_none());
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
regions = ["ru", "kz"]

[defaults]
recency_days = 14

[http]
max_attempts = 2
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.defaults.recency_days, 14);
        assert_eq!(config.defaults.per_region_cap, 50);
        assert_eq!(config.http.max_attempts, 2);
        assert_eq!(config.http.timeout_secs, 25);

        let harvest = HarvestConfig::from(&config);
        assert_eq!(harvest.regions, vec!["ru", "kz"]);
        assert!(harvest.validate().is_ok());
    }

    #[test]
    fn harvest_config_from_app_config() {
        let harvest = HarvestConfig::from(&AppConfig::default());
        assert_eq!(harvest.per_region_cap, 50);
        assert_eq!(harvest.recency_days, 7);
        assert_eq!(harvest.regions.len(), STOREFRONTS.len());
        assert_eq!(harvest.http.timeout(), Duration::from_secs(25));
        assert!(harvest.validate().is_ok());
    }

    #[test]
    fn validation_rejects_out_of_range_options() {
        let base = HarvestConfig::from(&AppConfig::default());

        let mut c = base.clone();
        c.per_region_cap = 0;
        assert!(c.validate().is_err());

        let mut c = base.clone();
        c.recency_days = 0;
        assert!(c.validate().is_err());

        let mut c = base.clone();
        c.language_threshold = 0.0;
        assert!(c.validate().is_err());

        let mut c = base.clone();
        c.language_threshold = 1.0;
        assert!(c.validate().is_ok());

        let mut c = base.clone();
        c.min_delay_secs = 1.0;
        c.max_delay_secs = 0.5;
        let err = c.validate().unwrap_err();
        assert!(err.to_string().contains("must not exceed"));

        let mut c = base.clone();
        c.min_delay_secs = -0.1;
        assert!(c.validate().is_err());

        let mut c = base.clone();
        c.regions = vec!["USA".into()];
        assert!(c.validate().is_err());

        let mut c = base.clone();
        c.http.max_attempts = 0;
        assert!(c.validate().is_err());

        let mut c = base;
        c.http.timeout_secs = 0;
        let err = c.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn validation_bounds_delays() {
        let base = HarvestConfig::from(&AppConfig::default());

        let mut c = base.clone();
        c.min_delay_secs = 1e20;
        c.max_delay_secs = 1e20;
        assert!(c.validate().is_err());

        let mut c = base.clone();
        c.http.base_delay_secs = 1e20;
        assert!(c.validate().is_err());

        let mut c = base.clone();
        c.http.jitter_secs = f64::NAN;
        assert!(c.validate().is_err());

        let mut c = base;
        c.min_delay_secs = MAX_DELAY_SECS;
        c.max_delay_secs = MAX_DELAY_SECS;
        assert!(c.validate().is_ok());
    }
}
