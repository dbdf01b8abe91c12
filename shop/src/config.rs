/// Runtime configuration for the shell binary
use crate::application::services::QueryPolicy;
use crate::infrastructure::http::DEFAULT_BASE_URL;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Looked up in the working directory when no file is given
pub const DEFAULT_CONFIG_FILE: &str = "mini_shop.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShopConfig {
    /// Catalog endpoint, e.g. `https://fakestoreapi.com`
    pub catalog_base_url: String,
    /// Seconds a cached catalog read stays fresh
    pub stale_time_secs: u64,
    /// Extra attempts after a failed catalog read
    pub retry: u32,
    /// `tracing` filter directive
    pub log_filter: String,
}

impl Default for ShopConfig {
    fn default() -> Self {
        let policy = QueryPolicy::default();
        ShopConfig {
            catalog_base_url: DEFAULT_BASE_URL.to_string(),
            stale_time_secs: policy.stale_time.as_secs(),
            retry: policy.retry,
            log_filter: "mini_shop=info".to_string(),
        }
    }
}

impl ShopConfig {
    /// Defaults, then the TOML file, then `MINI_SHOP_*` environment variables.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => ShopConfig::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&raw).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Override fields from environment-style lookups
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(v) = lookup("MINI_SHOP_CATALOG_URL") {
            self.catalog_base_url = v;
        }
        if let Some(v) = lookup("MINI_SHOP_STALE_TIME_SECS") {
            self.stale_time_secs = v
                .trim()
                .parse()
                .with_context(|| format!("MINI_SHOP_STALE_TIME_SECS must be a number, got '{}'", v))?;
        }
        if let Some(v) = lookup("MINI_SHOP_RETRY") {
            self.retry = v
                .trim()
                .parse()
                .with_context(|| format!("MINI_SHOP_RETRY must be a number, got '{}'", v))?;
        }
        if let Some(v) = lookup("MINI_SHOP_LOG") {
            self.log_filter = v;
        }
        Ok(())
    }

    pub fn query_policy(&self) -> QueryPolicy {
        QueryPolicy {
            stale_time: Duration::from_secs(self.stale_time_secs),
            retry: self.retry,
        }
    }
}
