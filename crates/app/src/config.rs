use anyhow::{Context, bail};

use storefront_catalog::{DEFAULT_PAGE_SIZE, Sort};
use storefront_observability::LogFormat;

pub const PAGE_SIZE_VAR: &str = "STOREFRONT_PAGE_SIZE";
pub const DEFAULT_SORT_VAR: &str = "STOREFRONT_DEFAULT_SORT";
pub const LOG_FORMAT_VAR: &str = "STOREFRONT_LOG_FORMAT";

/// Process configuration, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    pub page_size: usize,
    pub default_sort: Sort,
    pub log_format: LogFormat,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            default_sort: Sort::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl StorefrontConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup(PAGE_SIZE_VAR) {
            let page_size: usize = raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("{PAGE_SIZE_VAR} must be a positive integer (got '{raw}')"))?;
            if page_size == 0 {
                bail!("{PAGE_SIZE_VAR} must be a positive integer (got 0)");
            }
            config.page_size = page_size;
        }

        if let Some(raw) = lookup(DEFAULT_SORT_VAR) {
            config.default_sort = raw
                .parse::<Sort>()
                .with_context(|| format!("invalid {DEFAULT_SORT_VAR}"))?;
        }

        if let Some(raw) = lookup(LOG_FORMAT_VAR) {
            config.log_format = raw
                .parse::<LogFormat>()
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("invalid {LOG_FORMAT_VAR}"))?;
        }

        Ok(config)
    }
}
