//! Process configuration read from the environment.

use std::path::PathBuf;

use tracing::warn;

use crate::cache::CacheConfig;
use crate::mtd::MtdConfig;
use crate::stops::DEFAULT_DATA_DIR;

/// Environment variable holding the MTD developer API key.
pub const API_KEY_VAR: &str = "MTD_API_KEY";

/// Optional override of the API base URL.
pub const BASE_URL_VAR: &str = "MTD_BASE_URL";

/// Optional override of the stop data directory.
pub const DATA_DIR_VAR: &str = "MTD_DATA_DIR";

/// Everything the binary needs to build a gateway.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mtd: MtdConfig,
    pub cache: CacheConfig,
    pub data_dir: PathBuf,
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// A missing API key is not an error here; requests will be rejected by
    /// the provider instead.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_key = lookup(API_KEY_VAR).unwrap_or_else(|| {
            warn!("{API_KEY_VAR} not set. API calls will fail.");
            String::new()
        });

        let mut mtd = MtdConfig::new(api_key);
        if let Some(url) = lookup(BASE_URL_VAR) {
            mtd = mtd.with_base_url(url);
        }

        let data_dir = lookup(DATA_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        Self {
            mtd,
            cache: CacheConfig::default(),
            data_dir,
        }
    }
}
