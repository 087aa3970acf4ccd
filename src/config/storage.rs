use std::path::PathBuf;

use config::ConfigError;
use serde::Deserialize;
use serde::Serialize;

use crate::constants::DEFAULT_DB_ROOT_DIR;
use crate::Error;
use crate::Result;

/// Embedded database settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    /// Root directory holding the record database
    #[serde(default = "default_db_root_dir")]
    pub db_root_dir: PathBuf,

    /// Page cache size handed to the embedded database
    #[serde(default = "default_cache_capacity_bytes")]
    pub cache_capacity_bytes: u64,

    /// Background flush interval in milliseconds
    #[serde(default = "default_flush_every_ms")]
    pub flush_every_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_root_dir: default_db_root_dir(),
            cache_capacity_bytes: default_cache_capacity_bytes(),
            flush_every_ms: default_flush_every_ms(),
        }
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<()> {
        if self.cache_capacity_bytes == 0 {
            return Err(Error::Config(ConfigError::Message(
                "cache_capacity_bytes must be greater than 0".into(),
            )));
        }
        if self.flush_every_ms < 1 {
            return Err(Error::Config(ConfigError::Message(
                "flush_every_ms must be at least 1ms".into(),
            )));
        }
        Ok(())
    }
}

fn default_db_root_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DB_ROOT_DIR)
}

fn default_cache_capacity_bytes() -> u64 {
    10 * 1024 * 1024 //10MB
}

// in ms
fn default_flush_every_ms() -> u64 {
    3
}
