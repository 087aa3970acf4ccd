//! Configuration management module for the record engine.
//!
//! Provides hierarchical configuration loading with priority:
//! 1. Default values (hardcoded)
//! 2. Optional main config file
//! 3. Caller-supplied config file
//! 4. Environment variables (highest priority)

mod feed;
mod storage;


pub use feed::*;
pub use storage::*;

//---
use config::Config;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::Error;
use crate::Result;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    /// Embedded database location and tuning
    #[serde(default)]
    pub storage: StorageConfig,

    /// Capped user event feed parameters
    #[serde(default)]
    pub feed: FeedConfig,
}

impl Settings {
    /// Load configuration with priority:
    /// 1. Base config file (`config/engine.toml`, optional)
    /// 2. Caller-supplied config file
    /// 3. Environment variables
    ///
    /// # Arguments
    /// * `config_path` - Optional path to a deployment-specific config file
    ///
    /// # Returns
    /// Merged and validated configuration
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = Config::builder();

        // 1. Base config
        config = config.add_source(File::with_name("config/engine").required(false));

        // 2. Overwrite with caller-supplied config
        if let Some(custom) = config_path {
            config = config.add_source(File::with_name(custom).required(true));
        }

        // 3. Environment variables (highest priority)
        config = config.add_source(
            Environment::with_prefix("RECORD")
                .separator("__")
                .ignore_empty(true)
                .try_parsing(true),
        );

        let settings: Settings = config
            .build()?
            .try_deserialize()
            .map_err(Error::Config)?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.storage.validate()?;
        self.feed.validate()?;
        Ok(())
    }
}
