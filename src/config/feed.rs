use config::ConfigError;
use serde::Deserialize;
use serde::Serialize;

use crate::constants::DEFAULT_FEED_CAPACITY;
use crate::Error;
use crate::Result;

/// Capped user event feed settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FeedConfig {
    /// Maximum number of records the feed retains; the oldest record is
    /// evicted once this bound is reached
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

impl FeedConfig {
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::Config(ConfigError::Message(
                "feed capacity must be greater than 0".into(),
            )));
        }
        Ok(())
    }
}

fn default_capacity() -> usize {
    DEFAULT_FEED_CAPACITY
}
