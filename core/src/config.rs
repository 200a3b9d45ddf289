//! Transport configuration.
//!
//! Every field has a default matching the behavior the functions are
//! documented with: a 10 second read timeout and redirects followed up to
//! the transport's own cap. Hosts may override it per client handle.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransportConfig {
    /// Deadline for the response head, and separately for the whole body.
    /// It bounds the total body transfer time rather than the gap between
    /// reads, so a slow but steady body longer than this fails as a read
    /// error.
    pub read_timeout_secs: u64,
    pub follow_redirects: bool,
    pub max_redirects: u32,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            read_timeout_secs: 10,
            follow_redirects: true,
            max_redirects: 10,
        }
    }
}

impl TransportConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.read_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    /// Redirect cap handed to the agent; zero disables following.
    pub fn redirect_limit(&self) -> u32 {
        if self.follow_redirects {
            self.max_redirects
        } else {
            0
        }
    }
}
