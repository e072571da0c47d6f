//! # hirearc-config
//!
//! Layered configuration loading for hirearc using figment.
//!
//! Configuration sources (lowest to highest priority):
//! 1. Built-in defaults (this crate's `Default` impls)
//! 2. User-level `~/.config/hirearc/config.toml`
//! 3. Project-level `./hirearc.toml`
//! 4. Environment variables (`HIRE_*`, double-underscore nested)

mod error;
mod matching;
mod queue;
mod rate_limit;
mod resources;

pub use error::ConfigError;
pub use matching::MatchingConfig;
pub use queue::QueueConfig;
pub use rate_limit::{EndpointProfile, RateLimitConfig};
pub use resources::ResourceConfig;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const ENV_PREFIX: &str = "HIRE_";
const PROJECT_CONFIG_FILE: &str = "hirearc.toml";

/// The aggregate configuration surface, one section per component.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct HireConfig {
    #[serde(default)]
    pub queue: QueueConfig,
    #[serde(default)]
    pub resources: ResourceConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
}

impl Default for HireConfig {
    fn default() -> Self {
        Self {
            queue: QueueConfig::default(),
            resources: ResourceConfig::default(),
            rate_limit: RateLimitConfig::default(),
            matching: MatchingConfig::default(),
        }
    }
}

impl HireConfig {
    /// Load configuration from the user file, the project file, and
    /// `HIRE_*` environment variables, in ascending priority, layered over
    /// built-in defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(user_path) = user_config_path() {
            if user_path.exists() {
                figment = figment.merge(Toml::file(user_path));
            }
        }

        if PathBuf::from(PROJECT_CONFIG_FILE).exists() {
            figment = figment.merge(Toml::file(PROJECT_CONFIG_FILE));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        Ok(figment.extract()?)
    }

    /// Load ignoring the user config file, merging only the project file
    /// (if present) and environment variables over defaults. Used by tests
    /// that sandbox the working directory and environment (via
    /// `figment::Jail`) and don't want a real `~/.config/hirearc` to leak
    /// in.
    pub fn load_from_project_and_env() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if PathBuf::from(PROJECT_CONFIG_FILE).exists() {
            figment = figment.merge(Toml::file(PROJECT_CONFIG_FILE));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        Ok(figment.extract()?)
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hirearc").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load_without_any_source() {
        let config = HireConfig::default();
        assert_eq!(config.queue.min_workers, 2);
        assert_eq!(config.matching.weights_default, (0.80, 0.15, 0.025, 0.025));
    }
}
