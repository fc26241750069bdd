//! # odp-config
//!
//! Layered configuration loading for text2odp using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TEXT2ODP_*` prefix, `__` as separator)
//! 2. Project-level `.text2odp/config.toml`
//! 3. User-level `~/.config/text2odp/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TEXT2ODP_LLM__MODEL` -> `llm.model`,
//! `TEXT2ODP_RETRY__MAX_ATTEMPTS` -> `retry.max_attempts`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use odp_config::OdpConfig;
//!
//! let config = OdpConfig::load_with_dotenv().expect("config");
//! println!("generating with {} via {}", config.llm.model, config.llm.backend);
//! ```

mod error;
mod llm;
mod retry;
mod run;
mod search;

pub use error::ConfigError;
pub use llm::LlmConfig;
pub use retry::RetryConfig;
pub use run::RunConfig;
pub use search::SearchConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OdpConfig {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub run: RunConfig,
}

impl OdpConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed or a
    /// value has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load `.env` (searched from the working directory upwards) into the
    /// process environment, then [`Self::load`]. A missing `.env` is fine.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Dotenv`] when a `.env` file exists but is unreadable or
    /// malformed, otherwise same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(error) if error.not_found() => {}
            Err(error) => return Err(ConfigError::Dotenv(error)),
        }
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".text2odp/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("TEXT2ODP_").split("__"))
    }

    /// Check cross-field constraints after extraction.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.llm.validate()?;
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "retry.max_attempts".into(),
                reason: "at least one attempt is required".into(),
            });
        }
        if self.retry.multiplier == 0 {
            return Err(ConfigError::InvalidValue {
                field: "retry.multiplier".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("text2odp").join("config.toml"))
    }
}
