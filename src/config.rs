// src/config.rs
//! Registry configuration
//!
//! Loaded from TOML or from environment variables. Only the default engine is
//! configurable: which kind it is and, optionally, a fixed seed.

use crate::engines::EngineKind;
use crate::error::{RandomError, RandomResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const ENV_DEFAULT_ENGINE: &str = "RAND_REGISTRY_DEFAULT_ENGINE";
pub const ENV_DEFAULT_SEED: &str = "RAND_REGISTRY_DEFAULT_SEED";

/// Configuration of a [`Registry`](crate::registry::Registry).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Kind of the lazily created default engine
    #[serde(deserialize_with = "deserialize_engine_kind")]
    pub default_engine: EngineKind,
    /// Seed of the default engine; drawn from OS entropy when absent
    pub default_seed: Option<u64>,
}

fn deserialize_engine_kind<'de, D>(deserializer: D) -> Result<EngineKind, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    EngineKind::from_str(&s).map_err(serde::de::Error::custom)
}

impl RegistryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deterministic configuration: given engine kind with a fixed seed.
    pub fn seeded(default_engine: EngineKind, seed: u64) -> Self {
        Self {
            default_engine,
            default_seed: Some(seed),
        }
    }

    pub fn from_toml_str(content: &str) -> RandomResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| RandomError::InvalidConfiguration {
            field: "toml".to_string(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> RandomResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> RandomResult<Self> {
        let mut config = Self::default();

        if let Some(kind) = lookup(ENV_DEFAULT_ENGINE) {
            config.default_engine = kind.parse().map_err(|_| RandomError::InvalidConfiguration {
                field: ENV_DEFAULT_ENGINE.to_string(),
                reason: format!("unknown engine name '{}'", kind),
            })?;
        }

        if let Some(seed) = lookup(ENV_DEFAULT_SEED) {
            let seed = seed.trim();
            config.default_seed = Some(seed.parse().map_err(|_| RandomError::InvalidConfiguration {
                field: ENV_DEFAULT_SEED.to_string(),
                reason: format!("'{}' is not an unsigned 64-bit integer", seed),
            })?);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> RandomResult<()> {
        // only the 64-bit twister keeps seed bits above 32
        if let Some(seed) = self.default_seed {
            if self.default_engine != EngineKind::Mt19937_64 && seed > u64::from(u32::MAX) {
                return Err(RandomError::InvalidConfiguration {
                    field: "default_seed".to_string(),
                    reason: format!(
                        "{} exceeds the 32-bit seed range of {}",
                        seed, self.default_engine
                    ),
                });
            }
        }
        Ok(())
    }
}
