//! # Pricing Configuration
//!
//! Calculator-wide defaults for the option fields a call leaves absent.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. PricingOptions field on the call (highest priority)                │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     ORDER_TOTAL_TAX_RATE=0.08                                          │
//! │     ORDER_TOTAL_FREE_SHIP_THRESHOLD=75                                 │
//! │     ORDER_TOTAL_SHIP_PER_KG=3                                          │
//! │                                                                         │
//! │  3. TOML Config File (path given by the caller)                        │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     tax 0.10, free shipping from 100, 2.5 per kg                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # pricing.toml
//! [pricing]
//! tax_rate = 0.10
//! free_ship_threshold = 100.0
//! ship_per_kg = 2.5
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{PricingError, PricingResult};
use crate::validation::validate_amount;
use crate::{DEFAULT_FREE_SHIP_THRESHOLD, DEFAULT_SHIP_PER_KG, DEFAULT_TAX_RATE};

const ENV_TAX_RATE: &str = "ORDER_TOTAL_TAX_RATE";
const ENV_FREE_SHIP_THRESHOLD: &str = "ORDER_TOTAL_FREE_SHIP_THRESHOLD";
const ENV_SHIP_PER_KG: &str = "ORDER_TOTAL_SHIP_PER_KG";

// =============================================================================
// Pricing Defaults
// =============================================================================

/// Default values for the numeric pricing options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingDefaults {
    /// Base tax rate (0.10 = 10%).
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,

    /// Taxed amount at or above which shipping is free.
    #[serde(default = "default_free_ship_threshold")]
    pub free_ship_threshold: f64,

    /// Shipping charge per started kilogram.
    #[serde(default = "default_ship_per_kg")]
    pub ship_per_kg: f64,
}

fn default_tax_rate() -> f64 {
    DEFAULT_TAX_RATE
}

fn default_free_ship_threshold() -> f64 {
    DEFAULT_FREE_SHIP_THRESHOLD
}

fn default_ship_per_kg() -> f64 {
    DEFAULT_SHIP_PER_KG
}

impl Default for PricingDefaults {
    fn default() -> Self {
        PricingDefaults {
            tax_rate: default_tax_rate(),
            free_ship_threshold: default_free_ship_threshold(),
            ship_per_kg: default_ship_per_kg(),
        }
    }
}

// =============================================================================
// Main Pricing Configuration
// =============================================================================

/// Complete calculator configuration.
///
/// ## Example Config File
/// ```toml
/// [pricing]
/// tax_rate = 0.08
/// free_ship_threshold = 75.0
/// ship_per_kg = 3.0
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Defaults for absent option fields.
    #[serde(default)]
    pub pricing: PricingDefaults,
}

impl PricingConfig {
    /// Creates a config with the built-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a config from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(contents: &str) -> PricingResult<Self> {
        let config: PricingConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file, if `config_path` is given and exists
    /// 3. Environment variables
    pub fn load(config_path: Option<&Path>) -> PricingResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path {
            if path.exists() {
                info!(?path, "Loading pricing config from file");
                let contents = std::fs::read_to_string(path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<&Path>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load pricing config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    ///
    /// Every default must be a finite, non-negative number.
    pub fn validate(&self) -> PricingResult<()> {
        let checks = [
            ("pricing.tax_rate", self.pricing.tax_rate),
            ("pricing.free_ship_threshold", self.pricing.free_ship_threshold),
            ("pricing.ship_per_kg", self.pricing.ship_per_kg),
        ];

        for (field, value) in checks {
            validate_amount(field, value)
                .map_err(|e| PricingError::InvalidConfig(e.to_string()))?;
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup. Unparsable values are ignored.
    fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let targets = [
            (ENV_TAX_RATE, &mut self.pricing.tax_rate),
            (ENV_FREE_SHIP_THRESHOLD, &mut self.pricing.free_ship_threshold),
            (ENV_SHIP_PER_KG, &mut self.pricing.ship_per_kg),
        ];

        for (key, slot) in targets {
            let Some(raw) = lookup(key) else {
                continue;
            };
            match raw.trim().parse::<f64>() {
                Ok(value) => {
                    debug!(key, value, "Overriding pricing default from environment");
                    *slot = value;
                }
                Err(_) => warn!(key, value = %raw, "Ignoring unparsable pricing override"),
            }
        }
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Returns the default tax rate.
    pub fn tax_rate(&self) -> f64 {
        self.pricing.tax_rate
    }

    /// Returns the default free-shipping threshold.
    pub fn free_ship_threshold(&self) -> f64 {
        self.pricing.free_ship_threshold
    }

    /// Returns the default per-kilogram shipping rate.
    pub fn ship_per_kg(&self) -> f64 {
        self.pricing.ship_per_kg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = PricingConfig::default();
        assert_eq!(config.tax_rate(), 0.10);
        assert_eq!(config.free_ship_threshold(), 100.0);
        assert_eq!(config.ship_per_kg(), 2.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_partial_keeps_defaults() {
        let config = PricingConfig::from_toml_str("[pricing]\ntax_rate = 0.08\n").unwrap();
        assert_eq!(config.tax_rate(), 0.08);
        assert_eq!(config.free_ship_threshold(), 100.0);
        assert_eq!(config.ship_per_kg(), 2.5);

        let empty = PricingConfig::from_toml_str("").unwrap();
        assert_eq!(empty, PricingConfig::default());
    }

    #[test]
    fn test_from_toml_rejects_bad_values() {
        let err = PricingConfig::from_toml_str("[pricing]\nship_per_kg = -1.0\n").unwrap_err();
        assert!(matches!(err, PricingError::InvalidConfig(_)));
        assert!(err.to_string().contains("pricing.ship_per_kg"));

        let err = PricingConfig::from_toml_str("[pricing]\ntax_rate = \"ten\"\n").unwrap_err();
        assert!(matches!(err, PricingError::ConfigLoadFailed(_)));
    }

    #[test]
    fn test_overrides_apply_and_ignore_garbage() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_TAX_RATE, "0.2"),
            (ENV_FREE_SHIP_THRESHOLD, "not-a-number"),
            (ENV_SHIP_PER_KG, " 4 "),
        ]);

        let mut config = PricingConfig::default();
        config.apply_overrides_from(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.tax_rate(), 0.2);
        assert_eq!(config.free_ship_threshold(), 100.0);
        assert_eq!(config.ship_per_kg(), 4.0);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("order-total-no-such-config.toml");
        let config = PricingConfig::load_or_default(Some(&path));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_reads_file() {
        let path = std::env::temp_dir().join(format!(
            "order-total-config-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[pricing]\nfree_ship_threshold = 120.0\n").unwrap();

        let config = PricingConfig::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        // Environment may override, but the file value must have been read
        // unless ORDER_TOTAL_FREE_SHIP_THRESHOLD is set in the test run.
        if std::env::var(ENV_FREE_SHIP_THRESHOLD).is_err() {
            assert_eq!(config.free_ship_threshold(), 120.0);
        }
    }

    #[test]
    fn test_toml_serialization() {
        let config = PricingConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[pricing]"));
        assert!(toml_str.contains("ship_per_kg = 2.5"));
    }
}
