//! Configuration file support for azsm.
//!
//! Provides YAML-based configuration through `azsm.config.yml` files,
//! including data structures, file loading, and validation.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::shared::Result;

const CONFIG_FILENAME: &str = "azsm.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub currency: Option<String>,
    /// Per-currency exchange rates (units of that currency per 1 USD).
    pub exchange_rates: Option<HashMap<String, f64>>,
    /// Hourly Windows Server license cost per vCPU, in USD.
    pub windows_license_per_core: Option<f64>,
    /// Spread reservation lump sums over the commitment term.
    pub amortize_reservations: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref rates) = config.exchange_rates {
        for (code, rate) in rates {
            if code.trim().is_empty() {
                bail!(
                    "Invalid config: exchange_rates contains an empty currency code.\n\n\
                     💡 Hint: Use ISO 4217 codes as keys (e.g., \"EUR\", \"JPY\")."
                );
            }
            if !rate.is_finite() || *rate <= 0.0 {
                bail!(
                    "Invalid config: exchange_rates.{} must be a positive number (got {}).\n\n\
                     💡 Hint: Rates are units of that currency per 1 USD.",
                    code,
                    rate
                );
            }
        }
    }

    if let Some(rate) = config.windows_license_per_core {
        if !rate.is_finite() || rate < 0.0 {
            bail!(
                "Invalid config: windows_license_per_core must be a non-negative number (got {}).\n\n\
                 💡 Hint: This is the hourly Windows Server license cost per vCPU, in USD.",
                rate
            );
        }
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
