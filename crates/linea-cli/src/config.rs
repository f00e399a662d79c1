use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use linea_core::config::EngineConfig;

/// Reads an engine config from JSON.
///
/// Each field that is missing or has the wrong type falls back to its
/// default with a warning; the merged config must still pass validation.
pub fn load_engine_config(path: &Path) -> Result<EngineConfig> {
    let config_json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let partial: serde_json::Value = serde_json::from_str(&config_json)
        .with_context(|| format!("Config file is not valid JSON: {:?}", path))?;
    let mut config = EngineConfig::default();

    macro_rules! load_or_default {
        ($field:ident) => {
            if let Some(val) = partial.get(stringify!($field)) {
                if let Ok(parsed) = serde_json::from_value(val.clone()) {
                    config.$field = parsed;
                } else {
                    log::warn!(
                        "Config Invalid value for '{}', using default: {:?}",
                        stringify!($field),
                        config.$field
                    );
                }
            } else {
                log::warn!(
                    "Config Missing field '{}', using default: {:?}",
                    stringify!($field),
                    config.$field
                );
            }
        };
    }

    load_or_default!(eps);
    load_or_default!(eigenvector_eps);
    load_or_default!(eigenvalue_merge_tol);
    load_or_default!(qr_iterations);

    config
        .validate()
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("Invalid engine config: {:?}", path))?;
    Ok(config)
}

/// The config named on the command line, or the defaults.
pub fn resolve_engine_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            log::info!("[linea] Using engine config: {:?}", path);
            load_engine_config(path)
        }
        None => {
            log::debug!("[linea] No config provided; using defaults.");
            Ok(EngineConfig::default())
        }
    }
}
