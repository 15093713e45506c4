use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let base_url = require("PBH_BASE_URL")?;
    let component_id = require("PBH_COMPONENT_ID")?;
    let process_slug = require("PBH_PROCESS_SLUG")?;

    let output_path = PathBuf::from(or_default("PBH_OUTPUT_PATH", "data/proposals.csv"));
    let failed_path = PathBuf::from(or_default("PBH_FAILED_PATH", "data/failed_proposals.txt"));

    let failure_delay_ms = parse_u64("PBH_FAILURE_DELAY_MS", "1000")?;
    let max_pages = parse_usize("PBH_MAX_PAGES", "200")?;
    let nav_timeout_secs = parse_u64("PBH_NAV_TIMEOUT_SECS", "30")?;
    let log_level = or_default("PBH_LOG_LEVEL", "info");

    Ok(AppConfig {
        base_url,
        component_id,
        process_slug,
        output_path,
        failed_path,
        failure_delay_ms,
        max_pages,
        nav_timeout_secs,
        log_level,
    })
}
