use crate::app_config::{AppConfig, Environment, MissingSettings, StorefrontSettings};
use crate::ConfigError;

/// Env var names of the settings the storefront requires, in display order.
pub const REQUIRED_SETTINGS: [&str; 3] = [
    "EXMOON_SHEET_ID",
    "EXMOON_GOOGLE_API_KEY",
    "EXMOON_WHATSAPP_NUMBER",
];

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if an optional setting is present but invalid.
/// Missing storefront settings are not an error here; they are reported
/// through [`AppConfig::storefront`].
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if an optional setting is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
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

    let storefront = build_storefront_settings(&lookup);

    let env = parse_environment(&or_default("EXMOON_ENV", "development"))?;
    let bind_addr = parse_addr("EXMOON_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("EXMOON_LOG_LEVEL", "info");

    let sheets_base_url = or_default("EXMOON_SHEETS_BASE_URL", "https://sheets.googleapis.com");
    let catalog_range = or_default("EXMOON_CATALOG_RANGE", "A2:I");
    let leads_range = or_default("EXMOON_LEADS_RANGE", "Clientes!B:F");

    let sheets_request_timeout_secs = parse_u64("EXMOON_SHEETS_REQUEST_TIMEOUT_SECS", "30")?;
    if sheets_request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "EXMOON_SHEETS_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let sheets_user_agent = or_default("EXMOON_SHEETS_USER_AGENT", "exmoon/0.1 (storefront)");

    let catalog_refresh_cron = Some(or_default("EXMOON_CATALOG_REFRESH_CRON", "0 */15 * * * *"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let club_rate_limit_per_minute = parse_usize("EXMOON_CLUB_RATE_LIMIT_PER_MINUTE", "30")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        storefront,
        sheets_base_url,
        catalog_range,
        leads_range,
        sheets_request_timeout_secs,
        sheets_user_agent,
        catalog_refresh_cron,
        club_rate_limit_per_minute,
    })
}

/// Collects the required storefront settings, naming every one that is
/// absent or blank.
fn build_storefront_settings<F>(lookup: &F) -> Result<StorefrontSettings, MissingSettings>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let mut missing = Vec::new();
    let values = REQUIRED_SETTINGS.map(|var| {
        let value = lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        if value.is_none() {
            missing.push(var);
        }
        value.unwrap_or_default()
    });

    if !missing.is_empty() {
        return Err(MissingSettings { keys: missing });
    }

    let [sheet_id, google_api_key, whatsapp_number] = values;
    Ok(StorefrontSettings {
        sheet_id,
        google_api_key,
        whatsapp_number,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "EXMOON_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
