use crate::app_config::{AppConfig, Environment};
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
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Reads only `QUICKVIEW_CURRENCY` (default `USD`), for offline commands that
/// have no store to talk to and so no full config.
#[must_use]
pub fn load_currency() -> String {
    dotenvy::dotenv().ok();
    currency_from(|key| std::env::var(key))
}

fn currency_from<F>(lookup: F) -> String
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    lookup("QUICKVIEW_CURRENCY")
        .map(|c| c.trim().to_string())
        .ok()
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| "USD".to_string())
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap`.
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

    let non_empty = |var: &str, raw: String| -> Result<String, ConfigError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(trimmed.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
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

    let env = parse_environment(&or_default("QUICKVIEW_ENV", "development"))?;
    let store_url = non_empty("QUICKVIEW_STORE_URL", require("QUICKVIEW_STORE_URL")?)?;
    let is_https = store_url.to_ascii_lowercase().starts_with("https://");
    if env == Environment::Production && !is_https {
        return Err(ConfigError::InvalidEnvVar {
            var: "QUICKVIEW_STORE_URL".to_string(),
            reason: "must use https in production".to_string(),
        });
    }
    let companion_handle = non_empty(
        "QUICKVIEW_COMPANION_HANDLE",
        require("QUICKVIEW_COMPANION_HANDLE")?,
    )?;
    let rule_color = non_empty(
        "QUICKVIEW_RULE_COLOR",
        or_default("QUICKVIEW_RULE_COLOR", "Black"),
    )?;
    let rule_size = non_empty(
        "QUICKVIEW_RULE_SIZE",
        or_default("QUICKVIEW_RULE_SIZE", "Medium"),
    )?;

    let log_level = or_default("QUICKVIEW_LOG_LEVEL", "info");
    let currency = currency_from(&lookup);

    let request_timeout_secs = parse_u64("QUICKVIEW_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "QUICKVIEW_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let user_agent = or_default("QUICKVIEW_USER_AGENT", "quickview/0.1 (storefront-popup)");
    let max_retries = parse_u32("QUICKVIEW_MAX_RETRIES", "3")?;
    let retry_backoff_base_secs = parse_u64("QUICKVIEW_RETRY_BACKOFF_BASE_SECS", "1")?;

    Ok(AppConfig {
        env,
        store_url,
        log_level,
        currency,
        companion_handle,
        rule_color,
        rule_size,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_secs,
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
            var: "QUICKVIEW_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
