use std::str::FromStr;
use std::time::Duration;

/// Errors raised while reading importer configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Importer configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ImporterConfig {
    /// Base URL of the city guide API, without a trailing slash.
    pub api_url: String,
    /// Nominatim search endpoint.
    pub nominatim_url: String,
    /// City appended to every geocoding query.
    pub city: String,
    /// `User-Agent` sent to Nominatim (its usage policy requires one).
    pub user_agent: String,
    /// Pause between two place submissions.
    pub submit_delay: Duration,
}

impl ImporterConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                       |
    /// |------------------------|-----------------------------------------------|
    /// | `CITYGUIDE_API_URL`    | `http://127.0.0.1:5000/api`                   |
    /// | `NOMINATIM_URL`        | `https://nominatim.openstreetmap.org/search`  |
    /// | `IMPORT_CITY`          | `Zrenjanin`                                   |
    /// | `NOMINATIM_USER_AGENT` | `cityguide-importer/<version>`                |
    /// | `SUBMIT_DELAY_MS`      | `500`                                         |
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = env_or("CITYGUIDE_API_URL", "http://127.0.0.1:5000/api");
        let nominatim_url = env_or(
            "NOMINATIM_URL",
            "https://nominatim.openstreetmap.org/search",
        );
        let city = env_or("IMPORT_CITY", "Zrenjanin");
        let user_agent = env_or(
            "NOMINATIM_USER_AGENT",
            concat!("cityguide-importer/", env!("CARGO_PKG_VERSION")),
        );
        let submit_delay_ms: u64 = parse_env("SUBMIT_DELAY_MS", 500)?;

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            nominatim_url,
            city,
            user_agent,
            submit_delay: Duration::from_millis(submit_delay_ms),
        })
    }
}

fn env_or(var: &str, default: &str) -> String {
    std::env::var(var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.into())
}

fn parse_env<T>(var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(var) {
        Ok(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
            value,
        }),
        Err(_) => Ok(default),
    }
}
