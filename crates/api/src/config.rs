use std::path::PathBuf;
use std::str::FromStr;

/// A configuration variable was set to something unusable.
#[derive(Debug, thiserror::Error)]
#[error("{var} has an invalid value: {value:?}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory holding `ja.json` / `en.json` (default: `dictionaries`).
    pub dictionaries_dir: PathBuf,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `HOST`                 | `0.0.0.0`               |
    /// | `PORT`                 | `3000`                  |
    /// | `CORS_ORIGINS`         | `http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |
    /// | `DICTIONARIES_DIR`     | `dictionaries`          |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`Self::from_env`] but reading from an arbitrary source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port: u16 = parse("PORT", lookup("PORT").unwrap_or_else(|| "3000".into()))?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = parse(
            "REQUEST_TIMEOUT_SECS",
            lookup("REQUEST_TIMEOUT_SECS").unwrap_or_else(|| "30".into()),
        )?;

        let dictionaries_dir = lookup("DICTIONARIES_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("dictionaries"));

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            dictionaries_dir,
        })
    }
}

fn parse<T: FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError { var, value })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
