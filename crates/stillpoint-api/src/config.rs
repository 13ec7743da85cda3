//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::str::FromStr;

use crate::error::AppError;

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Multi-line, human-readable output for local development.
    Pretty,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            other => Err(AppError::Config(format!(
                "LOG_FORMAT must be json or pretty, got {other}"
            ))),
        }
    }
}

/// Runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// PostgreSQL URL; `None` selects the in-memory store.
    pub database_url: Option<String>,
    /// Maximum pool size.
    pub database_max_connections: u32,
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Log output format.
    pub log_format: LogFormat,
    /// OTLP collector endpoint; spans are only exported when set.
    pub otlp_endpoint: Option<String>,
    /// Single origin allowed by CORS; permissive when unset.
    pub cors_allowed_origin: Option<String>,
}

impl Settings {
    /// Reads settings from the process environment, after loading a `.env`
    /// file if one exists.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable holds an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, applying defaults for absent keys.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable holds an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_max_connections = match non_empty("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw.parse::<u32>().map_err(|e| {
                AppError::Config(format!("DATABASE_MAX_CONNECTIONS must be a number: {e}"))
            })?,
            None => 10,
        };
        let port = match non_empty("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => 3000,
        };
        let log_format = match non_empty("LOG_FORMAT") {
            Some(raw) => raw.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            database_url: non_empty("DATABASE_URL"),
            database_max_connections,
            host: non_empty("HOST").unwrap_or_else(|| "0.0.0.0".to_owned()),
            port,
            log_format,
            otlp_endpoint: non_empty("OTEL_EXPORTER_OTLP_ENDPOINT"),
            cors_allowed_origin: non_empty("CORS_ALLOWED_ORIGIN"),
        })
    }

    /// The socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if host and port do not form an address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}
