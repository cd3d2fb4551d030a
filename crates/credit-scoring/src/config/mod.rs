use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use crate::scoring::ScoringThresholds;

const DEFAULT_APP_NAME: &str = "Scoring API";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub service: ServiceInfo,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringThresholds,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = AppEnvironment::from_str(
            &lookup("APP_ENV").unwrap_or_else(|| "development".to_string()),
        );

        let debug = match first_set(&lookup, &["APP_DEBUG", "DEBUG"]) {
            Some((key, raw)) => parse_flag(key, &raw)?,
            None => false,
        };

        let service = ServiceInfo {
            name: lookup("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            version: lookup("APP_VERSION")
                .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
            api_prefix: first_set(&lookup, &["APP_API_PREFIX", "API_PREFIX"])
                .map(|(_, raw)| normalize_prefix(&raw))
                .unwrap_or_default(),
            debug,
        };

        let host = first_set(&lookup, &["APP_HOST", "HOST"])
            .map(|(_, raw)| raw)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or(&lookup, &["APP_PORT", "PORT"], DEFAULT_PORT)?;

        let default_level = if debug { "debug" } else { "info" };
        let log_level = lookup("APP_LOG_LEVEL").unwrap_or_else(|| default_level.to_string());

        let defaults = ScoringThresholds::default();
        let scoring = ScoringThresholds {
            min_score: parse_or(
                &lookup,
                &["SCORING_MIN_SCORE", "MIN_SCORE"],
                defaults.min_score,
            )?,
            max_score: parse_or(
                &lookup,
                &["SCORING_MAX_SCORE", "MAX_SCORE"],
                defaults.max_score,
            )?,
            approval_threshold: parse_or(
                &lookup,
                &["SCORING_APPROVAL_THRESHOLD", "APPROVAL_THRESHOLD"],
                defaults.approval_threshold,
            )?,
        };
        if scoring.min_score > scoring.max_score {
            return Err(ConfigError::InvalidScoreRange {
                min_score: scoring.min_score,
                max_score: scoring.max_score,
            });
        }

        Ok(Self {
            environment,
            service,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            scoring,
        })
    }
}

/// First key with a value wins. Unprefixed keys are the names earlier
/// deployments used and are also matched in lowercase.
fn first_set<F>(lookup: &F, keys: &[&'static str]) -> Option<(&'static str, String)>
where
    F: Fn(&str) -> Option<String>,
{
    keys.iter().find_map(|&key| {
        lookup(key)
            .or_else(|| lookup(&key.to_ascii_lowercase()))
            .map(|raw| (key, raw))
    })
}

fn parse_or<F, T>(lookup: &F, keys: &[&'static str], default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match first_set(lookup, keys) {
        Some((key, raw)) => raw.trim().parse::<T>().map_err(|_| ConfigError::InvalidNumber {
            key,
            value: raw,
        }),
        None => Ok(default),
    }
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            key,
            value: raw.to_string(),
        }),
    }
}

/// Turns `api`, `/api/` and `/api` into `/api`; blank input means no prefix.
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

/// Static metadata reported by the root endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub api_prefix: String,
    pub debug: bool,
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("APP_HOST must be a valid IP address or 'localhost'")]
    InvalidHost {
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("{key} must be an integer in range, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },
    #[error("{key} must be a boolean flag, got '{value}'")]
    InvalidFlag { key: &'static str, value: String },
    #[error("score range is empty: min_score {min_score} exceeds max_score {max_score}")]
    InvalidScoreRange { min_score: i32, max_score: i32 },
}
