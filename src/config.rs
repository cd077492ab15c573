use dotenvy::dotenv;
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use axum::http::HeaderValue;

use crate::error::ConfigError;
use crate::pipeline::DelayRange;

pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_FRONTEND_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_DELAY_MIN_MS: u64 = 500;
pub const DEFAULT_DELAY_MAX_MS: u64 = 1200;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub frontend_origin: String,
    pub delay: DelayRange,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
            frontend_origin: DEFAULT_FRONTEND_ORIGIN.to_string(),
            delay: DelayRange::default(),
        }
    }
}

impl Config {
    /// Reads `RAG_API_*` variables, loading a `.env` file first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Missing keys fall back
    /// to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = parse_or(&lookup, "RAG_API_HOST", DEFAULT_HOST)?;
        let port = parse_or(&lookup, "RAG_API_PORT", DEFAULT_PORT)?;
        let frontend_origin = lookup("RAG_API_FRONTEND_ORIGIN")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGIN.to_string());
        let min_ms = parse_or(&lookup, "RAG_API_DELAY_MIN_MS", DEFAULT_DELAY_MIN_MS)?;
        let max_ms = parse_or(&lookup, "RAG_API_DELAY_MAX_MS", DEFAULT_DELAY_MAX_MS)?;

        let config = Config {
            host,
            port,
            frontend_origin,
            delay: DelayRange::new(Duration::from_millis(min_ms), Duration::from_millis(max_ms))?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.origin_header()?;
        Ok(())
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn origin_header(&self) -> Result<HeaderValue, ConfigError> {
        HeaderValue::from_str(&self.frontend_origin)
            .map_err(|_| ConfigError::InvalidOrigin(self.frontend_origin.clone()))
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
        None => Ok(default),
    }
}

#[test]
fn test_from_lookup_defaults() {
    let config = Config::from_lookup(|_| None).unwrap();
    assert_eq!(config.port, 8000);
    assert_eq!(config.host, DEFAULT_HOST);
    assert_eq!(config.frontend_origin, "http://localhost:3000");
    assert_eq!(config.delay.min(), Duration::from_millis(500));
    assert_eq!(config.delay.max(), Duration::from_millis(1200));
    assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8000");
}

#[test]
fn test_from_lookup_overrides() {
    let config = Config::from_lookup(|key| match key {
        "RAG_API_HOST" => Some("127.0.0.1".into()),
        "RAG_API_PORT" => Some(" 9100 ".into()),
        "RAG_API_FRONTEND_ORIGIN" => Some("http://localhost:5173".into()),
        "RAG_API_DELAY_MIN_MS" => Some("0".into()),
        "RAG_API_DELAY_MAX_MS" => Some("10".into()),
        _ => None,
    })
    .unwrap();
    assert_eq!(config.socket_addr().to_string(), "127.0.0.1:9100");
    assert_eq!(config.frontend_origin, "http://localhost:5173");
    assert_eq!(config.delay.max(), Duration::from_millis(10));
}

#[test]
fn test_from_lookup_rejects_bad_values() {
    let err = Config::from_lookup(|key| (key == "RAG_API_PORT").then(|| "eighty".into())).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { key: "RAG_API_PORT", .. }));

    let err = Config::from_lookup(|key| match key {
        "RAG_API_DELAY_MIN_MS" => Some("900".into()),
        "RAG_API_DELAY_MAX_MS" => Some("100".into()),
        _ => None,
    })
    .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidDelay { .. }));

    let err = Config::from_lookup(|key| {
        (key == "RAG_API_FRONTEND_ORIGIN").then(|| "http://bad\norigin".into())
    })
    .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidOrigin(_)));
}
