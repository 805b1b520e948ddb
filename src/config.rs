use std::env;
use std::fmt;

pub const DEFAULT_TOKEN_EXPIRES_IN: i64 = 3600;
pub const DEFAULT_ITEMS_PER_PAGE: u32 = 20;

#[derive(Debug, Clone)]
pub struct Config {
    /// When absent the server runs against the in-memory store.
    pub database_url: Option<String>,
    pub server_port: u16,
    pub server_host: String,
    pub jwt_secret: String,
    /// Lifetime of issued access tokens, in seconds.
    pub token_expires_in: i64,
    pub items_per_page: u32,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str, String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid(key, value) => write!(f, "{} has invalid value {:?}", key, value),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            server_port: parse_or(&lookup, "SERVER_PORT", 8080)?,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            jwt_secret: lookup("JWT_SECRET")
                .filter(|secret| !secret.is_empty())
                .ok_or(ConfigError::Missing("JWT_SECRET"))?,
            token_expires_in: parse_or(&lookup, "TOKEN_EXPIRES_IN", DEFAULT_TOKEN_EXPIRES_IN)?,
            items_per_page: parse_or(&lookup, "ITEMS_PER_PAGE", DEFAULT_ITEMS_PER_PAGE)?,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid(key, raw)),
        None => Ok(default),
    }
}
