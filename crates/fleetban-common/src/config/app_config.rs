//! Application configuration structs
//!
//! Loads configuration from a `.env` file and environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub snowflake: SnowflakeConfig,
    pub relay: RelayConfig,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
    pub max_connections: u32,
}

/// JWT configuration
///
/// Tokens are minted by the panel's session layer; only the shared secret is
/// needed to verify them.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig").finish_non_exhaustive()
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub requests_per_second: u32,
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Default)]
pub struct SnowflakeConfig {
    pub worker_id: u16,
}

/// Notification relay configuration
#[derive(Clone)]
pub struct RelayConfig {
    /// Bot export endpoint; the bot channel is disabled when unset
    pub bot_export_url: Option<String>,
    pub bot_export_token: Option<String>,
    /// Upper bound on every external call
    pub timeout: Duration,
    /// Extra attempts per target after the first failure
    pub max_retries: usize,
    pub queue_capacity: usize,
    pub max_concurrent_jobs: usize,
    /// Prefix of per-node pub/sub channels
    pub fleet_channel_prefix: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bot_export_url: None,
            bot_export_token: None,
            timeout: Duration::from_millis(default_relay_timeout_ms()),
            max_retries: 0,
            queue_capacity: default_relay_queue_capacity(),
            max_concurrent_jobs: default_relay_max_concurrent_jobs(),
            fleet_channel_prefix: default_fleet_channel_prefix(),
        }
    }
}

impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("bot_export_url", &self.bot_export_url)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("queue_capacity", &self.queue_capacity)
            .field("max_concurrent_jobs", &self.max_concurrent_jobs)
            .field("fleet_channel_prefix", &self.fleet_channel_prefix)
            .finish_non_exhaustive()
    }
}

// Default value functions
fn default_app_name() -> String {
    "fleetban".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_relay_timeout_ms() -> u64 {
    5000
}

fn default_relay_queue_capacity() -> usize {
    1024
}

fn default_relay_max_concurrent_jobs() -> usize {
    16
}

fn default_fleet_channel_prefix() -> String {
    "node:".to_string()
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or
    /// a numeric variable does not parse
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    ///
    /// # Errors
    /// Same as [`AppConfig::from_env`]
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        let relay_timeout_ms: u64 = vars.parse_or("RELAY_TIMEOUT_MS", default_relay_timeout_ms)?;
        let worker_id: u16 = vars.parse_or("WORKER_ID", || 0)?;
        if worker_id >= 1024 {
            return Err(ConfigError::InvalidValue(
                "WORKER_ID",
                "must be below 1024".to_string(),
            ));
        }

        Ok(Self {
            app: AppSettings {
                name: vars.get("APP_NAME").unwrap_or_else(default_app_name),
                env: vars
                    .get("APP_ENV")
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: vars.get("API_HOST").unwrap_or_else(default_host),
                port: vars.parse_required("API_PORT")?,
            },
            database: DatabaseConfig {
                url: vars.required("DATABASE_URL")?,
                max_connections: vars
                    .parse_or("DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: vars
                    .parse_or("DATABASE_MIN_CONNECTIONS", default_min_connections)?,
            },
            redis: RedisConfig {
                url: vars.required("REDIS_URL")?,
                max_connections: vars
                    .parse_or("REDIS_MAX_CONNECTIONS", default_redis_max_connections)?,
            },
            jwt: JwtConfig {
                secret: vars.required("JWT_SECRET")?,
            },
            rate_limit: RateLimitConfig {
                requests_per_second: vars
                    .parse_or("RATE_LIMIT_REQUESTS_PER_SECOND", default_requests_per_second)?,
                burst: vars.parse_or("RATE_LIMIT_BURST", default_burst)?,
            },
            cors: CorsConfig {
                allowed_origins: vars
                    .get("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            snowflake: SnowflakeConfig { worker_id },
            relay: RelayConfig {
                bot_export_url: vars.get("BOT_EXPORT_URL"),
                bot_export_token: vars.get("BOT_EXPORT_TOKEN"),
                timeout: Duration::from_millis(relay_timeout_ms),
                max_retries: vars.parse_or("RELAY_MAX_RETRIES", || 0)?,
                queue_capacity: vars
                    .parse_or("RELAY_QUEUE_CAPACITY", default_relay_queue_capacity)?
                    .max(1),
                max_concurrent_jobs: vars
                    .parse_or("RELAY_MAX_CONCURRENT_JOBS", default_relay_max_concurrent_jobs)?
                    .max(1),
                fleet_channel_prefix: vars
                    .get("FLEET_CHANNEL_PREFIX")
                    .unwrap_or_else(default_fleet_channel_prefix),
            },
        })
    }
}

/// Lookup wrapper; blank values count as unset
struct Vars<F>(F);

impl<F: Fn(&str) -> Option<String>> Vars<F> {
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.get(key).ok_or(ConfigError::MissingVar(key))
    }

    fn parse_required<T: FromStr>(&self, key: &'static str) -> Result<T, ConfigError> {
        let raw = self.required(key)?;
        raw.trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw))
    }

    fn parse_or<T: FromStr>(
        &self,
        key: &'static str,
        default: impl FnOnce() -> T,
    ) -> Result<T, ConfigError> {
        match self.get(key) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(key, raw)),
            None => Ok(default()),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 4] = [
        ("API_PORT", "8080"),
        ("DATABASE_URL", "postgres://localhost/fleetban"),
        ("REDIS_URL", "redis://localhost"),
        ("JWT_SECRET", "secret"),
    ];

    #[test]
    fn test_environment_is_production() {
        assert!(!Environment::Development.is_production());
        assert!(!Environment::Staging.is_production());
        assert!(Environment::Production.is_production());
    }

    #[test]
    fn test_server_address() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
        };
        assert_eq!(config.address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&REQUIRED)).unwrap();

        assert_eq!(config.app.name, "fleetban");
        assert_eq!(config.app.env, Environment::Development);
        assert_eq!(config.api.address(), "127.0.0.1:8080");
        assert_eq!(config.database.max_connections, 20);
        assert!(config.relay.bot_export_url.is_none());
        assert_eq!(config.relay.timeout, Duration::from_secs(5));
        assert_eq!(config.relay.max_retries, 0);
        assert_eq!(config.relay.queue_capacity, 1024);
        assert_eq!(config.relay.max_concurrent_jobs, 16);
        assert_eq!(config.relay.fleet_channel_prefix, "node:");
    }

    #[test]
    fn test_relay_overrides() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("BOT_EXPORT_URL", "http://bot.local/export"),
            ("RELAY_TIMEOUT_MS", "250"),
            ("RELAY_MAX_RETRIES", "2"),
            ("RELAY_MAX_CONCURRENT_JOBS", "0"),
            ("APP_ENV", "Production"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, ,https://b.example"),
        ]);
        let config = AppConfig::from_lookup(lookup(&pairs)).unwrap();

        assert_eq!(
            config.relay.bot_export_url.as_deref(),
            Some("http://bot.local/export")
        );
        assert_eq!(config.relay.timeout, Duration::from_millis(250));
        assert_eq!(config.relay.max_retries, 2);
        assert_eq!(config.relay.max_concurrent_jobs, 1);
        assert!(config.app.env.is_production());
        assert_eq!(config.cors.allowed_origins.len(), 2);
    }

    #[test]
    fn test_missing_required_var() {
        let err = AppConfig::from_lookup(lookup(&REQUIRED[..3])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("JWT_SECRET")));
    }

    #[test]
    fn test_invalid_number() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("RELAY_TIMEOUT_MS", "soon"));
        let err = AppConfig::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("RELAY_TIMEOUT_MS", _)));
    }

    #[test]
    fn test_worker_id_out_of_range() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("WORKER_ID", "4096"));
        assert!(AppConfig::from_lookup(lookup(&pairs)).is_err());
    }
}
