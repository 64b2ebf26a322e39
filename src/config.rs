// Runtime configuration
// Read once at startup from the environment (optionally seeded by a .env file)

use std::time::Duration;

/// Errors raised while reading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set in environment")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Connection pool settings
#[derive(Debug, Clone, PartialEq)]
pub struct PoolConfig {
    /// Upper bound on simultaneously checked-out connections
    pub max_connections: u32,
    /// How long a caller waits for a free connection before failing
    pub acquire_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

/// Argon2id work factor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: String,
    pub port: u16,
    pub pool: PoolConfig,
    pub hashing: HashingConfig,
}

impl Config {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let pool_defaults = PoolConfig::default();
        let hashing_defaults = HashingConfig::default();

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 5000)?,
            pool: PoolConfig {
                max_connections: parse_or(
                    &lookup,
                    "DB_MAX_CONNECTIONS",
                    pool_defaults.max_connections,
                )?,
                acquire_timeout: Duration::from_secs(parse_or(
                    &lookup,
                    "DB_ACQUIRE_TIMEOUT_SECS",
                    pool_defaults.acquire_timeout.as_secs(),
                )?),
            },
            hashing: HashingConfig {
                memory_kib: parse_or(
                    &lookup,
                    "PASSWORD_HASH_MEMORY_KIB",
                    hashing_defaults.memory_kib,
                )?,
                iterations: parse_or(
                    &lookup,
                    "PASSWORD_HASH_ITERATIONS",
                    hashing_defaults.iterations,
                )?,
                parallelism: parse_or(
                    &lookup,
                    "PASSWORD_HASH_PARALLELISM",
                    hashing_defaults.parallelism,
                )?,
            },
        })
    }

    /// Address the HTTP listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}
