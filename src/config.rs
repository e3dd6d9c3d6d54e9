//! Application configuration, read once at startup and passed explicitly to the
//! components that need it.

use chrono::Duration;
use sqlx::postgres::PgConnectOptions;
use std::env;

/// Secret used when `JWT_SECRET` is not set. Fine for local runs only.
pub const DEFAULT_JWT_SECRET: &str = "change-this";
pub const DEFAULT_JWT_EXP_HOURS: i64 = 24;
/// Longest accepted token lifetime (ten years). Larger settings are clamped.
pub const MAX_JWT_EXP_HOURS: i64 = 24 * 365 * 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: String,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Full connection string; when present it wins over the individual parts.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
}

/// Token signing settings shared by the issuer (login) and the verifier (middleware).
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub exp_hours: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup, applying the
    /// defaults for anything missing or unparseable.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let mut config = Self {
            environment: get("ENV", "development"),
            server: ServerConfig {
                host: get("HOST", "0.0.0.0"),
                port: parse_or(&lookup, "PORT", 8080),
            },
            database: DatabaseConfig {
                url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
                host: get("DB_HOST", "localhost"),
                port: parse_or(&lookup, "DB_PORT", 5432),
                user: get("DB_USER", "postgres"),
                password: get("DB_PASS", ""),
                name: get("DB_NAME", "taskdb"),
                max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10),
            },
            jwt: JwtConfig {
                secret: get("JWT_SECRET", DEFAULT_JWT_SECRET),
                exp_hours: parse_or(&lookup, "JWT_EXP_HOURS", DEFAULT_JWT_EXP_HOURS),
            },
        };

        if config.jwt.exp_hours > MAX_JWT_EXP_HOURS {
            log::warn!(
                "JWT_EXP_HOURS {} exceeds the maximum, using {}",
                config.jwt.exp_hours,
                MAX_JWT_EXP_HOURS
            );
            config.jwt.exp_hours = MAX_JWT_EXP_HOURS;
        }

        if config.jwt.secret == DEFAULT_JWT_SECRET {
            log::warn!(
                "JWT_SECRET is not set, using the built-in default (environment: {})",
                config.environment
            );
        }

        config
    }

    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

impl ServerConfig {
    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        if let Some(url) = &self.url {
            return url.parse();
        }

        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.name);
        if !self.password.is_empty() {
            options = options.password(&self.password);
        }
        Ok(options)
    }
}

impl JwtConfig {
    /// Token lifetime. Non-positive settings fall back to 24 hours and
    /// anything past `MAX_JWT_EXP_HOURS` is clamped to it.
    pub fn ttl(&self) -> Duration {
        if self.exp_hours > 0 {
            Duration::hours(self.exp_hours.min(MAX_JWT_EXP_HOURS))
        } else {
            Duration::hours(DEFAULT_JWT_EXP_HOURS)
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("{} has invalid value {:?}, using {}", key, raw, default);
            default
        }),
        None => default,
    }
}
