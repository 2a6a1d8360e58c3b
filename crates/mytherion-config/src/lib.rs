//! # Mytherion Config
//!
//! Configuration types for the Mytherion API, loaded once at startup from
//! environment variables and shared read-only afterwards.
//!
//! - [`jwt`]: Token signing secret, lifetime and cookie flags
//! - [`database`]: PostgreSQL connection settings
//! - [`server`]: Bind address
//! - [`cors`]: CORS allowed origins
//!
//! Every loader has a `from_lookup` form taking a closure so configuration can
//! be exercised in tests without touching the process environment.
//!
//! # Example
//!
//! ```ignore
//! use mytherion_config::AppConfig;
//!
//! let config = AppConfig::from_env()?;
//! println!("listening on {}", config.server.addr());
//! ```

pub mod cors;
pub mod database;
pub mod error;
pub mod jwt;
pub mod server;

pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use jwt::{JwtConfig, MAX_ACCESS_TOKEN_MINUTES};
pub use server::ServerConfig;

/// All configuration the server needs, loaded together at startup.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub jwt: JwtConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub cors: CorsConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            jwt: JwtConfig::from_lookup(&lookup)?,
            database: DatabaseConfig::from_lookup(&lookup)?,
            server: ServerConfig::from_lookup(&lookup)?,
            cors: CorsConfig::from_lookup(&lookup),
        })
    }
}

/// Reads a variable, treating blank values as unset.
pub(crate) fn non_blank<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
