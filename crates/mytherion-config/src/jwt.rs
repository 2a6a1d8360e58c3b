use crate::error::ConfigError;
use crate::non_blank;

/// Longest accepted access token lifetime: one year.
pub const MAX_ACCESS_TOKEN_MINUTES: i64 = 365 * 24 * 60;

/// Token signing and cookie configuration.
///
/// # Environment Variables
///
/// - `JWT_SECRET`: HMAC signing secret (required, non-empty)
/// - `JWT_ACCESS_TOKEN_MINUTES`: access token lifetime (required, 1 to one year)
/// - `COOKIE_SECURE`: set the `Secure` flag on the token cookie (default: false)
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_minutes: i64,
    pub cookie_secure: bool,
}

impl JwtConfig {
    /// Builds a validated config. An empty secret or a lifetime outside
    /// `1..=MAX_ACCESS_TOKEN_MINUTES` is rejected.
    pub fn new(secret: impl Into<String>, access_token_minutes: i64) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::Invalid {
                key: "JWT_SECRET",
                reason: "must not be empty".to_string(),
            });
        }
        if !(1..=MAX_ACCESS_TOKEN_MINUTES).contains(&access_token_minutes) {
            return Err(ConfigError::Invalid {
                key: "JWT_ACCESS_TOKEN_MINUTES",
                reason: format!(
                    "must be between 1 and {}, got {}",
                    MAX_ACCESS_TOKEN_MINUTES, access_token_minutes
                ),
            });
        }

        Ok(Self {
            secret,
            access_token_minutes,
            cookie_secure: false,
        })
    }

    #[must_use]
    pub fn with_cookie_secure(mut self, secure: bool) -> Self {
        self.cookie_secure = secure;
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&|key: &str| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let minutes = non_blank(lookup, "JWT_ACCESS_TOKEN_MINUTES")
            .ok_or(ConfigError::Missing("JWT_ACCESS_TOKEN_MINUTES"))?;
        let minutes = minutes
            .parse::<i64>()
            .map_err(|e| ConfigError::Invalid {
                key: "JWT_ACCESS_TOKEN_MINUTES",
                reason: e.to_string(),
            })?;

        let cookie_secure = match non_blank(lookup, "COOKIE_SECURE") {
            Some(v) => parse_bool(&v).ok_or_else(|| ConfigError::Invalid {
                key: "COOKIE_SECURE",
                reason: format!("expected true/false, got '{}'", v),
            })?,
            None => false,
        };

        Ok(Self::new(secret, minutes)?.with_cookie_secure(cookie_secure))
    }

    /// Token lifetime in seconds, also used as the cookie `Max-Age`.
    #[must_use]
    pub fn access_token_seconds(&self) -> i64 {
        self.access_token_minutes.saturating_mul(60)
    }
}

// The secret must never end up in logs.
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_token_minutes", &self.access_token_minutes)
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
