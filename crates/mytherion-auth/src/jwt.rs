//! Access token issuance and validation.
//!
//! [`TokenCodec`] is built once at startup from [`JwtConfig`] and shared
//! read-only by every request. Both operations are pure CPU work: issuing
//! signs a [`Claims`] set with HMAC-SHA256, validating checks the signature
//! and the `iat <= now < exp` window and rebuilds a [`Principal`].
//!
//! The `*_at` variants take the current time explicitly so expiry is
//! deterministic under test.
//!
//! # Example
//!
//! ```ignore
//! let codec = TokenCodec::new(&jwt_config);
//!
//! let token = codec.issue(user.id, &user.email, Role::User)?;
//! match codec.validate(&token) {
//!     Ok(principal) => println!("user {}", principal.subject_id),
//!     Err(e) => tracing::debug!(error = %e, "rejected token"),
//! }
//! ```

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use mytherion_config::{JwtConfig, MAX_ACCESS_TOKEN_MINUTES};

use crate::claims::{Claims, Role};
use crate::principal::Principal;

/// Why a token was rejected.
///
/// Callers treat every variant the same way (no identity); the variant only
/// feeds diagnostics.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,

    #[error("token signature does not match the signing key")]
    BadSignature,

    #[error("token has expired")]
    Expired,

    #[error("token was issued in the future")]
    NotYetValid,

    #[error("token subject is not a valid user id")]
    InvalidSubject,

    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// Issues and validates HS256 access tokens with a process-wide signing key.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: Duration,
}

impl TokenCodec {
    pub fn new(config: &JwtConfig) -> Self {
        let secret = config.secret.as_bytes();

        // Time-window checks are done in `validate_at` against an explicit clock.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            // Fields of `JwtConfig` are public; stay inside the range `new` accepts.
            lifetime: Duration::minutes(
                config
                    .access_token_minutes
                    .clamp(1, MAX_ACCESS_TOKEN_MINUTES),
            ),
        }
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    pub fn issue(&self, subject_id: i64, email: &str, role: Role) -> Result<String, TokenError> {
        self.issue_at(subject_id, email, role, Utc::now())
    }

    pub fn issue_at(
        &self,
        subject_id: i64,
        email: &str,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let iat = now.timestamp();
        let claims = Claims {
            sub: subject_id.to_string(),
            email: email.to_string(),
            role: Some(role.as_str().to_string()),
            iat,
            exp: iat + self.lifetime.num_seconds(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    pub fn validate(&self, token: &str) -> Result<Principal, TokenError> {
        self.validate_at(token, Utc::now())
    }

    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Principal, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                _ => TokenError::Malformed,
            })?;

        let now = now.timestamp();
        if now >= claims.exp {
            return Err(TokenError::Expired);
        }
        if claims.iat > now {
            return Err(TokenError::NotYetValid);
        }

        let subject_id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| TokenError::InvalidSubject)?;

        Ok(Principal {
            subject_id,
            role: claims.role(),
            email: claims.email,
        })
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("lifetime", &self.lifetime)
            .finish_non_exhaustive()
    }
}
