//! # Mytherion Auth
//!
//! Stateless token authentication for the Mytherion API.
//!
//! - [`claims`]: The typed claim set carried by access tokens, and [`Role`]
//! - [`jwt`]: [`TokenCodec`], which issues and validates HS256-signed tokens
//! - [`principal`]: [`Principal`] and the per-request [`Identity`]
//!
//! Tokens are never stored server-side: a token is accepted if and only if
//! its signature matches the signing key and the current time lies in
//! `[iat, exp)`. Expiry is the only revocation mechanism.
//!
//! # Example
//!
//! ```ignore
//! use mytherion_auth::{Role, TokenCodec};
//! use mytherion_config::JwtConfig;
//!
//! let codec = TokenCodec::new(&JwtConfig::new("signing-secret", 60)?);
//! let token = codec.issue(42, "a@b.com", Role::Admin)?;
//!
//! let principal = codec.validate(&token)?;
//! assert_eq!(principal.subject_id, 42);
//! ```

pub mod claims;
pub mod jwt;
pub mod principal;

pub use claims::{Claims, Role};
pub use jwt::{TokenCodec, TokenError};
pub use principal::{Identity, Principal};
