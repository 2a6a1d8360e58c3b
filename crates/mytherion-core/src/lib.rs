//! # Mytherion Core
//!
//! Core types, errors, and utilities shared by every Mytherion crate.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: Pagination query parameters and response metadata
//! - [`password`]: bcrypt password hashing and verification
//! - [`serde`]: Deserialization helpers shared by request DTOs
//!
//! # Example
//!
//! ```ignore
//! use mytherion_core::{AppError, PaginationParams, hash_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Project not found"));
//! let hash = hash_password("correct horse battery staple")?;
//! let limit = PaginationParams::default().limit();
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod serde;

pub use errors::AppError;
pub use pagination::{PaginationMeta, PaginationParams};
pub use password::{hash_password, verify_password};
