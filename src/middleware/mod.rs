//! Request middleware and extractors.
//!
//! # Authentication Flow
//!
//! 1. [`identity::identity_middleware`] runs on every request. It reads the
//!    token from the `mytherion_token` cookie, or from an
//!    `Authorization: Bearer <token>` header when no cookie is sent, and stores
//!    the resulting [`Identity`](mytherion_auth::Identity) in the request
//!    extensions. It never rejects a request.
//! 2. Handlers pick the identity up with [`identity::AuthUser`] (401 when
//!    anonymous) or [`identity::MaybeAuthUser`] (never rejects).
//! 3. Ownership checks happen in the services, against the principal's id.
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::identity::AuthUser;
//!
//! async fn get_project(
//!     State(state): State<AppState>,
//!     auth_user: AuthUser,
//!     Path(id): Path<i64>,
//! ) -> Result<Json<Project>, AppError> {
//!     let project = ProjectService::get_owned_project(&state.db, auth_user.user_id(), id).await?;
//!     Ok(Json(project))
//! }
//! ```

pub mod identity;

pub use identity::{AuthUser, MaybeAuthUser, identity_middleware, resolve_identity};
