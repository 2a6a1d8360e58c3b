use std::convert::Infallible;

use anyhow::anyhow;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use mytherion_auth::{Identity, Principal, TokenCodec};
use mytherion_core::AppError;

use crate::state::AppState;
use crate::utils::cookie::token_from_cookie;

/// Token presented on a request: the cookie wins, the bearer header is the fallback.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    // An empty `mytherion_token=` counts as no cookie, so the header still
    // applies (recorded under "Open questions and decisions" in DESIGN.md).
    if let Some(token) = token_from_cookie(headers) {
        return Some(token);
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Resolves the identity of a request from its headers. Invalid tokens resolve
/// to [`Identity::Anonymous`]; the cause is only logged.
pub fn resolve_identity(headers: &HeaderMap, tokens: &TokenCodec) -> Identity {
    let Some(token) = extract_token(headers) else {
        return Identity::Anonymous;
    };

    match tokens.validate(&token) {
        Ok(principal) => Identity::Authenticated(principal),
        Err(e) => {
            debug!(reason = %e, "Ignoring invalid access token");
            Identity::Anonymous
        }
    }
}

/// Attaches the request's [`Identity`] to its extensions, replacing any
/// identity already there.
pub async fn identity_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let identity = resolve_identity(req.headers(), &state.tokens);
    req.extensions_mut().insert(identity);
    next.run(req).await
}

/// Extractor for routes that require an authenticated caller.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl AuthUser {
    pub fn user_id(&self) -> i64 {
        self.0.subject_id
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .and_then(Identity::principal)
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AppError::unauthorized(anyhow!("Authentication required")))
    }
}

/// Extractor for routes that behave differently for signed-in callers but
/// also serve anonymous ones.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<Principal>);

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthUser(
            parts
                .extensions
                .get::<Identity>()
                .and_then(Identity::principal)
                .cloned(),
        ))
    }
}
