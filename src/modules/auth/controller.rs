use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{info, instrument};
use utoipa::ToSchema;

use mytherion_core::AppError;
use mytherion_models::auth::{
    AuthResponse, AuthUser as AuthUserDto, LoginRequest, MeResponse, RegisterRequest,
};
use mytherion_models::users::User;

use super::service::AuthService;
use crate::middleware::identity::{AuthUser, MaybeAuthUser};
use crate::state::AppState;
use crate::utils::cookie::{cleared_cookie, session_cookie, set_cookie};
use crate::validator::ValidatedJson;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Issues a token for `user` and returns it both in the body and as a cookie.
fn token_response(state: &AppState, status: StatusCode, user: &User) -> Result<Response, AppError> {
    let access_token = AuthService::issue_token(&state.tokens, user)?;
    let cookie = session_cookie(&access_token, &state.jwt_config)?;

    let body = AuthResponse {
        access_token,
        user: AuthUserDto::from(user),
    };

    Ok((status, set_cookie(cookie), Json(body)).into_response())
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created and signed in", body = AuthResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 409, description = "Email or username already in use", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<Response, AppError> {
    let user = AuthService::register_user(&state.db, dto).await?;
    token_response(&state, StatusCode::CREATED, &user)
}

/// Sign in with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Response, AppError> {
    let user = AuthService::login_user(&state.db, dto).await?;
    token_response(&state, StatusCode::OK, &user)
}

/// Clear the token cookie
///
/// Tokens are not revoked server-side; a token kept by the client stays valid
/// until it expires.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 204, description = "Cookie cleared")
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn logout_user(
    State(state): State<AppState>,
    MaybeAuthUser(principal): MaybeAuthUser,
) -> Result<Response, AppError> {
    let cookie = cleared_cookie(&state.jwt_config)?;
    if let Some(principal) = principal {
        info!(user_id = principal.subject_id, "User logged out");
    }
    Ok((StatusCode::NO_CONTENT, set_cookie(cookie)).into_response())
}

/// Identity carried by the caller's token
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current identity", body = MeResponse),
        (status = 401, description = "Not signed in", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip_all, fields(user_id = auth_user.user_id()))]
pub async fn get_me(auth_user: AuthUser) -> Json<MeResponse> {
    Json(MeResponse::from(auth_user.0))
}
