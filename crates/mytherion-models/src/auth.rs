//! Authentication request and response models.

use mytherion_auth::{Principal, Role};
use mytherion_core::serde::deserialize_trimmed;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::users::User;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email(message = "Email must be valid"))]
    #[schema(example = "gandalf@middle.earth")]
    #[serde(deserialize_with = "deserialize_trimmed")]
    pub email: String,
    #[validate(length(
        min = 3,
        max = 32,
        message = "Username must be between 3 and 32 characters"
    ))]
    #[schema(example = "gandalf")]
    #[serde(deserialize_with = "deserialize_trimmed")]
    pub username: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "youshallnotpass")]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Email must be valid"))]
    #[schema(example = "gandalf@middle.earth")]
    #[serde(deserialize_with = "deserialize_trimmed")]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "youshallnotpass")]
    pub password: String,
}

/// Account details returned alongside a freshly issued token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl From<&User> for AuthUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role(),
        }
    }
}

/// Successful register/login response. The same token is also set as a cookie.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: AuthUser,
}

/// The identity carried by the caller's token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MeResponse {
    pub id: i64,
    pub email: String,
    pub role: Role,
}

impl From<Principal> for MeResponse {
    fn from(principal: Principal) -> Self {
        Self {
            id: principal.subject_id,
            email: principal.email,
            role: principal.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            email: "gandalf@middle.earth".to_string(),
            username: "gandalf".to_string(),
            password: "youshallnotpass".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = RegisterRequest {
            email: "not-an-email".to_string(),
            ..valid.clone()
        };
        assert!(bad_email.validate().is_err());

        let short_password = RegisterRequest {
            password: "short".to_string(),
            ..valid.clone()
        };
        assert!(short_password.validate().is_err());

        let short_username = RegisterRequest {
            username: "gg".to_string(),
            ..valid
        };
        assert!(short_username.validate().is_err());
    }

    #[test]
    fn test_login_request_requires_password() {
        let empty = LoginRequest {
            email: "a@b.com".to_string(),
            password: String::new(),
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_me_response_from_principal() {
        let me = MeResponse::from(Principal {
            subject_id: 42,
            email: "a@b.com".to_string(),
            role: Role::Admin,
        });
        let json = serde_json::to_value(&me).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": 42, "email": "a@b.com", "role": "ADMIN" })
        );
    }

    #[test]
    fn test_register_request_trims_before_validation() {
        let blank: RegisterRequest = serde_json::from_value(serde_json::json!({
            "email": "gandalf@middle.earth",
            "username": "     ",
            "password": "youshallnotpass"
        }))
        .unwrap();
        assert!(blank.validate().is_err());

        let padded: RegisterRequest = serde_json::from_value(serde_json::json!({
            "email": "  gandalf@middle.earth ",
            "username": " gandalf ",
            "password": " keep spaces "
        }))
        .unwrap();
        assert_eq!(padded.email, "gandalf@middle.earth");
        assert_eq!(padded.username, "gandalf");
        assert_eq!(padded.password, " keep spaces ");
        assert!(padded.validate().is_ok());
    }
}
