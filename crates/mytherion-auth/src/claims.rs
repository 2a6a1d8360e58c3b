//! Access token claims.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Account role carried in the `role` claim.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }

    /// Parses the wire name of a role. Unknown names yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "USER" => Some(Role::User),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Resolves the role claim of a validated token.
    ///
    /// An absent or unrecognized claim falls back to [`Role::User`].
    pub fn from_claim(claim: Option<&str>) -> Self {
        claim.and_then(Role::parse).unwrap_or_default()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims embedded in an access token.
///
/// - `sub`: user id as a decimal string
/// - `email`: the user's email at issuance time
/// - `role`: role name, optional on the wire
/// - `iat` / `exp`: issued-at and expiry, Unix seconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn role(&self) -> Role {
        Role::from_claim(self.role.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_names() {
        assert_eq!(Role::User.as_str(), "USER");
        assert_eq!(Role::Admin.to_string(), "ADMIN");
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""ADMIN""#);
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::parse("USER"), Some(Role::User));
        assert_eq!(Role::parse("admin"), None);
        assert_eq!(Role::parse("SUPERUSER"), None);
    }

    #[test]
    fn test_role_claim_fallback() {
        assert_eq!(Role::from_claim(Some("ADMIN")), Role::Admin);
        assert_eq!(Role::from_claim(Some("WIZARD")), Role::User);
        assert_eq!(Role::from_claim(None), Role::User);
    }

    #[test]
    fn test_claims_without_role_deserialize() {
        let json = r#"{"sub":"7","email":"x@y.z","iat":1700000000,"exp":1700003600}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();

        assert_eq!(claims.role, None);
        assert_eq!(claims.role(), Role::User);
    }

    #[test]
    fn test_claims_serialize() {
        let claims = Claims {
            sub: "42".to_string(),
            email: "a@b.com".to_string(),
            role: Some("ADMIN".to_string()),
            iat: 1700000000,
            exp: 1700003600,
        };
        let serialized = serde_json::to_string(&claims).unwrap();
        assert!(serialized.contains(r#""sub":"42""#));
        assert!(serialized.contains(r#""role":"ADMIN""#));
    }
}
