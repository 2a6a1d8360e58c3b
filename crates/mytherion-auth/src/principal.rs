//! Resolved request identity.

use serde::Serialize;
use utoipa::ToSchema;

use crate::claims::Role;

/// The authenticated identity a valid token stands for.
///
/// Mirrors the user record at issuance time and is not re-checked against
/// storage for the life of the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Principal {
    pub subject_id: i64,
    pub email: String,
    pub role: Role,
}

/// Outcome of identity resolution for a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Identity {
    #[default]
    Anonymous,
    Authenticated(Principal),
}

impl Identity {
    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Identity::Authenticated(principal) => Some(principal),
            Identity::Anonymous => None,
        }
    }

    pub fn into_principal(self) -> Option<Principal> {
        match self {
            Identity::Authenticated(principal) => Some(principal),
            Identity::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Identity::Authenticated(_))
    }
}
