//! Project models and DTOs.

use chrono::{DateTime, Utc};
use mytherion_core::PaginationMeta;
use mytherion_core::serde::{deserialize_optional_trimmed, deserialize_trimmed};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::entities::EntityType;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Project {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub genre: Option<String>,
    /// Free-form world settings
    #[schema(value_type = Option<Object>)]
    pub settings: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProjectDto {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    #[schema(example = "The Shattered Isles")]
    #[serde(deserialize_with = "deserialize_trimmed")]
    pub name: String,
    pub description: Option<String>,
    #[validate(length(max = 100))]
    #[schema(example = "Fantasy")]
    pub genre: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub settings: Option<serde_json::Value>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProjectDto {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(length(max = 100))]
    pub genre: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub settings: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedProjectsResponse {
    pub data: Vec<Project>,
    pub meta: PaginationMeta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EntityTypeCount {
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub entity_type: EntityType,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProjectStats {
    pub project_id: i64,
    pub total_entities: i64,
    /// Only types with at least one entity are listed
    pub entities_by_type: Vec<EntityTypeCount>,
}
