//! Project entity models and DTOs.
//!
//! An entity is one entry of a project's story bible: a character, a place,
//! an item and so on. Entities carry free-form `metadata` and a list of tags
//! used for filtering.

use chrono::{DateTime, Utc};
use mytherion_core::serde::{deserialize_optional_trimmed, deserialize_trimmed};
use mytherion_core::{PaginationMeta, PaginationParams};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
    sqlx::Type,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(type_name = "entity_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    Character,
    Organization,
    Culture,
    Species,
    Location,
    Item,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Entity {
    pub id: i64,
    pub project_id: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub entity_type: EntityType,
    pub name: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEntityDto {
    #[serde(rename = "type")]
    pub entity_type: EntityType,
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    #[schema(example = "Gandalf")]
    #[serde(deserialize_with = "deserialize_trimmed")]
    pub name: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<serde_json::Value>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateEntityDto {
    #[serde(rename = "type")]
    pub entity_type: Option<EntityType>,
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
    pub name: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EntityFilterParams {
    /// Exact entity type
    #[serde(rename = "type")]
    pub entity_type: Option<EntityType>,
    /// Comma-separated tags; an entity matches if it has any of them
    pub tags: Option<String>,
    /// Case-insensitive substring of name, summary or description
    pub search: Option<String>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

impl EntityFilterParams {
    /// Tags from the comma-separated `tags` parameter, trimmed, blanks dropped.
    /// `None` means no tag filter.
    pub fn tag_list(&self) -> Option<Vec<String>> {
        let tags: Vec<String> = self
            .tags
            .as_deref()?
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        (!tags.is_empty()).then_some(tags)
    }

    /// `ILIKE` pattern for the search term with LIKE wildcards escaped.
    pub fn search_pattern(&self) -> Option<String> {
        let term = self.search.as_deref()?.trim();
        if term.is_empty() {
            return None;
        }

        let escaped = term
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        Some(format!("%{escaped}%"))
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedEntitiesResponse {
    pub data: Vec<Entity>,
    pub meta: PaginationMeta,
}
