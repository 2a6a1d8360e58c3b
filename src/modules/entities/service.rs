use anyhow::anyhow;
use axum::http::StatusCode;
use sqlx::PgPool;
use tracing::{info, instrument};

use mytherion_core::AppError;
use mytherion_models::entities::{
    CreateEntityDto, Entity, EntityFilterParams, PaginatedEntitiesResponse, UpdateEntityDto,
};

use crate::modules::projects::service::ProjectService;

const ENTITY_COLUMNS: &str = "id, project_id, type, name, summary, description, tags, image_url, \
                              metadata, created_at, updated_at";

// Shared by the count and page queries. $1 project, $2 type, $3 tags, $4 search pattern.
const ENTITY_FILTER: &str = "project_id = $1
      AND deleted_at IS NULL
      AND ($2::entity_type IS NULL OR type = $2)
      AND ($3::text[] IS NULL OR tags && $3)
      AND ($4::text IS NULL OR name ILIKE $4 OR summary ILIKE $4 OR description ILIKE $4)";

pub struct EntityService;

impl EntityService {
    #[instrument(skip(db))]
    pub async fn get_entities(
        db: &PgPool,
        owner_id: i64,
        project_id: i64,
        filters: EntityFilterParams,
    ) -> Result<PaginatedEntitiesResponse, AppError> {
        ProjectService::get_owned_project(db, owner_id, project_id).await?;

        let tags = filters.tag_list();
        let search = filters.search_pattern();
        let pagination = &filters.pagination;

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM entities WHERE {ENTITY_FILTER}"
        ))
        .bind(project_id)
        .bind(filters.entity_type)
        .bind(&tags)
        .bind(&search)
        .fetch_one(db)
        .await?;

        let data = sqlx::query_as::<_, Entity>(&format!(
            "SELECT {ENTITY_COLUMNS} FROM entities
             WHERE {ENTITY_FILTER}
             ORDER BY updated_at DESC, id DESC
             LIMIT $5 OFFSET $6"
        ))
        .bind(project_id)
        .bind(filters.entity_type)
        .bind(&tags)
        .bind(&search)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedEntitiesResponse {
            data,
            meta: pagination.meta(total),
        })
    }

    #[instrument(skip(db, dto), fields(entity_type = ?dto.entity_type, name = %dto.name))]
    pub async fn create_entity(
        db: &PgPool,
        owner_id: i64,
        project_id: i64,
        dto: CreateEntityDto,
    ) -> Result<Entity, AppError> {
        ProjectService::get_owned_project(db, owner_id, project_id).await?;

        let entity = sqlx::query_as::<_, Entity>(&format!(
            "INSERT INTO entities
                 (project_id, type, name, summary, description, tags, image_url, metadata)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {ENTITY_COLUMNS}"
        ))
        .bind(project_id)
        .bind(dto.entity_type)
        .bind(&dto.name)
        .bind(&dto.summary)
        .bind(&dto.description)
        .bind(normalize_tags(dto.tags))
        .bind(&dto.image_url)
        .bind(&dto.metadata)
        .fetch_one(db)
        .await?;

        info!(entity_id = entity.id, project_id, "Entity created");
        Ok(entity)
    }

    /// Loads an active entity of an active project owned by `owner_id`.
    #[instrument(skip(db))]
    pub async fn get_entity(db: &PgPool, owner_id: i64, id: i64) -> Result<Entity, AppError> {
        let entity = sqlx::query_as::<_, Entity>(&format!(
            "SELECT {ENTITY_COLUMNS} FROM entities WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Entity not found")))?;

        // A deleted parent hides its entities.
        ProjectService::get_owned_project(db, owner_id, entity.project_id)
            .await
            .map_err(|e| {
                if e.status == StatusCode::NOT_FOUND {
                    AppError::not_found(anyhow!("Entity not found"))
                } else {
                    e
                }
            })?;

        Ok(entity)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_entity(
        db: &PgPool,
        owner_id: i64,
        id: i64,
        dto: UpdateEntityDto,
    ) -> Result<Entity, AppError> {
        Self::get_entity(db, owner_id, id).await?;

        let entity = sqlx::query_as::<_, Entity>(&format!(
            "UPDATE entities
             SET type = COALESCE($2, type),
                 name = COALESCE($3, name),
                 summary = COALESCE($4, summary),
                 description = COALESCE($5, description),
                 tags = COALESCE($6, tags),
                 image_url = COALESCE($7, image_url),
                 metadata = COALESCE($8, metadata),
                 updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {ENTITY_COLUMNS}"
        ))
        .bind(id)
        .bind(dto.entity_type)
        .bind(&dto.name)
        .bind(&dto.summary)
        .bind(&dto.description)
        .bind(dto.tags.map(normalize_tags))
        .bind(&dto.image_url)
        .bind(&dto.metadata)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Entity not found")))?;

        Ok(entity)
    }

    #[instrument(skip(db))]
    pub async fn delete_entity(db: &PgPool, owner_id: i64, id: i64) -> Result<(), AppError> {
        Self::get_entity(db, owner_id, id).await?;

        let result = sqlx::query(
            "UPDATE entities SET deleted_at = NOW(), updated_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow!("Entity not found")));
        }

        info!(entity_id = id, "Entity soft-deleted");
        Ok(())
    }
}

/// Trims tags, drops blanks and duplicates, keeps first-seen order.
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tags() {
        let tags = vec![
            " hero ".to_string(),
            "mage".to_string(),
            "".to_string(),
            "hero".to_string(),
        ];
        assert_eq!(normalize_tags(tags), vec!["hero", "mage"]);
        assert!(normalize_tags(vec![]).is_empty());
    }
}
