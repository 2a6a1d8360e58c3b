use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{info, instrument};

use mytherion_core::{AppError, PaginationParams};
use mytherion_models::projects::{
    CreateProjectDto, EntityTypeCount, PaginatedProjectsResponse, Project, ProjectStats,
    UpdateProjectDto,
};

const PROJECT_COLUMNS: &str =
    "id, owner_id, name, description, genre, settings, created_at, updated_at";

pub struct ProjectService;

impl ProjectService {
    /// Loads an active project and checks that `owner_id` owns it.
    ///
    /// Missing or deleted projects are 404, projects of other users are 403.
    #[instrument(skip(db))]
    pub async fn get_owned_project(
        db: &PgPool,
        owner_id: i64,
        id: i64,
    ) -> Result<Project, AppError> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Project not found")))?;

        if project.owner_id != owner_id {
            return Err(AppError::forbidden(anyhow!(
                "You do not have access to this project"
            )));
        }

        Ok(project)
    }

    #[instrument(skip(db))]
    pub async fn get_projects(
        db: &PgPool,
        owner_id: i64,
        pagination: PaginationParams,
    ) -> Result<PaginatedProjectsResponse, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM projects WHERE owner_id = $1 AND deleted_at IS NULL",
        )
        .bind(owner_id)
        .fetch_one(db)
        .await?;

        let data = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects
             WHERE owner_id = $1 AND deleted_at IS NULL
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        ))
        .bind(owner_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(db)
        .await?;

        Ok(PaginatedProjectsResponse {
            data,
            meta: pagination.meta(total),
        })
    }

    #[instrument(skip(db, dto), fields(name = %dto.name))]
    pub async fn create_project(
        db: &PgPool,
        owner_id: i64,
        dto: CreateProjectDto,
    ) -> Result<Project, AppError> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "INSERT INTO projects (owner_id, name, description, genre, settings)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {PROJECT_COLUMNS}"
        ))
        .bind(owner_id)
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(&dto.genre)
        .bind(&dto.settings)
        .fetch_one(db)
        .await?;

        info!(project_id = project.id, owner_id, "Project created");
        Ok(project)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_project(
        db: &PgPool,
        owner_id: i64,
        id: i64,
        dto: UpdateProjectDto,
    ) -> Result<Project, AppError> {
        Self::get_owned_project(db, owner_id, id).await?;

        let project = sqlx::query_as::<_, Project>(&format!(
            "UPDATE projects
             SET name = COALESCE($2, name),
                 description = COALESCE($3, description),
                 genre = COALESCE($4, genre),
                 settings = COALESCE($5, settings),
                 updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {PROJECT_COLUMNS}"
        ))
        .bind(id)
        .bind(&dto.name)
        .bind(&dto.description)
        .bind(&dto.genre)
        .bind(&dto.settings)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Project not found")))?;

        Ok(project)
    }

    #[instrument(skip(db))]
    pub async fn get_project_stats(
        db: &PgPool,
        owner_id: i64,
        id: i64,
    ) -> Result<ProjectStats, AppError> {
        Self::get_owned_project(db, owner_id, id).await?;

        let entities_by_type = sqlx::query_as::<_, EntityTypeCount>(
            r#"SELECT type, COUNT(*) AS count
               FROM entities
               WHERE project_id = $1 AND deleted_at IS NULL
               GROUP BY type
               ORDER BY type"#,
        )
        .bind(id)
        .fetch_all(db)
        .await?;

        Ok(ProjectStats {
            project_id: id,
            total_entities: entities_by_type.iter().map(|c| c.count).sum(),
            entities_by_type,
        })
    }

    /// Soft-deletes a project. Refused while it still holds active entities.
    #[instrument(skip(db))]
    pub async fn delete_project(db: &PgPool, owner_id: i64, id: i64) -> Result<(), AppError> {
        Self::get_owned_project(db, owner_id, id).await?;

        let result = sqlx::query(
            r#"UPDATE projects
               SET deleted_at = NOW(), updated_at = NOW()
               WHERE id = $1
                 AND deleted_at IS NULL
                 AND NOT EXISTS (
                     SELECT 1 FROM entities WHERE project_id = $1 AND deleted_at IS NULL
                 )"#,
        )
        .bind(id)
        .execute(db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::conflict(anyhow!(
                "Project still contains entities; delete all entities first"
            )));
        }

        info!(project_id = id, "Project soft-deleted");
        Ok(())
    }
}
