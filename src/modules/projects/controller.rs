use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use mytherion_core::{AppError, PaginationParams};
use mytherion_models::projects::{
    CreateProjectDto, PaginatedProjectsResponse, Project, ProjectStats, UpdateProjectDto,
};

use crate::middleware::identity::AuthUser;
use crate::modules::projects::service::ProjectService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/projects",
    params(PaginationParams),
    responses(
        (status = 200, description = "Caller's projects, newest first", body = PaginatedProjectsResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Projects",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_projects(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<PaginatedProjectsResponse>, AppError> {
    let projects = ProjectService::get_projects(&state.db, auth_user.user_id(), pagination).await?;
    Ok(Json(projects))
}

#[utoipa::path(
    post,
    path = "/api/projects",
    request_body = CreateProjectDto,
    responses(
        (status = 201, description = "Project created", body = Project),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Validation error")
    ),
    tag = "Projects",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_project(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateProjectDto>,
) -> Result<(StatusCode, Json<Project>), AppError> {
    let project = ProjectService::create_project(&state.db, auth_user.user_id(), dto).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    params(("id" = i64, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project found", body = Project),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Project belongs to another user"),
        (status = 404, description = "Project not found")
    ),
    tag = "Projects",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_project(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Project>, AppError> {
    let project = ProjectService::get_owned_project(&state.db, auth_user.user_id(), id).await?;
    Ok(Json(project))
}

#[utoipa::path(
    put,
    path = "/api/projects/{id}",
    params(("id" = i64, Path, description = "Project ID")),
    request_body = UpdateProjectDto,
    responses(
        (status = 200, description = "Project updated", body = Project),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Project belongs to another user"),
        (status = 404, description = "Project not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "Projects",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_project(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateProjectDto>,
) -> Result<Json<Project>, AppError> {
    let project = ProjectService::update_project(&state.db, auth_user.user_id(), id, dto).await?;
    Ok(Json(project))
}

#[utoipa::path(
    get,
    path = "/api/projects/{id}/stats",
    params(("id" = i64, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Entity counts", body = ProjectStats),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Project belongs to another user"),
        (status = 404, description = "Project not found")
    ),
    tag = "Projects",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_project_stats(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ProjectStats>, AppError> {
    let stats = ProjectService::get_project_stats(&state.db, auth_user.user_id(), id).await?;
    Ok(Json(stats))
}

#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    params(("id" = i64, Path, description = "Project ID")),
    responses(
        (status = 204, description = "Project deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Project belongs to another user"),
        (status = 404, description = "Project not found"),
        (status = 409, description = "Project still contains entities")
    ),
    tag = "Projects",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_project(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    ProjectService::delete_project(&state.db, auth_user.user_id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
