use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;

use mytherion_core::AppError;
use mytherion_models::entities::{
    CreateEntityDto, Entity, EntityFilterParams, PaginatedEntitiesResponse, UpdateEntityDto,
};

use crate::middleware::identity::AuthUser;
use crate::modules::entities::service::EntityService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/projects/{id}/entities",
    params(
        ("id" = i64, Path, description = "Project ID"),
        EntityFilterParams
    ),
    responses(
        (status = 200, description = "Matching entities, most recently updated first", body = PaginatedEntitiesResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Project belongs to another user"),
        (status = 404, description = "Project not found")
    ),
    tag = "Entities",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_entities(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(project_id): Path<i64>,
    Query(filters): Query<EntityFilterParams>,
) -> Result<Json<PaginatedEntitiesResponse>, AppError> {
    let entities =
        EntityService::get_entities(&state.db, auth_user.user_id(), project_id, filters).await?;
    Ok(Json(entities))
}

#[utoipa::path(
    post,
    path = "/api/projects/{id}/entities",
    params(("id" = i64, Path, description = "Project ID")),
    request_body = CreateEntityDto,
    responses(
        (status = 201, description = "Entity created", body = Entity),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Project belongs to another user"),
        (status = 404, description = "Project not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "Entities",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_entity(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(project_id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<CreateEntityDto>,
) -> Result<(StatusCode, Json<Entity>), AppError> {
    let entity =
        EntityService::create_entity(&state.db, auth_user.user_id(), project_id, dto).await?;
    Ok((StatusCode::CREATED, Json(entity)))
}

#[utoipa::path(
    get,
    path = "/api/entities/{id}",
    params(("id" = i64, Path, description = "Entity ID")),
    responses(
        (status = 200, description = "Entity found", body = Entity),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Project belongs to another user"),
        (status = 404, description = "Entity not found")
    ),
    tag = "Entities",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_entity(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Entity>, AppError> {
    let entity = EntityService::get_entity(&state.db, auth_user.user_id(), id).await?;
    Ok(Json(entity))
}

#[utoipa::path(
    patch,
    path = "/api/entities/{id}",
    params(("id" = i64, Path, description = "Entity ID")),
    request_body = UpdateEntityDto,
    responses(
        (status = 200, description = "Entity updated", body = Entity),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Project belongs to another user"),
        (status = 404, description = "Entity not found"),
        (status = 422, description = "Validation error")
    ),
    tag = "Entities",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_entity(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateEntityDto>,
) -> Result<Json<Entity>, AppError> {
    let entity = EntityService::update_entity(&state.db, auth_user.user_id(), id, dto).await?;
    Ok(Json(entity))
}

#[utoipa::path(
    delete,
    path = "/api/entities/{id}",
    params(("id" = i64, Path, description = "Entity ID")),
    responses(
        (status = 204, description = "Entity deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Project belongs to another user"),
        (status = 404, description = "Entity not found")
    ),
    tag = "Entities",
    security(("bearer_auth" = []), ("cookie_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_entity(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    EntityService::delete_entity(&state.db, auth_user.user_id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
