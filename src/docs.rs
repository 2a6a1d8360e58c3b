use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use mytherion_auth::Role;
use mytherion_core::{PaginationMeta, PaginationParams};
use mytherion_models::auth::{AuthResponse, AuthUser, LoginRequest, MeResponse, RegisterRequest};
use mytherion_models::entities::{
    CreateEntityDto, Entity, EntityFilterParams, EntityType, PaginatedEntitiesResponse,
    UpdateEntityDto,
};
use mytherion_models::projects::{
    CreateProjectDto, EntityTypeCount, PaginatedProjectsResponse, Project, ProjectStats,
    UpdateProjectDto,
};
use mytherion_models::users::{UpdateUserDto, UserResponse};

use crate::modules::auth::controller::ErrorResponse;
use crate::utils::cookie::TOKEN_COOKIE_NAME;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::logout_user,
        crate::modules::auth::controller::get_me,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::projects::controller::get_projects,
        crate::modules::projects::controller::create_project,
        crate::modules::projects::controller::get_project,
        crate::modules::projects::controller::update_project,
        crate::modules::projects::controller::get_project_stats,
        crate::modules::projects::controller::delete_project,
        crate::modules::entities::controller::get_entities,
        crate::modules::entities::controller::create_entity,
        crate::modules::entities::controller::get_entity,
        crate::modules::entities::controller::update_entity,
        crate::modules::entities::controller::delete_entity,
    ),
    components(
        schemas(
            Role,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            AuthUser,
            MeResponse,
            UserResponse,
            UpdateUserDto,
            Project,
            CreateProjectDto,
            UpdateProjectDto,
            ProjectStats,
            EntityTypeCount,
            PaginatedProjectsResponse,
            EntityType,
            Entity,
            CreateEntityDto,
            UpdateEntityDto,
            EntityFilterParams,
            PaginatedEntitiesResponse,
            PaginationMeta,
            PaginationParams,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and the current identity"),
        (name = "Users", description = "User accounts"),
        (name = "Projects", description = "Worldbuilding projects"),
        (name = "Entities", description = "Characters, locations, items and other project entries")
    ),
    info(
        title = "Mytherion API",
        version = "0.1.0",
        description = "Story-bible backend for worldbuilding projects, built with Rust, Axum and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(TOKEN_COOKIE_NAME))),
            );
        }
    }
}
