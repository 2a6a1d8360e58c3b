use axum::{Router, routing::get};

use crate::modules::entities::controller::{create_entity, get_entities};
use crate::state::AppState;

use super::controller::{
    create_project, delete_project, get_project, get_project_stats, get_projects, update_project,
};

pub fn init_projects_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_projects).post(create_project))
        .route(
            "/{id}",
            get(get_project).put(update_project).delete(delete_project),
        )
        .route("/{id}/stats", get(get_project_stats))
        .route(
            "/{id}/entities",
            get(get_entities).post(create_entity),
        )
}
