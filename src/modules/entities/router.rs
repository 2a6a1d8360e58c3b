use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{delete_entity, get_entity, update_entity};

/// Routes addressing a single entity by id. Listing and creation live under
/// the parent project, see `init_projects_router`.
pub fn init_entities_router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(get_entity).patch(update_entity).delete(delete_entity),
    )
}
