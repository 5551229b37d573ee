pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::document::handlers as documents;
use crate::export::handlers as export;
use crate::render::handlers as render;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/templates", get(render::handle_list_templates))
        // Document API
        .route(
            "/api/v1/resumes",
            post(documents::handle_create).get(documents::handle_list),
        )
        .route(
            "/api/v1/resumes/:id",
            get(documents::handle_get)
                .patch(documents::handle_update)
                .delete(documents::handle_delete),
        )
        .route(
            "/api/v1/resumes/:id/sections",
            put(documents::handle_replace_section),
        )
        .route(
            "/api/v1/resumes/:id/skills",
            post(documents::handle_add_skill),
        )
        // Preview + export API
        .route("/api/v1/resumes/:id/preview", get(render::handle_preview))
        .route("/api/v1/resumes/:id/export", post(export::handle_export))
        .route(
            "/api/v1/resumes/:id/export/download",
            get(export::handle_download),
        )
        .with_state(state)
}
