use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::render::SurfaceId;
use crate::state::AppState;
use crate::templates::catalog::{TemplateInfo, CATALOG};
use crate::templates::{ImplementedTemplate, RenderTree};

#[derive(Serialize)]
pub struct PreviewResponse {
    pub surface_id: SurfaceId,
    pub requested_template: String,
    pub template: ImplementedTemplate,
    pub width: f32,
    pub height: f32,
    pub tree: RenderTree,
}

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<Vec<TemplateInfo>> {
    Json(CATALOG.to_vec())
}

/// GET /api/v1/resumes/:id/preview
/// Renders the stored document and presents it as the document's surface.
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PreviewResponse>, AppError> {
    let doc = state.documents.load(id).await?;
    let rendered = state.surfaces.present(&doc);
    Ok(Json(PreviewResponse {
        surface_id: rendered.id.clone(),
        requested_template: rendered.requested_template.clone(),
        template: rendered.template,
        width: rendered.surface.width,
        height: rendered.surface.height,
        tree: rendered.tree.clone(),
    }))
}
