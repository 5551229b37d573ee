use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::document::SectionUpdate;
use crate::errors::AppError;
use crate::models::resume::{DocumentSummary, ResumeDocument, SortOrder};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateResumeRequest {
    pub owner_id: Uuid,
    pub title: String,
    pub template: String,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub owner_id: Uuid,
    #[serde(default)]
    pub sort: SortOrder,
    pub search: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateResumeRequest {
    pub title: Option<String>,
    pub template: Option<String>,
}

#[derive(Deserialize)]
pub struct AddSkillRequest {
    pub skill: String,
}

/// POST /api/v1/resumes
pub async fn handle_create(
    State(state): State<AppState>,
    Json(req): Json<CreateResumeRequest>,
) -> Result<(StatusCode, Json<ResumeDocument>), AppError> {
    let doc = ResumeDocument::new(Uuid::new_v4(), req.owner_id, &req.title, &req.template)?;
    state.documents.save(&doc).await?;
    info!("Created resume {} for owner {}", doc.id, doc.owner_id);
    Ok((StatusCode::CREATED, Json(doc)))
}

/// GET /api/v1/resumes?owner_id=..&sort=asc|desc&search=..
pub async fn handle_list(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<Vec<DocumentSummary>>, AppError> {
    let search = params
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let summaries = state
        .documents
        .list(params.owner_id, params.sort, search)
        .await?;
    Ok(Json(summaries))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeDocument>, AppError> {
    Ok(Json(state.documents.load(id).await?))
}

/// PATCH /api/v1/resumes/:id
pub async fn handle_update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateResumeRequest>,
) -> Result<Json<ResumeDocument>, AppError> {
    let mut doc = state.documents.load(id).await?;
    if let Some(title) = &req.title {
        doc = doc.with_title(title)?;
    }
    if let Some(template) = &req.template {
        doc = doc.with_template(template)?;
    }
    commit(&state, &doc).await?;
    Ok(Json(doc))
}

/// PUT /api/v1/resumes/:id/sections
pub async fn handle_replace_section(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<SectionUpdate>,
) -> Result<Json<ResumeDocument>, AppError> {
    let section = update.section_name();
    let doc = state.documents.load(id).await?.with_section(update)?;
    commit(&state, &doc).await?;
    info!("Replaced section {section} of resume {id}");
    Ok(Json(doc))
}

/// POST /api/v1/resumes/:id/skills
pub async fn handle_add_skill(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AddSkillRequest>,
) -> Result<Json<ResumeDocument>, AppError> {
    let doc = state.documents.load(id).await?.with_skill_added(&req.skill)?;
    commit(&state, &doc).await?;
    Ok(Json(doc))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.documents.delete(id).await?;
    state.surfaces.evict(id);
    info!("Deleted resume {id}");
    Ok(StatusCode::NO_CONTENT)
}

/// Persists `doc` and keeps an already presented preview in step with it.
async fn commit(state: &AppState, doc: &ResumeDocument) -> Result<(), AppError> {
    state.documents.save(doc).await?;
    state.surfaces.refresh(doc);
    Ok(())
}
