use anyhow::anyhow;
use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::storage::{export_key, FileHandle};
use crate::export::{export_to_file, ExportedFile, FitTransform, PDF_CONTENT_TYPE};
use crate::models::resume::ResumeDocument;
use crate::render::SurfaceId;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ExportResponse {
    pub file: FileHandle,
    pub surface_id: SurfaceId,
    pub bitmap_width: u32,
    pub bitmap_height: u32,
    pub placement: FitTransform,
}

/// POST /api/v1/resumes/:id/export
/// Captures the document into a PDF and stores it.
pub async fn handle_export(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ExportResponse>, AppError> {
    let (doc, exported) = capture(&state, id).await?;

    let key = export_key(doc.owner_id, doc.id, &exported.filename);
    state
        .files
        .put(&key, exported.bytes.clone(), PDF_CONTENT_TYPE)
        .await?;

    Ok(Json(ExportResponse {
        file: FileHandle {
            key,
            filename: exported.filename,
            content_type: PDF_CONTENT_TYPE.to_string(),
            size_bytes: exported.bytes.len(),
        },
        surface_id: exported.surface_id,
        bitmap_width: exported.bitmap_width,
        bitmap_height: exported.bitmap_height,
        placement: exported.placement,
    }))
}

/// GET /api/v1/resumes/:id/export/download
/// Captures the document into a PDF and returns it as an attachment.
pub async fn handle_download(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let (_, exported) = capture(&state, id).await?;
    let disposition = HeaderValue::from_str(&content_disposition(&exported.filename))
        .map_err(|e| anyhow!("invalid Content-Disposition for resume {id}: {e}"))?;
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(PDF_CONTENT_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        exported.bytes,
    )
        .into_response())
}

/// RFC 5987 attr-chars left unescaped in `filename*`.
const FILENAME_ATTR: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Attachment header with a printable-ASCII `filename` fallback and the exact name
/// in `filename*`.
fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect();
    format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
        utf8_percent_encode(filename, FILENAME_ATTR)
    )
}

/// Presents the stored document, then captures its surface.
/// Refused with `Conflict` while another export of the same document runs.
async fn capture(state: &AppState, id: Uuid) -> Result<(ResumeDocument, ExportedFile), AppError> {
    let _guard = state.surfaces.begin_export(id)?;
    let doc = state.documents.load(id).await?;

    // Capture must see the stored document, not whatever was presented last.
    state.surfaces.present(&doc);
    info!("Exporting resume {id} with template {}", doc.template);

    let exported = export_to_file(
        &state.surfaces,
        state.rasterizer.clone(),
        doc.id,
        &doc.title,
        &state.export,
    )
    .await
    .map_err(|e| {
        error!("Export of resume {id} failed: {e}");
        e
    })?;

    Ok((doc, exported))
}
