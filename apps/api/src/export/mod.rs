// Export Pipeline: presented surface -> bitmap -> single-page PDF -> named file.
// All-or-nothing: any failure before the PDF is finished yields no file.
// Rasterization and PDF encoding are CPU-bound and run inside spawn_blocking.

pub mod fit;
pub mod handlers;
pub mod pdf;
pub mod raster;
pub mod storage;

use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::render::{SurfaceId, SurfaceRegistry};

pub use fit::FitTransform;
pub use raster::{Bitmap, PixmapRasterizer, Rasterizer};

pub const FILENAME_SUFFIX: &str = "_resume.pdf";
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExportError {
    #[error("Surface '{0}' is not presented")]
    SurfaceNotFound(String),

    #[error("Rasterization failed: {0}")]
    RasterizationFailed(String),

    #[error("PDF embedding failed: {0}")]
    EmbedFailed(String),
}

/// Physical page format of the exported document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageFormat {
    #[default]
    A4,
    Letter,
}

impl PageFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "a4" => Some(PageFormat::A4),
            "letter" => Some(PageFormat::Letter),
            _ => None,
        }
    }

    /// Portrait page size in PDF points.
    pub fn size(&self) -> PageSize {
        match self {
            PageFormat::A4 => PageSize {
                width: 595.28,
                height: 841.89,
            },
            PageFormat::Letter => PageSize {
                width: 612.0,
                height: 792.0,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    pub page: PageFormat,
    /// Device pixels per surface pixel. At least 2.
    pub raster_scale: f32,
    /// Fixed offset of the image from the top page edge, in points.
    pub top_margin: f32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            page: PageFormat::A4,
            raster_scale: 2.0,
            top_margin: 20.0,
        }
    }
}

/// A finished export. Only ever constructed once the PDF bytes are complete.
#[derive(Debug, Clone)]
pub struct ExportedFile {
    pub filename: String,
    pub bytes: Bytes,
    pub surface_id: SurfaceId,
    pub bitmap_width: u32,
    pub bitmap_height: u32,
    pub placement: FitTransform,
}

/// Title with every whitespace run replaced by one `_`, plus `_resume.pdf`.
pub fn output_filename(title: &str) -> String {
    let mut name = String::with_capacity(title.len() + FILENAME_SUFFIX.len());
    let mut in_whitespace = false;
    for c in title.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                name.push('_');
            }
            in_whitespace = true;
        } else {
            name.push(c);
            in_whitespace = false;
        }
    }
    name.push_str(FILENAME_SUFFIX);
    name
}

/// Captures the currently presented surface of `document_id` into a one-page PDF.
///
/// Does not render: the caller must have presented the document first, otherwise
/// `SurfaceNotFound` is returned.
pub async fn export_to_file(
    registry: &SurfaceRegistry,
    rasterizer: Arc<dyn Rasterizer>,
    document_id: Uuid,
    title: &str,
    config: &ExportConfig,
) -> Result<ExportedFile, ExportError> {
    let surface_id = SurfaceId::for_document(document_id);
    let rendered = registry
        .get(&surface_id)
        .ok_or_else(|| ExportError::SurfaceNotFound(surface_id.to_string()))?;

    let page = config.page.size();
    let scale = config.raster_scale;
    let top_margin = config.top_margin;
    let doc_title = title.to_string();

    let (bitmap_width, bitmap_height, placement, pdf_bytes) =
        tokio::task::spawn_blocking(move || -> Result<_, ExportError> {
            let bitmap = rasterizer.rasterize(&rendered.surface, scale)?;
            let placement = FitTransform::compute(
                bitmap.width as f32,
                bitmap.height as f32,
                page,
                top_margin,
            );
            let bytes = pdf::embed_single_page(&bitmap, &placement, page, &doc_title)?;
            Ok((bitmap.width, bitmap.height, placement, bytes))
        })
        .await
        .map_err(|e| ExportError::RasterizationFailed(format!("capture task failed: {e}")))??;

    let filename = output_filename(title);
    info!(
        %surface_id,
        %filename,
        bitmap_width,
        bitmap_height,
        ratio = placement.ratio,
        size_bytes = pdf_bytes.len(),
        "Resume exported"
    );

    Ok(ExportedFile {
        filename,
        bytes: Bytes::from(pdf_bytes),
        surface_id,
        bitmap_width,
        bitmap_height,
        placement,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Surface;
    use crate::models::resume::ResumeDocument;

    struct FailingRasterizer;

    impl Rasterizer for FailingRasterizer {
        fn rasterize(&self, _surface: &Surface, _scale: f32) -> Result<Bitmap, ExportError> {
            Err(ExportError::RasterizationFailed("capture backend offline".to_string()))
        }
    }

    fn presented() -> (SurfaceRegistry, ResumeDocument) {
        let registry = SurfaceRegistry::new();
        let doc = ResumeDocument::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "Senior Engineer CV",
            "professional",
        )
        .unwrap();
        registry.present(&doc);
        (registry, doc)
    }

    #[test]
    fn test_output_filename_replaces_whitespace_runs() {
        assert_eq!(
            output_filename("Software Engineer Resume"),
            "Software_Engineer_Resume_resume.pdf"
        );
        assert_eq!(output_filename("Senior  Eng\tCV"), "Senior_Eng_CV_resume.pdf");
        assert_eq!(output_filename(" Lead "), "_Lead__resume.pdf");
        assert_eq!(output_filename("CV"), "CV_resume.pdf");
    }

    #[test]
    fn test_page_format_parse_and_size() {
        assert_eq!(PageFormat::parse("A4"), Some(PageFormat::A4));
        assert_eq!(PageFormat::parse("letter"), Some(PageFormat::Letter));
        assert_eq!(PageFormat::parse("legal"), None);
        assert_eq!(PageFormat::Letter.size().width, 612.0);
    }

    #[tokio::test]
    async fn test_export_without_presented_surface_fails() {
        let registry = SurfaceRegistry::new();
        let result = export_to_file(
            &registry,
            Arc::new(PixmapRasterizer),
            Uuid::new_v4(),
            "CV",
            &ExportConfig::default(),
        )
        .await;
        assert!(matches!(result, Err(ExportError::SurfaceNotFound(_))));
    }

    #[tokio::test]
    async fn test_export_produces_single_page_pdf() {
        let (registry, doc) = presented();
        let file = export_to_file(
            &registry,
            Arc::new(PixmapRasterizer),
            doc.id,
            &doc.title,
            &ExportConfig::default(),
        )
        .await
        .unwrap();

        assert_eq!(file.filename, "Senior_Engineer_CV_resume.pdf");
        assert!(file.bytes.starts_with(b"%PDF-"));
        let text = String::from_utf8_lossy(&file.bytes);
        let pages = text.matches("/Type /Page").count() - text.matches("/Type /Pages").count();
        assert_eq!(pages, 1);
        assert!(text.contains("/Count 1"));
        assert_eq!(file.bitmap_width, 1600);
        assert!(file.placement.ratio > 0.0);
        assert_eq!(file.placement.y, 20.0);
    }

    #[tokio::test]
    async fn test_rasterization_failure_produces_no_file() {
        let (registry, doc) = presented();
        let result = export_to_file(
            &registry,
            Arc::new(FailingRasterizer),
            doc.id,
            &doc.title,
            &ExportConfig::default(),
        )
        .await;
        assert!(matches!(result, Err(ExportError::RasterizationFailed(_))));
    }
}
