// Rendering Engine: document -> template variant -> render tree -> laid-out surface.
// Rendering is pure; the registry is the only place a rendered surface is remembered.

pub mod handlers;
pub mod registry;

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use crate::layout::{self, Surface};
use crate::models::resume::{ResumeDocument, Sections};
use crate::templates::{self, ImplementedTemplate, RenderTree, TemplateVariant};

pub use registry::SurfaceRegistry;

/// Stable identifier of a document's preview surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SurfaceId(String);

impl SurfaceId {
    pub fn for_document(document_id: Uuid) -> Self {
        SurfaceId(format!("resume-preview-{document_id}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A document rendered and laid out, ready to show or capture.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSurface {
    pub id: SurfaceId,
    pub document_id: Uuid,
    /// Name stored on the document, which may be metadata-only or unknown.
    pub requested_template: String,
    /// Layout actually used.
    pub template: ImplementedTemplate,
    pub tree: RenderTree,
    pub surface: Surface,
}

/// Renders sections with an explicit variant.
pub fn render_with(sections: &Sections, variant: &TemplateVariant) -> RenderTree {
    templates::render_variant(variant, sections)
}

/// Renders a document with the template named on it.
pub fn render(doc: &ResumeDocument) -> RenderTree {
    render_with(&doc.sections, &TemplateVariant::from_name(&doc.template))
}

/// Renders and lays out a document. Reads nothing but `doc`.
pub fn render_document(doc: &ResumeDocument) -> RenderedSurface {
    let tree = render(doc);
    let surface = layout::layout(&tree);
    RenderedSurface {
        id: SurfaceId::for_document(doc.id),
        document_id: doc.id,
        requested_template: doc.template.clone(),
        template: tree.template,
        tree,
        surface,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SectionUpdate;

    fn doc(template: &str) -> ResumeDocument {
        ResumeDocument::new(Uuid::new_v4(), Uuid::new_v4(), "Backend CV", "minimal")
            .and_then(|d| d.with_template(template))
            .unwrap()
    }

    #[test]
    fn test_surface_id_is_stable_per_document() {
        let id = Uuid::new_v4();
        assert_eq!(SurfaceId::for_document(id), SurfaceId::for_document(id));
        assert_eq!(
            SurfaceId::for_document(id).as_str(),
            format!("resume-preview-{id}")
        );
        assert_ne!(
            SurfaceId::for_document(id),
            SurfaceId::for_document(Uuid::new_v4())
        );
    }

    #[test]
    fn test_render_uses_document_template() {
        assert_eq!(render(&doc("modern")).template, ImplementedTemplate::Modern);
        assert_eq!(
            render(&doc("professional")).template,
            ImplementedTemplate::Professional
        );
    }

    #[test]
    fn test_metadata_only_template_falls_back_to_minimal() {
        let rendered = render_document(&doc("executive"));
        assert_eq!(rendered.template, ImplementedTemplate::Minimal);
        assert_eq!(rendered.requested_template, "executive");
    }

    #[test]
    fn test_render_document_reflects_latest_sections() {
        let original = doc("professional");
        let updated = original
            .with_section(SectionUpdate::Skills(vec!["Rust".to_string()]))
            .unwrap();
        let before = render_document(&original);
        let after = render_document(&updated);
        assert_eq!(before.id, after.id);
        assert!(before.surface.text_runs().all(|r| r.text != "Rust"));
        assert!(after.surface.text_runs().any(|r| r.text == "Rust"));
    }
}
