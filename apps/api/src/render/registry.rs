//! Process-wide map of currently presented surfaces, keyed by surface id.
//!
//! Presenting a document replaces any previous surface for it. Export reads from here
//! and never renders on its own. The registry also tracks which documents have an
//! export in flight so a second export of the same document is refused.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeDocument;
use crate::render::{render_document, RenderedSurface, SurfaceId};

#[derive(Debug, Default)]
pub struct SurfaceRegistry {
    surfaces: RwLock<HashMap<SurfaceId, Arc<RenderedSurface>>>,
    exporting: Mutex<HashSet<Uuid>>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders `doc` and makes it the presented surface for that document.
    pub fn present(&self, doc: &ResumeDocument) -> Arc<RenderedSurface> {
        let rendered = Arc::new(render_document(doc));
        self.surfaces
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(rendered.id.clone(), Arc::clone(&rendered));
        debug!(
            surface_id = %rendered.id,
            template = rendered.template.id(),
            height = rendered.surface.height,
            "Surface presented"
        );
        rendered
    }

    /// Re-presents `doc` only if it is already presented. Returns whether it was.
    /// The presence check and the swap happen under one write lock, so a surface
    /// evicted in between stays evicted.
    pub fn refresh(&self, doc: &ResumeDocument) -> bool {
        let id = SurfaceId::for_document(doc.id);
        if self.get(&id).is_none() {
            return false;
        }
        let rendered = Arc::new(render_document(doc));
        let mut surfaces = self
            .surfaces
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        match surfaces.get_mut(&id) {
            Some(slot) => {
                *slot = rendered;
                debug!(surface_id = %id, "Surface refreshed");
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &SurfaceId) -> Option<Arc<RenderedSurface>> {
        self.surfaces
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Drops the surface of a deleted document. Returns whether one was presented.
    pub fn evict(&self, document_id: Uuid) -> bool {
        self.surfaces
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&SurfaceId::for_document(document_id))
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.surfaces
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Marks an export of `document_id` as running until the guard drops.
    /// Returns `AppError::Conflict` while another export of the same document runs.
    pub fn begin_export(&self, document_id: Uuid) -> Result<ExportGuard<'_>, AppError> {
        let mut exporting = self
            .exporting
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !exporting.insert(document_id) {
            return Err(AppError::Conflict(format!(
                "An export of resume {document_id} is already in progress"
            )));
        }
        Ok(ExportGuard {
            exporting: &self.exporting,
            document_id,
        })
    }
}

#[derive(Debug)]
pub struct ExportGuard<'a> {
    exporting: &'a Mutex<HashSet<Uuid>>,
    document_id: Uuid,
}

impl Drop for ExportGuard<'_> {
    fn drop(&mut self) {
        self.exporting
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.document_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SectionUpdate;

    fn doc() -> ResumeDocument {
        ResumeDocument::new(Uuid::new_v4(), Uuid::new_v4(), "CV", "professional").unwrap()
    }

    #[test]
    fn test_present_then_get() {
        let registry = SurfaceRegistry::new();
        let d = doc();
        let presented = registry.present(&d);
        let found = registry.get(&SurfaceId::for_document(d.id)).unwrap();
        assert!(Arc::ptr_eq(&presented, &found));
    }

    #[test]
    fn test_present_replaces_previous_surface() {
        let registry = SurfaceRegistry::new();
        let d = doc();
        registry.present(&d);
        let updated = d
            .with_section(SectionUpdate::Skills(vec!["Go".to_string()]))
            .unwrap();
        registry.present(&updated);

        assert_eq!(registry.len(), 1);
        let current = registry.get(&SurfaceId::for_document(d.id)).unwrap();
        assert!(current.surface.text_runs().any(|r| r.text == "Go"));
    }

    #[test]
    fn test_refresh_only_touches_presented_documents() {
        let registry = SurfaceRegistry::new();
        let d = doc();
        assert!(!registry.refresh(&d));
        assert!(registry.is_empty());

        registry.present(&d);
        let renamed = d
            .with_section(SectionUpdate::Skills(vec!["SQL".to_string()]))
            .unwrap();
        assert!(registry.refresh(&renamed));
        let current = registry.get(&SurfaceId::for_document(d.id)).unwrap();
        assert!(current.surface.text_runs().any(|r| r.text == "SQL"));
    }

    #[test]
    fn test_refresh_after_evict_does_not_restore_surface() {
        let registry = SurfaceRegistry::new();
        let d = doc();
        registry.present(&d);
        registry.evict(d.id);

        let edited = d
            .with_section(SectionUpdate::Skills(vec!["Kafka".to_string()]))
            .unwrap();
        assert!(!registry.refresh(&edited));
        assert!(registry.get(&SurfaceId::for_document(d.id)).is_none());
    }

    #[test]
    fn test_concurrent_refresh_and_evict_leave_nothing_behind() {
        let registry = Arc::new(SurfaceRegistry::new());
        for _ in 0..50 {
            let d = doc();
            registry.present(&d);
            let refresher = {
                let registry = Arc::clone(&registry);
                let d = d.clone();
                std::thread::spawn(move || registry.refresh(&d))
            };
            registry.evict(d.id);
            refresher.join().unwrap();
            assert!(registry.get(&SurfaceId::for_document(d.id)).is_none());
        }
    }

    #[test]
    fn test_evict_removes_surface() {
        let registry = SurfaceRegistry::new();
        let d = doc();
        registry.present(&d);
        assert!(registry.evict(d.id));
        assert!(registry.get(&SurfaceId::for_document(d.id)).is_none());
        assert!(!registry.evict(d.id));
    }

    #[test]
    fn test_second_export_of_same_document_conflicts() {
        let registry = SurfaceRegistry::new();
        let id = Uuid::new_v4();
        let guard = registry.begin_export(id).unwrap();
        assert!(matches!(registry.begin_export(id), Err(AppError::Conflict(_))));
        // Other documents are unaffected.
        let _other = registry.begin_export(Uuid::new_v4()).unwrap();
        drop(guard);
        assert!(registry.begin_export(id).is_ok());
    }
}
