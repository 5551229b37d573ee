use std::sync::Arc;

use crate::document::store::DocumentStore;
use crate::export::storage::FileStore;
use crate::export::{ExportConfig, Rasterizer};
use crate::render::SurfaceRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub documents: Arc<dyn DocumentStore>,
    pub files: Arc<dyn FileStore>,
    /// Presented preview surfaces. Export captures from here.
    pub surfaces: Arc<SurfaceRegistry>,
    /// Pluggable capture backend. Default: PixmapRasterizer.
    pub rasterizer: Arc<dyn Rasterizer>,
    pub export: ExportConfig,
}

#[cfg(test)]
impl AppState {
    /// In-memory stores, software rasterizer, default export settings.
    pub fn for_tests() -> Self {
        use crate::document::store::InMemoryDocumentStore;
        use crate::export::storage::InMemoryFileStore;
        use crate::export::PixmapRasterizer;

        AppState {
            documents: Arc::new(InMemoryDocumentStore::default()),
            files: Arc::new(InMemoryFileStore::default()),
            surfaces: Arc::new(SurfaceRegistry::new()),
            rasterizer: Arc::new(PixmapRasterizer),
            export: ExportConfig::default(),
        }
    }
}
