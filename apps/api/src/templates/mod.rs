// Template Catalog: named layout variants, each a pure function Sections -> RenderTree.
// No variant holds state; identical input always yields an identical tree.

pub mod catalog;
pub mod common;
pub mod minimal;
pub mod modern;
pub mod professional;
pub mod tree;

pub use catalog::{ImplementedTemplate, TemplateVariant};
pub use tree::RenderTree;

use crate::models::resume::Sections;

/// Surface content width in CSS pixels.
pub const PAGE_WIDTH: f32 = 800.0;

/// Total dispatch over the closed variant set.
pub fn render_variant(variant: &TemplateVariant, sections: &Sections) -> RenderTree {
    match variant.resolve() {
        ImplementedTemplate::Professional => professional::render(sections),
        ImplementedTemplate::Modern => modern::render(sections),
        ImplementedTemplate::Minimal => minimal::render(sections),
    }
}
