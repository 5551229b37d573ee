//! Template catalog: the selectable layout names and how each resolves at render time.

use serde::{Deserialize, Serialize};

/// Catalog entry as shown in the template picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TemplateInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Metadata-only entries are selectable but render with the minimal layout.
    pub implemented: bool,
}

pub const CATALOG: [TemplateInfo; 5] = [
    TemplateInfo {
        id: "professional",
        name: "Professional",
        description: "A clean, professional template with a sidebar for skills and contact info.",
        implemented: true,
    },
    TemplateInfo {
        id: "modern",
        name: "Modern",
        description: "A contemporary design with a bold header and minimalist sections.",
        implemented: true,
    },
    TemplateInfo {
        id: "minimal",
        name: "Minimal",
        description: "A simple, straightforward layout that focuses on content.",
        implemented: true,
    },
    TemplateInfo {
        id: "creative",
        name: "Creative",
        description: "A unique design that helps you stand out while remaining professional.",
        implemented: false,
    },
    TemplateInfo {
        id: "executive",
        name: "Executive",
        description: "An elegant template perfect for senior positions and leadership roles.",
        implemented: false,
    },
];

/// True if `name` may be stored on a document.
pub fn is_selectable(name: &str) -> bool {
    CATALOG.iter().any(|t| t.id == name)
}

/// A layout that has a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImplementedTemplate {
    Professional,
    Modern,
    Minimal,
}

impl ImplementedTemplate {
    pub fn id(&self) -> &'static str {
        match self {
            ImplementedTemplate::Professional => "professional",
            ImplementedTemplate::Modern => "modern",
            ImplementedTemplate::Minimal => "minimal",
        }
    }
}

/// A template name as found on a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateVariant {
    Professional,
    Modern,
    Minimal,
    /// Metadata-only catalog entries and names the catalog has never heard of.
    Unimplemented(String),
}

impl TemplateVariant {
    pub fn from_name(name: &str) -> Self {
        match name {
            "professional" => TemplateVariant::Professional,
            "modern" => TemplateVariant::Modern,
            "minimal" => TemplateVariant::Minimal,
            other => TemplateVariant::Unimplemented(other.to_string()),
        }
    }

    /// Unimplemented names fall back to `Minimal`. This is not an error.
    pub fn resolve(&self) -> ImplementedTemplate {
        match self {
            TemplateVariant::Professional => ImplementedTemplate::Professional,
            TemplateVariant::Modern => ImplementedTemplate::Modern,
            TemplateVariant::Minimal | TemplateVariant::Unimplemented(_) => {
                ImplementedTemplate::Minimal
            }
        }
    }
}
