use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A complete resume record: identity, display title, selected template, and content.
///
/// Values are never mutated in place; see `crate::document` for the update contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    /// Catalog template id. Unknown values render with the minimal layout.
    pub template: String,
    pub created_at: DateTime<Utc>,
    /// Always ≥ `created_at`.
    pub updated_at: DateTime<Utc>,
    pub sections: Sections,
}

/// All content sections of a resume. List order is display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Sections {
    pub personal_info: PersonalInfo,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
    pub certifications: Vec<CertificationEntry>,
    pub projects: Vec<ProjectEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub website: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub company: String,
    pub position: String,
    pub start_date: String,
    /// Ignored when `current` is set.
    pub end_date: String,
    pub current: bool,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    /// Ignored when `current` is set.
    pub end_date: String,
    pub current: bool,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificationEntry {
    pub name: String,
    pub issuer: String,
    pub date: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    pub url: Option<String>,
    pub start_date: String,
    pub end_date: String,
}

/// List-view projection of a document (no section content).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct DocumentSummary {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub template: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&ResumeDocument> for DocumentSummary {
    fn from(doc: &ResumeDocument) -> Self {
        DocumentSummary {
            id: doc.id,
            owner_id: doc.owner_id,
            title: doc.title.clone(),
            template: doc.template.clone(),
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

/// Ordering of document listings by `updated_at`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}
