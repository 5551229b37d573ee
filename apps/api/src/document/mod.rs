//! Document Model: the update contract for `ResumeDocument`.
//!
//! Every mutation is a pure function from one document value to the next:
//! - a whole section is replaced at a time (never a field patch),
//! - `updated_at` only moves forward,
//! - a rejected mutation leaves the caller's value untouched and returns `InvalidInput`.

pub mod handlers;
pub mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::resume::{
    CertificationEntry, EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry,
    ResumeDocument, Sections,
};
use crate::templates::catalog;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DocumentError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// A full replacement value for exactly one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "section", content = "value", rename_all = "snake_case")]
pub enum SectionUpdate {
    PersonalInfo(PersonalInfo),
    Experience(Vec<ExperienceEntry>),
    Education(Vec<EducationEntry>),
    Skills(Vec<String>),
    Certifications(Vec<CertificationEntry>),
    Projects(Vec<ProjectEntry>),
}

impl SectionUpdate {
    pub fn section_name(&self) -> &'static str {
        match self {
            SectionUpdate::PersonalInfo(_) => "personal_info",
            SectionUpdate::Experience(_) => "experience",
            SectionUpdate::Education(_) => "education",
            SectionUpdate::Skills(_) => "skills",
            SectionUpdate::Certifications(_) => "certifications",
            SectionUpdate::Projects(_) => "projects",
        }
    }
}

impl ResumeDocument {
    /// Creates an empty document. Title must be non-blank and the template must be
    /// listed in the catalog.
    pub fn new(
        id: Uuid,
        owner_id: Uuid,
        title: &str,
        template: &str,
    ) -> Result<Self, DocumentError> {
        validate_title(title)?;
        validate_template(template)?;

        let now = Utc::now();
        Ok(ResumeDocument {
            id,
            owner_id,
            title: title.to_string(),
            template: template.to_string(),
            created_at: now,
            updated_at: now,
            sections: Sections::default(),
        })
    }

    /// Returns a copy with one section replaced and `updated_at` advanced.
    pub fn with_section(&self, update: SectionUpdate) -> Result<Self, DocumentError> {
        let mut sections = self.sections.clone();
        match update {
            SectionUpdate::PersonalInfo(info) => sections.personal_info = info,
            SectionUpdate::Experience(entries) => sections.experience = entries,
            SectionUpdate::Education(entries) => sections.education = entries,
            SectionUpdate::Skills(skills) => {
                if let Some(pos) = skills.iter().position(|s| s.trim().is_empty()) {
                    return Err(DocumentError::InvalidInput(format!(
                        "skill at position {pos} is empty"
                    )));
                }
                sections.skills = skills;
            }
            SectionUpdate::Certifications(entries) => sections.certifications = entries,
            SectionUpdate::Projects(entries) => sections.projects = entries,
        }

        Ok(ResumeDocument {
            sections,
            updated_at: advance(self.updated_at),
            ..self.clone()
        })
    }

    /// Appends one skill (trimmed). Duplicates are kept; blank input is rejected.
    pub fn with_skill_added(&self, skill: &str) -> Result<Self, DocumentError> {
        let skill = skill.trim();
        if skill.is_empty() {
            return Err(DocumentError::InvalidInput(
                "skill cannot be empty".to_string(),
            ));
        }
        let mut skills = self.sections.skills.clone();
        skills.push(skill.to_string());
        self.with_section(SectionUpdate::Skills(skills))
    }

    pub fn with_title(&self, title: &str) -> Result<Self, DocumentError> {
        validate_title(title)?;
        Ok(ResumeDocument {
            title: title.to_string(),
            updated_at: advance(self.updated_at),
            ..self.clone()
        })
    }

    /// Template names are checked here, at write time. Metadata-only catalog entries
    /// are accepted.
    pub fn with_template(&self, template: &str) -> Result<Self, DocumentError> {
        validate_template(template)?;
        Ok(ResumeDocument {
            template: template.to_string(),
            updated_at: advance(self.updated_at),
            ..self.clone()
        })
    }
}

fn validate_title(title: &str) -> Result<(), DocumentError> {
    if title.trim().is_empty() {
        return Err(DocumentError::InvalidInput(
            "title cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_template(template: &str) -> Result<(), DocumentError> {
    if !catalog::is_selectable(template) {
        return Err(DocumentError::InvalidInput(format!(
            "unknown template '{template}'"
        )));
    }
    Ok(())
}

/// Wall clock, clamped so `updated_at` never moves backwards.
fn advance(previous: DateTime<Utc>) -> DateTime<Utc> {
    Utc::now().max(previous)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn make_doc() -> ResumeDocument {
        ResumeDocument::new(Uuid::new_v4(), Uuid::new_v4(), "Software Engineer", "modern").unwrap()
    }

    #[test]
    fn test_new_document_has_empty_sections() {
        let doc = make_doc();
        assert_eq!(doc.sections, Sections::default());
        assert_eq!(doc.created_at, doc.updated_at);
        assert_eq!(doc.template, "modern");
    }

    #[test]
    fn test_new_rejects_blank_title() {
        let err = ResumeDocument::new(Uuid::new_v4(), Uuid::new_v4(), "   ", "minimal").unwrap_err();
        assert!(matches!(err, DocumentError::InvalidInput(_)));
    }

    #[test]
    fn test_new_rejects_unknown_template() {
        let err =
            ResumeDocument::new(Uuid::new_v4(), Uuid::new_v4(), "CV", "baroque").unwrap_err();
        assert!(matches!(err, DocumentError::InvalidInput(_)));
    }

    #[test]
    fn test_new_accepts_metadata_only_template() {
        let doc = ResumeDocument::new(Uuid::new_v4(), Uuid::new_v4(), "CV", "executive").unwrap();
        assert_eq!(doc.template, "executive");
    }

    #[test]
    fn test_with_section_replaces_only_target_section() {
        let doc = make_doc()
            .with_section(SectionUpdate::Skills(vec!["Rust".to_string()]))
            .unwrap();
        let entry = ExperienceEntry {
            company: "Acme".to_string(),
            position: "Engineer".to_string(),
            ..Default::default()
        };
        let next = doc
            .with_section(SectionUpdate::Experience(vec![entry.clone()]))
            .unwrap();

        assert_eq!(next.id, doc.id);
        assert_eq!(next.owner_id, doc.owner_id);
        assert_eq!(next.title, doc.title);
        assert_eq!(next.created_at, doc.created_at);
        assert_eq!(next.sections.experience, vec![entry]);
        assert_eq!(next.sections.skills, doc.sections.skills);
        assert_eq!(next.sections.personal_info, doc.sections.personal_info);
        assert_eq!(next.sections.education, doc.sections.education);
        assert!(next.updated_at >= doc.updated_at);
    }

    #[test]
    fn test_with_section_does_not_touch_original() {
        let doc = make_doc();
        let _ = doc
            .with_section(SectionUpdate::Skills(vec!["Go".to_string()]))
            .unwrap();
        assert!(doc.sections.skills.is_empty());
    }

    #[test]
    fn test_updated_at_never_moves_backwards() {
        let mut doc = make_doc();
        // Simulate a record written by a clock that ran ahead.
        doc.updated_at = Utc::now() + Duration::hours(1);
        let next = doc
            .with_section(SectionUpdate::Projects(Vec::new()))
            .unwrap();
        assert_eq!(next.updated_at, doc.updated_at);
    }

    #[test]
    fn test_skills_replacement_rejects_empty_string() {
        let doc = make_doc();
        let err = doc
            .with_section(SectionUpdate::Skills(vec![
                "Rust".to_string(),
                " ".to_string(),
            ]))
            .unwrap_err();
        assert_eq!(
            err,
            DocumentError::InvalidInput("skill at position 1 is empty".to_string())
        );
    }

    #[test]
    fn test_skill_added_trims_and_keeps_duplicates() {
        let doc = make_doc()
            .with_skill_added("  Rust ")
            .unwrap()
            .with_skill_added("Rust")
            .unwrap();
        assert_eq!(doc.sections.skills, vec!["Rust", "Rust"]);
    }

    #[test]
    fn test_skill_added_rejects_blank() {
        let doc = make_doc();
        assert!(doc.with_skill_added("\t").is_err());
    }

    #[test]
    fn test_with_title_and_template() {
        let doc = make_doc();
        let renamed = doc.with_title("Staff Engineer").unwrap();
        assert_eq!(renamed.title, "Staff Engineer");
        assert!(doc.with_title("").is_err());

        let retemplated = doc.with_template("professional").unwrap();
        assert_eq!(retemplated.template, "professional");
        assert!(doc.with_template("Professional ").is_err());
    }

    #[test]
    fn test_section_update_json_shape() {
        let json = r#"{"section":"skills","value":["Rust","SQL"]}"#;
        let update: SectionUpdate = serde_json::from_str(json).unwrap();
        assert_eq!(
            update,
            SectionUpdate::Skills(vec!["Rust".to_string(), "SQL".to_string()])
        );
        assert_eq!(update.section_name(), "skills");
    }
}
