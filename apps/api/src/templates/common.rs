//! Section builders shared by all variants.
//!
//! Every builder returns `None` for an empty section so no variant can emit a heading
//! without a body.

use crate::models::resume::{
    CertificationEntry, EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry,
};
use crate::templates::tree::{
    ChipStyle, Color, Entry, EntryStyle, Link, Node, SectionKind, TextBlock, TextStyle,
};

pub const PRESENT: &str = "Present";
pub const NAME_PLACEHOLDER: &str = "Your Name";

/// How a variant lays out certification entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertificationLayout {
    /// Date right-aligned on the title line, issuer below, "Verify" link.
    DateColumn,
    /// "<issuer> • <date>" below the title.
    IssuerLine,
}

/// Per-variant styling consumed by the builders.
#[derive(Debug, Clone)]
pub struct Theme {
    pub heading: TextStyle,
    pub heading_rule: Option<Color>,
    pub uppercase_headings: bool,
    pub entry: EntryStyle,
    pub entry_gap: f32,
    pub chip: ChipStyle,
    pub project_link_label: &'static str,
    pub certifications: CertificationLayout,
    pub certification_entry: EntryStyle,
    pub certification_gap: f32,
    /// Vertical space after each section.
    pub section_space: f32,
}

impl Theme {
    fn heading(&self, text: &str) -> TextBlock {
        let text = if self.uppercase_headings {
            text.to_uppercase()
        } else {
            text.to_string()
        };
        TextBlock::new(text, self.heading)
    }

    fn section(&self, section: SectionKind, heading: &str, children: Vec<Node>) -> Node {
        Node::Section {
            section,
            heading: Some(self.heading(heading)),
            heading_rule: self.heading_rule,
            children,
            gap: self.entry_gap,
        }
    }
}

/// Appends a section followed by the theme's trailing space; absent sections add nothing.
pub fn push_section(out: &mut Vec<Node>, section: Option<Node>, theme: &Theme) {
    if let Some(section) = section {
        out.push(section);
        out.push(Node::Spacer {
            height: theme.section_space,
        });
    }
}

/// "<start> - <end>", with `Present` replacing the end date of a current entry.
pub fn date_range(start: &str, end: &str, current: bool) -> String {
    let end = if current { PRESENT } else { end };
    format!("{start} - {end}")
}

/// Date range shown only when at least one bound is present.
pub fn optional_date_range(start: &str, end: &str) -> Option<String> {
    if start.is_empty() && end.is_empty() {
        None
    } else {
        Some(format!("{start} - {end}"))
    }
}

pub fn display_name(info: &PersonalInfo) -> &str {
    if info.name.is_empty() {
        NAME_PLACEHOLDER
    } else {
        &info.name
    }
}

/// Non-empty contact fields in display order.
pub fn contact_items(info: &PersonalInfo) -> Vec<String> {
    [&info.email, &info.phone, &info.location, &info.website]
        .into_iter()
        .filter(|s| !s.is_empty())
        .cloned()
        .collect()
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

pub fn summary_section(
    info: &PersonalInfo,
    heading: Option<TextBlock>,
    style: TextStyle,
) -> Option<Node> {
    if info.summary.is_empty() {
        return None;
    }
    Some(Node::Section {
        section: SectionKind::Summary,
        heading,
        heading_rule: None,
        children: vec![Node::Text(TextBlock::new(info.summary.clone(), style))],
        gap: 0.0,
    })
}

pub fn experience_section(entries: &[ExperienceEntry], theme: &Theme) -> Option<Node> {
    if entries.is_empty() {
        return None;
    }
    let children = entries
        .iter()
        .map(|e| {
            Node::Entry(Entry {
                title: e.position.clone(),
                date: Some(date_range(&e.start_date, &e.end_date, e.current)),
                subtitle: non_empty(&e.company),
                body: non_empty(&e.description),
                link: None,
                style: theme.entry.clone(),
            })
        })
        .collect();
    Some(theme.section(SectionKind::Experience, "Experience", children))
}

pub fn education_section(entries: &[EducationEntry], theme: &Theme) -> Option<Node> {
    if entries.is_empty() {
        return None;
    }
    let children = entries
        .iter()
        .map(|e| {
            let title = if e.field.is_empty() {
                e.degree.clone()
            } else {
                format!("{} in {}", e.degree, e.field)
            };
            Node::Entry(Entry {
                title,
                date: Some(date_range(&e.start_date, &e.end_date, e.current)),
                subtitle: non_empty(&e.institution),
                body: non_empty(&e.description),
                link: None,
                style: theme.entry.clone(),
            })
        })
        .collect();
    Some(theme.section(SectionKind::Education, "Education", children))
}

pub fn skills_section(skills: &[String], theme: &Theme) -> Option<Node> {
    if skills.is_empty() {
        return None;
    }
    let children = skills
        .iter()
        .map(|s| Node::Chip {
            text: s.clone(),
            style: theme.chip.clone(),
        })
        .collect();
    Some(theme.section(SectionKind::Skills, "Skills", children))
}

pub fn projects_section(projects: &[ProjectEntry], theme: &Theme) -> Option<Node> {
    if projects.is_empty() {
        return None;
    }
    let children = projects
        .iter()
        .map(|p| {
            Node::Entry(Entry {
                title: p.name.clone(),
                date: optional_date_range(&p.start_date, &p.end_date),
                subtitle: None,
                body: non_empty(&p.description),
                link: p.url.as_deref().filter(|u| !u.is_empty()).map(|href| Link {
                    label: theme.project_link_label.to_string(),
                    href: href.to_string(),
                    style: theme.entry.link,
                }),
                style: theme.entry.clone(),
            })
        })
        .collect();
    Some(theme.section(SectionKind::Projects, "Projects", children))
}

pub fn certifications_section(certs: &[CertificationEntry], theme: &Theme) -> Option<Node> {
    if certs.is_empty() {
        return None;
    }
    let children = certs
        .iter()
        .map(|c| {
            let entry = match theme.certifications {
                CertificationLayout::DateColumn => Entry {
                    title: c.name.clone(),
                    date: non_empty(&c.date),
                    subtitle: non_empty(&c.issuer),
                    body: None,
                    link: c.url.as_deref().filter(|u| !u.is_empty()).map(|href| Link {
                        label: "Verify".to_string(),
                        href: href.to_string(),
                        style: theme.certification_entry.link,
                    }),
                    style: theme.certification_entry.clone(),
                },
                CertificationLayout::IssuerLine => Entry {
                    title: c.name.clone(),
                    date: None,
                    subtitle: issuer_line(&c.issuer, &c.date),
                    body: None,
                    link: None,
                    style: theme.certification_entry.clone(),
                },
            };
            Node::Entry(entry)
        })
        .collect();
    let mut section = theme.section(SectionKind::Certifications, "Certifications", children);
    if let Node::Section { gap, .. } = &mut section {
        *gap = theme.certification_gap;
    }
    Some(section)
}

fn issuer_line(issuer: &str, date: &str) -> Option<String> {
    match (issuer.is_empty(), date.is_empty()) {
        (true, true) => None,
        (false, true) => Some(issuer.to_string()),
        (true, false) => Some(format!("• {date}")),
        (false, false) => Some(format!("{issuer} • {date}")),
    }
}
