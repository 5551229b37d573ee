//! Professional: single column, accent-coloured headings, ruled header.

use crate::models::resume::Sections;
use crate::templates::catalog::ImplementedTemplate;
use crate::templates::common::{self, CertificationLayout, Theme};
use crate::templates::tree::{
    ChipStyle, Color, EntryStyle, Link, Node, RenderTree, TextBlock, TextStyle, Weight,
};
use crate::templates::PAGE_WIDTH;

const PADDING: f32 = 32.0;

fn theme() -> Theme {
    let entry = EntryStyle {
        title: TextStyle::new(16.0, Color::GRAY_800).weight(Weight::Medium),
        date: TextStyle::new(14.0, Color::GRAY_600),
        subtitle: TextStyle::new(14.0, Color::GRAY_800),
        body: TextStyle::new(14.0, Color::GRAY_800),
        link: TextStyle::new(14.0, Color::CYAN_600),
    };
    Theme {
        heading: TextStyle::new(18.0, Color::CYAN_600).weight(Weight::Semibold),
        heading_rule: None,
        uppercase_headings: false,
        entry: entry.clone(),
        entry_gap: 16.0,
        chip: ChipStyle {
            text: TextStyle::new(14.0, Color::GRAY_800),
            background: Some(Color::GRAY_100),
            border: None,
            padding_x: 8.0,
            padding_y: 4.0,
            gap: 8.0,
            centered: false,
        },
        project_link_label: "Project Link",
        certifications: CertificationLayout::DateColumn,
        certification_entry: entry,
        certification_gap: 8.0,
        section_space: 24.0,
    }
}

pub fn render(sections: &Sections) -> RenderTree {
    let theme = theme();
    let info = &sections.personal_info;

    let mut body = vec![
        Node::Text(TextBlock::new(
            common::display_name(info),
            TextStyle::new(30.0, Color::CYAN_600).weight(Weight::Bold),
        )),
        Node::Spacer { height: 8.0 },
    ];
    let contacts = common::contact_items(info);
    if !contacts.is_empty() {
        body.push(Node::Inline {
            items: contacts,
            style: TextStyle::new(14.0, Color::GRAY_800),
            gap: 12.0,
        });
    }
    body.extend([
        Node::Spacer { height: 16.0 },
        Node::Rule {
            color: Color::GRAY_300,
            thickness: 1.0,
        },
        Node::Spacer { height: 24.0 },
    ]);

    let summary_heading = TextBlock::new("Professional Summary", theme.heading);
    let ordered = [
        common::summary_section(
            info,
            Some(summary_heading),
            TextStyle::new(16.0, Color::GRAY_800),
        ),
        common::experience_section(&sections.experience, &theme),
        common::education_section(&sections.education, &theme),
        common::skills_section(&sections.skills, &theme),
        common::projects_section(&sections.projects, &theme),
        common::certifications_section(&sections.certifications, &theme),
    ];
    for section in ordered {
        common::push_section(&mut body, section, &theme);
    }

    if !info.website.is_empty() {
        body.push(Node::Link(Link {
            label: info.website.clone(),
            href: info.website.clone(),
            style: TextStyle::new(14.0, Color::CYAN_600),
        }));
    }

    RenderTree {
        template: ImplementedTemplate::Professional,
        width: PAGE_WIDTH,
        nodes: vec![Node::Block {
            padding: PADDING,
            children: body,
        }],
    }
}
