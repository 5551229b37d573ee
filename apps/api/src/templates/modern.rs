//! Modern: gradient header band carrying the summary, ruled headings, and a
//! two-column skills/certifications row.

use crate::models::resume::Sections;
use crate::templates::catalog::ImplementedTemplate;
use crate::templates::common::{self, CertificationLayout, Theme};
use crate::templates::tree::{
    ChipStyle, Color, EntryStyle, Fill, Node, RenderTree, TextBlock, TextStyle, Weight,
};
use crate::templates::PAGE_WIDTH;

const PADDING: f32 = 32.0;
const COLUMN_GAP: f32 = 32.0;

fn theme() -> Theme {
    let entry = EntryStyle {
        title: TextStyle::new(18.0, Color::GRAY_800).weight(Weight::Semibold),
        date: TextStyle::new(14.0, Color::GRAY_600),
        subtitle: TextStyle::new(16.0, Color::CYAN_600),
        body: TextStyle::new(14.0, Color::GRAY_800),
        link: TextStyle::new(16.0, Color::CYAN_600),
    };
    Theme {
        heading: TextStyle::new(20.0, Color::CYAN_600).weight(Weight::Bold),
        heading_rule: Some(Color::GRAY_200),
        uppercase_headings: false,
        entry,
        entry_gap: 24.0,
        chip: ChipStyle {
            text: TextStyle::new(14.0, Color::GRAY_800),
            background: Some(Color::GRAY_100),
            border: None,
            padding_x: 12.0,
            padding_y: 4.0,
            gap: 8.0,
            centered: false,
        },
        project_link_label: "View Project",
        certifications: CertificationLayout::IssuerLine,
        certification_entry: EntryStyle {
            title: TextStyle::new(16.0, Color::GRAY_800).weight(Weight::Medium),
            date: TextStyle::new(14.0, Color::GRAY_600),
            subtitle: TextStyle::new(14.0, Color::GRAY_800),
            body: TextStyle::new(14.0, Color::GRAY_800),
            link: TextStyle::new(14.0, Color::CYAN_600),
        },
        certification_gap: 12.0,
        section_space: 32.0,
    }
}

fn header(sections: &Sections) -> Node {
    let info = &sections.personal_info;
    let mut children = vec![
        Node::Text(TextBlock::new(
            common::display_name(info),
            TextStyle::new(30.0, Color::WHITE).weight(Weight::Bold),
        )),
        Node::Spacer { height: 8.0 },
    ];
    let contacts = common::contact_items(info);
    if !contacts.is_empty() {
        children.push(Node::Inline {
            items: contacts,
            style: TextStyle::new(14.0, Color::WHITE),
            gap: 12.0,
        });
    }
    if !info.summary.is_empty() {
        children.push(Node::Spacer { height: 16.0 });
        children.push(Node::Text(TextBlock::new(
            info.summary.clone(),
            TextStyle::new(16.0, Color::WHITE_90),
        )));
    }

    Node::Band {
        fill: Fill::HorizontalGradient {
            from: Color::CYAN_600,
            to: Color::VIOLET_600,
        },
        padding: PADDING,
        children,
    }
}

pub fn render(sections: &Sections) -> RenderTree {
    let theme = theme();
    let mut body = Vec::new();

    common::push_section(
        &mut body,
        common::experience_section(&sections.experience, &theme),
        &theme,
    );
    common::push_section(
        &mut body,
        common::education_section(&sections.education, &theme),
        &theme,
    );

    let skills = common::skills_section(&sections.skills, &theme);
    let certifications = common::certifications_section(&sections.certifications, &theme);
    match (skills, certifications) {
        (Some(skills), Some(certifications)) => {
            body.push(Node::Columns {
                gap: COLUMN_GAP,
                columns: vec![skills, certifications],
            });
            body.push(Node::Spacer {
                height: theme.section_space,
            });
        }
        (skills, certifications) => {
            common::push_section(&mut body, skills, &theme);
            common::push_section(&mut body, certifications, &theme);
        }
    }

    common::push_section(
        &mut body,
        common::projects_section(&sections.projects, &theme),
        &theme,
    );

    RenderTree {
        template: ImplementedTemplate::Modern,
        width: PAGE_WIDTH,
        nodes: vec![
            header(sections),
            Node::Block {
                padding: PADDING,
                children: body,
            },
        ],
    }
}
