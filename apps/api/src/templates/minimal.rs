//! Minimal: centered header, upper-cased headings, bordered skill chips.
//! Also the fallback for every unimplemented template name.

use crate::models::resume::Sections;
use crate::templates::catalog::ImplementedTemplate;
use crate::templates::common::{self, CertificationLayout, Theme};
use crate::templates::tree::{
    ChipStyle, Color, EntryStyle, Node, RenderTree, TextBlock, TextStyle, Weight,
};
use crate::templates::PAGE_WIDTH;

const PADDING: f32 = 32.0;

fn theme() -> Theme {
    let centered = |style: TextStyle| style.centered();
    Theme {
        heading: TextStyle::new(20.0, Color::GRAY_800)
            .weight(Weight::Bold)
            .centered(),
        heading_rule: None,
        uppercase_headings: true,
        entry: EntryStyle {
            title: TextStyle::new(16.0, Color::GRAY_800).weight(Weight::Semibold),
            date: TextStyle::new(14.0, Color::GRAY_800),
            subtitle: TextStyle::new(16.0, Color::GRAY_800).italic(),
            body: TextStyle::new(14.0, Color::GRAY_800),
            link: TextStyle::new(14.0, Color::GRAY_800),
        },
        entry_gap: 24.0,
        chip: ChipStyle {
            text: TextStyle::new(14.0, Color::GRAY_800),
            background: None,
            border: Some(Color::GRAY_300),
            padding_x: 12.0,
            padding_y: 4.0,
            gap: 8.0,
            centered: true,
        },
        project_link_label: "Project Link",
        certifications: CertificationLayout::IssuerLine,
        certification_entry: EntryStyle {
            title: centered(TextStyle::new(16.0, Color::GRAY_800).weight(Weight::Semibold)),
            date: centered(TextStyle::new(14.0, Color::GRAY_800)),
            subtitle: centered(TextStyle::new(14.0, Color::GRAY_800)),
            body: centered(TextStyle::new(14.0, Color::GRAY_800)),
            link: centered(TextStyle::new(14.0, Color::GRAY_800)),
        },
        certification_gap: 16.0,
        section_space: 32.0,
    }
}

pub fn render(sections: &Sections) -> RenderTree {
    let theme = theme();
    let info = &sections.personal_info;

    let mut body = vec![
        Node::Text(TextBlock::new(
            common::display_name(info),
            TextStyle::new(30.0, Color::GRAY_800)
                .weight(Weight::Bold)
                .centered(),
        )),
        Node::Spacer { height: 8.0 },
    ];
    let contacts = common::contact_items(info);
    if !contacts.is_empty() {
        body.push(Node::Inline {
            items: contacts,
            style: TextStyle::new(14.0, Color::GRAY_800).centered(),
            gap: 16.0,
        });
    }
    body.push(Node::Spacer { height: 32.0 });

    let ordered = [
        common::summary_section(info, None, TextStyle::new(16.0, Color::GRAY_800).centered()),
        common::experience_section(&sections.experience, &theme),
        common::education_section(&sections.education, &theme),
        common::skills_section(&sections.skills, &theme),
        common::projects_section(&sections.projects, &theme),
        common::certifications_section(&sections.certifications, &theme),
    ];
    for section in ordered {
        common::push_section(&mut body, section, &theme);
    }

    RenderTree {
        template: ImplementedTemplate::Minimal,
        width: PAGE_WIDTH,
        nodes: vec![Node::Block {
            padding: PADDING,
            children: body,
        }],
    }
}
