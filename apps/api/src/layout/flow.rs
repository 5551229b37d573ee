//! Block-flow layout of a `RenderTree` onto a `Surface`.
//!
//! Nodes stack top to bottom inside a frame (left edge + width). Text wraps greedily
//! using the template's font metrics; inline items and chips flow left to right and
//! wrap into rows. The surface height is whatever the content needs.

use crate::layout::font_metrics::{get_metrics, FontFamily, FontMetricTable};
use crate::layout::surface::{DrawOp, Rect, Surface, TextRun};
use crate::templates::tree::{Align, ChipStyle, Color, Entry, Fill, Node, RenderTree, TextStyle};

/// Space between a heading and its underline.
const HEADING_RULE_GAP: f32 = 8.0;
/// Space between a heading (or its underline) and the first entry.
const HEADING_GAP_RULED: f32 = 16.0;
const HEADING_GAP: f32 = 8.0;
/// Minimum space between an entry title and its right-aligned date.
const DATE_GUTTER: f32 = 16.0;
const ENTRY_LINE_GAP: f32 = 4.0;

#[derive(Debug, Clone, Copy)]
struct Frame {
    x: f32,
    width: f32,
}

impl Frame {
    fn inset(self, padding: f32) -> Frame {
        Frame {
            x: self.x + padding,
            width: (self.width - 2.0 * padding).max(0.0),
        }
    }
}

struct Flow {
    font: FontFamily,
    metrics: &'static FontMetricTable,
    ops: Vec<DrawOp>,
}

pub fn layout(tree: &RenderTree) -> Surface {
    let font = FontFamily::for_template(tree.template);
    let mut flow = Flow {
        font,
        metrics: get_metrics(&font),
        ops: Vec::new(),
    };
    let frame = Frame {
        x: 0.0,
        width: tree.width,
    };
    let bottom = flow.sequence(&tree.nodes, frame, 0.0, 0.0);

    Surface {
        width: tree.width,
        height: bottom.ceil().max(1.0),
        background: Color::WHITE,
        ops: flow.ops,
    }
}

impl Flow {
    /// Stacks siblings with `gap` between them. Consecutive chips share rows.
    fn sequence(&mut self, nodes: &[Node], frame: Frame, mut y: f32, gap: f32) -> f32 {
        let mut i = 0;
        while i < nodes.len() {
            if i > 0 {
                y += gap;
            }
            if matches!(nodes[i], Node::Chip { .. }) {
                let end = nodes[i..]
                    .iter()
                    .position(|n| !matches!(n, Node::Chip { .. }))
                    .map_or(nodes.len(), |p| i + p);
                y = self.chips(&nodes[i..end], frame, y);
                i = end;
            } else {
                y = self.node(&nodes[i], frame, y);
                i += 1;
            }
        }
        y
    }

    fn node(&mut self, node: &Node, frame: Frame, y: f32) -> f32 {
        match node {
            Node::Band {
                fill,
                padding,
                children,
            } => {
                // Background must paint below the children laid out after it.
                let slot = self.ops.len();
                let bottom = self.sequence(children, frame.inset(*padding), y + padding, 0.0) + padding;
                self.ops.insert(
                    slot,
                    DrawOp::Fill {
                        rect: Rect::new(frame.x, y, frame.width, bottom - y),
                        fill: *fill,
                    },
                );
                bottom
            }
            Node::Block { padding, children } => {
                self.sequence(children, frame.inset(*padding), y + padding, 0.0) + padding
            }
            Node::Section {
                heading,
                heading_rule,
                children,
                gap,
                ..
            } => {
                let mut y = y;
                if let Some(heading) = heading {
                    y = self.lines(&heading.text, &heading.style, frame, y);
                    match heading_rule {
                        Some(color) => {
                            y += HEADING_RULE_GAP;
                            self.fill(Rect::new(frame.x, y, frame.width, 1.0), *color);
                            y += 1.0 + HEADING_GAP_RULED;
                        }
                        None => y += HEADING_GAP,
                    }
                }
                self.sequence(children, frame, y, *gap)
            }
            Node::Text(block) => self.lines(&block.text, &block.style, frame, y),
            Node::Inline { items, style, gap } => self.inline(items, style, *gap, frame, y),
            Node::Entry(entry) => self.entry(entry, frame, y),
            Node::Chip { .. } => self.chips(std::slice::from_ref(node), frame, y),
            Node::Link(link) => self.lines(&link.label, &link.style, frame, y),
            Node::Columns { gap, columns } => {
                if columns.is_empty() {
                    return y;
                }
                let count = columns.len() as f32;
                let width = ((frame.width - gap * (count - 1.0)) / count).max(0.0);
                let mut bottom = y;
                for (i, column) in columns.iter().enumerate() {
                    let column_frame = Frame {
                        x: frame.x + i as f32 * (width + gap),
                        width,
                    };
                    bottom = bottom.max(self.node(column, column_frame, y));
                }
                bottom
            }
            Node::Rule { color, thickness } => {
                self.fill(Rect::new(frame.x, y, frame.width, *thickness), *color);
                y + thickness
            }
            Node::Spacer { height } => y + height,
        }
    }

    fn lines(&mut self, text: &str, style: &TextStyle, frame: Frame, mut y: f32) -> f32 {
        let line_height = style.line_height();
        for line in self.metrics.wrap(text, style, frame.width) {
            let width = self.metrics.measure_px(&line, style);
            let x = aligned_x(frame, width, style.align);
            self.run(line, x, y, width, style);
            y += line_height;
        }
        y
    }

    fn inline(&mut self, items: &[String], style: &TextStyle, gap: f32, frame: Frame, y: f32) -> f32 {
        let widths: Vec<f32> = items
            .iter()
            .map(|item| self.metrics.measure_px(item, style))
            .collect();
        let line_height = style.line_height();

        let mut y = y;
        for (row, used) in flow_rows(&widths, gap, frame.width) {
            if used > frame.width {
                // A lone item wider than the frame wraps like ordinary text.
                y = self.lines(&items[row[0]], style, frame, y);
                continue;
            }
            let mut x = aligned_x(frame, used, style.align);
            for i in row {
                self.run(items[i].clone(), x, y, widths[i], style);
                x += widths[i] + gap;
            }
            y += line_height;
        }
        y
    }

    fn chips(&mut self, chips: &[Node], frame: Frame, y: f32) -> f32 {
        let items: Vec<(&str, &ChipStyle)> = chips
            .iter()
            .filter_map(|n| match n {
                Node::Chip { text, style } => Some((text.as_str(), style)),
                _ => None,
            })
            .collect();
        // A run of chips shares the style of its first chip for spacing and alignment.
        let Some(&(_, run_style)) = items.first() else {
            return y;
        };
        let align = if run_style.centered {
            Align::Center
        } else {
            Align::Left
        };
        let chip_height = run_style.text.line_height() + 2.0 * run_style.padding_y;
        let widths: Vec<f32> = items
            .iter()
            .map(|(text, chip)| self.metrics.measure_px(text, &chip.text) + 2.0 * chip.padding_x)
            .collect();

        let rows = flow_rows(&widths, run_style.gap, frame.width);
        let row_count = rows.len();
        let mut y = y;
        for (r, (row, used)) in rows.into_iter().enumerate() {
            if used > frame.width {
                // A lone chip wider than the frame is clamped to it and its text wraps.
                let (text, chip) = items[row[0]];
                y = self.wide_chip(text, chip, frame, y);
            } else {
                let mut x = aligned_x(frame, used, align);
                for i in row {
                    let (text, chip) = items[i];
                    self.chip_box(Rect::new(x, y, widths[i], chip_height), chip);
                    self.run(
                        text.to_string(),
                        x + chip.padding_x,
                        y + chip.padding_y,
                        widths[i] - 2.0 * chip.padding_x,
                        &chip.text,
                    );
                    x += widths[i] + run_style.gap;
                }
                y += chip_height;
            }
            if r + 1 < row_count {
                y += run_style.gap;
            }
        }
        y
    }

    fn wide_chip(&mut self, text: &str, chip: &ChipStyle, frame: Frame, y: f32) -> f32 {
        let inner = (frame.width - 2.0 * chip.padding_x).max(0.0);
        let lines = self.metrics.wrap(text, &chip.text, inner);
        let line_height = chip.text.line_height();
        let height = lines.len() as f32 * line_height + 2.0 * chip.padding_y;
        self.chip_box(Rect::new(frame.x, y, frame.width, height), chip);

        let mut line_y = y + chip.padding_y;
        for line in lines {
            let width = self.metrics.measure_px(&line, &chip.text).min(inner);
            self.run(line, frame.x + chip.padding_x, line_y, width, &chip.text);
            line_y += line_height;
        }
        y + height
    }

    fn chip_box(&mut self, rect: Rect, chip: &ChipStyle) {
        if let Some(background) = chip.background {
            self.fill(rect, background);
        }
        if let Some(border) = chip.border {
            self.ops.push(DrawOp::Border {
                rect,
                color: border,
                thickness: 1.0,
            });
        }
    }

    fn entry(&mut self, entry: &Entry, frame: Frame, y: f32) -> f32 {
        let style = &entry.style;
        let date_w = entry
            .date
            .as_deref()
            .map(|date| self.metrics.measure_px(date, &style.date));

        let mut y = match (&entry.date, date_w) {
            // The date sits to the right of the title while it takes at most half the frame.
            (Some(date), Some(date_w)) if date_w + DATE_GUTTER <= frame.width / 2.0 => {
                let date_y =
                    y + (style.title.line_height() - style.date.line_height()).max(0.0) / 2.0;
                self.run(
                    date.clone(),
                    frame.x + frame.width - date_w,
                    date_y,
                    date_w,
                    &style.date,
                );
                let title_frame = Frame {
                    x: frame.x,
                    width: frame.width - date_w - DATE_GUTTER,
                };
                self.lines(&entry.title, &style.title, title_frame, y)
                    .max(date_y + style.date.line_height())
            }
            // Otherwise it gets its own lines below the title.
            (Some(date), _) => {
                let y = self.lines(&entry.title, &style.title, frame, y);
                self.lines(date, &style.date, frame, y)
            }
            _ => self.lines(&entry.title, &style.title, frame, y),
        };
        if let Some(subtitle) = &entry.subtitle {
            y = self.lines(subtitle, &style.subtitle, frame, y);
        }
        if let Some(body) = &entry.body {
            y = self.lines(body, &style.body, frame, y + ENTRY_LINE_GAP);
        }
        if let Some(link) = &entry.link {
            y = self.lines(&link.label, &link.style, frame, y + ENTRY_LINE_GAP);
        }
        y
    }

    fn run(&mut self, text: String, x: f32, y: f32, width: f32, style: &TextStyle) {
        if text.is_empty() {
            return;
        }
        self.ops.push(DrawOp::Text(TextRun {
            x,
            y,
            width,
            text,
            font: self.font,
            style: *style,
        }));
    }

    fn fill(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::Fill {
            rect,
            fill: Fill::Solid { color },
        });
    }
}

fn aligned_x(frame: Frame, width: f32, align: Align) -> f32 {
    match align {
        Align::Left => frame.x,
        Align::Center => frame.x + ((frame.width - width) / 2.0).max(0.0),
    }
}

/// Packs item widths into rows no wider than `max_width`. Returns each row's item
/// indices and its used width. An item wider than `max_width` gets a row to itself.
fn flow_rows(widths: &[f32], gap: f32, max_width: f32) -> Vec<(Vec<usize>, f32)> {
    let mut rows: Vec<(Vec<usize>, f32)> = Vec::new();
    for (i, &w) in widths.iter().enumerate() {
        match rows.last_mut() {
            Some((row, used)) if *used + gap + w <= max_width => {
                row.push(i);
                *used += gap + w;
            }
            _ => rows.push((vec![i], w)),
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{CertificationEntry, ExperienceEntry, Sections};
    use crate::templates::{render_variant, TemplateVariant, PAGE_WIDTH};

    const VARIANTS: [TemplateVariant; 3] = [
        TemplateVariant::Professional,
        TemplateVariant::Modern,
        TemplateVariant::Minimal,
    ];

    fn surface(variant: &TemplateVariant, sections: &Sections) -> Surface {
        layout(&render_variant(variant, sections))
    }

    fn run_with<'a>(surface: &'a Surface, text: &str) -> &'a TextRun {
        surface
            .text_runs()
            .find(|r| r.text == text)
            .unwrap_or_else(|| panic!("no run '{text}'"))
    }

    #[test]
    fn test_layout_is_deterministic() {
        let sections = crate::templates::tests::full_sections();
        for variant in &VARIANTS {
            assert_eq!(surface(variant, &sections), surface(variant, &sections));
        }
    }

    #[test]
    fn test_surface_has_fixed_width_and_content_height() {
        let sections = crate::templates::tests::full_sections();
        for variant in &VARIANTS {
            let s = surface(variant, &sections);
            assert_eq!(s.width, PAGE_WIDTH);
            let lowest = s
                .text_runs()
                .map(|r| r.y + r.style.line_height())
                .fold(0.0_f32, f32::max);
            assert!(s.height >= lowest, "{variant:?} clips its content");
        }
    }

    #[test]
    fn test_height_grows_with_content() {
        let mut sections = crate::templates::tests::full_sections();
        let base = surface(&TemplateVariant::Professional, &sections).height;
        for i in 0..20 {
            sections.experience.push(ExperienceEntry {
                company: format!("Company {i}"),
                position: "Engineer".to_string(),
                start_date: "2010".to_string(),
                end_date: "2011".to_string(),
                current: false,
                description: "Did a great deal of work across many teams.".to_string(),
            });
        }
        let grown = surface(&TemplateVariant::Professional, &sections).height;
        assert!(grown > base + 20.0 * 40.0, "{grown} vs {base}");
    }

    #[test]
    fn test_text_stays_within_surface_width() {
        let sections = crate::templates::tests::full_sections();
        for variant in &VARIANTS {
            let s = surface(variant, &sections);
            for run in s.text_runs() {
                assert!(run.x >= 0.0, "{variant:?}: '{}' starts off-surface", run.text);
                assert!(
                    run.x + run.width <= s.width + 0.01,
                    "{variant:?}: '{}' overflows",
                    run.text
                );
            }
        }
    }

    #[test]
    fn test_empty_document_shows_placeholder_name() {
        for variant in &VARIANTS {
            let s = surface(variant, &Sections::default());
            assert_eq!(s.text_runs().count(), 1, "{variant:?}");
            run_with(&s, "Your Name");
        }
    }

    #[test]
    fn test_minimal_name_is_centered() {
        let s = surface(
            &TemplateVariant::Minimal,
            &crate::templates::tests::full_sections(),
        );
        let name = run_with(&s, "Ada Lovelace");
        let expected = (PAGE_WIDTH - name.width) / 2.0;
        assert!((name.x - expected).abs() < 0.01);
    }

    #[test]
    fn test_modern_header_band_paints_first() {
        let s = surface(
            &TemplateVariant::Modern,
            &crate::templates::tests::full_sections(),
        );
        let DrawOp::Fill { rect, fill } = &s.ops[0] else {
            panic!("expected header fill first, got {:?}", s.ops[0]);
        };
        assert!(matches!(fill, Fill::HorizontalGradient { .. }));
        assert_eq!((rect.x, rect.y, rect.width), (0.0, 0.0, PAGE_WIDTH));
        let summary = run_with(&s, "Mathematician and first programmer.");
        assert!(summary.y + summary.style.line_height() <= rect.bottom());
    }

    #[test]
    fn test_entry_date_is_right_aligned() {
        let s = surface(
            &TemplateVariant::Professional,
            &crate::templates::tests::full_sections(),
        );
        let date = run_with(&s, "1842 - 1843");
        assert!((date.x + date.width - (PAGE_WIDTH - 32.0)).abs() < 0.01);
    }

    #[test]
    fn test_long_description_wraps() {
        let sections = Sections {
            experience: vec![ExperienceEntry {
                position: "Engineer".to_string(),
                description: "shipping ".repeat(80),
                ..Default::default()
            }],
            ..Default::default()
        };
        let s = surface(&TemplateVariant::Professional, &sections);
        let body_runs = s.text_runs().filter(|r| r.text.starts_with("shipping")).count();
        assert!(body_runs > 1);
    }

    #[test]
    fn test_many_skills_wrap_into_rows() {
        let sections = Sections {
            skills: (0..40).map(|i| format!("Skill number {i}")).collect(),
            ..Default::default()
        };
        let s = surface(&TemplateVariant::Modern, &sections);
        let mut rows: Vec<f32> = s
            .text_runs()
            .filter(|r| r.text.starts_with("Skill number"))
            .map(|r| r.y)
            .collect();
        rows.dedup();
        assert!(rows.len() > 1);
    }

    const LONG_SKILL: &str = "Distributed systems design and capacity planning at scale";

    #[test]
    fn test_wide_chip_wraps_inside_the_surface() {
        let sections = Sections {
            skills: vec![LONG_SKILL.repeat(3), "Rust".to_string()],
            ..Default::default()
        };
        for variant in &VARIANTS {
            let s = surface(variant, &sections);
            let chip_runs: Vec<&TextRun> = s
                .text_runs()
                .filter(|r| r.text.starts_with("Distributed") || r.text.contains("scale"))
                .collect();
            assert!(chip_runs.len() > 1, "{variant:?}: long skill did not wrap");
            for run in chip_runs {
                assert!(run.x >= 0.0);
                assert!(
                    run.x + run.width <= s.width + 0.01,
                    "{variant:?}: '{}' overflows",
                    run.text
                );
            }
            run_with(&s, "Rust");
        }
    }

    #[test]
    fn test_wide_chip_stays_in_its_column() {
        let sections = Sections {
            skills: vec![LONG_SKILL.to_string()],
            certifications: vec![CertificationEntry {
                name: "AWS Solutions Architect".to_string(),
                issuer: "Amazon".to_string(),
                date: "2023".to_string(),
                url: None,
            }],
            ..Default::default()
        };
        let s = surface(&TemplateVariant::Modern, &sections);
        let column_left = run_with(&s, "Certifications").x;
        let skill_runs: Vec<&TextRun> = s
            .text_runs()
            .filter(|r| LONG_SKILL.contains(r.text.as_str()) && r.x < column_left)
            .collect();
        assert!(!skill_runs.is_empty());
        for run in skill_runs {
            assert!(
                run.x + run.width <= column_left,
                "'{}' runs into the certifications column",
                run.text
            );
        }
    }

    #[test]
    fn test_wide_date_moves_below_title() {
        let sections = Sections {
            experience: vec![ExperienceEntry {
                position: "Staff Engineer".to_string(),
                start_date: "January 2019 ".repeat(12),
                end_date: "2024".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        for variant in &VARIANTS {
            let s = surface(variant, &sections);
            let title = run_with(&s, "Staff Engineer");
            let date_runs: Vec<&TextRun> = s
                .text_runs()
                .filter(|r| r.text.contains("January"))
                .collect();
            assert!(!date_runs.is_empty());
            for run in date_runs {
                assert!(run.x >= 0.0, "{variant:?}: date starts off-surface");
                assert!(run.x + run.width <= s.width + 0.01);
                assert!(
                    run.y >= title.y + title.style.line_height(),
                    "{variant:?}: date overlaps the title"
                );
            }
        }
    }

    #[test]
    fn test_flow_rows_packs_greedily() {
        let rows = flow_rows(&[40.0, 40.0, 40.0, 200.0], 10.0, 100.0);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], (vec![0, 1], 90.0));
        assert_eq!(rows[1], (vec![2], 40.0));
        assert_eq!(rows[2], (vec![3], 200.0));
    }
}
