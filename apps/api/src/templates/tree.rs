//! RenderTree: the styled, unpositioned output of a template variant.
//!
//! Units are CSS pixels at 1× scale. The tree carries no positions; `crate::layout`
//! places it on a surface.

use serde::Serialize;

use crate::templates::catalog::ImplementedTemplate;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderTree {
    pub template: ImplementedTemplate,
    /// Content width of the surface.
    pub width: f32,
    pub nodes: Vec<Node>,
}

impl RenderTree {
    /// All sections in document order, descending into bands, blocks and columns.
    pub fn sections(&self) -> Vec<&Node> {
        fn walk<'a>(nodes: &'a [Node], out: &mut Vec<&'a Node>) {
            for node in nodes {
                match node {
                    Node::Section { .. } => out.push(node),
                    Node::Band { children, .. } | Node::Block { children, .. } => {
                        walk(children, out)
                    }
                    Node::Columns { columns, .. } => walk(columns, out),
                    _ => {}
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.nodes, &mut out);
        out
    }

    pub fn section(&self, kind: SectionKind) -> Option<&Node> {
        self.sections()
            .into_iter()
            .find(|n| matches!(n, Node::Section { section, .. } if *section == kind))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    /// Full-width region with its own background.
    Band {
        fill: Fill,
        padding: f32,
        children: Vec<Node>,
    },
    /// Padded vertical group.
    Block { padding: f32, children: Vec<Node> },
    Section {
        section: SectionKind,
        heading: Option<TextBlock>,
        /// Border drawn under the heading.
        heading_rule: Option<Color>,
        /// One node per entry, in input order.
        children: Vec<Node>,
        /// Vertical space between entries.
        gap: f32,
    },
    Text(TextBlock),
    /// Wrapping row of short items (contact details).
    Inline {
        items: Vec<String>,
        style: TextStyle,
        gap: f32,
    },
    Entry(Entry),
    /// A skill badge. Consecutive chips flow together.
    Chip { text: String, style: ChipStyle },
    Link(Link),
    /// Side-by-side equal-width columns.
    Columns { gap: f32, columns: Vec<Node> },
    Rule { color: Color, thickness: f32 },
    Spacer { height: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBlock {
    pub text: String,
    pub style: TextStyle,
}

impl TextBlock {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub title: String,
    /// Right-aligned on the title line.
    pub date: Option<String>,
    pub subtitle: Option<String>,
    pub body: Option<String>,
    pub link: Option<Link>,
    pub style: EntryStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryStyle {
    pub title: TextStyle,
    pub date: TextStyle,
    pub subtitle: TextStyle,
    pub body: TextStyle,
    pub link: TextStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub label: String,
    pub href: String,
    pub style: TextStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChipStyle {
    pub text: TextStyle,
    pub background: Option<Color>,
    pub border: Option<Color>,
    pub padding_x: f32,
    pub padding_y: f32,
    pub gap: f32,
    pub centered: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextStyle {
    pub size: f32,
    pub weight: Weight,
    pub color: Color,
    pub align: Align,
    pub italic: bool,
}

impl TextStyle {
    pub const fn new(size: f32, color: Color) -> Self {
        Self {
            size,
            weight: Weight::Regular,
            color,
            align: Align::Left,
            italic: false,
        }
    }

    pub const fn weight(mut self, weight: Weight) -> Self {
        self.weight = weight;
        self
    }

    pub const fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }

    pub const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Line box height.
    pub fn line_height(&self) -> f32 {
        (self.size * 1.4).round()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Weight {
    Regular,
    Medium,
    Semibold,
    Bold,
}

impl Weight {
    pub fn is_heavy(&self) -> bool {
        matches!(self, Weight::Semibold | Weight::Bold)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Fill {
    Solid { color: Color },
    HorizontalGradient { from: Color, to: Color },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const WHITE: Color = Color(0xff, 0xff, 0xff);
    pub const GRAY_100: Color = Color(0xf3, 0xf4, 0xf6);
    pub const GRAY_200: Color = Color(0xe5, 0xe7, 0xeb);
    pub const GRAY_300: Color = Color(0xd1, 0xd5, 0xdb);
    pub const GRAY_600: Color = Color(0x4b, 0x55, 0x63);
    pub const GRAY_800: Color = Color(0x1f, 0x29, 0x37);
    pub const CYAN_600: Color = Color(0x08, 0x91, 0xb2);
    pub const VIOLET_600: Color = Color(0x7c, 0x3a, 0xed);
    /// White at 90% over the header gradient.
    pub const WHITE_90: Color = Color(0xe8, 0xee, 0xf4);
}
