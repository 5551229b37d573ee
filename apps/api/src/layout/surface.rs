//! The positioned display list a render tree is laid out into.
//!
//! Coordinates are CSS pixels at 1× scale with the origin at the top-left corner.
//! Ops are stored in paint order.

use serde::Serialize;

use crate::layout::font_metrics::FontFamily;
use crate::templates::tree::{Color, Fill, TextStyle};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Surface {
    pub width: f32,
    /// Full extent of the content; never clipped to a viewport.
    pub height: f32,
    pub background: Color,
    pub ops: Vec<DrawOp>,
}

impl Surface {
    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(run) => Some(run),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Fill { rect: Rect, fill: Fill },
    /// Outline drawn inside `rect`.
    Border {
        rect: Rect,
        color: Color,
        thickness: f32,
    },
    Text(TextRun),
}

/// One line of text. `y` is the top of the line box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub text: String,
    pub font: FontFamily,
    pub style: TextStyle,
}
