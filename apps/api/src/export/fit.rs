//! Placement of a captured bitmap on the page.

use serde::Serialize;

use crate::export::PageSize;

/// Uniform scale and offset that place a bitmap on a page, in points.
///
/// `y` is measured from the top page edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitTransform {
    pub ratio: f32,
    pub width: f32,
    pub height: f32,
    pub x: f32,
    pub y: f32,
}

impl FitTransform {
    /// Largest uniform scale that fits the bitmap inside the page, centred
    /// horizontally, at a fixed top offset.
    ///
    /// The ratio is taken against the full page height, so a height-bound image
    /// extends `top_margin` past the bottom edge.
    pub fn compute(bitmap_width: f32, bitmap_height: f32, page: PageSize, top_margin: f32) -> Self {
        let ratio = (page.width / bitmap_width).min(page.height / bitmap_height);
        let width = bitmap_width * ratio;
        let height = bitmap_height * ratio;
        Self {
            ratio,
            width,
            height,
            x: (page.width - width) / 2.0,
            y: top_margin,
        }
    }

    pub fn is_finite(&self) -> bool {
        [self.ratio, self.width, self.height, self.x, self.y]
            .iter()
            .all(|v| v.is_finite())
    }
}
