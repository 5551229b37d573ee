//! Surface capture: paints a laid-out surface into an RGBA bitmap.
//!
//! Shapes go through tiny-skia. Text is drawn from the font8x8 bitmap glyphs, each
//! glyph stretched into the advance box the layout measured for it, so captured
//! text lands exactly where layout placed it.

use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use tiny_skia::{
    Color as SkColor, GradientStop, LinearGradient, Paint, Pixmap, Point, Rect as SkRect,
    SpreadMode, Transform,
};

use crate::export::ExportError;
use crate::layout::{get_metrics, DrawOp, Rect, Surface, TextRun};
use crate::templates::tree::{Color, Fill};

/// Minimum device pixels per surface pixel.
pub const MIN_SCALE: f32 = 2.0;

/// Glyph ink height relative to font size.
const GLYPH_HEIGHT: f32 = 0.72;
/// Horizontal shear applied to italic glyph rows, relative to font size.
const ITALIC_SHEAR: f32 = 0.18;

/// Opaque 8-bit RGBA pixels, row-major, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Bitmap {
    /// Drops the alpha channel.
    pub fn to_rgb(&self) -> Vec<u8> {
        self.data
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }
}

/// Captures a surface at `scale` device pixels per surface pixel.
///
/// Implementations are CPU-bound and are called from a blocking task.
pub trait Rasterizer: Send + Sync {
    fn rasterize(&self, surface: &Surface, scale: f32) -> Result<Bitmap, ExportError>;
}

/// Software rasterizer backed by tiny-skia.
#[derive(Debug, Clone, Copy, Default)]
pub struct PixmapRasterizer;

impl Rasterizer for PixmapRasterizer {
    fn rasterize(&self, surface: &Surface, scale: f32) -> Result<Bitmap, ExportError> {
        if !scale.is_finite() || scale < MIN_SCALE {
            return Err(ExportError::RasterizationFailed(format!(
                "scale {scale} is below the minimum of {MIN_SCALE}"
            )));
        }
        let width = (surface.width * scale).ceil() as u32;
        let height = (surface.height * scale).ceil() as u32;
        let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
            ExportError::RasterizationFailed(format!("cannot allocate a {width}x{height} pixmap"))
        })?;
        pixmap.fill(sk_color(surface.background));

        let transform = Transform::from_scale(scale, scale);
        for op in &surface.ops {
            match op {
                DrawOp::Fill { rect, fill } => fill_rect(&mut pixmap, rect, fill, transform),
                DrawOp::Border {
                    rect,
                    color,
                    thickness,
                } => stroke_rect(&mut pixmap, rect, *color, *thickness, transform),
                DrawOp::Text(run) => draw_text(&mut pixmap, run, scale),
            }
        }

        Ok(Bitmap {
            width,
            height,
            data: pixmap.take(),
        })
    }
}

fn sk_color(color: Color) -> SkColor {
    SkColor::from_rgba8(color.0, color.1, color.2, 255)
}

fn fill_rect(pixmap: &mut Pixmap, rect: &Rect, fill: &Fill, transform: Transform) {
    let Some(area) = SkRect::from_xywh(rect.x, rect.y, rect.width, rect.height) else {
        return;
    };
    let mut paint = Paint::default();
    match fill {
        Fill::Solid { color } => paint.set_color(sk_color(*color)),
        Fill::HorizontalGradient { from, to } => {
            let shader = LinearGradient::new(
                Point::from_xy(rect.x, rect.y),
                Point::from_xy(rect.right(), rect.y),
                vec![
                    GradientStop::new(0.0, sk_color(*from)),
                    GradientStop::new(1.0, sk_color(*to)),
                ],
                SpreadMode::Pad,
                Transform::identity(),
            );
            match shader {
                Some(shader) => paint.shader = shader,
                None => paint.set_color(sk_color(*from)),
            }
        }
    }
    pixmap.fill_rect(area, &paint, transform, None);
}

fn stroke_rect(pixmap: &mut Pixmap, rect: &Rect, color: Color, thickness: f32, transform: Transform) {
    let fill = Fill::Solid { color };
    let t = thickness.min(rect.width / 2.0).min(rect.height / 2.0);
    let edges = [
        Rect::new(rect.x, rect.y, rect.width, t),
        Rect::new(rect.x, rect.bottom() - t, rect.width, t),
        Rect::new(rect.x, rect.y + t, t, rect.height - 2.0 * t),
        Rect::new(rect.right() - t, rect.y + t, t, rect.height - 2.0 * t),
    ];
    for edge in &edges {
        fill_rect(pixmap, edge, &fill, transform);
    }
}

fn glyph(c: char) -> Option<[u8; 8]> {
    match c {
        // U+2022 BULLET is missing from font8x8.
        '\u{2022}' => Some([0x00, 0x00, 0x18, 0x3C, 0x3C, 0x18, 0x00, 0x00]),
        _ => BASIC_FONTS.get(c).or_else(|| LATIN_FONTS.get(c)),
    }
}

fn draw_text(pixmap: &mut Pixmap, run: &TextRun, scale: f32) {
    let metrics = get_metrics(&run.font);
    let style = &run.style;
    let color = [style.color.0, style.color.1, style.color.2, 255];

    let glyph_height = style.size * GLYPH_HEIGHT;
    let top = run.y + (style.line_height() - glyph_height) / 2.0;
    let cell_height = glyph_height / 8.0;
    let shear = if style.italic {
        style.size * ITALIC_SHEAR / 8.0
    } else {
        0.0
    };

    let mut pen = run.x;
    for c in run.text.chars() {
        let advance = metrics.advance_px(c, style);
        if let Some(rows) = glyph(c) {
            let cell_width = advance * 0.9 / 8.0;
            // Heavy weights widen each lit cell by half a cell.
            let embolden = if style.weight.is_heavy() {
                cell_width * 0.5
            } else {
                0.0
            };
            let left = pen + advance * 0.05;
            for (row, bits) in rows.iter().enumerate() {
                let offset = shear * (7 - row) as f32;
                let y0 = top + row as f32 * cell_height;
                for col in 0..8 {
                    if bits & (1 << col) == 0 {
                        continue;
                    }
                    let x0 = left + offset + col as f32 * cell_width;
                    fill_device_rect(
                        pixmap,
                        x0 * scale,
                        y0 * scale,
                        (x0 + cell_width + embolden) * scale,
                        (y0 + cell_height) * scale,
                        color,
                    );
                }
            }
        }
        pen += advance;
    }
}

/// Writes opaque pixels covering the device-space box, clipped to the pixmap.
fn fill_device_rect(pixmap: &mut Pixmap, x0: f32, y0: f32, x1: f32, y1: f32, rgba: [u8; 4]) {
    let width = pixmap.width() as i64;
    let height = pixmap.height() as i64;
    let left = (x0.floor() as i64).clamp(0, width);
    let right = (x1.ceil() as i64).max(left + 1).clamp(0, width);
    let top = (y0.floor() as i64).clamp(0, height);
    let bottom = (y1.ceil() as i64).max(top + 1).clamp(0, height);

    let data = pixmap.data_mut();
    for y in top..bottom {
        for x in left..right {
            let i = ((y * width + x) * 4) as usize;
            data[i..i + 4].copy_from_slice(&rgba);
        }
    }
}
