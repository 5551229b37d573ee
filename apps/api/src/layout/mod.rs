// Layout: places a RenderTree onto a fixed-width surface of unbounded height.
// Pure and deterministic; the export pipeline rasterizes the result.

pub mod flow;
pub mod font_metrics;
pub mod surface;

pub use flow::layout;
pub use font_metrics::{get_metrics, FontFamily};
pub use surface::{DrawOp, Rect, Surface, TextRun};
