//! # Text Rendering
//!
//! Draws lines of text onto an RGBA canvas.
//!
//! ## Pipeline
//!
//! ```text
//! FontHandle::rasterize ──► TextMask ──► (dilate for stroke) ──► composite
//! ```
//!
//! - [`mask`]: coverage buffers, ink bounds, stroke dilation, blending
//! - [`bold`]: apparent-bold drawing with graceful degradation

pub mod bold;
pub mod mask;

use image::{Rgba, RgbaImage};
use thiserror::Error;

pub use bold::{BOLD_OFFSETS, DEFAULT_STROKE_WIDTH, draw_bold};
pub use mask::{InkBounds, TextMask};

use crate::font::FontHandle;
use crate::geometry::Point;

/// Rendering capability errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    /// The font backend cannot draw outline strokes.
    #[error("stroke rendering is not supported by this font")]
    StrokeUnsupported,
}

/// Draw a line of text once with its layout origin at `position`.
pub fn draw_text(canvas: &mut RgbaImage, position: Point, text: &str, font: &FontHandle, color: Rgba<u8>) {
    let mask = font.rasterize(text);
    if mask.is_empty() {
        return;
    }
    mask.composite(canvas, position.to_pixel(), color);
}

/// Draw a line of text thickened by an outline stroke of `stroke_width`
/// pixels in the fill colour.
pub fn draw_text_stroked(
    canvas: &mut RgbaImage,
    position: Point,
    text: &str,
    font: &FontHandle,
    color: Rgba<u8>,
    stroke_width: u32,
) -> Result<(), RenderError> {
    if !font.supports_stroke() {
        return Err(RenderError::StrokeUnsupported);
    }
    let mask = font.rasterize(text);
    if mask.is_empty() {
        return Ok(());
    }
    mask.dilate(stroke_width).composite(canvas, position.to_pixel(), color);
    Ok(())
}

/// Ink bounds of a line of text relative to its layout origin, or `None` if
/// the text draws nothing.
pub fn measure(text: &str, font: &FontHandle) -> Option<InkBounds> {
    font.rasterize(text).ink_bounds()
}
