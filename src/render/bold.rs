//! Apparent-bold text drawing.
//!
//! Three tiers, best first:
//!
//! 1. A genuine bold face: draw once.
//! 2. Stroke emulation: draw with an outline stroke in the fill colour.
//! 3. Offset emulation: draw five times around the target position, used when
//!    the font cannot be stroked (the built-in bitmap face).

use image::{Rgba, RgbaImage};
use tracing::trace;

use super::{draw_text, draw_text_stroked};
use crate::font::FontHandle;
use crate::geometry::Point;

/// Stroke width used for bold emulation.
pub const DEFAULT_STROKE_WIDTH: u32 = 2;

/// Offsets for the overlapping-redraw fallback.
pub const BOLD_OFFSETS: [(f32, f32); 5] = [(-1.0, 0.0), (1.0, 0.0), (0.0, -1.0), (0.0, 1.0), (0.0, 0.0)];

/// Draw `text` in apparent bold with its layout origin at `position`.
///
/// `bold_achieved` tells whether `font` is already a bold face.
pub fn draw_bold(
    canvas: &mut RgbaImage,
    position: Point,
    text: &str,
    font: &FontHandle,
    color: Rgba<u8>,
    bold_achieved: bool,
    stroke_width: u32,
) {
    if bold_achieved {
        draw_text(canvas, position, text, font, color);
        return;
    }

    match draw_text_stroked(canvas, position, text, font, color, stroke_width) {
        Ok(()) => {}
        Err(e) => {
            trace!(error = %e, "falling back to offset redraw");
            for offset in BOLD_OFFSETS {
                draw_text(canvas, position + offset, text, font, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::TrueTypeFace;
    use std::path::Path;

    const REGULAR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/fonts/DejaVuSans.ttf");

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn inked(canvas: &RgbaImage) -> usize {
        canvas.pixels().filter(|p| **p != WHITE).count()
    }

    fn render(font: &FontHandle, bold_achieved: bool) -> RgbaImage {
        let mut canvas = RgbaImage::from_pixel(300, 120, WHITE);
        draw_bold(
            &mut canvas,
            Point::new(20.0, 20.0),
            "Bold",
            font,
            BLACK,
            bold_achieved,
            DEFAULT_STROKE_WIDTH,
        );
        canvas
    }

    #[test]
    fn test_stroke_thickens_truetype() {
        let font = FontHandle::TrueType(TrueTypeFace::load(Path::new(REGULAR), 48).unwrap());
        let plain = inked(&render(&font, true));
        let stroked = inked(&render(&font, false));
        assert!(plain > 0);
        assert!(stroked > plain, "stroked {} should exceed plain {}", stroked, plain);
    }

    #[test]
    fn test_offset_redraw_for_builtin() {
        let font = FontHandle::fallback(48);
        let plain = render(&font, true);
        let emulated = render(&font, false);

        assert!(inked(&emulated) > inked(&plain));
        // Every pixel of the single draw is still covered
        for (a, b) in plain.pixels().zip(emulated.pixels()) {
            if *a != WHITE {
                assert_eq!(*b, BLACK);
            }
        }
    }

    #[test]
    fn test_offset_redraw_spreads_one_pixel() {
        let font = FontHandle::fallback(24);
        let single = super::super::measure("l", &font).unwrap();
        let mut canvas = RgbaImage::from_pixel(80, 80, WHITE);
        draw_bold(&mut canvas, Point::new(30.0, 30.0), "l", &font, BLACK, false, 2);

        let left = (30 + single.left - 1) as u32;
        let top = (30 + single.top - 1) as u32;
        // The (-1, 0) and (0, -1) copies reach one pixel beyond the original ink
        assert!((0..80).any(|y| *canvas.get_pixel(left, y) == BLACK));
        assert!((0..80).any(|x| *canvas.get_pixel(x, top) == BLACK));
        assert!((0..80).all(|y| *canvas.get_pixel(left - 1, y) == WHITE));
    }
}
