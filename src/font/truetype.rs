//! TrueType/OpenType text rasterization.
//!
//! Renders a single line of text to an anti-aliased coverage mask using
//! ab_glyph. The font size is an em size in pixels, the same convention
//! FreeType uses for a 72 DPI point size.

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use std::path::{Path, PathBuf};

use super::FontError;
use crate::render::TextMask;

/// A loaded outline font bound to a pixel size.
#[derive(Clone)]
pub struct TrueTypeFace {
    font: FontArc,
    size: u32,
    scale: PxScale,
    source: PathBuf,
}

impl std::fmt::Debug for TrueTypeFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrueTypeFace")
            .field("source", &self.source)
            .field("size", &self.size)
            .finish()
    }
}

impl TrueTypeFace {
    /// Read and parse a font file.
    pub fn load(path: &Path, size: u32) -> Result<Self, FontError> {
        let bytes = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(bytes, size, path)
    }

    /// Parse font bytes. `source` is only kept for diagnostics.
    pub fn from_bytes(bytes: Vec<u8>, size: u32, source: &Path) -> Result<Self, FontError> {
        let font =
            FontArc::try_from_vec(bytes).map_err(|_| FontError::Invalid(source.to_path_buf()))?;
        let scale = em_scale(&font, size);
        Ok(Self {
            font,
            size,
            scale,
            source: source.to_path_buf(),
        })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Line box height (ascent - descent) in pixels.
    pub fn line_height(&self) -> f32 {
        let scaled = self.font.as_scaled(self.scale);
        scaled.ascent() - scaled.descent()
    }

    /// Render one line of text. The layout origin is the top of the line box;
    /// the baseline sits `ascent` pixels below it.
    pub fn rasterize(&self, text: &str) -> TextMask {
        let scaled = self.font.as_scaled(self.scale);
        let baseline_y = scaled.ascent();

        // Layout: compute glyph positions with kerning
        let mut glyphs = Vec::new();
        let mut caret_x = 0.0f32;
        let mut previous = None;

        for ch in text.chars() {
            let glyph_id = self.font.glyph_id(ch);
            if let Some(prev) = previous {
                caret_x += scaled.kern(prev, glyph_id);
            }
            glyphs.push(
                glyph_id.with_scale_and_position(self.scale, ab_glyph::point(caret_x, baseline_y)),
            );
            caret_x += scaled.h_advance(glyph_id);
            previous = Some(glyph_id);
        }

        let outlined: Vec<_> = glyphs
            .into_iter()
            .filter_map(|glyph| self.font.outline_glyph(glyph))
            .collect();

        if outlined.is_empty() {
            return TextMask::empty();
        }

        // Union of pixel bounds across all glyphs
        let mut min_x = f32::MAX;
        let mut min_y = f32::MAX;
        let mut max_x = f32::MIN;
        let mut max_y = f32::MIN;
        for g in &outlined {
            let b = g.px_bounds();
            min_x = min_x.min(b.min.x);
            min_y = min_y.min(b.min.y);
            max_x = max_x.max(b.max.x);
            max_y = max_y.max(b.max.y);
        }

        let left = min_x.floor() as i32;
        let top = min_y.floor() as i32;
        let width = (max_x.ceil() as i32 - left).max(0) as usize;
        let height = (max_y.ceil() as i32 - top).max(0) as usize;
        let mut mask = TextMask::new(left, top, width, height);

        // Rasterize each glyph
        for g in &outlined {
            let bounds = g.px_bounds();
            let gx = bounds.min.x as i32 - left;
            let gy = bounds.min.y as i32 - top;
            g.draw(|px, py, coverage| {
                mask.accumulate(gx + px as i32, gy + py as i32, coverage);
            });
        }

        mask
    }
}

/// Pixel scale that makes one em equal `size` pixels.
fn em_scale(font: &FontArc, size: u32) -> PxScale {
    let size = size.max(1) as f32;
    match font.units_per_em() {
        Some(units_per_em) if units_per_em > 0.0 => {
            PxScale::from(size * font.height_unscaled() / units_per_em)
        }
        _ => PxScale::from(size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGULAR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/fonts/DejaVuSans.ttf");

    fn face(size: u32) -> TrueTypeFace {
        TrueTypeFace::load(Path::new(REGULAR), size).unwrap()
    }

    #[test]
    fn test_render_basic_text() {
        let mask = face(24).rasterize("Hello");
        assert!(mask.width > 0);
        assert!(mask.height > 0);
        assert_eq!(mask.data.len(), mask.width * mask.height);
        assert!(mask.data.iter().any(|&v| v > 0.0));
    }

    #[test]
    fn test_larger_size_renders_larger() {
        let small = face(24).rasterize("BIG").ink_bounds().unwrap();
        let large = face(72).rasterize("BIG").ink_bounds().unwrap();
        assert!(large.height() > small.height() * 2);
        assert!(large.width() > small.width() * 2);
    }

    #[test]
    fn test_cap_height_sits_below_origin() {
        let bounds = face(100).rasterize("H").ink_bounds().unwrap();
        // Capitals start below the top of the line box and end at the baseline
        assert!(bounds.top > 0);
        assert!(bounds.bottom as f32 <= face(100).line_height());
    }

    #[test]
    fn test_whitespace_has_no_ink() {
        assert!(face(40).rasterize("   ").ink_bounds().is_none());
        assert!(face(40).rasterize("").is_empty());
    }

    #[test]
    fn test_anti_aliased_output() {
        let mask = face(48).rasterize("Smooth");
        let has_intermediate = mask.data.iter().any(|&v| v > 0.01 && v < 0.99);
        assert!(has_intermediate, "TTF rendering should produce anti-aliased values");
    }

    #[test]
    fn test_invalid_bytes_rejected() {
        let err = TrueTypeFace::from_bytes(b"not a font".to_vec(), 12, Path::new("junk.ttf"));
        assert!(matches!(err, Err(FontError::Invalid(_))));
    }
}
