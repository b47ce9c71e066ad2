//! Built-in bitmap font used when no font file can be resolved.
//!
//! Uses the Spleen 12x24 face. Glyphs are decoded once into a process-wide
//! table and scaled by a whole-number factor, which keeps edges crisp.

use spleen_font::{FONT_12X24, PSF2Font};
use std::collections::HashMap;
use std::sync::OnceLock;

use crate::render::TextMask;

/// Cell width of the Spleen face in pixels.
pub const CELL_WIDTH: usize = 12;
/// Cell height of the Spleen face in pixels.
pub const CELL_HEIGHT: usize = 24;

static GLYPHS: OnceLock<GlyphTable> = OnceLock::new();

/// Decoded glyph bitmaps, one `CELL_WIDTH * CELL_HEIGHT` buffer per char.
struct GlyphTable {
    glyphs: HashMap<char, Vec<u8>>,
    missing: Vec<u8>,
}

fn glyph_table() -> &'static GlyphTable {
    GLYPHS.get_or_init(GlyphTable::decode)
}

impl GlyphTable {
    fn decode() -> Self {
        let mut missing = vec![0u8; CELL_WIDTH * CELL_HEIGHT];
        draw_box(&mut missing, CELL_WIDTH, CELL_HEIGHT);

        let mut glyphs = HashMap::new();
        let Ok(mut spleen) = PSF2Font::new(FONT_12X24) else {
            tracing::warn!("built-in font data could not be parsed; every glyph renders as a box");
            return Self { glyphs, missing };
        };

        // Printable ASCII and Latin-1
        for ch in (' '..='~').chain('\u{A0}'..='\u{FF}') {
            let utf8_bytes = ch.to_string();
            if let Some(spleen_glyph) = spleen.glyph_for_utf8(utf8_bytes.as_bytes()) {
                let mut glyph = vec![0u8; CELL_WIDTH * CELL_HEIGHT];
                for (row_y, row) in spleen_glyph.enumerate() {
                    for (col_x, on) in row.enumerate() {
                        if row_y < CELL_HEIGHT && col_x < CELL_WIDTH {
                            glyph[row_y * CELL_WIDTH + col_x] = if on { 1 } else { 0 };
                        }
                    }
                }
                glyphs.insert(ch, glyph);
            }
        }

        Self { glyphs, missing }
    }

    fn glyph(&self, ch: char) -> &[u8] {
        self.glyphs.get(&ch).unwrap_or(&self.missing)
    }
}

/// Draw a box outline in the glyph buffer.
fn draw_box(glyph: &mut [u8], width: usize, height: usize) {
    for x in 1..width - 1 {
        glyph[2 * width + x] = 1;
        glyph[(height - 3) * width + x] = 1;
    }
    for y in 2..height - 2 {
        glyph[y * width + 1] = 1;
        glyph[y * width + width - 2] = 1;
    }
}

/// The built-in face bound to a requested size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinFace {
    size: u32,
    scale: usize,
}

impl BuiltinFace {
    /// Bind the built-in face to a size. The bitmap is scaled by the whole
    /// number closest to `size / 24`, never below 1.
    pub fn new(size: u32) -> Self {
        let scale = ((size as f32 / CELL_HEIGHT as f32).round() as usize).max(1);
        Self { size, scale }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn scale(&self) -> usize {
        self.scale
    }

    pub fn line_height(&self) -> f32 {
        (CELL_HEIGHT * self.scale) as f32
    }

    /// Render one line of text. Cells are laid out left to right from the
    /// layout origin; each cell's top edge is the top of the line box.
    pub fn rasterize(&self, text: &str) -> TextMask {
        let count = text.chars().count();
        if count == 0 {
            return TextMask::empty();
        }

        let cell_w = CELL_WIDTH * self.scale;
        let cell_h = CELL_HEIGHT * self.scale;
        let mut mask = TextMask::new(0, 0, count * cell_w, cell_h);
        let table = glyph_table();

        for (i, ch) in text.chars().enumerate() {
            let glyph = table.glyph(ch);
            let x0 = i * cell_w;
            // Nearest neighbor scaling from the 12x24 cell
            for dy in 0..cell_h {
                let sy = dy / self.scale;
                for dx in 0..cell_w {
                    let sx = dx / self.scale;
                    if glyph[sy * CELL_WIDTH + sx] != 0 {
                        mask.data[dy * mask.width + x0 + dx] = 1.0;
                    }
                }
            }
        }

        mask
    }
}
