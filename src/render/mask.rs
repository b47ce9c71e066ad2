//! Anti-aliased coverage masks for rendered text.
//!
//! A mask stores coverage in `[0.0, 1.0]` for a rectangle positioned relative
//! to the line's layout origin (top of the line box). Both font tiers render
//! into this representation, so measuring, stroking and compositing are shared.

use image::{Rgba, RgbaImage};

/// Rendered line of text as a coverage buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct TextMask {
    /// Offset of the buffer's left edge from the layout origin.
    pub left: i32,
    /// Offset of the buffer's top edge from the layout origin.
    pub top: i32,
    pub width: usize,
    pub height: usize,
    /// Coverage values: 0.0 = untouched, 1.0 = fully covered.
    pub data: Vec<f32>,
}

/// Tight bounding box of the inked pixels of a mask, relative to the layout
/// origin. `right` and `bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InkBounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl InkBounds {
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Horizontal center of the ink, relative to the layout origin.
    pub fn center_x(&self) -> f32 {
        self.left as f32 + self.width() as f32 / 2.0
    }

    /// Vertical center of the ink, relative to the layout origin.
    pub fn center_y(&self) -> f32 {
        self.top as f32 + self.height() as f32 / 2.0
    }
}

impl TextMask {
    pub fn empty() -> Self {
        Self {
            left: 0,
            top: 0,
            width: 0,
            height: 0,
            data: Vec::new(),
        }
    }

    pub fn new(left: i32, top: i32, width: usize, height: usize) -> Self {
        Self {
            left,
            top,
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    /// Accumulate coverage at a buffer position, clamped to 1.0.
    /// Positions outside the buffer are ignored.
    #[inline]
    pub fn accumulate(&mut self, x: i32, y: i32, coverage: f32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.data[idx] = (self.data[idx] + coverage).min(1.0);
    }

    /// Scan for the tight bounding box of non-zero coverage.
    ///
    /// Returns `None` when nothing is inked (empty or whitespace-only text).
    pub fn ink_bounds(&self) -> Option<InkBounds> {
        let mut min_x = self.width;
        let mut max_x = 0usize;
        let mut min_y = self.height;
        let mut max_y = 0usize;

        for y in 0..self.height {
            let row = &self.data[y * self.width..(y + 1) * self.width];
            let Some(first) = row.iter().position(|&c| c > 0.0) else {
                continue;
            };
            let last = row.iter().rposition(|&c| c > 0.0).unwrap_or(first);
            min_x = min_x.min(first);
            max_x = max_x.max(last);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }

        if min_y > max_y {
            return None;
        }

        Some(InkBounds {
            left: self.left + min_x as i32,
            top: self.top + min_y as i32,
            right: self.left + max_x as i32 + 1,
            bottom: self.top + max_y as i32 + 1,
        })
    }

    /// Grow the mask by a disc of the given radius (outline stroke).
    ///
    /// Each output pixel takes the maximum coverage found within `radius`
    /// pixels of it, so a stroke thickens every edge uniformly.
    pub fn dilate(&self, radius: u32) -> TextMask {
        if radius == 0 || self.is_empty() {
            return self.clone();
        }

        let r = radius as i32;
        let offsets: Vec<(i32, i32)> = (-r..=r)
            .flat_map(|dy| (-r..=r).map(move |dx| (dx, dy)))
            .filter(|(dx, dy)| dx * dx + dy * dy <= r * r)
            .collect();

        let mut out = TextMask::new(
            self.left - r,
            self.top - r,
            self.width + 2 * radius as usize,
            self.height + 2 * radius as usize,
        );

        for sy in 0..self.height {
            for sx in 0..self.width {
                let coverage = self.get(sx, sy);
                if coverage <= 0.0 {
                    continue;
                }
                for &(dx, dy) in &offsets {
                    let ox = sx as i32 + r + dx;
                    let oy = sy as i32 + r + dy;
                    let idx = oy as usize * out.width + ox as usize;
                    if out.data[idx] < coverage {
                        out.data[idx] = coverage;
                    }
                }
            }
        }

        out
    }

    /// Composite the mask onto a canvas in a solid colour with source-over
    /// blending. `origin` is the layout origin in canvas pixels; pixels that
    /// fall outside the canvas are clipped.
    pub fn composite(&self, canvas: &mut RgbaImage, origin: (i32, i32), color: Rgba<u8>) {
        let (canvas_w, canvas_h) = canvas.dimensions();
        let base_x = origin.0 as i64 + self.left as i64;
        let base_y = origin.1 as i64 + self.top as i64;

        for y in 0..self.height {
            let cy = base_y + y as i64;
            if cy < 0 || cy >= canvas_h as i64 {
                continue;
            }
            for x in 0..self.width {
                let coverage = self.get(x, y);
                if coverage <= 0.0 {
                    continue;
                }
                let cx = base_x + x as i64;
                if cx < 0 || cx >= canvas_w as i64 {
                    continue;
                }
                blend_pixel(canvas.get_pixel_mut(cx as u32, cy as u32), color, coverage);
            }
        }
    }
}

/// Source-over blend of a solid colour at partial coverage.
pub fn blend_pixel(dst: &mut Rgba<u8>, color: Rgba<u8>, coverage: f32) {
    let src_a = coverage.clamp(0.0, 1.0) * color[3] as f32 / 255.0;
    if src_a <= 0.0 {
        return;
    }
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        return;
    }

    for i in 0..3 {
        let c = (color[i] as f32 * src_a + dst[i] as f32 * dst_a * (1.0 - src_a)) / out_a;
        dst[i] = c.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
}
