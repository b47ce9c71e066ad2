//! # Asset Layout
//!
//! Arranges a variable number of images around the canvas center.
//!
//! ## Rules
//!
//! | Images | Placement |
//! |--------|-----------|
//! | 0 | nothing |
//! | 1 | centered on the canvas |
//! | 2 | either side of the center, `5%` of the width apart, sharing one top edge |
//! | N > 2 | one row along the horizontal center line, spread over `80%` of the width |
//!
//! Every image is first shrunk (never enlarged) to fit inside a fraction of
//! the canvas, preserving its aspect ratio. Integer divisions round toward
//! negative infinity, so rows wider than the canvas stay symmetric.

pub mod wrap;

use image::{DynamicImage, RgbaImage, imageops};
use tracing::debug;

pub use wrap::wrap;

/// Gap between the two images of a pair, as a fraction of canvas width.
pub const PAIR_SPACING_RATIO: f64 = 0.05;

/// Width a row of three or more images spreads across, as a fraction of
/// canvas width.
pub const ROW_WIDTH_RATIO: f64 = 0.8;

/// Smallest gap between images in a row.
pub const MIN_ROW_GAP: i64 = 10;

/// Per-image size limits relative to the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssetBounds {
    pub max_width_ratio: f64,
    pub max_height_ratio: f64,
}

impl Default for AssetBounds {
    fn default() -> Self {
        Self {
            max_width_ratio: 0.4,
            max_height_ratio: 0.4,
        }
    }
}

impl AssetBounds {
    /// Maximum image size in pixels on a canvas of the given size.
    pub fn max_size(&self, canvas_size: (u32, u32)) -> (u32, u32) {
        (
            (canvas_size.0 as f64 * self.max_width_ratio).floor() as u32,
            (canvas_size.1 as f64 * self.max_height_ratio).floor() as u32,
        )
    }
}

/// A resized image and the canvas position of its top-left corner.
#[derive(Debug, Clone)]
pub struct Placement {
    pub image: RgbaImage,
    pub x: i64,
    pub y: i64,
}

impl Placement {
    pub fn width(&self) -> i64 {
        self.image.width() as i64
    }

    pub fn height(&self) -> i64 {
        self.image.height() as i64
    }

    pub fn right(&self) -> i64 {
        self.x + self.width()
    }
}

/// Size of a shrink-only, aspect-preserving thumbnail.
///
/// Returns the original size when it already fits, and `None` when the
/// image or the bounds are degenerate. The short side is rounded to whichever
/// neighbouring integer best preserves the aspect ratio, and is at least 1.
pub fn thumbnail_size(size: (u32, u32), bounds: (u32, u32)) -> Option<(u32, u32)> {
    let (w, h) = size;
    let (max_w, max_h) = bounds;
    if w == 0 || h == 0 {
        return None;
    }
    if max_w >= w && max_h >= h {
        return Some((w, h));
    }
    if max_w == 0 || max_h == 0 {
        return None;
    }

    let aspect = w as f64 / h as f64;
    if max_w as f64 / max_h as f64 >= aspect {
        let x = round_aspect(max_h as f64 * aspect, |n| (aspect - n / max_h as f64).abs());
        Some((x, max_h))
    } else {
        let y = round_aspect(max_w as f64 / aspect, |n| {
            if n == 0.0 { 0.0 } else { (aspect - max_w as f64 / n).abs() }
        });
        Some((max_w, y))
    }
}

/// Pick floor or ceil of `value`, whichever scores lower (floor on ties).
fn round_aspect(value: f64, score: impl Fn(f64) -> f64) -> u32 {
    let lo = value.floor();
    let hi = value.ceil();
    let best = if score(hi) < score(lo) { hi } else { lo };
    (best as u32).max(1)
}

/// Shrink a working copy of `image` to fit within `bounds`.
///
/// The source image is never modified. Returns `None` for degenerate input.
pub fn thumbnail(image: &DynamicImage, bounds: (u32, u32)) -> Option<RgbaImage> {
    let (w, h) = thumbnail_size((image.width(), image.height()), bounds)?;
    let rgba = image.to_rgba8();
    if (w, h) == rgba.dimensions() {
        return Some(rgba);
    }
    Some(imageops::resize(&rgba, w, h, imageops::FilterType::Lanczos3))
}

/// Compute placements for `images` on a canvas of `canvas_size`.
///
/// Images that cannot be resized are skipped; the rest keep input order.
pub fn layout_assets(canvas_size: (u32, u32), images: &[DynamicImage], bounds: AssetBounds) -> Vec<Placement> {
    let max = bounds.max_size(canvas_size);
    let resized: Vec<RgbaImage> = images
        .iter()
        .enumerate()
        .filter_map(|(i, img)| {
            let thumb = thumbnail(img, max);
            if thumb.is_none() {
                debug!(index = i, width = img.width(), height = img.height(), "skipping unusable asset");
            }
            thumb
        })
        .collect();

    let (canvas_w, canvas_h) = (canvas_size.0 as i64, canvas_size.1 as i64);
    let center_x = canvas_w / 2;
    let center_y = canvas_h / 2;

    match resized.len() {
        0 => Vec::new(),
        1 => resized
            .into_iter()
            .map(|image| Placement {
                x: center_x - image.width() as i64 / 2,
                y: center_y - image.height() as i64 / 2,
                image,
            })
            .collect(),
        2 => {
            let spacing = (canvas_w as f64 * PAIR_SPACING_RATIO).floor() as i64;
            let tallest = resized.iter().map(|im| im.height() as i64).max().unwrap_or(0);
            let y = center_y - tallest / 2;
            let mut pair = resized.into_iter();
            let (Some(left), Some(right)) = (pair.next(), pair.next()) else {
                return Vec::new();
            };
            vec![
                Placement {
                    x: center_x - spacing / 2 - left.width() as i64,
                    y,
                    image: left,
                },
                Placement {
                    x: center_x + spacing / 2,
                    y,
                    image: right,
                },
            ]
        }
        count => {
            let count = count as i64;
            let total_width: i64 = resized.iter().map(|im| im.width() as i64).sum();
            let available = (canvas_w as f64 * ROW_WIDTH_RATIO).floor() as i64;
            let gap = MIN_ROW_GAP.max((available - total_width).div_euclid(count - 1));
            let mut x = center_x - (total_width + gap * (count - 1)).div_euclid(2);

            resized
                .into_iter()
                .map(|image| {
                    let placement = Placement {
                        x,
                        y: center_y - image.height() as i64 / 2,
                        image,
                    };
                    x += placement.width() + gap;
                    placement
                })
                .collect()
        }
    }
}

/// Lay out `images` and composite them onto `canvas` with alpha blending.
pub fn place_assets(canvas: &mut RgbaImage, images: &[DynamicImage], bounds: AssetBounds) {
    if images.is_empty() {
        return;
    }
    let placements = layout_assets(canvas.dimensions(), images, bounds);
    debug!(requested = images.len(), placed = placements.len(), "placing assets");
    for p in &placements {
        imageops::overlay(canvas, &p.image, p.x, p.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use pretty_assertions::assert_eq;

    fn solid(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba([200, 10, 10, 255])))
    }

    #[test]
    fn test_thumbnail_size_fits_already() {
        assert_eq!(thumbnail_size((100, 50), (768, 432)), Some((100, 50)));
    }

    #[test]
    fn test_thumbnail_size_wide_image() {
        assert_eq!(thumbnail_size((2000, 1000), (768, 432)), Some((768, 384)));
    }

    #[test]
    fn test_thumbnail_size_tall_image() {
        assert_eq!(thumbnail_size((1000, 2000), (768, 432)), Some((216, 432)));
    }

    #[test]
    fn test_thumbnail_size_rounds_to_best_aspect() {
        // 333 * (1000/999) = 333.33 -> 333 keeps the ratio best
        assert_eq!(thumbnail_size((1000, 999), (400, 333)), Some((333, 333)));
        // Extreme ratios never collapse to zero
        assert_eq!(thumbnail_size((10000, 1), (100, 100)), Some((100, 1)));
    }

    #[test]
    fn test_thumbnail_size_degenerate() {
        assert_eq!(thumbnail_size((0, 10), (100, 100)), None);
        assert_eq!(thumbnail_size((500, 500), (0, 100)), None);
    }

    #[test]
    fn test_thumbnail_never_enlarges() {
        let thumb = thumbnail(&solid(20, 10), (400, 400)).unwrap();
        assert_eq!(thumb.dimensions(), (20, 10));
    }

    #[test]
    fn test_no_images() {
        assert!(layout_assets((1920, 1080), &[], AssetBounds::default()).is_empty());
    }

    #[test]
    fn test_single_image_centered() {
        let placements = layout_assets((1920, 1080), &[solid(300, 201)], AssetBounds::default());
        assert_eq!(placements.len(), 1);
        let p = &placements[0];
        assert_eq!((p.x, p.y), (960 - 150, 540 - 100));
    }

    #[test]
    fn test_pair_spacing() {
        let placements = layout_assets((1000, 800), &[solid(100, 50), solid(80, 120)], AssetBounds::default());
        let (left, right) = (&placements[0], &placements[1]);
        assert_eq!(right.x - left.right(), 50);
        assert_eq!(left.right(), 475);
        assert_eq!(right.x, 525);
        // Both share the top edge derived from the taller image
        assert_eq!(left.y, 400 - 60);
        assert_eq!(right.y, 400 - 60);
    }

    #[test]
    fn test_row_of_three() {
        let images = [solid(100, 100), solid(100, 50), solid(100, 80)];
        let placements = layout_assets((1000, 600), &images, AssetBounds::default());
        // available 800, images 300 -> gap 250
        let xs: Vec<_> = placements.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![100, 450, 800]);
        let ys: Vec<_> = placements.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![250, 275, 260]);
    }

    #[test]
    fn test_row_gap_has_minimum() {
        let images = [solid(400, 100), solid(400, 100), solid(400, 100)];
        let placements = layout_assets((1000, 1000), &images, AssetBounds::default());
        assert_eq!(placements[1].x - placements[0].right(), MIN_ROW_GAP);
        // Row of 1220px is centered even though it overflows the canvas
        assert_eq!(placements[0].x, 500 - 610);
    }

    #[test]
    fn test_degenerate_images_skipped() {
        let images = [solid(100, 100), DynamicImage::new_rgba8(0, 0), solid(50, 50)];
        let placements = layout_assets((1000, 1000), &images, AssetBounds::default());
        assert_eq!(placements.len(), 2);
    }

    #[test]
    fn test_transparent_pixels_keep_background() {
        let mut canvas = RgbaImage::from_pixel(100, 100, Rgba([0, 0, 255, 255]));
        let mut asset = RgbaImage::from_pixel(20, 20, Rgba([0, 0, 0, 0]));
        asset.put_pixel(10, 10, Rgba([255, 0, 0, 255]));
        place_assets(&mut canvas, &[DynamicImage::ImageRgba8(asset)], AssetBounds::default());

        assert_eq!(*canvas.get_pixel(40, 40), Rgba([0, 0, 255, 255]));
        assert_eq!(*canvas.get_pixel(50, 50), Rgba([255, 0, 0, 255]));
    }
}
