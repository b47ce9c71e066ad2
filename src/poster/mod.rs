//! # Poster Composition
//!
//! Composites text, a logo and image assets onto a background.
//!
//! ## Order of operations
//!
//! ```text
//! background ─► title ─► subtitle ─► body ─► footer ─► logo ─► assets ─► flatten
//! ```
//!
//! ## Placement
//!
//! | Element | Slot | With a position | Default |
//! |---------|------|-----------------|---------|
//! | Title | `"1"` | ink centered on the point | centered horizontally, origin y = 150 |
//! | Subtitle | `"2"` | ink centered on the point | centered horizontally, origin y = 250 |
//! | Body | `"3"` | first line's origin at the point | origin (100, 400) |
//! | Footer | `"4"` | ink centered on the point | not drawn |
//! | Logo | `"logo"` | box centered on the point | 50 px from the bottom-right corner |
//!
//! Text origins are the top of the line box. Body lines advance by
//! `1.2 × body size` and wrap at 40 columns.
//!
//! ## Example
//!
//! ```
//! use affiche::poster::{PosterComposer, PosterConfig, PosterRequest};
//! use image::DynamicImage;
//!
//! let composer = PosterComposer::new(PosterConfig {
//!     font_dirs: Some(Vec::new()),
//!     ..Default::default()
//! });
//! let request = PosterRequest::new()
//!     .background(DynamicImage::new_rgb8(640, 480))
//!     .title("Hello");
//! let poster = composer.compose(&request)?;
//! assert_eq!(poster.dimensions(), (640, 480));
//! # Ok::<(), affiche::PosterError>(())
//! ```

pub mod positions;
pub mod request;

use image::{DynamicImage, Rgba, RgbImage, RgbaImage, imageops};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub use positions::{LogoSize, PositionFile, PositionMap, Slot};
pub use request::{FontSizes, PosterRequest};

use crate::error::PosterError;
use crate::font::{FontResolver, ResolvedFont, default_search_dirs};
use crate::geometry::Point;
use crate::layout::{self, AssetBounds};
use crate::render::{self, DEFAULT_STROKE_WIDTH, draw_bold};

/// Title fill colour (accent blue).
pub const TITLE_COLOR: Rgba<u8> = Rgba([0, 80, 180, 255]);
/// Subtitle fill colour (accent orange).
pub const SUBTITLE_COLOR: Rgba<u8> = Rgba([220, 100, 0, 255]);
/// Body fill colour.
pub const BODY_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);
/// Footer fill colour.
pub const FOOTER_COLOR: Rgba<u8> = Rgba([80, 80, 80, 255]);

/// Default title origin y.
pub const TITLE_TOP: f32 = 150.0;
/// Default subtitle origin y.
pub const SUBTITLE_TOP: f32 = 250.0;
/// Default origin of the first body line.
pub const BODY_ORIGIN: Point = Point::new(100.0, 400.0);
/// Body wrap width in characters.
pub const BODY_WRAP_COLUMNS: usize = 40;
/// Distance of the default logo box from the bottom and right edges.
pub const LOGO_MARGIN: i64 = 50;

/// Default title font file.
pub const DEFAULT_TITLE_FONT: &str = "arialbd.ttf";
/// Default font file for subtitle, body and footer.
pub const DEFAULT_TEXT_FONT: &str = "arial.ttf";

/// Composer configuration. Every field is optional; defaults are applied
/// where the value is used.
#[derive(Debug, Clone, Default)]
pub struct PosterConfig {
    /// Slot coordinates. `None` places everything by the default rules.
    pub positions: Option<PositionMap>,
    /// Logo box size. Default: 250x250.
    pub logo_size: Option<LogoSize>,
    /// Title font file. Default: [`DEFAULT_TITLE_FONT`].
    pub title_font: Option<PathBuf>,
    /// Subtitle/body/footer font file. Default: [`DEFAULT_TEXT_FONT`].
    pub text_font: Option<PathBuf>,
    /// Directories searched for fonts by file name. Default: the platform
    /// font directories.
    pub font_dirs: Option<Vec<PathBuf>>,
}

impl PosterConfig {
    /// Configuration taking positions and logo size from a position file.
    pub fn from_position_file(file: PositionFile) -> Self {
        Self {
            positions: file.positions,
            logo_size: Some(file.logo_size),
            ..Default::default()
        }
    }
}

/// Fonts resolved for one compose call.
struct PosterFonts {
    title: ResolvedFont,
    subtitle: ResolvedFont,
    body: ResolvedFont,
}

/// Composes posters. Holds only read-only configuration, so one composer
/// can serve any number of sequential calls.
#[derive(Debug)]
pub struct PosterComposer {
    config: PosterConfig,
    fonts: FontResolver,
}

impl Default for PosterComposer {
    fn default() -> Self {
        Self::new(PosterConfig::default())
    }
}

impl PosterComposer {
    pub fn new(config: PosterConfig) -> Self {
        let dirs = config.font_dirs.clone().unwrap_or_else(default_search_dirs);
        Self {
            config,
            fonts: FontResolver::new(dirs),
        }
    }

    pub fn config(&self) -> &PosterConfig {
        &self.config
    }

    fn slot(&self, slot: Slot) -> Option<Point> {
        self.config.positions.as_ref().and_then(|p| p.get(slot))
    }

    fn logo_size(&self) -> LogoSize {
        self.config.logo_size.unwrap_or_default()
    }

    fn title_font_path(&self) -> &Path {
        self.config
            .title_font
            .as_deref()
            .unwrap_or(Path::new(DEFAULT_TITLE_FONT))
    }

    fn text_font_path(&self) -> &Path {
        self.config
            .text_font
            .as_deref()
            .unwrap_or(Path::new(DEFAULT_TEXT_FONT))
    }

    fn resolve_fonts(&self, sizes: &FontSizes) -> PosterFonts {
        // The title font is requested without bold and always drawn as if
        // bold were achieved, so it never gets stroke emulation.
        let title = self.fonts.resolve(self.title_font_path(), sizes.title, false);
        PosterFonts {
            title: ResolvedFont {
                bold_achieved: true,
                ..title
            },
            subtitle: self.fonts.resolve(self.text_font_path(), sizes.subtitle, true),
            body: self.fonts.resolve(self.text_font_path(), sizes.body, true),
        }
    }

    /// Generate a poster.
    ///
    /// Fails only with [`PosterError::NoBackground`]; every other missing
    /// input is skipped.
    pub fn compose(&self, request: &PosterRequest) -> Result<RgbImage, PosterError> {
        let background = request.background.as_ref().ok_or(PosterError::NoBackground)?;
        let mut canvas = background.to_rgba8();
        let fonts = self.resolve_fonts(&request.sizes);

        self.draw_headline(&mut canvas, Slot::Title, &request.title, &fonts.title, TITLE_COLOR, TITLE_TOP);
        self.draw_headline(&mut canvas, Slot::Subtitle, &request.subtitle, &fonts.subtitle, SUBTITLE_COLOR, SUBTITLE_TOP);
        self.draw_body(&mut canvas, &request.body, &fonts.body);
        if let Some(footer) = request.footer.as_deref() {
            self.draw_footer(&mut canvas, footer, &fonts.subtitle);
        }
        if let Some(logo) = &request.logo {
            self.paste_logo(&mut canvas, logo);
        }
        layout::place_assets(&mut canvas, &request.assets, AssetBounds::default());

        info!(
            width = canvas.width(),
            height = canvas.height(),
            logo = request.logo.is_some(),
            assets = request.assets.len(),
            positioned = self.config.positions.is_some(),
            "poster composed"
        );

        Ok(DynamicImage::ImageRgba8(canvas).to_rgb8())
    }

    /// Title or subtitle: centered on the slot point, else centered
    /// horizontally with a fixed origin y.
    fn draw_headline(
        &self,
        canvas: &mut RgbaImage,
        slot: Slot,
        text: &str,
        font: &ResolvedFont,
        color: Rgba<u8>,
        default_top: f32,
    ) {
        if text.is_empty() {
            return;
        }
        let Some(ink) = render::measure(text, &font.font) else {
            return;
        };

        let origin = match self.slot(slot) {
            Some(center) => Point::new(center.x - ink.center_x(), center.y - ink.center_y()),
            None => Point::new(
                (canvas.width() as f32 - ink.width() as f32) / 2.0 - ink.left as f32,
                default_top,
            ),
        };
        debug!(slot = slot.key(), x = origin.x, y = origin.y, bold = font.bold_achieved, "drawing text");
        draw_bold(canvas, origin, text, &font.font, color, font.bold_achieved, DEFAULT_STROKE_WIDTH);
    }

    /// Body: wrapped lines drawn left-aligned downward from the slot point
    /// (top-left anchor) or the default origin.
    fn draw_body(&self, canvas: &mut RgbaImage, text: &str, font: &ResolvedFont) {
        if text.is_empty() {
            return;
        }
        let lines = layout::wrap(text, BODY_WRAP_COLUMNS);
        let start = self.slot(Slot::Body).map(Point::trunc).unwrap_or(BODY_ORIGIN);
        let advance = line_advance(font.font.size());
        debug!(lines = lines.len(), x = start.x, y = start.y, advance, "drawing body");

        for (i, line) in lines.iter().enumerate() {
            let origin = Point::new(start.x, start.y + (i as u32 * advance) as f32);
            draw_bold(canvas, origin, line, &font.font, BODY_COLOR, font.bold_achieved, DEFAULT_STROKE_WIDTH);
        }
    }

    /// Footer: plain text centered on slot `"4"`; not drawn without it.
    fn draw_footer(&self, canvas: &mut RgbaImage, text: &str, font: &ResolvedFont) {
        let Some(center) = self.slot(Slot::Footer) else {
            debug!("footer text supplied but no footer position; skipping");
            return;
        };
        if text.is_empty() {
            return;
        }
        let Some(ink) = render::measure(text, &font.font) else {
            return;
        };
        let origin = Point::new(center.x - ink.center_x(), center.y - ink.center_y());
        render::draw_text(canvas, origin, text, &font.font, FOOTER_COLOR);
    }

    /// Fit the logo into the fixed box, then paste the box centered on the
    /// logo slot or near the bottom-right corner.
    fn paste_logo(&self, canvas: &mut RgbaImage, logo: &DynamicImage) {
        let size = self.logo_size();
        let Some(boxed) = logo_box(logo, size) else {
            warn!(
                width = logo.width(),
                height = logo.height(),
                box_width = size.width,
                box_height = size.height,
                "logo could not be fitted into its box; skipping"
            );
            return;
        };

        let (x, y) = match self.slot(Slot::Logo) {
            Some(center) => (
                (center.x - size.width as f32 / 2.0).trunc() as i64,
                (center.y - size.height as f32 / 2.0).trunc() as i64,
            ),
            None => (
                canvas.width() as i64 - LOGO_MARGIN - size.width as i64,
                canvas.height() as i64 - LOGO_MARGIN - size.height as i64,
            ),
        };
        debug!(x, y, width = size.width, height = size.height, "pasting logo");
        imageops::overlay(canvas, &boxed, x, y);
    }
}

/// Body line advance for a font size: `floor(size × 1.2)`.
pub fn line_advance(size: u32) -> u32 {
    size * 6 / 5
}

/// Transparent box of `size` with the logo shrunk to fit and centered in it.
///
/// Returns `None` when the box is empty or larger than
/// [`positions::MAX_LOGO_EDGE`] on either side.
pub fn logo_box(logo: &DynamicImage, size: LogoSize) -> Option<RgbaImage> {
    if !size.is_usable() {
        return None;
    }
    let thumb = layout::thumbnail(logo, (size.width, size.height))?;
    let mut boxed = RgbaImage::new(size.width, size.height);
    let x = (size.width - thumb.width()) / 2;
    let y = (size.height - thumb.height()) / 2;
    imageops::overlay(&mut boxed, &thumb, x as i64, y as i64);
    Some(boxed)
}
