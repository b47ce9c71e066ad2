//! Inputs for a single poster generation.

use image::DynamicImage;

/// Default title size in pixels.
pub const DEFAULT_TITLE_SIZE: u32 = 160;
/// Default subtitle size in pixels.
pub const DEFAULT_SUBTITLE_SIZE: u32 = 100;
/// Default body size in pixels.
pub const DEFAULT_BODY_SIZE: u32 = 80;

/// Font sizes for the three text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontSizes {
    pub title: u32,
    pub subtitle: u32,
    pub body: u32,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE_SIZE,
            subtitle: DEFAULT_SUBTITLE_SIZE,
            body: DEFAULT_BODY_SIZE,
        }
    }
}

/// Everything the caller supplies for one poster.
///
/// Only the background is required; empty strings, a missing logo and an
/// empty asset list are simply not drawn.
///
/// ```
/// use affiche::poster::PosterRequest;
/// use image::DynamicImage;
///
/// let request = PosterRequest::new()
///     .background(DynamicImage::new_rgb8(800, 600))
///     .title("Open Day")
///     .subtitle("Saturday 10:00")
///     .body("Tours, talks and coffee for everyone.");
/// assert!(request.has_background());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PosterRequest {
    pub background: Option<DynamicImage>,
    pub logo: Option<DynamicImage>,
    pub title: String,
    pub subtitle: String,
    pub body: String,
    /// Text for the footer slot. The CLI never sets it.
    pub footer: Option<String>,
    /// Additional images arranged around the canvas center.
    pub assets: Vec<DynamicImage>,
    pub sizes: FontSizes,
}

impl PosterRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn background(mut self, image: DynamicImage) -> Self {
        self.background = Some(image);
        self
    }

    pub fn logo(mut self, image: DynamicImage) -> Self {
        self.logo = Some(image);
        self
    }

    pub fn title(mut self, text: impl Into<String>) -> Self {
        self.title = text.into();
        self
    }

    pub fn subtitle(mut self, text: impl Into<String>) -> Self {
        self.subtitle = text.into();
        self
    }

    pub fn body(mut self, text: impl Into<String>) -> Self {
        self.body = text.into();
        self
    }

    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(text.into());
        self
    }

    pub fn asset(mut self, image: DynamicImage) -> Self {
        self.assets.push(image);
        self
    }

    pub fn assets(mut self, images: impl IntoIterator<Item = DynamicImage>) -> Self {
        self.assets.extend(images);
        self
    }

    pub fn sizes(mut self, sizes: FontSizes) -> Self {
        self.sizes = sizes;
        self
    }

    pub fn has_background(&self) -> bool {
        self.background.is_some()
    }
}
