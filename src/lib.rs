//! # Affiche - Poster Compositor
//!
//! Affiche overlays text and images onto a background to produce a poster.
//! It provides:
//!
//! - **Font resolution**: TrueType lookup with bold-variant search and a
//!   built-in bitmap fallback
//! - **Bold text**: genuine bold, stroke emulation, or offset redraw
//! - **Asset layout**: automatic arrangement of one, two or many images
//! - **Composition**: title, subtitle, body, logo and assets on a background,
//!   placed by an optional position map
//!
//! ## Quick Start
//!
//! ```no_run
//! use affiche::poster::{PositionFile, PosterComposer, PosterConfig, PosterRequest};
//! use std::path::Path;
//!
//! let layout = PositionFile::load(Path::new("positions.json"));
//! let composer = PosterComposer::new(PosterConfig::from_position_file(layout));
//!
//! let request = PosterRequest::new()
//!     .background(image::open("background.png")?)
//!     .logo(image::open("logo.png")?)
//!     .title("Summer Fair")
//!     .subtitle("June 21")
//!     .body("Music, food and games on the green from noon until late.");
//!
//! let poster = composer.compose(&request)?;
//! poster.save("generated_poster.jpg")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`poster`] | Composer, request, position map |
//! | [`layout`] | Asset arrangement and word wrapping |
//! | [`render`] | Text masks and bold drawing |
//! | [`font`] | Font resolution and rasterization |
//! | [`files`] | Image decoding and poster output |
//! | [`error`] | Error types |

pub mod error;
pub mod files;
pub mod font;
pub mod geometry;
pub mod layout;
pub mod poster;
pub mod render;

// Re-exports for convenience
pub use error::PosterError;
pub use geometry::Point;
pub use poster::{PosterComposer, PosterConfig, PosterRequest};
