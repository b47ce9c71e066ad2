//! # Error Types
//!
//! This module defines the error type surfaced by poster generation.
//!
//! Only a missing background is fatal for a compose call. Fonts, assets and
//! the position map degrade to defaults instead of producing errors; the
//! remaining variants are used by the file helpers in [`crate::files`].

use thiserror::Error;

/// Main error type for affiche operations
#[derive(Debug, Error)]
pub enum PosterError {
    /// No background image was supplied to the composer
    #[error("No background image provided.")]
    NoBackground,

    /// Image decoding or encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
