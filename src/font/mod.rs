//! # Font Resolution
//!
//! Turns a font file name and size into a renderable [`FontHandle`], and
//! reports whether a genuine bold face was found.
//!
//! Resolution walks an explicit, ordered list of candidate paths. Each probe
//! returns a `Result`; the first success wins. Probing a path tries the file
//! directly, then looks its file name up in the font search directories.
//!
//! | Request | Candidates | `bold_achieved` |
//! |---------|------------|-----------------|
//! | regular | base path, bare file name | `true` if any loaded |
//! | bold | `<stem>bd`, `<stem>-bd`, `<stem>b`, `<stem>bold`, `arialbd`, `DejaVuSans-Bold` | `true` if any loaded |
//! | bold, none found | regular candidates | `false` |
//!
//! When nothing loads, the built-in Spleen bitmap face is returned, so
//! resolution never fails.

pub mod builtin;
pub mod locate;
pub mod truetype;

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::debug;

pub use builtin::BuiltinFace;
pub use locate::{FontIndex, default_search_dirs};
pub use truetype::TrueTypeFace;

use crate::render::TextMask;

/// Bold variant file stems tried after the name-derived patterns.
pub const FALLBACK_BOLD_STEMS: [&str; 2] = ["arialbd", "DejaVuSans-Bold"];

/// Suffixes appended to the base stem when looking for a bold variant.
pub const BOLD_SUFFIXES: [&str; 4] = ["bd", "-bd", "b", "bold"];

/// Why a single font candidate could not be used.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("font not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read font {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("not a usable font file: {0}")]
    Invalid(PathBuf),
}

/// A renderable font bound to a size.
#[derive(Debug, Clone)]
pub enum FontHandle {
    /// Outline font loaded from a file.
    TrueType(TrueTypeFace),
    /// The built-in bitmap face; used when no font file resolves.
    Builtin(BuiltinFace),
}

impl FontHandle {
    /// The built-in fallback font at the given size.
    pub fn fallback(size: u32) -> Self {
        FontHandle::Builtin(BuiltinFace::new(size))
    }

    /// Nominal size the handle was resolved at.
    pub fn size(&self) -> u32 {
        match self {
            FontHandle::TrueType(face) => face.size(),
            FontHandle::Builtin(face) => face.size(),
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, FontHandle::Builtin(_))
    }

    pub fn line_height(&self) -> f32 {
        match self {
            FontHandle::TrueType(face) => face.line_height(),
            FontHandle::Builtin(face) => face.line_height(),
        }
    }

    /// Render one line of text to a coverage mask relative to the layout
    /// origin (top of the line box).
    pub fn rasterize(&self, text: &str) -> TextMask {
        match self {
            FontHandle::TrueType(face) => face.rasterize(text),
            FontHandle::Builtin(face) => face.rasterize(text),
        }
    }

    /// Whether the backend can draw an outline stroke around glyphs.
    pub fn supports_stroke(&self) -> bool {
        matches!(self, FontHandle::TrueType(_))
    }
}

/// Result of font resolution.
#[derive(Debug, Clone)]
pub struct ResolvedFont {
    pub font: FontHandle,
    /// True when the requested face was genuinely found: a bold variant when
    /// bold was requested, otherwise any real font file.
    pub bold_achieved: bool,
}

/// Resolves font files against a set of search directories.
#[derive(Debug)]
pub struct FontResolver {
    search_dirs: Vec<PathBuf>,
    index: OnceLock<FontIndex>,
}

impl Default for FontResolver {
    fn default() -> Self {
        Self::system()
    }
}

impl FontResolver {
    /// Resolver that searches the given directories (in order) for fonts
    /// that cannot be opened by path.
    pub fn new(search_dirs: Vec<PathBuf>) -> Self {
        Self {
            search_dirs,
            index: OnceLock::new(),
        }
    }

    /// Resolver that searches the platform font directories.
    pub fn system() -> Self {
        Self::new(default_search_dirs())
    }

    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    fn index(&self) -> &FontIndex {
        self.index.get_or_init(|| FontIndex::build(&self.search_dirs))
    }

    /// Resolve a font for `base` at `size`, optionally looking for a bold
    /// variant. Never fails.
    pub fn resolve(&self, base: &Path, size: u32, want_bold: bool) -> ResolvedFont {
        let regular = self.first_loadable(&base_candidates(base), size);

        if want_bold {
            if let Some(font) = self.first_loadable(&bold_candidates(base), size) {
                return ResolvedFont {
                    font,
                    bold_achieved: true,
                };
            }
            debug!(base = %base.display(), "no bold variant found; bold will be emulated");
        }

        match regular {
            Some(font) => ResolvedFont {
                font,
                bold_achieved: !want_bold,
            },
            None => {
                debug!(base = %base.display(), size, "no font file resolved; using built-in font");
                ResolvedFont {
                    font: FontHandle::fallback(size),
                    bold_achieved: false,
                }
            }
        }
    }

    fn first_loadable(&self, candidates: &[PathBuf], size: u32) -> Option<FontHandle> {
        candidates.iter().find_map(|path| match self.probe(path, size) {
            Ok(face) => {
                debug!(path = %face.source().display(), size, "loaded font");
                Some(FontHandle::TrueType(face))
            }
            Err(e) => {
                debug!(error = %e, "font candidate rejected");
                None
            }
        })
    }

    /// Load a font from a path, falling back to a lookup of its file name in
    /// the search directories.
    pub fn probe(&self, path: &Path, size: u32) -> Result<TrueTypeFace, FontError> {
        let direct = TrueTypeFace::load(path, size);
        if direct.is_ok() {
            return direct;
        }

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return direct;
        };
        match self.index().find(name) {
            Some(found) => TrueTypeFace::load(found, size),
            None => Err(FontError::NotFound(path.to_path_buf())),
        }
    }
}

/// Split a file name into stem and extension (with its leading dot).
fn split_name(base: &Path) -> (String, String) {
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = base
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    (stem, ext)
}

/// Exact path first, then the bare file name.
pub fn base_candidates(base: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![base.to_path_buf()];
    if let Some(name) = base.file_name() {
        let bare = PathBuf::from(name);
        if bare != base {
            candidates.push(bare);
        }
    }
    candidates
}

/// Bold variant file names, in probe order, next to the base file.
pub fn bold_candidates(base: &Path) -> Vec<PathBuf> {
    let (stem, ext) = split_name(base);
    let dir = base.parent().filter(|p| !p.as_os_str().is_empty());

    BOLD_SUFFIXES
        .iter()
        .map(|suffix| format!("{stem}{suffix}{ext}"))
        .chain(FALLBACK_BOLD_STEMS.iter().map(|name| format!("{name}{ext}")))
        .map(|name| match dir {
            Some(dir) => dir.join(name),
            None => PathBuf::from(name),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fixtures() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/fonts")
    }

    #[test]
    fn test_bold_candidates_order() {
        let names: Vec<_> = bold_candidates(Path::new("arial.ttf"))
            .into_iter()
            .map(|p| p.display().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "arialbd.ttf",
                "arial-bd.ttf",
                "arialb.ttf",
                "arialbold.ttf",
                "arialbd.ttf",
                "DejaVuSans-Bold.ttf",
            ]
        );
    }

    #[test]
    fn test_bold_candidates_keep_directory() {
        let candidates = bold_candidates(Path::new("/opt/fonts/Plex.otf"));
        assert_eq!(candidates[0], PathBuf::from("/opt/fonts/Plexbd.otf"));
        assert_eq!(candidates[5], PathBuf::from("/opt/fonts/DejaVuSans-Bold.otf"));
    }

    #[test]
    fn test_base_candidates() {
        assert_eq!(
            base_candidates(Path::new("/opt/fonts/arial.ttf")),
            vec![PathBuf::from("/opt/fonts/arial.ttf"), PathBuf::from("arial.ttf")]
        );
        assert_eq!(base_candidates(Path::new("arial.ttf")), vec![PathBuf::from("arial.ttf")]);
    }

    #[test]
    fn test_missing_font_falls_back_to_builtin() {
        let resolver = FontResolver::new(Vec::new());
        let resolved = resolver.resolve(Path::new("no-such-font.ttf"), 40, false);
        assert!(resolved.font.is_builtin());
        assert!(!resolved.bold_achieved);

        let resolved = resolver.resolve(Path::new("no-such-font.ttf"), 40, true);
        assert!(resolved.font.is_builtin());
        assert!(!resolved.bold_achieved);
        assert_eq!(resolved.font.size(), 40);
    }

    #[test]
    fn test_regular_request_reports_real_font() {
        let resolver = FontResolver::new(Vec::new());
        let resolved = resolver.resolve(&fixtures().join("DejaVuSans.ttf"), 40, false);
        assert!(!resolved.font.is_builtin());
        assert!(resolved.bold_achieved);
    }

    #[test]
    fn test_bold_found_next_to_base() {
        let resolver = FontResolver::new(Vec::new());
        let resolved = resolver.resolve(&fixtures().join("DejaVuSans.ttf"), 40, true);
        assert!(resolved.bold_achieved);
        match resolved.font {
            FontHandle::TrueType(face) => {
                assert!(face.source().ends_with("DejaVuSans-Bold.ttf"))
            }
            FontHandle::Builtin(_) => panic!("expected a TrueType face"),
        }
    }

    #[test]
    fn test_bare_name_found_in_search_dirs() {
        let resolver = FontResolver::new(vec![fixtures()]);
        let resolved = resolver.resolve(Path::new("/nowhere/DejaVuSans.ttf"), 30, false);
        assert!(!resolved.font.is_builtin());

        // The hardcoded bold fallback is found through the search directories
        let resolved = resolver.resolve(Path::new("arial.ttf"), 30, true);
        assert!(resolved.bold_achieved);
        assert!(!resolved.font.is_builtin());
    }

    #[test]
    fn test_probe_reports_not_found() {
        let resolver = FontResolver::new(Vec::new());
        let err = resolver.probe(Path::new("missing.ttf"), 12).unwrap_err();
        assert!(matches!(err, FontError::NotFound(_)));
    }

    #[test]
    fn test_builtin_cannot_stroke() {
        assert!(!FontHandle::fallback(24).supports_stroke());
    }
}
