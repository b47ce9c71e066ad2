//! Position map: slot coordinates and logo box size loaded from JSON.
//!
//! ```json
//! {
//!     "positions": {"1": [960, 200], "2": [960, 330], "logo": [1700, 900]},
//!     "logo_size": [300, 200]
//! }
//! ```
//!
//! Loading never fails. A missing or malformed file means "no position map"
//! and the default logo box; individual malformed entries are skipped.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

use crate::geometry::Point;

/// Default logo box edge length in pixels.
pub const DEFAULT_LOGO_EDGE: u32 = 250;

/// Largest accepted logo box edge in pixels.
pub const MAX_LOGO_EDGE: u32 = 8192;

/// A named placement key in the position map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// `"1"`: title, centered on the point.
    Title,
    /// `"2"`: subtitle, centered on the point.
    Subtitle,
    /// `"3"`: body, top-left anchor of the first line.
    Body,
    /// `"4"`: footer, centered on the point.
    Footer,
    /// `"logo"`: center of the logo box.
    Logo,
}

impl Slot {
    pub const ALL: [Slot; 5] = [Slot::Title, Slot::Subtitle, Slot::Body, Slot::Footer, Slot::Logo];

    /// Key used in the position file.
    pub fn key(self) -> &'static str {
        match self {
            Slot::Title => "1",
            Slot::Subtitle => "2",
            Slot::Body => "3",
            Slot::Footer => "4",
            Slot::Logo => "logo",
        }
    }

    pub fn from_key(key: &str) -> Option<Slot> {
        Slot::ALL.into_iter().find(|slot| slot.key() == key)
    }
}

/// Slot coordinates. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionMap {
    slots: HashMap<Slot, Point>,
}

impl PositionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, slot: Slot, point: Point) -> Self {
        self.slots.insert(slot, point);
        self
    }

    pub fn get(&self, slot: Slot) -> Option<Point> {
        self.slots.get(&slot).copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Build from the `positions` object of a position file. Unknown keys
    /// are ignored; entries that are not a pair of numbers are skipped.
    fn from_json(object: &serde_json::Map<String, Value>) -> Self {
        let mut slots = HashMap::new();
        for (key, value) in object {
            let Some(slot) = Slot::from_key(key) else {
                debug!(key = %key, "ignoring unknown position slot");
                continue;
            };
            match parse_point(value) {
                Some(point) => {
                    slots.insert(slot, point);
                }
                None => warn!(key = %key, value = %value, "position is not a pair of numbers; using default placement"),
            }
        }
        Self { slots }
    }
}

/// Fixed size of the box the logo is fitted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoSize {
    pub width: u32,
    pub height: u32,
}

impl Default for LogoSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_LOGO_EDGE,
            height: DEFAULT_LOGO_EDGE,
        }
    }
}

impl LogoSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether a box of this size can be allocated and pasted.
    pub fn is_usable(&self) -> bool {
        (1..=MAX_LOGO_EDGE).contains(&self.width) && (1..=MAX_LOGO_EDGE).contains(&self.height)
    }

    /// Parse `[w, h, ...]`. Values are truncated toward zero; anything
    /// that is not two numbers in `1..=MAX_LOGO_EDGE` is rejected.
    fn from_json(value: &Value) -> Option<Self> {
        let items = value.as_array()?;
        if items.len() < 2 {
            return None;
        }
        let w = items[0].as_f64()?.trunc();
        let h = items[1].as_f64()?.trunc();
        let limit = f64::from(MAX_LOGO_EDGE);
        if !(1.0..=limit).contains(&w) || !(1.0..=limit).contains(&h) {
            return None;
        }
        Some(Self::new(w as u32, h as u32))
    }
}

/// Contents of a position file after lenient parsing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionFile {
    /// `None` when the file is absent or malformed.
    pub positions: Option<PositionMap>,
    pub logo_size: LogoSize,
}

#[derive(Debug, Deserialize)]
struct RawPositionFile {
    #[serde(default)]
    positions: Option<Value>,
    #[serde(default)]
    logo_size: Option<Value>,
}

impl PositionFile {
    /// Load a position file. Missing, unreadable or malformed files yield
    /// the defaults.
    pub fn load(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no position file; using default placement");
                return Self::default();
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read position file; using default placement");
                return Self::default();
            }
        };

        match Self::parse(&text) {
            Ok(file) => file,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "malformed position file; using default placement");
                Self::default()
            }
        }
    }

    /// Parse position file JSON. Fails only when the document itself cannot
    /// be read as a position record; malformed fields fall back individually.
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let raw: RawPositionFile = serde_json::from_str(json)?;

        let positions = match raw.positions {
            None | Some(Value::Null) => Some(PositionMap::new()),
            Some(Value::Object(object)) => Some(PositionMap::from_json(&object)),
            Some(other) => {
                warn!(value = %other, "\"positions\" is not an object; using default placement");
                None
            }
        };

        let logo_size = match &raw.logo_size {
            None | Some(Value::Null) => LogoSize::default(),
            Some(value) => LogoSize::from_json(value).unwrap_or_else(|| {
                warn!(value = %value, "invalid \"logo_size\"; using {}x{}", DEFAULT_LOGO_EDGE, DEFAULT_LOGO_EDGE);
                LogoSize::default()
            }),
        };

        Ok(Self { positions, logo_size })
    }
}

fn parse_point(value: &Value) -> Option<Point> {
    match value.as_array()?.as_slice() {
        [x, y] => Some(Point::new(x.as_f64()? as f32, y.as_f64()? as f32)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_slot_keys_round_trip() {
        for slot in Slot::ALL {
            assert_eq!(Slot::from_key(slot.key()), Some(slot));
        }
        assert_eq!(Slot::from_key("5"), None);
    }

    #[test]
    fn test_parse_full_file() {
        let file = PositionFile::parse(
            r#"{"positions": {"1": [960, 200], "3": [120.5, 410], "logo": [1700, 900]}, "logo_size": [300, 200]}"#,
        )
        .unwrap();
        let positions = file.positions.unwrap();
        assert_eq!(positions.get(Slot::Title), Some(Point::new(960.0, 200.0)));
        assert_eq!(positions.get(Slot::Body), Some(Point::new(120.5, 410.0)));
        assert_eq!(positions.get(Slot::Logo), Some(Point::new(1700.0, 900.0)));
        assert_eq!(positions.get(Slot::Subtitle), None);
        assert_eq!(file.logo_size, LogoSize::new(300, 200));
    }

    #[test]
    fn test_missing_positions_key_is_empty_map() {
        let file = PositionFile::parse(r#"{"logo_size": [100, 100]}"#).unwrap();
        assert_eq!(file.positions, Some(PositionMap::new()));
        assert_eq!(file.logo_size, LogoSize::new(100, 100));
    }

    #[test]
    fn test_malformed_entries_skipped() {
        let file = PositionFile::parse(
            r#"{"positions": {"1": [1, 2, 3], "2": "top", "4": [5, 6], "banner": [0, 0]}}"#,
        )
        .unwrap();
        let positions = file.positions.unwrap();
        assert_eq!(positions.len(), 1);
        assert_eq!(positions.get(Slot::Footer), Some(Point::new(5.0, 6.0)));
    }

    #[test]
    fn test_bad_logo_size_uses_default() {
        for json in [
            r#"{"logo_size": [100]}"#,
            r#"{"logo_size": "big"}"#,
            r#"{"logo_size": [0, 50]}"#,
            r#"{"logo_size": [-10, 50]}"#,
            r#"{"logo_size": [4000000000, 4000000000]}"#,
            r#"{"logo_size": [250, 8193]}"#,
        ] {
            assert_eq!(PositionFile::parse(json).unwrap().logo_size, LogoSize::default(), "{}", json);
        }
        let truncated = PositionFile::parse(r#"{"logo_size": [120.9, 80.2, 7]}"#).unwrap();
        assert_eq!(truncated.logo_size, LogoSize::new(120, 80));
        let largest = PositionFile::parse(r#"{"logo_size": [8192, 8192]}"#).unwrap();
        assert_eq!(largest.logo_size, LogoSize::new(MAX_LOGO_EDGE, MAX_LOGO_EDGE));
    }

    #[test]
    fn test_logo_size_usable() {
        assert!(LogoSize::default().is_usable());
        assert!(!LogoSize::new(0, 10).is_usable());
        assert!(!LogoSize::new(u32::MAX, u32::MAX).is_usable());
    }

    #[test]
    fn test_non_object_positions() {
        let file = PositionFile::parse(r#"{"positions": [[1, 2]]}"#).unwrap();
        assert_eq!(file.positions, None);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(PositionFile::parse("{not json").is_err());
        assert!(PositionFile::parse("42").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let file = PositionFile::load(Path::new("/definitely/missing/positions.json"));
        assert_eq!(file, PositionFile::default());
        assert_eq!(file.logo_size, LogoSize::new(250, 250));
    }

    #[test]
    fn test_load_malformed_file() {
        let path = std::env::temp_dir().join(format!("affiche-positions-{}.json", std::process::id()));
        std::fs::write(&path, "{\"positions\": {\"1\": [1, 2]").unwrap();
        let file = PositionFile::load(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(file.positions, None);
        assert_eq!(file.logo_size, LogoSize::default());
    }
}
