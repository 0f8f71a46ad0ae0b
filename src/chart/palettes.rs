//! Palette registry and continuous colormaps
//!
//! Loads sequential palettes from palettes.json (embedded at compile time) and
//! maps numeric values onto them. Stops are the matplotlib colormaps sampled at
//! even intervals, so interpolating between them reproduces the familiar look.

use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;

/// Embedded palettes.json content
const PALETTES_JSON: &str = include_str!("../../palettes.json");

/// Global palette registry, initialized lazily on first access
pub static PALETTE_REGISTRY: Lazy<PaletteRegistry> = Lazy::new(|| {
    PaletteRegistry::from_json(PALETTES_JSON).unwrap_or_else(|e| {
        log::error!("Failed to load palettes.json: {}", e);
        PaletteRegistry::default()
    })
});

/// Default palette for the density scatter
pub const DEFAULT_PALETTE: &str = "Plasma";

const GRAY: [u8; 3] = [128, 128, 128];

/// A single palette definition from palettes.json
#[derive(Debug, Clone, Deserialize)]
pub struct PaletteDefinition {
    pub name: String,
    pub colors: Vec<String>,
}

impl PaletteDefinition {
    /// Get a color stop by index (clamped to the last stop)
    pub fn get_color(&self, index: usize) -> [u8; 3] {
        if self.colors.is_empty() {
            return GRAY;
        }
        let idx = index.min(self.colors.len() - 1);
        parse_hex_color(&self.colors[idx]).unwrap_or(GRAY)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Interpolate a color from the palette at position t ∈ [0, 1]
    ///
    /// t=0 returns the first color, t=1 returns the last color.
    pub fn interpolate(&self, t: f64) -> [u8; 3] {
        if self.colors.is_empty() {
            return GRAY;
        }

        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let n = self.colors.len();

        if n == 1 {
            return self.get_color(0);
        }

        let pos = t * (n - 1) as f64;
        let idx_low = pos.floor() as usize;
        let idx_high = (idx_low + 1).min(n - 1);
        let frac = pos - idx_low as f64;

        let color_low = self.get_color(idx_low);
        let color_high = self.get_color(idx_high);

        [
            (color_low[0] as f64 * (1.0 - frac) + color_high[0] as f64 * frac) as u8,
            (color_low[1] as f64 * (1.0 - frac) + color_high[1] as f64 * frac) as u8,
            (color_low[2] as f64 * (1.0 - frac) + color_high[2] as f64 * frac) as u8,
        ]
    }
}

/// Registry of all available palettes
#[derive(Debug, Clone, Default)]
pub struct PaletteRegistry {
    /// All palettes by name (lowercase keys for case-insensitive lookup)
    palettes: HashMap<String, PaletteDefinition>,
    /// Palette names in file order
    names: Vec<String>,
}

impl PaletteRegistry {
    /// Load palettes from JSON string
    pub fn from_json(json: &str) -> Result<Self, String> {
        let definitions: Vec<PaletteDefinition> = serde_json::from_str(json)
            .map_err(|e| format!("Failed to parse palettes JSON: {}", e))?;

        let mut registry = Self::default();
        for def in definitions {
            registry.names.push(def.name.clone());
            registry.palettes.insert(def.name.to_lowercase(), def);
        }

        log::debug!("PaletteRegistry: Loaded {} palettes", registry.palettes.len());
        Ok(registry)
    }

    /// Get a palette by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&PaletteDefinition> {
        self.palettes.get(&name.to_lowercase())
    }

    /// Get a palette by name, falling back to the default palette
    pub fn get_or_default(&self, name: &str) -> Option<&PaletteDefinition> {
        self.get(name).or_else(|| {
            log::warn!("Unknown palette '{}', using {}", name, DEFAULT_PALETTE);
            self.get(DEFAULT_PALETTE)
        })
    }

    /// List palette names
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// Parse a hex color string to RGB array
///
/// Supports `#RRGGBB`, `#RRGGBBAA` (alpha ignored) and the same without `#`.
fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let hex = hex.trim_start_matches('#');

    if hex.len() != 6 && hex.len() != 8 {
        log::warn!("Invalid hex color length '{}': {}", hex, hex.len());
        return None;
    }

    let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;

    Some([r, g, b])
}

/// Continuous color scale: a palette stretched over a value range
#[derive(Debug, Clone)]
pub struct Colormap {
    palette: PaletteDefinition,
    range: (f64, f64),
}

impl Colormap {
    /// Colormap over the finite range of `values`; (0, 1) when there is none
    pub fn for_values(palette_name: &str, values: &[f64]) -> Self {
        Self::new(palette_name, finite_range(values).unwrap_or((0.0, 1.0)))
    }

    pub fn new(palette_name: &str, range: (f64, f64)) -> Self {
        let palette = PALETTE_REGISTRY
            .get_or_default(palette_name)
            .cloned()
            .unwrap_or_else(|| PaletteDefinition {
                name: palette_name.to_string(),
                colors: Vec::new(),
            });
        Self { palette, range }
    }

    pub fn palette_name(&self) -> &str {
        &self.palette.name
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Position of `value` in [0, 1]; a degenerate range maps everything to 0
    pub fn normalize(&self, value: f64) -> f64 {
        let (lo, hi) = self.range;
        if hi > lo {
            ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Color for `value`, None for missing (NaN) values
    pub fn color(&self, value: f64) -> Option<[u8; 3]> {
        if value.is_nan() {
            None
        } else {
            Some(self.palette.interpolate(self.normalize(value)))
        }
    }

    /// Color at position t ∈ [0, 1] along the palette
    pub fn color_at(&self, t: f64) -> [u8; 3] {
        self.palette.interpolate(t)
    }
}

/// (min, max) over finite values
pub fn finite_range(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FF0000"), Some([255, 0, 0]));
        assert_eq!(parse_hex_color("#0D0887"), Some([13, 8, 135]));
        assert_eq!(parse_hex_color("FF0000"), Some([255, 0, 0]));
        assert_eq!(parse_hex_color("#440154FF"), Some([68, 1, 84]));
        assert_eq!(parse_hex_color("#FFF"), None);
        assert_eq!(parse_hex_color("GGGGGG"), None);
    }

    #[test]
    fn test_palette_registry_loads() {
        let registry = &*PALETTE_REGISTRY;
        assert_eq!(registry.names().len(), 6);

        let plasma = registry.get("plasma").unwrap();
        assert_eq!(plasma.get_color(0), [13, 8, 135]);
        assert_eq!(plasma.get_color(plasma.len() - 1), [240, 249, 33]);
    }

    #[test]
    fn test_every_configurable_palette_exists() {
        let valid = crate::properties::registry()
            .get_property("palette")
            .and_then(|p| p.valid_values.clone())
            .unwrap();
        for name in valid {
            assert!(PALETTE_REGISTRY.get(&name).is_some(), "missing {}", name);
        }
    }

    #[test]
    fn test_interpolate_endpoints_and_midpoint() {
        let palette = PaletteDefinition {
            name: "test".to_string(),
            colors: vec!["#000000".to_string(), "#64C8FF".to_string()],
        };
        assert_eq!(palette.interpolate(0.0), [0, 0, 0]);
        assert_eq!(palette.interpolate(1.0), [100, 200, 255]);
        assert_eq!(palette.interpolate(0.5), [50, 100, 127]);
        assert_eq!(palette.interpolate(-3.0), [0, 0, 0]);
        assert_eq!(palette.interpolate(7.0), [100, 200, 255]);
    }

    #[test]
    fn test_colormap_over_counts() {
        let cmap = Colormap::for_values("Plasma", &[2.0, f64::NAN, 10.0, 6.0]);
        assert_eq!(cmap.range(), (2.0, 10.0));
        assert_eq!(cmap.normalize(6.0), 0.5);
        assert_eq!(cmap.color(2.0), Some([13, 8, 135]));
        assert_eq!(cmap.color(10.0), Some([240, 249, 33]));
        assert_eq!(cmap.color(f64::NAN), None);
    }

    #[test]
    fn test_colormap_degenerate_range() {
        let cmap = Colormap::for_values("Plasma", &[5.0, 5.0]);
        assert_eq!(cmap.normalize(5.0), 0.0);

        let empty = Colormap::for_values("Plasma", &[f64::NAN]);
        assert_eq!(empty.range(), (0.0, 1.0));
    }

    #[test]
    fn test_unknown_palette_falls_back() {
        let cmap = Colormap::new("NoSuchPalette", (0.0, 1.0));
        assert_eq!(cmap.palette_name(), "Plasma");
    }
}
