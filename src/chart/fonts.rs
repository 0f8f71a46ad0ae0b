//! Font registration for chart text
//!
//! plotters draws text through ab_glyph, which only knows fonts registered
//! at runtime. The first successful registration is kept for the process.

use once_cell::sync::OnceCell;
use plotters::style::{register_font, FontStyle};
use std::path::{Path, PathBuf};

use super::error::{ChartError, Result};

/// Family name every chart text element asks for
pub const FONT_FAMILY: &str = "sans-serif";

const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static REGISTERED: OnceCell<PathBuf> = OnceCell::new();

/// First readable font: the explicit path if given, else a known system font
pub fn locate_font(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return path.is_file().then(|| path.to_path_buf());
    }
    SYSTEM_FONT_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
}

/// Register the chart font once per process
pub fn ensure_registered(explicit: Option<&Path>) -> Result<()> {
    let registered = REGISTERED.get_or_try_init(|| -> Result<PathBuf> {
        let path = locate_font(explicit).ok_or_else(|| {
            ChartError::Font(match explicit {
                Some(p) => format!("font file {} not found", p.display()),
                None => "no system font found, set font.path".to_string(),
            })
        })?;

        let bytes: &'static [u8] = Box::leak(std::fs::read(&path)?.into_boxed_slice());
        for style in [FontStyle::Normal, FontStyle::Bold] {
            register_font(FONT_FAMILY, style, bytes).map_err(|_| {
                ChartError::Font(format!("invalid font {}", path.display()))
            })?;
        }

        log::info!("Registered chart font {}", path.display());
        Ok(path)
    })?;

    if let Some(requested) = explicit {
        if requested != registered.as_path() {
            log::warn!(
                "Font {} already registered, ignoring {}",
                registered.display(),
                requested.display()
            );
        }
    }
    Ok(())
}
