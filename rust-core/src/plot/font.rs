//! Font registration for figure text
//!
//! Plotters renders text through `ab_glyph` from fonts registered by family
//! name. Every figure call registers its family before drawing, so both SVG
//! layout and PNG rasterization find a face without any system font lookup.

use super::{FigureStyle, PlotError};
use plotters::style::{FontStyle, register_font};

/// DejaVu Sans, shipped with the crate (Bitstream Vera license, see `assets/`)
pub static BUNDLED_FONT: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

/// Register the style's font under `style.font_family`
///
/// Uses `style.font_bytes` when set, the bundled face otherwise. Registering
/// a family again replaces the previous face.
pub(crate) fn ensure_font(style: &FigureStyle) -> Result<(), PlotError> {
    let bytes = style.font_bytes.unwrap_or(BUNDLED_FONT);
    register_font(&style.font_family, FontStyle::Normal, bytes).map_err(|_| {
        PlotError::Render(format!(
            "Font for family {:?} is not a valid OpenType file",
            style.font_family
        ))
    })
}
