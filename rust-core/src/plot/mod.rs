//! Line figures, surface figures and CSV export

pub mod font;
pub mod line;
pub mod style;
pub mod figure;
pub mod surface;
pub mod export;

pub use font::BUNDLED_FONT;
pub use line::{Line, LineSet};
pub use style::{
    ColorMap, FigureStyle, GridStyle, ImageFormat, LegendPosition, LineStyle, LineStyles,
    PanelStyle,
};
pub use figure::{plot, plot_multiple, plot_single};
pub use surface::{SurfaceStyle, plot_surface};
pub use export::{export_array, export_columns, export_lines};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Invalid figure layout: {0}")]
    Layout(String),

    #[error("{0}")]
    Render(String),
}
