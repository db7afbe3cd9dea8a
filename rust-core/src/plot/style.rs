//! Figure styling passed explicitly to every figure call

use plotters::prelude::{RGBColor, SeriesLabelPosition};
use plotters::style::full_palette::GREY_500;

/// Output image format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Svg,
    Png,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Svg => "svg",
            ImageFormat::Png => "png",
        }
    }
}

/// Colour maps for line colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMap {
    /// Eight qualitative colours, picked by index
    #[default]
    Set2,

    /// 256-level grey ramp from white to black, sampled at even intervals
    Greys,
}

const SET2: [RGBColor; 8] = [
    RGBColor(0x66, 0xc2, 0xa5),
    RGBColor(0xfc, 0x8d, 0x62),
    RGBColor(0x8d, 0xa0, 0xcb),
    RGBColor(0xe7, 0x8a, 0xc3),
    RGBColor(0xa6, 0xd8, 0x54),
    RGBColor(0xff, 0xd9, 0x2f),
    RGBColor(0xe5, 0xc4, 0x94),
    RGBColor(0xb3, 0xb3, 0xb3),
];

impl ColorMap {
    /// Number of entries in the map
    pub fn size(&self) -> usize {
        match self {
            ColorMap::Set2 => SET2.len(),
            ColorMap::Greys => 256,
        }
    }

    /// Listed maps are indexed directly; continuous ones are sampled
    pub fn is_listed(&self) -> bool {
        matches!(self, ColorMap::Set2)
    }

    /// Colour at an entry id (wraps past the end)
    pub fn color(&self, id: usize) -> RGBColor {
        match self {
            ColorMap::Set2 => SET2[id % SET2.len()],
            ColorMap::Greys => {
                let level = 255 - (id % 256) as u8;
                RGBColor(level, level, level)
            }
        }
    }

    /// Entry ids for `count` lines
    ///
    /// Listed maps use 0, 1, 2, ...; continuous maps skip the extremes
    /// with `interval = size / (count + 1)` and take `interval * (i + 1)`.
    pub fn color_ids(&self, count: usize) -> Vec<usize> {
        if self.is_listed() {
            (0..count).collect()
        } else {
            let interval = (self.size() / (count + 1)).max(1);
            (0..count).map(|i| interval * (i + 1)).collect()
        }
    }
}

/// Stroke settings for one line, in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub width: f64,

    /// Marker diameter; 0 draws no markers
    pub marker_size: f64,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            width: 1.5,
            marker_size: 0.0,
        }
    }
}

/// Same stroke for every line, or one per line
#[derive(Debug, Clone, PartialEq)]
pub enum LineStyles {
    Uniform(LineStyle),

    /// Cycled when there are more lines than entries
    PerLine(Vec<LineStyle>),
}

impl Default for LineStyles {
    fn default() -> Self {
        LineStyles::Uniform(LineStyle::default())
    }
}

impl LineStyles {
    pub fn for_line(&self, index: usize) -> LineStyle {
        match self {
            LineStyles::Uniform(style) => *style,
            LineStyles::PerLine(styles) if styles.is_empty() => LineStyle::default(),
            LineStyles::PerLine(styles) => styles[index % styles.len()],
        }
    }
}

/// Major grid lines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStyle {
    pub color: RGBColor,

    /// Width in points
    pub width: f64,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            color: GREY_500,
            width: 0.3,
        }
    }
}

/// Legend corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegendPosition {
    #[default]
    UpperRight,
    UpperLeft,
    LowerRight,
    LowerLeft,
}

impl LegendPosition {
    pub(crate) fn to_series_label_position(self) -> SeriesLabelPosition {
        match self {
            LegendPosition::UpperRight => SeriesLabelPosition::UpperRight,
            LegendPosition::UpperLeft => SeriesLabelPosition::UpperLeft,
            LegendPosition::LowerRight => SeriesLabelPosition::LowerRight,
            LegendPosition::LowerLeft => SeriesLabelPosition::LowerLeft,
        }
    }
}

/// Labels and limits of one axes
#[derive(Debug, Clone, PartialEq)]
pub struct PanelStyle {
    pub x_label: String,
    pub y_label: String,
    pub title: Option<String>,
    pub xlim: Option<(f64, f64)>,
    pub ylim: Option<(f64, f64)>,
}

impl Default for PanelStyle {
    fn default() -> Self {
        Self {
            x_label: "X-label".to_string(),
            y_label: "Y-label".to_string(),
            title: None,
            xlim: None,
            ylim: None,
        }
    }
}

/// Everything that controls how a figure looks and where it is saved
///
/// Built per figure call; nothing is kept between calls.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureStyle {
    /// Size of one panel in inches
    pub figsize: (f64, f64),
    pub dpi: u32,

    /// Family name text is drawn with; registered before every render
    pub font_family: String,

    /// OpenType face for `font_family`; `None` uses the bundled DejaVu Sans
    pub font_bytes: Option<&'static [u8]>,

    /// Base font size in points (axis labels and titles)
    pub fontsize: f64,

    /// Tick labels use `fontsize / tick_font_scale`
    pub tick_font_scale: f64,

    /// Legend text uses `fontsize / legend_font_scale`
    pub legend_font_scale: f64,

    /// One entry per panel; missing entries fall back to the default
    pub panels: Vec<PanelStyle>,

    pub grid: Option<GridStyle>,
    pub line_styles: LineStyles,
    pub color_map: ColorMap,

    /// Explicit colour map ids, overriding `ColorMap::color_ids`
    pub color_ids: Option<Vec<usize>>,

    pub legend: bool,
    pub legend_position: LegendPosition,

    /// Panel columns for multi-panel figures
    pub columns: usize,

    pub formats: Vec<ImageFormat>,
}

impl Default for FigureStyle {
    fn default() -> Self {
        Self {
            figsize: (6.0, 3.0),
            dpi: 300,
            font_family: "sans-serif".to_string(),
            font_bytes: None,
            fontsize: 16.0,
            tick_font_scale: 1.2,
            legend_font_scale: 1.2,
            panels: Vec::new(),
            grid: Some(GridStyle::default()),
            line_styles: LineStyles::default(),
            color_map: ColorMap::default(),
            color_ids: None,
            legend: true,
            legend_position: LegendPosition::default(),
            columns: 1,
            formats: vec![ImageFormat::Svg, ImageFormat::Png],
        }
    }
}

impl FigureStyle {
    /// Style for panel `index`
    pub fn panel(&self, index: usize) -> PanelStyle {
        self.panels.get(index).cloned().unwrap_or_default()
    }

    /// Colour ids for a panel holding `count` lines
    pub fn color_ids_for(&self, count: usize) -> Vec<usize> {
        match &self.color_ids {
            Some(ids) if !ids.is_empty() => (0..count).map(|i| ids[i % ids.len()]).collect(),
            _ => self.color_map.color_ids(count),
        }
    }

    /// Convert a length in points to whole pixels at this dpi
    pub fn points_to_px(&self, points: f64) -> u32 {
        (points * self.dpi as f64 / 72.0).round().max(0.0) as u32
    }

    /// Base font size in pixels
    pub fn font_px(&self) -> f64 {
        self.fontsize * self.dpi as f64 / 72.0
    }

    /// Pixel size of a `rows x cols` figure
    pub fn canvas_size(&self, rows: usize, cols: usize) -> (u32, u32) {
        let width = self.figsize.0 * cols as f64 * self.dpi as f64;
        let height = self.figsize.1 * rows as f64 * self.dpi as f64;
        (width.round().max(1.0) as u32, height.round().max(1.0) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listed_map_ids() {
        assert_eq!(ColorMap::Set2.color_ids(3), vec![0, 1, 2]);
        assert_eq!(ColorMap::Set2.color(9), ColorMap::Set2.color(1));
    }

    #[test]
    fn test_continuous_map_ids_skip_extremes() {
        // 256 / 4 = 64
        assert_eq!(ColorMap::Greys.color_ids(3), vec![64, 128, 192]);
        assert_eq!(ColorMap::Greys.color(0), RGBColor(255, 255, 255));
        assert_eq!(ColorMap::Greys.color(255), RGBColor(0, 0, 0));
    }

    #[test]
    fn test_explicit_color_ids_override() {
        let style = FigureStyle {
            color_ids: Some(vec![127, 191, 255]),
            color_map: ColorMap::Greys,
            ..FigureStyle::default()
        };
        assert_eq!(style.color_ids_for(4), vec![127, 191, 255, 127]);
    }

    #[test]
    fn test_line_styles() {
        let uniform = LineStyles::Uniform(LineStyle { width: 2.0, marker_size: 3.0 });
        assert_eq!(uniform.for_line(5).width, 2.0);

        let per_line = LineStyles::PerLine(vec![
            LineStyle { width: 1.0, marker_size: 0.0 },
            LineStyle { width: 3.0, marker_size: 0.0 },
        ]);
        assert_eq!(per_line.for_line(0).width, 1.0);
        assert_eq!(per_line.for_line(3).width, 3.0);
        assert_eq!(LineStyles::PerLine(Vec::new()).for_line(0), LineStyle::default());
    }

    #[test]
    fn test_sizes() {
        let style = FigureStyle::default();
        assert_eq!(style.canvas_size(1, 1), (1800, 900));
        assert_eq!(style.canvas_size(2, 3), (5400, 1800));
        assert_eq!(style.points_to_px(72.0), 300);
        assert_eq!(style.panel(3), PanelStyle::default());
    }
}
