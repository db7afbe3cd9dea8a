//! Single and multi-panel line figures

use super::font::ensure_font;
use super::{FigureStyle, ImageFormat, Line, LineSet, PanelStyle, PlotError};
use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fmt::Display;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// Draw every line on one axes and save it once per configured format
///
/// Returns the written paths, `<save_stem>.<ext>` for each format.
pub fn plot_single(
    lines: &[Line],
    style: &FigureStyle,
    save_stem: &Path,
) -> Result<Vec<PathBuf>, PlotError> {
    if lines.is_empty() {
        return Err(PlotError::Layout("no lines to plot".to_string()));
    }
    render(&[lines], 1, 1, style, save_stem)
}

/// Draw one group of lines per panel on a grid with `style.columns` columns
///
/// With more than one row and more than one column, panels fill the grid
/// column by column.
pub fn plot_multiple(
    panels: &[Vec<Line>],
    style: &FigureStyle,
    save_stem: &Path,
) -> Result<Vec<PathBuf>, PlotError> {
    let (rows, cols) = grid_shape(panels.len(), style.columns)?;
    let panels: Vec<&[Line]> = panels.iter().map(Vec::as_slice).collect();
    render(&panels, rows, cols, style, save_stem)
}

/// Dispatch on the layout the line set declares
pub fn plot(
    set: &LineSet,
    style: &FigureStyle,
    save_stem: &Path,
) -> Result<Vec<PathBuf>, PlotError> {
    match set {
        LineSet::Single(lines) => plot_single(lines, style, save_stem),
        LineSet::Panels(panels) => plot_multiple(panels, style, save_stem),
    }
}

fn grid_shape(panels: usize, columns: usize) -> Result<(usize, usize), PlotError> {
    if panels == 0 {
        return Err(PlotError::Layout("no panels to plot".to_string()));
    }
    if columns == 0 {
        return Err(PlotError::Layout("column count must be at least 1".to_string()));
    }
    if panels % columns != 0 {
        return Err(PlotError::Layout(format!(
            "{} panels do not fill a grid with {} columns",
            panels, columns
        )));
    }
    Ok((panels / columns, columns))
}

/// Area index (row-major, as `split_evenly` returns them) for panel `index`
pub(crate) fn panel_slot(index: usize, rows: usize, cols: usize) -> usize {
    if rows == 1 || cols == 1 {
        index
    } else {
        let col = index / rows;
        let row = index % rows;
        row * cols + col
    }
}

/// Append the format extension to a save stem
pub(crate) fn output_path(save_stem: &Path, format: ImageFormat) -> PathBuf {
    let mut path = save_stem.as_os_str().to_owned();
    path.push(".");
    path.push(format.extension());
    PathBuf::from(path)
}

pub(crate) fn prepare_parent(path: &Path) -> Result<(), PlotError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

pub(crate) fn render_err(what: &str, e: impl Display) -> PlotError {
    PlotError::Render(format!("Failed to {}: {}", what, e))
}

fn render(
    panels: &[&[Line]],
    rows: usize,
    cols: usize,
    style: &FigureStyle,
    save_stem: &Path,
) -> Result<Vec<PathBuf>, PlotError> {
    ensure_font(style)?;
    let size = style.canvas_size(rows, cols);
    let mut written = Vec::with_capacity(style.formats.len());

    for &format in &style.formats {
        let path = output_path(save_stem, format);
        prepare_parent(&path)?;
        match format {
            ImageFormat::Svg => draw_grid(
                SVGBackend::new(&path, size).into_drawing_area(),
                panels,
                rows,
                cols,
                style,
            )?,
            ImageFormat::Png => draw_grid(
                BitMapBackend::new(&path, size).into_drawing_area(),
                panels,
                rows,
                cols,
                style,
            )?,
        }
        info!("saved figure {}", path.display());
        written.push(path);
    }

    Ok(written)
}

fn draw_grid<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    panels: &[&[Line]],
    rows: usize,
    cols: usize,
    style: &FigureStyle,
) -> Result<(), PlotError> {
    root.fill(&WHITE).map_err(|e| render_err("fill drawing area", e))?;

    let areas = root.split_evenly((rows, cols));
    for (i, lines) in panels.iter().enumerate() {
        let area = &areas[panel_slot(i, rows, cols)];
        draw_panel(area, lines, &style.panel(i), style)?;
    }

    root.present().map_err(|e| render_err("present figure", e))?;
    Ok(())
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    lines: &[Line],
    panel: &PanelStyle,
    style: &FigureStyle,
) -> Result<(), PlotError> {
    let family = style.font_family.as_str();
    let font = style.font_px();
    let (x_range, y_range) = panel_ranges(lines, panel);

    let mut builder = ChartBuilder::on(area);
    builder
        .margin((font * 0.4) as u32)
        .x_label_area_size((font * 2.2) as u32)
        .y_label_area_size((font * 3.6) as u32);
    if let Some(title) = &panel.title {
        builder.caption(title, (family, font));
    }
    let mut chart = builder
        .build_cartesian_2d(x_range, y_range)
        .map_err(|e| render_err("build cartesian 2d", e))?;

    {
        let mut mesh = chart.configure_mesh();
        mesh.x_desc(panel.x_label.as_str())
            .y_desc(panel.y_label.as_str())
            .axis_desc_style((family, font))
            .label_style((family, font / style.tick_font_scale));
        match &style.grid {
            Some(grid) => {
                mesh.bold_line_style(ShapeStyle {
                    color: grid.color.to_rgba(),
                    filled: false,
                    stroke_width: style.points_to_px(grid.width).max(1),
                })
                .light_line_style(WHITE);
            }
            None => {
                mesh.disable_mesh();
            }
        }
        mesh.draw().map_err(|e| render_err("draw mesh", e))?;
    }

    let ids = style.color_ids_for(lines.len());
    let legend_len = (font * 1.5) as i32;
    for (i, line) in lines.iter().enumerate() {
        let line_style = style.line_styles.for_line(i);
        let shape = ShapeStyle {
            color: style.color_map.color(ids[i]).to_rgba(),
            filled: true,
            stroke_width: style.points_to_px(line_style.width).max(1),
        };
        let series = LineSeries::new(line.points(), shape)
            .point_size(style.points_to_px(line_style.marker_size / 2.0));

        let anno = chart
            .draw_series(series)
            .map_err(|e| render_err("draw series", e))?;
        if style.legend {
            anno.label(line.y_name.clone()).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + legend_len, y)], shape)
            });
        }
    }

    if style.legend && !lines.is_empty() {
        chart
            .configure_series_labels()
            .position(style.legend_position.to_series_label_position())
            .label_font((family, font / style.legend_font_scale))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(|e| render_err("draw legend", e))?;
    }

    Ok(())
}

fn panel_ranges(lines: &[Line], panel: &PanelStyle) -> (Range<f64>, Range<f64>) {
    let bounds = lines
        .iter()
        .filter_map(Line::bounds)
        .reduce(|a, b| (a.0.min(b.0), a.1.max(b.1), a.2.min(b.2), a.3.max(b.3)));

    let x = panel
        .xlim
        .or_else(|| bounds.map(|b| (b.0, b.1)))
        .unwrap_or((0.0, 1.0));
    let y = match panel.ylim {
        Some(limits) => limits,
        None => bounds.map(|b| pad((b.2, b.3), 0.05)).unwrap_or((0.0, 1.0)),
    };

    (widen(x), widen(y))
}

fn pad((lo, hi): (f64, f64), fraction: f64) -> (f64, f64) {
    let margin = (hi - lo) * fraction;
    (lo - margin, hi + margin)
}

/// Plotters needs a non-empty range
fn widen((lo, hi): (f64, f64)) -> Range<f64> {
    if hi > lo {
        lo..hi
    } else {
        (lo - 0.5)..(lo + 0.5)
    }
}
