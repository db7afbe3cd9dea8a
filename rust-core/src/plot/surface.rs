//! 3D surface figure of a sampled z(x, y) grid

use super::figure::{output_path, prepare_parent, render_err};
use super::font::ensure_font;
use super::{FigureStyle, ImageFormat, PlotError};
use log::info;
use ndarray::Array2;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

/// Labels and camera for a surface figure
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceStyle {
    /// Size, fonts and output formats; panel 0 supplies the x/y labels and title
    pub figure: FigureStyle,
    pub z_label: String,

    /// Number of labelled ticks on the z axis
    pub z_ticks: usize,

    pub yaw: f64,
    pub pitch: f64,
}

impl Default for SurfaceStyle {
    fn default() -> Self {
        Self {
            figure: FigureStyle {
                figsize: (6.0, 6.0),
                legend: false,
                ..FigureStyle::default()
            },
            z_label: "Z-label".to_string(),
            z_ticks: 11,
            yaw: 0.7,
            pitch: 0.3,
        }
    }
}

/// Plot `z` over the grid spanned by `x` and `y`
///
/// `z` has one row per `y` value and one column per `x` value. Cells with
/// a non-finite corner are left out. Z tick labels carry six decimals.
pub fn plot_surface(
    x: &[f64],
    y: &[f64],
    z: &Array2<f64>,
    style: &SurfaceStyle,
    save_stem: &Path,
) -> Result<Vec<PathBuf>, PlotError> {
    if x.len() < 2 || y.len() < 2 {
        return Err(PlotError::Layout(format!(
            "surface needs at least a 2 x 2 grid, got {} x {}",
            x.len(),
            y.len()
        )));
    }
    if z.dim() != (y.len(), x.len()) {
        return Err(PlotError::ShapeMismatch(format!(
            "z is {:?} but the grid is {} y values by {} x values",
            z.dim(),
            y.len(),
            x.len()
        )));
    }

    ensure_font(&style.figure)?;
    let size = style.figure.canvas_size(1, 1);
    let mut written = Vec::with_capacity(style.figure.formats.len());
    for &format in &style.figure.formats {
        let path = output_path(save_stem, format);
        prepare_parent(&path)?;
        match format {
            ImageFormat::Svg => {
                let root = SVGBackend::new(&path, size).into_drawing_area();
                draw_surface(root, x, y, z, style)?
            }
            ImageFormat::Png => {
                let root = BitMapBackend::new(&path, size).into_drawing_area();
                draw_surface(root, x, y, z, style)?
            }
        }
        info!("saved surface {}", path.display());
        written.push(path);
    }
    Ok(written)
}

fn draw_surface<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    x: &[f64],
    y: &[f64],
    z: &Array2<f64>,
    style: &SurfaceStyle,
) -> Result<(), PlotError> {
    let figure = &style.figure;
    let panel = figure.panel(0);
    let family = figure.font_family.as_str();
    let font = figure.font_px();

    let (z_lo, z_hi) = finite_range(z.iter().copied()).unwrap_or((0.0, 1.0));
    let z_range = if z_hi > z_lo { z_lo..z_hi } else { (z_lo - 0.5)..(z_lo + 0.5) };
    let x_range = axis_range(x);
    let y_range = axis_range(y);

    root.fill(&WHITE).map_err(|e| render_err("fill drawing area", e))?;

    let mut builder = ChartBuilder::on(&root);
    builder.margin((font * 0.4) as u32);
    if let Some(title) = &panel.title {
        builder.caption(title, (family, font));
    }
    // Plotters puts the vertical axis second
    let mut chart = builder
        .build_cartesian_3d(x_range, z_range.clone(), y_range)
        .map_err(|e| render_err("build cartesian 3d", e))?;

    chart.with_projection(|mut pb| {
        pb.yaw = style.yaw;
        pb.pitch = style.pitch;
        pb.scale = 0.8;
        pb.into_matrix()
    });

    let z_format = |v: &f64| format!("{:.6}", v);
    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(0.15))
        .max_light_lines(3)
        .label_style((family, font / figure.tick_font_scale))
        .y_labels(style.z_ticks.max(2))
        .y_formatter(&z_format)
        .draw()
        .map_err(|e| render_err("draw axes", e))?;

    let mut cells = Vec::with_capacity((x.len() - 1) * (y.len() - 1));
    for j in 0..y.len() - 1 {
        for i in 0..x.len() - 1 {
            let corners = [z[[j, i]], z[[j, i + 1]], z[[j + 1, i + 1]], z[[j + 1, i]]];
            if corners.iter().any(|v| !v.is_finite()) {
                continue;
            }
            let mean = corners.iter().sum::<f64>() / 4.0;
            let quad = vec![
                (x[i], corners[0], y[j]),
                (x[i + 1], corners[1], y[j]),
                (x[i + 1], corners[2], y[j + 1]),
                (x[i], corners[3], y[j + 1]),
            ];
            cells.push(Polygon::new(quad, cool_warm(mean, &z_range).filled()));
        }
    }
    chart
        .draw_series(cells)
        .map_err(|e| render_err("draw surface", e))?;

    // Axis titles as plain text along the lower edge
    let caption = format!("x: {}   y: {}   z: {}", panel.x_label, panel.y_label, style.z_label);
    let (_, height) = root.dim_in_pixel();
    root.draw_text(
        &caption,
        &(family, font / figure.tick_font_scale).into_text_style(&root),
        ((font * 0.5) as i32, height as i32 - (font * 1.2) as i32),
    )
    .map_err(|e| render_err("draw axis titles", e))?;

    root.present().map_err(|e| render_err("present figure", e))?;
    Ok(())
}

/// Blue for the low end of `range`, red for the high end
fn cool_warm(value: f64, range: &std::ops::Range<f64>) -> HSLColor {
    let t = ((value - range.start) / (range.end - range.start)).clamp(0.0, 1.0);
    HSLColor((1.0 - t) * 0.66, 0.7, 0.5)
}

fn finite_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

fn axis_range(values: &[f64]) -> std::ops::Range<f64> {
    match finite_range(values.iter().copied()) {
        Some((lo, hi)) if hi > lo => lo..hi,
        Some((lo, _)) => (lo - 0.5)..(lo + 0.5),
        None => 0.0..1.0,
    }
}
