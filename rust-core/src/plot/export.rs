//! CSV export of line sets and plain 2D arrays

use super::{LineSet, PlotError};
use log::info;
use ndarray::Array2;
use std::path::Path;

/// Write named columns side by side with a leading unnamed row-index column
///
/// Every column must have the same length.
pub fn export_columns<P: AsRef<Path>>(
    columns: &[(&str, &[f64])],
    path: P,
) -> Result<(), PlotError> {
    let path = path.as_ref();
    let rows = columns.first().map_or(0, |(_, values)| values.len());
    if let Some((name, values)) = columns.iter().find(|(_, values)| values.len() != rows) {
        return Err(PlotError::ShapeMismatch(format!(
            "column {:?} has {} rows, expected {}",
            name,
            values.len(),
            rows
        )));
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(std::iter::once("").chain(columns.iter().map(|(name, _)| *name)))?;
    for row in 0..rows {
        let mut record = Vec::with_capacity(columns.len() + 1);
        record.push(row.to_string());
        record.extend(columns.iter().map(|(_, values)| values[row].to_string()));
        writer.write_record(&record)?;
    }
    writer.flush()?;

    info!("exported {} rows x {} columns to {}", rows, columns.len(), path.display());
    Ok(())
}

/// Write every line as an `x_name, y_name` column pair
pub fn export_lines<P: AsRef<Path>>(set: &LineSet, path: P) -> Result<(), PlotError> {
    let columns: Vec<(&str, &[f64])> = set
        .lines()
        .into_iter()
        .flat_map(|line| {
            [
                (line.x_name.as_str(), line.x.as_slice()),
                (line.y_name.as_str(), line.y.as_slice()),
            ]
        })
        .collect();
    export_columns(&columns, path)
}

/// Write a 2D array as comma separated rows, no header and no index
pub fn export_array<P: AsRef<Path>>(array: &Array2<f64>, path: P) -> Result<(), PlotError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path.as_ref())?;
    for row in array.rows() {
        writer.write_record(row.iter().map(|v| v.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}
