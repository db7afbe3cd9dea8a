//! Row/column tables loaded from delimited text

pub mod reader;

pub use reader::{TableError, read_delimited, read_rpt, read_table};

use ndarray::Array2;

/// Field separator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// A single byte such as `b','` or `b'\t'`
    Char(u8),

    /// Runs of spaces and tabs (Abaqus report layout)
    Whitespace,
}

/// How to interpret a delimited text file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    /// Header row, counted over non-blank lines; rows above it are skipped.
    /// `None` numbers the columns "0", "1", ...
    pub header: Option<usize>,

    /// Column whose cells become row labels
    pub index_col: Option<usize>,

    pub delimiter: Delimiter,

    /// Row labels removed after loading
    pub drop_labels: Vec<String>,
}

impl TableOptions {
    /// Abaqus `.rpt` layout: one preamble line, then headers, whitespace separated
    pub fn rpt() -> Self {
        Self {
            header: Some(1),
            index_col: None,
            delimiter: Delimiter::Whitespace,
            drop_labels: Vec::new(),
        }
    }

    /// Comma separated with headers on the first line
    pub fn csv() -> Self {
        Self {
            header: Some(0),
            index_col: None,
            delimiter: Delimiter::Char(b','),
            drop_labels: Vec::new(),
        }
    }
}

impl Default for TableOptions {
    fn default() -> Self {
        Self::csv()
    }
}

/// Table of text cells with named columns and labelled rows
///
/// Cells stay as text until a numeric column is requested, so label or
/// unit rows can be dropped before parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    index_name: Option<String>,
    index: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub(crate) fn from_parts(
        headers: Vec<String>,
        index_name: Option<String>,
        index: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Self {
        Self {
            headers,
            index_name,
            index,
            rows,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Row labels (row positions when no index column was given)
    pub fn index(&self) -> &[String] {
        &self.index
    }

    pub fn index_name(&self) -> Option<&str> {
        self.index_name.as_deref()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Raw text of one cell
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    /// Position of a named column
    pub fn position(&self, name: &str) -> Result<usize, TableError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| TableError::UnknownColumn(name.to_string()))
    }

    /// Numeric values of a named column; empty cells read as NaN
    pub fn column(&self, name: &str) -> Result<Vec<f64>, TableError> {
        self.column_at(self.position(name)?)
    }

    /// Numeric values of the column at `column`; empty cells read as NaN
    pub fn column_at(&self, column: usize) -> Result<Vec<f64>, TableError> {
        let name = self
            .headers
            .get(column)
            .ok_or_else(|| TableError::UnknownColumn(column.to_string()))?;

        self.rows
            .iter()
            .enumerate()
            .map(|(row, cells)| parse_cell(&cells[column], row, name))
            .collect()
    }

    /// Every cell as a number, rows x columns
    pub fn values(&self) -> Result<Array2<f64>, TableError> {
        let mut values = Array2::zeros((self.rows.len(), self.headers.len()));
        for (row, cells) in self.rows.iter().enumerate() {
            for (column, text) in cells.iter().enumerate() {
                values[[row, column]] = parse_cell(text, row, &self.headers[column])?;
            }
        }
        Ok(values)
    }

    /// Remove rows by label
    ///
    /// # Errors
    /// `UnknownLabel` if any label is absent; nothing is removed in that case.
    pub fn drop_rows<S: AsRef<str>>(&mut self, labels: &[S]) -> Result<(), TableError> {
        if let Some(missing) = labels
            .iter()
            .map(AsRef::as_ref)
            .find(|label| !self.index.iter().any(|l| l == label))
        {
            return Err(TableError::UnknownLabel(missing.to_string()));
        }

        let keep: Vec<bool> = self
            .index
            .iter()
            .map(|l| !labels.iter().any(|label| label.as_ref() == l))
            .collect();

        let mut flags = keep.iter();
        self.rows.retain(|_| flags.next().copied().unwrap_or(true));
        let mut flags = keep.iter();
        self.index.retain(|_| flags.next().copied().unwrap_or(true));
        Ok(())
    }
}

fn parse_cell(text: &str, row: usize, column: &str) -> Result<f64, TableError> {
    if text.is_empty() {
        return Ok(f64::NAN);
    }
    text.parse::<f64>().map_err(|_| TableError::NotNumeric {
        row,
        column: column.to_string(),
        text: text.to_string(),
    })
}
