//! Delimited text and Abaqus report readers

use super::{Delimiter, Table, TableOptions};
use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Failed to read table: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse delimited text: {0}")]
    Csv(#[from] csv::Error),

    #[error("Header row {0} is past the end of the input")]
    MissingHeader(usize),

    #[error("Row {row} has {found} fields, expected at most {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Index column {index} is out of range for {columns} columns")]
    IndexOutOfRange { index: usize, columns: usize },

    #[error("No column named {0:?}")]
    UnknownColumn(String),

    #[error("No row labelled {0:?}")]
    UnknownLabel(String),

    #[error("Cell at row {row}, column {column:?} is not a number: {text:?}")]
    NotNumeric {
        row: usize,
        column: String,
        text: String,
    },
}

/// Read an Abaqus `.rpt` report (second non-blank line holds the headers,
/// whitespace separated)
pub fn read_rpt<P: AsRef<Path>>(path: P) -> Result<Table, TableError> {
    read_delimited(path, &TableOptions::rpt())
}

/// Read a delimited text file and drop the configured row labels
pub fn read_delimited<P: AsRef<Path>>(
    path: P,
    options: &TableOptions,
) -> Result<Table, TableError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let table = read_table(file, options)?;
    info!(
        "loaded {} rows x {} columns from {}",
        table.len(),
        table.headers().len(),
        path.display()
    );
    Ok(table)
}

/// Read a table from any byte source
pub fn read_table<R: Read>(reader: R, options: &TableOptions) -> Result<Table, TableError> {
    let records = match options.delimiter {
        Delimiter::Whitespace => split_whitespace_records(reader)?,
        Delimiter::Char(delimiter) => split_char_records(reader, delimiter)?,
    };
    debug!("read {} non-blank records", records.len());

    let mut table = assemble(records, options)?;
    if !options.drop_labels.is_empty() {
        table.drop_rows(&options.drop_labels)?;
    }
    Ok(table)
}

fn split_whitespace_records<R: Read>(reader: R) -> Result<Vec<Vec<String>>, TableError> {
    let mut records = Vec::new();
    for line in BufReader::new(reader).lines() {
        let line = line?;
        let fields: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        if !fields.is_empty() {
            records.push(fields);
        }
    }
    Ok(records)
}

fn split_char_records<R: Read>(reader: R, delimiter: u8) -> Result<Vec<Vec<String>>, TableError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        records.push(record.iter().map(str::to_string).collect());
    }
    Ok(records)
}

fn assemble(records: Vec<Vec<String>>, options: &TableOptions) -> Result<Table, TableError> {
    let mut records = records.into_iter();

    let mut headers = match options.header {
        Some(header_row) => {
            // Everything above the header row is preamble
            records
                .nth(header_row)
                .ok_or(TableError::MissingHeader(header_row))?
        }
        None => Vec::new(),
    };
    let mut rows: Vec<Vec<String>> = records.collect();

    let width = rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(headers.len()))
        .max()
        .unwrap_or(0);

    if options.header.is_some() {
        if let Some((row, found)) = rows
            .iter()
            .enumerate()
            .map(|(i, r)| (i, r.len()))
            .find(|&(_, len)| len > headers.len())
        {
            return Err(TableError::RaggedRow {
                row,
                expected: headers.len(),
                found,
            });
        }
    } else {
        headers = (0..width).map(|i| i.to_string()).collect();
    }

    for row in rows.iter_mut() {
        row.resize(headers.len(), String::new());
    }

    let (index_name, index) = match options.index_col {
        Some(col) => {
            if col >= headers.len() {
                return Err(TableError::IndexOutOfRange {
                    index: col,
                    columns: headers.len(),
                });
            }
            let name = headers.remove(col);
            let labels = rows.iter_mut().map(|row| row.remove(col)).collect();
            (Some(name), labels)
        }
        None => (None, (0..rows.len()).map(|i| i.to_string()).collect()),
    };

    Ok(Table::from_parts(headers, index_name, index, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "
********************************************************************************
            X          ACC_TOP        ACC_BASE

            0.             0.             0.
           10.E-03       125.E-03      -50.E-03
           20.E-03       250.E-03     -100.E-03
";

    #[test]
    fn test_rpt_report() {
        let table = read_table(REPORT.as_bytes(), &TableOptions::rpt()).unwrap();

        assert_eq!(table.headers(), &["X", "ACC_TOP", "ACC_BASE"]);
        assert_eq!(table.len(), 3);

        let time = table.column("X").unwrap();
        let top = table.column("ACC_TOP").unwrap();
        assert_eq!(time, vec![0.0, 0.01, 0.02]);
        assert!((top[2] - 0.25).abs() < 1e-12);

        let values = table.values().unwrap();
        assert_eq!(values.dim(), (3, 3));
        assert!((values[[1, 2]] + 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_csv_with_index_and_drop() {
        let text = "step,time,force\nunits,s,N\na,0.0,1.5\nb,0.1,2.5\nc,0.2,3.5\n";
        let options = TableOptions {
            index_col: Some(0),
            drop_labels: vec!["units".to_string()],
            ..TableOptions::csv()
        };

        let table = read_table(text.as_bytes(), &options).unwrap();
        assert_eq!(table.headers(), &["time", "force"]);
        assert_eq!(table.index_name(), Some("step"));
        assert_eq!(table.index(), &["a", "b", "c"]);
        assert_eq!(table.column("force").unwrap(), vec![1.5, 2.5, 3.5]);
    }

    #[test]
    fn test_unknown_drop_label() {
        let options = TableOptions {
            index_col: Some(0),
            drop_labels: vec!["missing".to_string()],
            ..TableOptions::csv()
        };
        let err = read_table("k,v\na,1\n".as_bytes(), &options).unwrap_err();
        assert!(matches!(err, TableError::UnknownLabel(label) if label == "missing"));
    }

    #[test]
    fn test_semicolon_without_header() {
        let options = TableOptions {
            header: None,
            delimiter: Delimiter::Char(b';'),
            ..TableOptions::csv()
        };
        let table = read_table("1;2\n3;4\n\n5;6\n".as_bytes(), &options).unwrap();

        assert_eq!(table.headers(), &["0", "1"]);
        assert_eq!(table.column_at(1).unwrap(), vec![2.0, 4.0, 6.0]);
    }

    #[test]
    fn test_short_rows_are_padded_with_nan() {
        let table = read_table("a,b\n1,2\n3\n".as_bytes(), &TableOptions::csv()).unwrap();
        let b = table.column("b").unwrap();
        assert_eq!(b[0], 2.0);
        assert!(b[1].is_nan());
    }

    #[test]
    fn test_ragged_and_non_numeric_rows() {
        let err = read_table("a,b\n1,2,3\n".as_bytes(), &TableOptions::csv()).unwrap_err();
        assert!(matches!(err, TableError::RaggedRow { row: 0, expected: 2, found: 3 }));

        let table = read_table("a\nfoo\n".as_bytes(), &TableOptions::csv()).unwrap();
        let err = table.column("a").unwrap_err();
        assert!(matches!(err, TableError::NotNumeric { row: 0, .. }));
    }

    #[test]
    fn test_missing_header_row() {
        let err = read_table("only one line\n".as_bytes(), &TableOptions::rpt()).unwrap_err();
        assert!(matches!(err, TableError::MissingHeader(1)));
    }
}
