//! Tabular dataset type and CSV loader.
//!
//! A [`Dataset`] is an ordered table of text cells with named columns, the
//! shape of a typical NLMO dipole analysis output:
//! `NLMO, Type, X, Y, Z, Tot_Dip, newX, newY, ...`. Row order is significant
//! and is preserved by every operation here.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use thiserror::Error;

/// Errors that can occur while loading or querying a dataset.
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Empty file: {0}")]
    EmptyFile(PathBuf),

    #[error("Missing required columns: {0}")]
    MissingColumns(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("row {row} has {found} cells, expected {expected}")]
    RowLength {
        row: usize,
        found: usize,
        expected: usize,
    },
}

/// Result type for loader operations.
pub type Result<T> = std::result::Result<T, LoaderError>;

/// Ordered table with named columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    headers: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Creates an empty dataset with the given column names.
    ///
    /// When a name repeats, lookups resolve to its first occurrence.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let mut index = HashMap::with_capacity(headers.len());
        for (i, name) in headers.iter().enumerate() {
            index.entry(name.clone()).or_insert(i);
        }
        Self {
            headers,
            index,
            rows: Vec::new(),
        }
    }

    /// Appends a row. The row must have one cell per column.
    pub fn push_row<I, S>(&mut self, cells: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = cells.into_iter().map(Into::into).collect();
        if row.len() != self.headers.len() {
            return Err(LoaderError::RowLength {
                row: self.rows.len(),
                found: row.len(),
                expected: self.headers.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Column names in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the dataset has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_index(&self, name: &str) -> Result<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| LoaderError::MissingColumns(name.to_string()))
    }

    /// Text values of a column, in row order.
    pub fn column(&self, name: &str) -> Result<Vec<&str>> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    /// Values of a column parsed as `f64`, in row order.
    ///
    /// # Errors
    ///
    /// Returns `MissingColumns` if the column does not exist and `ParseError`
    /// for the first cell that is not a number.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>> {
        let idx = self.column_index(name)?;
        self.rows
            .iter()
            .enumerate()
            .map(|(row_idx, row)| {
                let cell = row[idx].as_str();
                cell.trim().parse::<f64>().map_err(|_| {
                    LoaderError::ParseError(format!(
                        "column '{}', row {}: '{}' is not a number",
                        name, row_idx, cell
                    ))
                })
            })
            .collect()
    }
}

/// Load a dataset from a headered CSV file.
///
/// Fields are trimmed; rows keep their file order.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, if a row has the
/// wrong number of fields, or if the file has no data rows.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(BufReader::new(file));

    let headers = reader.headers()?.clone();
    let mut dataset = Dataset::new(headers.iter());

    for result in reader.records() {
        let record = result?;
        dataset.push_row(record.iter())?;
    }

    if dataset.is_empty() {
        return Err(LoaderError::EmptyFile(path.to_path_buf()));
    }

    log::debug!(
        "Loaded {} rows x {} columns from {}",
        dataset.len(),
        dataset.headers().len(),
        path.display()
    );

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample() -> Dataset {
        let mut ds = Dataset::new(["NLMO", "X", "Y"]);
        ds.push_row(["1", "0.5", "-1.25"]).unwrap();
        ds.push_row(["2", "3", "4"]).unwrap();
        ds
    }

    #[test]
    fn test_dataset_columns() {
        let ds = sample();
        assert_eq!(ds.len(), 2);
        assert!(!ds.is_empty());
        assert!(ds.column("x").is_err());
        assert_eq!(ds.column("NLMO").unwrap(), vec!["1", "2"]);
        assert_eq!(ds.numeric_column("Y").unwrap(), vec![-1.25, 4.0]);
    }

    #[test]
    fn test_missing_column() {
        let ds = sample();
        match ds.numeric_column("newXa") {
            Err(LoaderError::MissingColumns(name)) => assert_eq!(name, "newXa"),
            other => panic!("Expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_cell() {
        let mut ds = Dataset::new(["NLMO", "X"]);
        ds.push_row(["1", "abc"]).unwrap();
        let err = ds.numeric_column("X").unwrap_err();
        assert!(matches!(err, LoaderError::ParseError(_)));
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn test_push_row_length_mismatch() {
        let mut ds = Dataset::new(["NLMO", "X", "Y"]);
        let err = ds.push_row(["1", "2"]).unwrap_err();
        assert!(matches!(
            err,
            LoaderError::RowLength {
                row: 0,
                found: 2,
                expected: 3
            }
        ));
        assert!(ds.is_empty());
    }

    #[test]
    fn test_load_csv_preserves_order() -> Result<()> {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "NLMO, Type, newXa, newYa").unwrap();
        writeln!(file, "12, BD, 1.0, 2.0").unwrap();
        writeln!(file, "3, LP, -0.5, 0.25").unwrap();
        writeln!(file, "7, BD, 4.0, 1.0").unwrap();
        file.flush().unwrap();

        let ds = load_csv(file.path())?;
        assert_eq!(ds.headers(), ["NLMO", "Type", "newXa", "newYa"]);
        assert_eq!(ds.column("NLMO")?, vec!["12", "3", "7"]);
        assert_eq!(ds.numeric_column("newXa")?, vec![1.0, -0.5, 4.0]);

        Ok(())
    }

    #[test]
    fn test_load_csv_header_only() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "NLMO,X,Y").unwrap();
        file.flush().unwrap();

        let result = load_csv(file.path());
        assert!(matches!(result, Err(LoaderError::EmptyFile(_))));
    }
}
