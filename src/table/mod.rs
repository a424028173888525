//! In-memory tabular dataset with load-time column typing.
//!
//! The dashboard discovers its schema from the data rather than hard-coding
//! it: a delimited file is read once, every column is classified as numeric
//! or categorical, and all later queries (ranges, unique values, statistics)
//! are pure functions of the loaded table.
//!
//! Missing values are represented as `f64::NAN` in numeric columns and as
//! the empty string in categorical columns.

use csv::ReaderBuilder;
use std::fmt;
use std::path::Path;

mod stats;

pub use stats::ColumnSummary;

/// Column type classification.
///
/// A column is [`Dtype::Numeric`] iff every non-missing entry parses as a
/// float and at least one entry does; otherwise it is [`Dtype::Categorical`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dtype {
    Numeric,
    Categorical,
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dtype::Numeric => write!(f, "numeric"),
            Dtype::Categorical => write!(f, "categorical"),
        }
    }
}

/// Error type for dataset access.
#[derive(Debug)]
pub enum DatasetError {
    /// The dataset file does not exist.
    NotFound { path: String },
    /// The file exists but could not be parsed as a delimited table.
    Malformed { path: String, reason: String },
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::NotFound { path } => {
                write!(f, "dataset file not found: {}", path)
            }
            DatasetError::Malformed { path, reason } => {
                write!(f, "dataset file {} is malformed: {}", path, reason)
            }
        }
    }
}

impl std::error::Error for DatasetError {}

/// Values of a single column, split by classification.
#[derive(Clone, Debug)]
pub enum ColumnData {
    /// Missing entries are `f64::NAN`.
    Numeric(Vec<f64>),
    /// Missing entries are the empty string.
    Categorical(Vec<String>),
}

/// One named column of the dataset.
#[derive(Clone, Debug)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dtype(&self) -> Dtype {
        match self.data {
            ColumnData::Numeric(_) => Dtype::Numeric,
            ColumnData::Categorical(_) => Dtype::Categorical,
        }
    }

    pub fn len(&self) -> usize {
        match &self.data {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Categorical(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Numeric values of this column, `None` for categorical columns.
    pub fn numeric_values(&self) -> Option<&[f64]> {
        match &self.data {
            ColumnData::Numeric(v) => Some(v),
            ColumnData::Categorical(_) => None,
        }
    }

    /// Categorical values of this column, `None` for numeric columns.
    pub fn categorical_values(&self) -> Option<&[String]> {
        match &self.data {
            ColumnData::Categorical(v) => Some(v),
            ColumnData::Numeric(_) => None,
        }
    }

    /// Observed (min, max) over non-missing values of a numeric column.
    pub fn numeric_range(&self) -> Option<(f64, f64)> {
        let values = self.numeric_values()?;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in values.iter().filter(|v| v.is_finite()) {
            min = min.min(v);
            max = max.max(v);
        }
        if min.is_finite() {
            Some((min, max))
        } else {
            None
        }
    }

    /// Unique non-missing values of a categorical column, in first-seen order.
    pub fn unique_values(&self) -> Option<Vec<String>> {
        let values = self.categorical_values()?;
        let mut seen = Vec::new();
        for v in values.iter().filter(|v| !v.is_empty()) {
            if !seen.iter().any(|s: &String| s == v) {
                seen.push(v.clone());
            }
        }
        Some(seen)
    }

    /// Cell rendered for display.
    pub fn cell_display(&self, row: usize) -> String {
        match &self.data {
            ColumnData::Numeric(v) => {
                let x = v.get(row).copied().unwrap_or(f64::NAN);
                if x.is_nan() {
                    "NaN".to_string()
                } else {
                    format!("{}", x)
                }
            }
            ColumnData::Categorical(v) => v.get(row).cloned().unwrap_or_default(),
        }
    }
}

/// An immutable columnar table loaded from a delimited file.
#[derive(Clone, Debug, Default)]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    /// The table a missing dataset degrades to: no columns, no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table directly from named string columns, classifying each.
    ///
    /// All columns must have the same length.
    pub fn from_raw_columns(raw: Vec<(String, Vec<String>)>) -> Self {
        let n_rows = raw.first().map(|(_, v)| v.len()).unwrap_or(0);
        let columns = raw
            .into_iter()
            .map(|(name, cells)| Column {
                name,
                data: classify(cells),
            })
            .collect();
        Self { columns, n_rows }
    }

    /// Load a table from a delimited file with a header row.
    ///
    /// # Errors
    /// Returns [`DatasetError::NotFound`] if the file does not exist, or
    /// [`DatasetError::Malformed`] if it cannot be parsed. Callers surface
    /// the message and continue with [`Table::empty`] rather than aborting.
    pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DatasetError::NotFound {
                path: path.display().to_string(),
            });
        }

        let malformed = |reason: String| DatasetError::Malformed {
            path: path.display().to_string(),
            reason,
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(|e| malformed(e.to_string()))?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| malformed(e.to_string()))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        for record in reader.records() {
            let record = record.map_err(|e| malformed(e.to_string()))?;
            for (i, column) in cells.iter_mut().enumerate() {
                column.push(record.get(i).unwrap_or("").trim().to_string());
            }
        }

        Ok(Self::from_raw_columns(
            headers.into_iter().zip(cells).collect(),
        ))
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0 || self.columns.is_empty()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn dtype(&self, name: &str) -> Option<Dtype> {
        self.column(name).map(|c| c.dtype())
    }

    /// Columns classified as numeric, in table order.
    pub fn numeric_columns(&self) -> Vec<&Column> {
        self.columns
            .iter()
            .filter(|c| c.dtype() == Dtype::Numeric)
            .collect()
    }
}

/// Classify raw cells: numeric iff all non-missing entries parse as floats
/// and at least one does.
fn classify(cells: Vec<String>) -> ColumnData {
    let mut any_value = false;
    let all_numeric = cells.iter().filter(|c| !c.is_empty()).all(|c| {
        any_value = true;
        c.parse::<f64>().is_ok()
    });

    if all_numeric && any_value {
        ColumnData::Numeric(
            cells
                .into_iter()
                .map(|c| {
                    if c.is_empty() {
                        f64::NAN
                    } else {
                        c.parse::<f64>().unwrap_or(f64::NAN)
                    }
                })
                .collect(),
        )
    } else {
        ColumnData::Categorical(cells)
    }
}
