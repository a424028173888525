//! Descriptive statistics over a loaded [`Table`].
//!
//! These back the Analysis view: a per-column summary in the shape of a
//! `describe()` table and a Pearson correlation matrix over the numeric
//! columns. Missing values are skipped per column (summaries) or pairwise
//! (correlation).

use super::{Dtype, Table};

/// Summary statistics for one numeric column.
#[derive(Clone, Debug)]
pub struct ColumnSummary {
    pub name: String,
    /// Number of non-missing values.
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (ddof = 1).
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl Table {
    /// Per-column summary statistics over the numeric columns.
    pub fn describe(&self) -> Vec<ColumnSummary> {
        self.columns()
            .iter()
            .filter(|c| c.dtype() == Dtype::Numeric)
            .filter_map(|c| {
                let values: Vec<f64> = c
                    .numeric_values()?
                    .iter()
                    .copied()
                    .filter(|v| v.is_finite())
                    .collect();
                summarize(c.name(), &values)
            })
            .collect()
    }

    /// Pearson correlation matrix over numeric columns only.
    ///
    /// Returns the column names and a square matrix in the same order. Each
    /// pair is computed over rows where both values are present; pairs with
    /// fewer than two complete rows or zero variance yield `NaN`.
    pub fn correlation_matrix(&self) -> (Vec<String>, Vec<Vec<f64>>) {
        let numeric = self.numeric_columns();
        let names: Vec<String> = numeric.iter().map(|c| c.name().to_string()).collect();

        let matrix = (0..numeric.len())
            .map(|i| {
                (0..numeric.len())
                    .map(|j| {
                        if i == j {
                            1.0
                        } else {
                            pearson(
                                numeric[i].numeric_values().unwrap_or(&[]),
                                numeric[j].numeric_values().unwrap_or(&[]),
                            )
                        }
                    })
                    .collect()
            })
            .collect();

        (names, matrix)
    }
}

fn summarize(name: &str, values: &[f64]) -> Option<ColumnSummary> {
    if values.is_empty() {
        return None;
    }

    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    let std = if count > 1 {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (count - 1) as f64).sqrt()
    } else {
        0.0
    };

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());

    Some(ColumnSummary {
        name: name.to_string(),
        count,
        mean,
        std,
        min: sorted[0],
        q25: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q75: quantile(&sorted, 0.75),
        max: sorted[count - 1],
    })
}

/// Linear-interpolation quantile over a pre-sorted slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = q * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Pearson correlation over pairwise-complete observations.
fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .zip(b.iter())
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(&x, &y)| (x, y))
        .collect();

    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_a = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_b = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in &pairs {
        cov += (x - mean_a) * (y - mean_b);
        var_a += (x - mean_a).powi(2);
        var_b += (y - mean_b).powi(2);
    }

    if var_a == 0.0 || var_b == 0.0 {
        return f64::NAN;
    }

    cov / (var_a.sqrt() * var_b.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table::from_raw_columns(vec![
            (
                "area".to_string(),
                vec!["10", "20", "30", "40"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
            ),
            (
                "price".to_string(),
                vec!["100", "200", "300", "400"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
            ),
            (
                "type".to_string(),
                vec!["a", "b", "a", "b"].into_iter().map(String::from).collect(),
            ),
        ])
    }

    #[test]
    fn test_describe_covers_numeric_columns_only() {
        let summaries = table().describe();
        assert_eq!(summaries.len(), 2);

        let area = &summaries[0];
        assert_eq!(area.name, "area");
        assert_eq!(area.count, 4);
        assert!((area.mean - 25.0).abs() < 1e-12);
        assert!((area.min - 10.0).abs() < 1e-12);
        assert!((area.max - 40.0).abs() < 1e-12);
        assert!((area.median - 25.0).abs() < 1e-12);
        assert!((area.q25 - 17.5).abs() < 1e-12);
        assert!((area.q75 - 32.5).abs() < 1e-12);
    }

    #[test]
    fn test_describe_skips_missing_values() {
        let table = Table::from_raw_columns(vec![(
            "area".to_string(),
            vec!["10", "", "30"].into_iter().map(String::from).collect(),
        )]);
        let summary = &table.describe()[0];
        assert_eq!(summary.count, 2);
        assert!((summary.mean - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_correlation_perfect_positive() {
        let (names, matrix) = table().correlation_matrix();
        assert_eq!(names, vec!["area", "price"]);
        assert!((matrix[0][1] - 1.0).abs() < 1e-12);
        assert!((matrix[1][0] - 1.0).abs() < 1e-12);
        assert!((matrix[0][0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_correlation_constant_column_is_nan() {
        let table = Table::from_raw_columns(vec![
            (
                "a".to_string(),
                vec!["1", "2", "3"].into_iter().map(String::from).collect(),
            ),
            (
                "b".to_string(),
                vec!["5", "5", "5"].into_iter().map(String::from).collect(),
            ),
        ]);
        let (_, matrix) = table.correlation_matrix();
        assert!(matrix[0][1].is_nan());
    }
}
