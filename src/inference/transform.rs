//! The stored preprocessing transform applied to prediction requests.
//!
//! One fitted step per dataset column, concatenated in schema order:
//! numeric columns are z-scored with the mean and deviation learned
//! offline, categorical columns become one-hot indicator blocks over the
//! levels observed during fitting. Unknown levels are an error, never an
//! all-zero row.
//!
//! The transform is always in its fitted state here; [`FeatureTransform::fit`]
//! exists to build artifacts from a reference table, and
//! [`FeatureTransform::from_params`] to restore a stored one.

use crate::inference::error::TransformError;
use crate::inference::request::{FieldSpec, FieldValue, PredictionRequest, ValueKind};
use crate::inference::traits::Transformer;
use crate::serialize::SerializableParams;
use crate::table::{Dtype, Table};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serializable parameters of one fitted column step.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ColumnStepParams {
    /// Z-score with the stored mean and (population) standard deviation.
    Standardize { mean: f64, std: f64 },
    /// One-hot over the stored category levels, error on unknown.
    OneHot { categories: Vec<String> },
}

/// Serializable parameters of one fitted column transform.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ColumnTransformParams {
    pub name: String,
    pub step: ColumnStepParams,
}

/// Serializable parameters of the whole fitted transform.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FeatureTransformParams {
    pub columns: Vec<ColumnTransformParams>,
}

#[derive(Clone, Debug)]
enum ColumnStep {
    Standardize { mean: f64, std: f64 },
    OneHot { categories: Vec<String> },
}

#[derive(Clone, Debug)]
struct ColumnTransform {
    name: String,
    step: ColumnStep,
}

impl ColumnTransform {
    fn width(&self) -> usize {
        match &self.step {
            ColumnStep::Standardize { .. } => 1,
            ColumnStep::OneHot { categories } => categories.len(),
        }
    }

    fn kind(&self) -> ValueKind {
        match &self.step {
            ColumnStep::Standardize { .. } => ValueKind::Numeric,
            ColumnStep::OneHot { .. } => ValueKind::Categorical,
        }
    }

    fn apply(&self, value: &FieldValue, out: &mut Vec<f64>) -> Result<(), TransformError> {
        match (&self.step, value) {
            (ColumnStep::Standardize { mean, std }, FieldValue::Number(v)) => {
                if !v.is_finite() {
                    return Err(TransformError::NonFiniteValue {
                        column: self.name.clone(),
                    });
                }
                out.push((v - mean) / std);
                Ok(())
            }
            (ColumnStep::OneHot { categories }, FieldValue::Category(v)) => {
                let hit = categories.iter().position(|c| c == v).ok_or_else(|| {
                    TransformError::UnseenCategory {
                        column: self.name.clone(),
                        value: v.clone(),
                    }
                })?;
                out.extend((0..categories.len()).map(|i| if i == hit { 1.0 } else { 0.0 }));
                Ok(())
            }
            _ => Err(TransformError::KindMismatch {
                column: self.name.clone(),
            }),
        }
    }
}

/// The fitted per-column preprocessing transform.
#[derive(Clone, Debug)]
pub struct FeatureTransform {
    columns: Vec<ColumnTransform>,
    schema: Vec<FieldSpec>,
    n_features_out: usize,
}

impl FeatureTransform {
    /// Learn per-column parameters from a reference table.
    ///
    /// Numeric columns record mean and population standard deviation over
    /// their non-missing values (zero deviation is replaced by 1.0 so
    /// constant columns pass through centered). Categorical columns record
    /// their sorted unique levels.
    ///
    /// # Errors
    /// Returns [`TransformError::EmptyData`] for a table without rows.
    pub fn fit(table: &Table) -> Result<Self, TransformError> {
        if table.is_empty() {
            return Err(TransformError::EmptyData(
                "cannot fit a transform on an empty table".to_string(),
            ));
        }

        let mut columns = Vec::with_capacity(table.n_columns());
        for col in table.columns() {
            let step = match col.dtype() {
                Dtype::Numeric => {
                    let values: Vec<f64> = col
                        .numeric_values()
                        .unwrap_or(&[])
                        .iter()
                        .copied()
                        .filter(|v| v.is_finite())
                        .collect();
                    if values.is_empty() {
                        return Err(TransformError::EmptyData(format!(
                            "column '{}' has no usable values",
                            col.name()
                        )));
                    }
                    let n = values.len() as f64;
                    let mean = values.iter().sum::<f64>() / n;
                    // population std (ddof=0)
                    let std = (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();
                    ColumnStep::Standardize {
                        mean,
                        std: if std == 0.0 { 1.0 } else { std },
                    }
                }
                Dtype::Categorical => {
                    let mut categories = col.unique_values().unwrap_or_default();
                    if categories.is_empty() {
                        return Err(TransformError::EmptyData(format!(
                            "column '{}' has no usable values",
                            col.name()
                        )));
                    }
                    categories.sort();
                    ColumnStep::OneHot { categories }
                }
            };
            columns.push(ColumnTransform {
                name: col.name().to_string(),
                step,
            });
        }

        Ok(Self::from_columns(columns))
    }

    fn from_columns(columns: Vec<ColumnTransform>) -> Self {
        let schema = columns
            .iter()
            .map(|c| FieldSpec::new(c.name.clone(), c.kind()))
            .collect();
        let n_features_out = columns.iter().map(|c| c.width()).sum();
        Self {
            columns,
            schema,
            n_features_out,
        }
    }

    /// The column set and order this transform was fitted on.
    pub fn schema(&self) -> &[FieldSpec] {
        &self.schema
    }

    /// Width of the produced feature vector.
    pub fn n_features_out(&self) -> usize {
        self.n_features_out
    }

    /// Extract parameters for storage.
    pub fn extract_params(&self) -> FeatureTransformParams {
        FeatureTransformParams {
            columns: self
                .columns
                .iter()
                .map(|c| ColumnTransformParams {
                    name: c.name.clone(),
                    step: match &c.step {
                        ColumnStep::Standardize { mean, std } => ColumnStepParams::Standardize {
                            mean: *mean,
                            std: *std,
                        },
                        ColumnStep::OneHot { categories } => ColumnStepParams::OneHot {
                            categories: categories.clone(),
                        },
                    },
                })
                .collect(),
        }
    }

    /// Reconstruct a fitted transform from stored parameters.
    ///
    /// # Errors
    /// Returns [`TransformError::EmptyData`] for parameters describing no
    /// columns, or a one-hot step with no categories.
    pub fn from_params(params: FeatureTransformParams) -> Result<Self, TransformError> {
        if params.columns.is_empty() {
            return Err(TransformError::EmptyData(
                "transform parameters describe no columns".to_string(),
            ));
        }

        let mut columns = Vec::with_capacity(params.columns.len());
        for cp in params.columns {
            let step = match cp.step {
                ColumnStepParams::Standardize { mean, std } => ColumnStep::Standardize {
                    mean,
                    std: if std == 0.0 { 1.0 } else { std },
                },
                ColumnStepParams::OneHot { categories } => {
                    if categories.is_empty() {
                        return Err(TransformError::EmptyData(format!(
                            "column '{}' has no categories",
                            cp.name
                        )));
                    }
                    ColumnStep::OneHot { categories }
                }
            };
            columns.push(ColumnTransform {
                name: cp.name,
                step,
            });
        }

        Ok(Self::from_columns(columns))
    }

    /// Save the fitted transform to a file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let bytes = self
            .extract_params()
            .to_bytes()
            .map_err(std::io::Error::other)?;
        std::fs::write(path, bytes)
    }
}

impl Transformer for FeatureTransform {
    fn transform(&self, request: &PredictionRequest) -> Result<Vec<f64>, TransformError> {
        let mut out = Vec::with_capacity(self.n_features_out);
        for column in &self.columns {
            let value =
                request
                    .get(&column.name)
                    .ok_or_else(|| TransformError::UnknownColumn {
                        name: column.name.clone(),
                    })?;
            column.apply(value, &mut out)?;
        }
        Ok(out)
    }
}
