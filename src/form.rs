//! Dynamic form model for the Prediction view.
//!
//! Instead of per-type rendering branches in every view, the loaded table
//! is reduced once to a list of generic field descriptors (name, kind,
//! domain) and rendered uniformly: numeric columns become bounded entries
//! clamped to the observed min/max, categorical columns become closed
//! choices over the observed unique values.

use crate::inference::{FieldValue, PredictionRequest};
use crate::table::{Dtype, Table};
use std::fmt;

/// Domain of one form field.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldKind {
    /// Bounded numeric entry; submissions are clamped into `[min, max]`.
    Numeric { min: f64, max: f64 },
    /// Closed choice over the observed unique values.
    Categorical { choices: Vec<String> },
}

/// One input field of the prediction form.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
}

/// Error for a single rejected form entry.
#[derive(Debug)]
pub enum FormError {
    NotNumeric { field: String, input: String },
    UnknownChoice { field: String, input: String },
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::NotNumeric { field, input } => {
                write!(f, "'{}' is not a number for field '{}'", input, field)
            }
            FormError::UnknownChoice { field, input } => {
                write!(f, "'{}' is not a valid choice for field '{}'", input, field)
            }
        }
    }
}

impl std::error::Error for FormError {}

impl FieldDescriptor {
    /// Default value shown before the user types anything: the lower bound
    /// for numeric fields, the first choice for categorical ones.
    pub fn default_value(&self) -> FieldValue {
        match &self.kind {
            FieldKind::Numeric { min, .. } => FieldValue::Number(*min),
            FieldKind::Categorical { choices } => {
                FieldValue::Category(choices.first().cloned().unwrap_or_default())
            }
        }
    }

    /// Human-readable domain, shown next to the prompt.
    pub fn domain_display(&self) -> String {
        match &self.kind {
            FieldKind::Numeric { min, max } => format!("{} .. {}", min, max),
            FieldKind::Categorical { choices } => choices.join(" | "),
        }
    }

    /// Parse one text entry into a value inside this field's domain.
    ///
    /// Numeric entries are clamped to the observed bounds rather than
    /// rejected; categorical entries must match a known choice exactly.
    ///
    /// # Errors
    /// Returns [`FormError`] for unparseable numbers and unknown choices.
    pub fn parse(&self, input: &str) -> Result<FieldValue, FormError> {
        let input = input.trim();
        match &self.kind {
            FieldKind::Numeric { min, max } => {
                let value: f64 = input.parse().map_err(|_| FormError::NotNumeric {
                    field: self.name.clone(),
                    input: input.to_string(),
                })?;
                Ok(FieldValue::Number(value.clamp(*min, *max)))
            }
            FieldKind::Categorical { choices } => {
                if choices.iter().any(|c| c == input) {
                    Ok(FieldValue::Category(input.to_string()))
                } else {
                    Err(FormError::UnknownChoice {
                        field: self.name.clone(),
                        input: input.to_string(),
                    })
                }
            }
        }
    }
}

/// Compute the field list for a loaded table, one descriptor per column in
/// table order. Columns without any usable values are skipped.
pub fn field_descriptors(table: &Table) -> Vec<FieldDescriptor> {
    table
        .columns()
        .iter()
        .filter_map(|col| {
            let kind = match col.dtype() {
                Dtype::Numeric => {
                    let (min, max) = col.numeric_range()?;
                    FieldKind::Numeric { min, max }
                }
                Dtype::Categorical => {
                    let choices = col.unique_values()?;
                    if choices.is_empty() {
                        return None;
                    }
                    FieldKind::Categorical { choices }
                }
            };
            Some(FieldDescriptor {
                name: col.name().to_string(),
                kind,
            })
        })
        .collect()
}

/// Assemble a request from parsed values in descriptor order.
pub fn build_request(
    descriptors: &[FieldDescriptor],
    values: Vec<FieldValue>,
) -> PredictionRequest {
    PredictionRequest::from_pairs(
        descriptors
            .iter()
            .map(|d| d.name.clone())
            .zip(values)
            .collect(),
    )
}
