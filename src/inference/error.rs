//! Error types for the prediction path.

use std::fmt;

/// Error raised while fitting or applying the feature transform.
#[derive(Debug)]
pub enum TransformError {
    /// Fit was attempted on a table with no usable rows.
    EmptyData(String),
    /// The request lacks a column the transform was fitted on.
    UnknownColumn { name: String },
    /// A categorical value never seen during fitting.
    UnseenCategory { column: String, value: String },
    /// A numeric input that is NaN or infinite.
    NonFiniteValue { column: String },
    /// A numeric value where a category was expected, or vice versa.
    KindMismatch { column: String },
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::EmptyData(msg) => write!(f, "empty data: {}", msg),
            TransformError::UnknownColumn { name } => {
                write!(f, "request is missing column '{}'", name)
            }
            TransformError::UnseenCategory { column, value } => {
                write!(f, "unseen category '{}' for column '{}'", value, column)
            }
            TransformError::NonFiniteValue { column } => {
                write!(f, "non-finite value for column '{}'", column)
            }
            TransformError::KindMismatch { column } => {
                write!(f, "wrong value kind for column '{}'", column)
            }
        }
    }
}

impl std::error::Error for TransformError {}

/// Error returned by [`PredictionPipeline::predict`].
///
/// Every failure inside the pipeline is caught at its boundary and mapped
/// here; callers render the message inline and keep the session alive.
///
/// [`PredictionPipeline::predict`]: crate::inference::PredictionPipeline::predict
#[derive(Debug)]
pub enum PredictionError {
    /// Request column set, order, or kinds deviate from the fitted schema.
    SchemaMismatch { detail: String },
    /// The stored transform rejected an input value.
    TransformFailure(String),
    /// The underlying model produced no usable score.
    ModelFailure(String),
}

impl fmt::Display for PredictionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictionError::SchemaMismatch { detail } => {
                write!(f, "schema mismatch: {}", detail)
            }
            PredictionError::TransformFailure(msg) => {
                write!(f, "transform failure: {}", msg)
            }
            PredictionError::ModelFailure(msg) => {
                write!(f, "model failure: {}", msg)
            }
        }
    }
}

impl std::error::Error for PredictionError {}

impl From<TransformError> for PredictionError {
    fn from(err: TransformError) -> Self {
        PredictionError::TransformFailure(err.to_string())
    }
}
