//! Prediction over pre-trained, deserialized artifacts.
//!
//! The stored model and preprocessing transform are opaque to this module's
//! pipeline: it depends only on the two narrow seams defined in
//! [`traits`] — something that turns a record into a feature vector, and
//! something that turns a feature vector into a score. Retraining or
//! swapping the offline model never touches the pipeline.
//!
//! # Flow
//!
//! 1. A [`PredictionRequest`] is validated against the schema the stored
//!    transform was fitted on (exact column set, order, and kinds).
//! 2. The [`FeatureTransform`] produces a numeric feature vector (z-scores
//!    for numeric columns, one-hot indicators for categorical ones).
//! 3. The [`RidgeRegressor`] scores the vector on the log target scale.
//! 4. The score is inverted with `exp_m1` back into a price.
//!
//! Every failure along the way maps to one [`PredictionError`] variant;
//! nothing propagates raw to the caller.

pub mod error;
pub mod model;
pub mod pipeline;
pub mod request;
pub mod traits;
pub mod transform;

pub use error::{PredictionError, TransformError};
pub use model::{RidgeParams, RidgeRegressor};
pub use pipeline::PredictionPipeline;
pub use request::{FieldSpec, FieldValue, PredictionRequest, ValueKind};
pub use traits::{Regressor, Transformer};
pub use transform::{
    ColumnStepParams, ColumnTransformParams, FeatureTransform, FeatureTransformParams,
};
