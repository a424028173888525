//! The two narrow seams the prediction pipeline depends on.
//!
//! Concrete artifacts ([`FeatureTransform`], [`RidgeRegressor`]) implement
//! these; the pipeline never names a concrete model family. Anything that
//! can map a record to a vector and a vector to a score can serve.
//!
//! [`FeatureTransform`]: crate::inference::FeatureTransform
//! [`RidgeRegressor`]: crate::inference::RidgeRegressor

use crate::inference::error::TransformError;
use crate::inference::request::PredictionRequest;

/// Maps a validated record to a numeric feature vector.
pub trait Transformer {
    /// Apply the stored preprocessing to one record.
    ///
    /// # Errors
    /// Returns [`TransformError`] when an input value is outside what the
    /// fitted transform tolerates (unseen category, non-finite number).
    fn transform(&self, request: &PredictionRequest) -> Result<Vec<f64>, TransformError>;
}

/// Scores a feature vector.
///
/// The output is on whatever scale the model was trained on; the pipeline
/// owns the inversion back to original units. A regressor fed a vector of
/// the wrong width reports it by returning a non-finite score.
pub trait Regressor {
    fn predict(&self, features: &[f64]) -> f64;
}
