//! The stored regression model.
//!
//! A plain linear scorer `y = w·x + b` restored from serialized parameters.
//! Which algorithm produced the weights is irrelevant here; the dashboard
//! treats the artifact as a black box behind the [`Regressor`] seam, so the
//! offline training side can swap model families without touching this
//! crate.

use crate::inference::traits::Regressor;
use crate::serialize::SerializableParams;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serializable parameters of the stored regression model.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RidgeParams {
    pub weights: Vec<f64>,
    pub bias: f64,
}

/// Inference-only linear regressor restored from [`RidgeParams`].
#[derive(Clone, Debug)]
pub struct RidgeRegressor {
    params: RidgeParams,
}

impl RidgeRegressor {
    pub fn new(params: RidgeParams) -> Self {
        Self { params }
    }

    /// Width of the feature vector this model expects.
    pub fn n_features(&self) -> usize {
        self.params.weights.len()
    }

    pub fn extract_params(&self) -> RidgeParams {
        self.params.clone()
    }

    /// Save the model parameters to a file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let bytes = self.params.to_bytes().map_err(std::io::Error::other)?;
        std::fs::write(path, bytes)
    }
}

impl Regressor for RidgeRegressor {
    /// Score one feature vector on the model's training scale.
    ///
    /// A vector of the wrong width yields NaN, which the pipeline reports
    /// as a model failure.
    fn predict(&self, features: &[f64]) -> f64 {
        if features.len() != self.params.weights.len() {
            return f64::NAN;
        }
        self.params
            .weights
            .iter()
            .zip(features.iter())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.params.bias
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict_dot_plus_bias() {
        let model = RidgeRegressor::new(RidgeParams {
            weights: vec![2.0, -1.0],
            bias: 0.5,
        });
        assert!((model.predict(&[3.0, 4.0]) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_wrong_width_yields_nan() {
        let model = RidgeRegressor::new(RidgeParams {
            weights: vec![1.0, 1.0],
            bias: 0.0,
        });
        assert!(model.predict(&[1.0]).is_nan());
    }

    #[test]
    fn test_params_roundtrip_through_file() {
        let model = RidgeRegressor::new(RidgeParams {
            weights: vec![0.25, 0.5, 1.0],
            bias: 11.0,
        });
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.bin");
        model.save_to_file(&path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let restored = RidgeRegressor::new(RidgeParams::from_bytes(&bytes).unwrap());
        assert_eq!(restored.n_features(), 3);
        assert!((restored.predict(&[1.0, 1.0, 1.0]) - model.predict(&[1.0, 1.0, 1.0])).abs() < 1e-12);
    }
}
