//! Validation, transform, scoring, and target inversion for one request.

use crate::inference::error::PredictionError;
use crate::inference::request::{FieldSpec, PredictionRequest};
use crate::inference::traits::{Regressor, Transformer};

/// Forward target transform used during offline training.
pub fn to_log_scale(price: f64) -> f64 {
    price.ln_1p()
}

/// Inverse of [`to_log_scale`], floored at zero (prices are non-negative).
pub fn from_log_scale(score: f64) -> f64 {
    score.exp_m1().max(0.0)
}

/// The prediction pipeline: schema gate, stored transform, stored model,
/// log-scale inversion.
///
/// Generic over the two seams so the concrete artifacts stay swappable;
/// the fitted schema travels with the pipeline and every request is checked
/// against it before anything else runs.
pub struct PredictionPipeline<T: Transformer, R: Regressor> {
    schema: Vec<FieldSpec>,
    transformer: T,
    regressor: R,
}

impl<T: Transformer, R: Regressor> PredictionPipeline<T, R> {
    pub fn new(schema: Vec<FieldSpec>, transformer: T, regressor: R) -> Self {
        Self {
            schema,
            transformer,
            regressor,
        }
    }

    /// The column set and order requests must carry.
    pub fn schema(&self) -> &[FieldSpec] {
        &self.schema
    }

    /// Predict a price for one request.
    ///
    /// # Errors
    /// - [`PredictionError::SchemaMismatch`] before the transform or model
    ///   run at all;
    /// - [`PredictionError::TransformFailure`] when the stored transform
    ///   rejects an input;
    /// - [`PredictionError::ModelFailure`] when the model yields no usable
    ///   score.
    pub fn predict(&self, request: &PredictionRequest) -> Result<f64, PredictionError> {
        self.validate(request)?;

        let features = self.transformer.transform(request)?;
        let score = self.regressor.predict(&features);
        if !score.is_finite() {
            return Err(PredictionError::ModelFailure(format!(
                "model returned a non-finite score ({})",
                score
            )));
        }

        Ok(from_log_scale(score))
    }

    /// Exact column set, order, and kind check against the fitted schema.
    fn validate(&self, request: &PredictionRequest) -> Result<(), PredictionError> {
        if request.len() != self.schema.len() {
            return Err(PredictionError::SchemaMismatch {
                detail: format!(
                    "expected {} columns, got {}",
                    self.schema.len(),
                    request.len()
                ),
            });
        }

        for (spec, (name, value)) in self.schema.iter().zip(request.iter()) {
            if spec.name != name {
                return Err(PredictionError::SchemaMismatch {
                    detail: format!("expected column '{}', got '{}'", spec.name, name),
                });
            }
            if spec.kind != value.kind() {
                return Err(PredictionError::SchemaMismatch {
                    detail: format!(
                        "column '{}' expects a {} value, got {}",
                        spec.name,
                        spec.kind,
                        value.kind()
                    ),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::error::TransformError;
    use crate::inference::request::{FieldValue, ValueKind};
    use crate::inference::{FeatureTransform, RidgeParams, RidgeRegressor};
    use crate::table::Table;
    use std::cell::Cell;

    /// Regressor probe counting invocations; the schema gate must keep it
    /// from ever running on a malformed request.
    struct CountingRegressor {
        calls: Cell<usize>,
        output: f64,
    }

    impl Regressor for CountingRegressor {
        fn predict(&self, _features: &[f64]) -> f64 {
            self.calls.set(self.calls.get() + 1);
            self.output
        }
    }

    fn housing_pipeline(
        output: f64,
    ) -> PredictionPipeline<FeatureTransform, CountingRegressor> {
        let table = Table::from_raw_columns(vec![
            (
                "area".to_string(),
                vec!["20", "500"].into_iter().map(String::from).collect(),
            ),
            (
                "type".to_string(),
                vec!["house", "apartment"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
            ),
        ]);
        let transform = FeatureTransform::fit(&table).unwrap();
        let schema = transform.schema().to_vec();
        PredictionPipeline::new(
            schema,
            transform,
            CountingRegressor {
                calls: Cell::new(0),
                output,
            },
        )
    }

    fn valid_request() -> PredictionRequest {
        let mut req = PredictionRequest::new();
        req.push("area", FieldValue::Number(120.0));
        req.push("type", FieldValue::Category("house".to_string()));
        req
    }

    #[test]
    fn test_valid_request_finite_non_negative() {
        let pipeline = housing_pipeline(12.3);
        let price = pipeline.predict(&valid_request()).unwrap();
        assert!(price.is_finite());
        assert!(price >= 0.0);
        assert!((price - 12.3f64.exp_m1()).abs() < 1e-6);
    }

    #[test]
    fn test_missing_column_never_reaches_model() {
        let pipeline = housing_pipeline(1.0);
        let mut req = PredictionRequest::new();
        req.push("area", FieldValue::Number(120.0));

        let err = pipeline.predict(&req).unwrap_err();
        assert!(matches!(err, PredictionError::SchemaMismatch { .. }));
        assert_eq!(pipeline.regressor.calls.get(), 0);
    }

    #[test]
    fn test_extra_column_rejected() {
        let pipeline = housing_pipeline(1.0);
        let mut req = valid_request();
        req.push("garden", FieldValue::Number(1.0));

        let err = pipeline.predict(&req).unwrap_err();
        assert!(matches!(err, PredictionError::SchemaMismatch { .. }));
        assert_eq!(pipeline.regressor.calls.get(), 0);
    }

    #[test]
    fn test_reordered_columns_rejected() {
        let pipeline = housing_pipeline(1.0);
        let mut req = PredictionRequest::new();
        req.push("type", FieldValue::Category("house".to_string()));
        req.push("area", FieldValue::Number(120.0));

        let err = pipeline.predict(&req).unwrap_err();
        assert!(matches!(err, PredictionError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_kind_mismatch_rejected() {
        let pipeline = housing_pipeline(1.0);
        let mut req = PredictionRequest::new();
        req.push("area", FieldValue::Category("large".to_string()));
        req.push("type", FieldValue::Category("house".to_string()));

        let err = pipeline.predict(&req).unwrap_err();
        assert!(matches!(err, PredictionError::SchemaMismatch { .. }));
        assert_eq!(pipeline.regressor.calls.get(), 0);
    }

    #[test]
    fn test_unseen_category_maps_to_transform_failure() {
        let pipeline = housing_pipeline(1.0);
        let mut req = PredictionRequest::new();
        req.push("area", FieldValue::Number(120.0));
        req.push("type", FieldValue::Category("castle".to_string()));

        let err = pipeline.predict(&req).unwrap_err();
        assert!(matches!(err, PredictionError::TransformFailure(_)));
        assert_eq!(pipeline.regressor.calls.get(), 0);
    }

    #[test]
    fn test_non_finite_score_is_model_failure() {
        let pipeline = housing_pipeline(f64::NAN);
        let err = pipeline.predict(&valid_request()).unwrap_err();
        assert!(matches!(err, PredictionError::ModelFailure(_)));
        assert_eq!(pipeline.regressor.calls.get(), 1);
    }

    #[test]
    fn test_log_scale_roundtrip() {
        for price in [0.0, 1.0, 95_000.0, 487_500.25] {
            let roundtrip = from_log_scale(to_log_scale(price));
            assert!(
                (roundtrip - price).abs() < 1e-6 * price.max(1.0),
                "price {} came back as {}",
                price,
                roundtrip
            );
        }
    }

    #[test]
    fn test_negative_score_floors_at_zero() {
        let pipeline = housing_pipeline(-5.0);
        assert_eq!(pipeline.predict(&valid_request()).unwrap(), 0.0);
    }

    #[test]
    fn test_end_to_end_with_ridge_model() {
        let table = Table::from_raw_columns(vec![
            (
                "area".to_string(),
                vec!["20", "500"].into_iter().map(String::from).collect(),
            ),
            (
                "type".to_string(),
                vec!["house", "apartment"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
            ),
        ]);
        let transform = FeatureTransform::fit(&table).unwrap();
        let schema = transform.schema().to_vec();
        let model = RidgeRegressor::new(RidgeParams {
            weights: vec![0.4, 11.0, 12.0],
            bias: 0.1,
        });
        let pipeline = PredictionPipeline::new(schema, transform, model);

        let price = pipeline.predict(&valid_request()).unwrap();
        assert!(price.is_finite() && price > 0.0);
        assert_eq!(pipeline.schema()[0].kind, ValueKind::Numeric);
    }

    #[test]
    fn test_transform_error_text_travels() {
        let err: PredictionError = TransformError::UnseenCategory {
            column: "type".to_string(),
            value: "castle".to_string(),
        }
        .into();
        assert!(err.to_string().contains("castle"));
    }
}
