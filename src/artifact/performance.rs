//! Precomputed model-performance tables.
//!
//! One table per model variant, produced by the offline evaluation run and
//! only displayed here. Rows compare a metric on the training and test
//! splits.

use serde::{Deserialize, Serialize};

/// The five model variants evaluated offline, in display order, paired
/// with the file stem their table is stored under.
pub const MODEL_VARIANTS: [(&str, &str); 5] = [
    ("Linear Regression", "lr_perform"),
    ("ElasticNet", "elasticnet_perform"),
    ("Random Forest Regressor", "rfr_perform"),
    ("XGBoost", "xgb_perform"),
    ("LightGBM", "lgb_perform"),
];

/// One metric row: name plus train/test scores.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRow {
    pub metric: String,
    pub train: f64,
    pub test: f64,
}

/// Read-only metric table for one model variant.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceTable {
    pub rows: Vec<PerformanceRow>,
}

impl PerformanceTable {
    pub fn new(rows: Vec<PerformanceRow>) -> Self {
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Metric names in row order.
    pub fn metric_names(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.metric.as_str()).collect()
    }
}
