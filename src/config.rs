//! Resource locations for one dashboard process.
//!
//! Everything the dashboard reads or writes sits behind a path here, with
//! defaults matching the shipped `resources/` layout and every entry
//! overridable through the environment.

/// Paths and knobs resolved once at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Tabular dataset with a header row.
    pub dataset_path: String,
    /// Serialized regression model parameters.
    pub model_path: String,
    /// Serialized preprocessing transform parameters.
    pub pipeline_path: String,
    /// Directory holding one performance table per model variant.
    pub performance_dir: String,
    /// Plain-text dataset description shown on the Home view.
    pub description_path: String,
    /// HTML report embedded in the Analysis view.
    pub report_path: String,
    /// Directory chart PNGs are written into.
    pub chart_dir: String,
    /// JSON-line session journal.
    pub journal_path: String,
    /// Rows shown by the raw-data preview toggle.
    pub preview_rows: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            dataset_path: std::env::var("DOMUS_DATASET")
                .unwrap_or_else(|_| "data/housing.csv".to_string()),
            model_path: std::env::var("DOMUS_MODEL")
                .unwrap_or_else(|_| "resources/model/ridge_model.bin".to_string()),
            pipeline_path: std::env::var("DOMUS_PIPELINE")
                .unwrap_or_else(|_| "resources/pipeline/pipeline.bin".to_string()),
            performance_dir: std::env::var("DOMUS_PERFORMANCE_DIR")
                .unwrap_or_else(|_| "resources/performance".to_string()),
            description_path: std::env::var("DOMUS_DESCRIPTION")
                .unwrap_or_else(|_| "resources/data_description.txt".to_string()),
            report_path: std::env::var("DOMUS_REPORT")
                .unwrap_or_else(|_| "resources/data_report.html".to_string()),
            chart_dir: std::env::var("DOMUS_CHART_DIR").unwrap_or_else(|_| "charts".to_string()),
            journal_path: std::env::var("DOMUS_JOURNAL")
                .unwrap_or_else(|_| "session.journal".to_string()),
            preview_rows: std::env::var("DOMUS_PREVIEW_ROWS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
