//! Read-only store for everything the dashboard loads at startup.
//!
//! Loaded once per process and kept in memory; there is no invalidation
//! path, so every later access is a plain in-memory read. Strictness is
//! per resource:
//!
//! - model and pipeline artifacts are required; failing to load either
//!   aborts startup before anything is served;
//! - each performance table loads independently; a missing or corrupt one
//!   is kept as its error and rendered as an inline notice;
//! - the dataset degrades to an empty table with the error recorded;
//! - the description and report documents degrade the same way.

use crate::config::Config;
use crate::inference::{
    FeatureTransform, FeatureTransformParams, PredictionPipeline, RidgeParams, RidgeRegressor,
};
use crate::serialize::SerializableParams;
use crate::table::{DatasetError, Table};
use std::fmt;
use std::path::{Path, PathBuf};

pub mod performance;

pub use performance::{PerformanceRow, PerformanceTable, MODEL_VARIANTS};

/// Error type for artifact loading.
#[derive(Debug)]
pub enum ArtifactError {
    /// The artifact file does not exist.
    NotFound { path: String },
    /// The file exists but its contents are unusable.
    Corrupt { path: String, reason: String },
}

impl fmt::Display for ArtifactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactError::NotFound { path } => write!(f, "artifact not found: {}", path),
            ArtifactError::Corrupt { path, reason } => {
                write!(f, "artifact {} is corrupt: {}", path, reason)
            }
        }
    }
}

impl std::error::Error for ArtifactError {}

/// Deserialize a parameter struct from a file.
fn read_params<T: SerializableParams>(path: &Path) -> Result<T, ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::NotFound {
            path: path.display().to_string(),
        });
    }
    let bytes = std::fs::read(path).map_err(|e| ArtifactError::Corrupt {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    T::from_bytes(&bytes).map_err(|e| ArtifactError::Corrupt {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Read a static document verbatim.
fn read_document(path: &Path) -> Result<String, ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::NotFound {
            path: path.display().to_string(),
        });
    }
    std::fs::read_to_string(path).map_err(|e| ArtifactError::Corrupt {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// All static inputs of one dashboard process.
#[derive(Debug)]
pub struct ArtifactStore {
    transform: FeatureTransform,
    model: RidgeRegressor,
    performances: Vec<(&'static str, Result<PerformanceTable, ArtifactError>)>,
    table: Table,
    dataset_error: Option<DatasetError>,
    description: Result<String, ArtifactError>,
    report: Result<String, ArtifactError>,
}

impl ArtifactStore {
    /// Load everything once.
    ///
    /// # Errors
    /// Returns [`ArtifactError`] only for the required model and pipeline
    /// artifacts (including a width mismatch between the two); every other
    /// resource degrades into a recorded, per-view error.
    pub fn open(config: &Config) -> Result<Self, ArtifactError> {
        let transform_params: FeatureTransformParams =
            read_params(Path::new(&config.pipeline_path))?;
        let transform = FeatureTransform::from_params(transform_params).map_err(|e| {
            ArtifactError::Corrupt {
                path: config.pipeline_path.clone(),
                reason: e.to_string(),
            }
        })?;

        let model_params: RidgeParams = read_params(Path::new(&config.model_path))?;
        let model = RidgeRegressor::new(model_params);

        if model.n_features() != transform.n_features_out() {
            return Err(ArtifactError::Corrupt {
                path: config.model_path.clone(),
                reason: format!(
                    "model expects {} features but the pipeline produces {}",
                    model.n_features(),
                    transform.n_features_out()
                ),
            });
        }

        let performances = MODEL_VARIANTS
            .iter()
            .map(|&(name, stem)| {
                let path = PathBuf::from(&config.performance_dir).join(format!("{}.bin", stem));
                (name, read_params::<PerformanceTable>(&path))
            })
            .collect();

        let (table, dataset_error) = match Table::load_csv(&config.dataset_path) {
            Ok(table) => (table, None),
            Err(err) => (Table::empty(), Some(err)),
        };

        Ok(Self {
            transform,
            model,
            performances,
            table,
            dataset_error,
            description: read_document(Path::new(&config.description_path)),
            report: read_document(Path::new(&config.report_path)),
        })
    }

    /// The cached dataset; empty when loading failed.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// The recorded dataset-load error, if any.
    pub fn dataset_error(&self) -> Option<&DatasetError> {
        self.dataset_error.as_ref()
    }

    /// Dataset description document for the Home view.
    pub fn description(&self) -> Result<&str, &ArtifactError> {
        self.description.as_deref()
    }

    /// HTML report document for the Analysis view.
    pub fn report(&self) -> Result<&str, &ArtifactError> {
        self.report.as_deref()
    }

    /// Per-variant performance tables in display order.
    pub fn performances(&self) -> &[(&'static str, Result<PerformanceTable, ArtifactError>)] {
        &self.performances
    }

    /// Assemble the prediction pipeline over the loaded artifacts.
    pub fn pipeline(&self) -> PredictionPipeline<FeatureTransform, RidgeRegressor> {
        PredictionPipeline::new(
            self.transform.schema().to_vec(),
            self.transform.clone(),
            self.model.clone(),
        )
    }
}
