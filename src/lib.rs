//! # domus
//!
//! An interactive housing-price dashboard over pre-trained artifacts: it
//! loads a serialized regression model, its preprocessing transform, and
//! precomputed performance tables, lets a user browse the housing dataset,
//! compare columns visually, and request price predictions for records
//! they enter.
//!
//! ## Core Design Principles
//!
//! - **Artifacts are opaque**: model and transform are deserialized
//!   parameter structs behind two narrow traits ([`inference::Transformer`],
//!   [`inference::Regressor`]); swapping the offline model never touches
//!   the prediction path.
//! - **Schema is discovered, not declared**: the dataset's columns, types,
//!   ranges, and category levels are read from the file once and drive the
//!   form, the charts, and request validation uniformly.
//! - **Degradation over termination**: every missing file or rejected
//!   input becomes an inline notice in the affected view; only the two
//!   required artifacts (model, transform) abort startup.
//! - **Explicit session state**: the current page lives in a [`session::Session`]
//!   value owned by the driver loop; there are no process-wide globals.
//!
//! ## Module Structure
//!
//! - `table` — dataset loading, column typing, statistics
//! - `artifact` — one-time loading and caching of all static inputs
//! - `inference` — request validation, stored transform, stored model,
//!   log-scale inversion
//! - `session` — the page router
//! - `form` — schema-driven field descriptors for the prediction form
//! - `render` — the four view renderers and chart generation
//! - `config` — resource paths from the environment
//! - `journal` — JSON-line session event log
//! - `serialize` — byte-level artifact parameter encoding

pub mod artifact;
pub mod config;
pub mod form;
pub mod inference;
pub mod journal;
pub mod render;
pub mod serialize;
pub mod session;
pub mod table;

pub use artifact::ArtifactStore;
pub use config::Config;
pub use inference::{PredictionError, PredictionPipeline, PredictionRequest};
pub use session::{Page, Session};
pub use table::Table;
