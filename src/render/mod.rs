//! View rendering: four pure functions from loaded state to page output.
//!
//! A rendered page is plain text plus the chart files written for it; the
//! driver prints the text and names the chart paths. Renderers never fail:
//! every degraded input (missing document, empty dataset, rejected
//! prediction) becomes an inline notice in the affected section while the
//! rest of the page renders normally.

use crate::artifact::ArtifactStore;
use crate::inference::PredictionRequest;
use crate::session::Page;
use std::path::{Path, PathBuf};

pub mod analysis;
pub mod charts;
pub mod home;
pub mod performance;
pub mod prediction;

pub use analysis::{AnalysisOptions, PlotKind};

/// Output of one view render: a title, a text body, and the chart files
/// written while rendering.
#[derive(Debug, Default)]
pub struct RenderedPage {
    pub title: String,
    pub body: String,
    pub charts: Vec<PathBuf>,
}

impl RenderedPage {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: String::new(),
            charts: Vec::new(),
        }
    }

    pub fn line(&mut self, text: impl AsRef<str>) {
        self.body.push_str(text.as_ref());
        self.body.push('\n');
    }

    pub fn blank(&mut self) {
        self.body.push('\n');
    }

    /// Inline, non-fatal error notice within the current section.
    pub fn notice(&mut self, message: impl AsRef<str>) {
        self.line(format!("[!] {}", message.as_ref()));
    }

    pub fn chart(&mut self, path: PathBuf) {
        self.line(format!("[chart] {}", path.display()));
        self.charts.push(path);
    }
}

/// View-local inputs accumulated by the driver between renders.
#[derive(Debug, Default)]
pub struct ViewState {
    pub analysis: AnalysisOptions,
    /// Echo the submitted record above the prediction result.
    pub echo_submission: bool,
    /// The record of the latest submit, if any.
    pub submitted: Option<PredictionRequest>,
}

/// Render the view the router currently selects.
pub fn render(
    store: &ArtifactStore,
    page: Page,
    state: &ViewState,
    chart_dir: &Path,
) -> RenderedPage {
    match page {
        Page::Home => home::render(store),
        Page::Analysis => analysis::render(store, &state.analysis, chart_dir),
        Page::Prediction => {
            prediction::render(store, state.submitted.as_ref(), state.echo_submission)
        }
        Page::Performance => performance::render(store, chart_dir),
    }
}

/// Fixed-width text table used by several views.
pub(crate) fn format_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.len());
            }
        }
    }

    let render_row = |cells: &[String]| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{:<width$}", c, width = widths.get(i).copied().unwrap_or(0)))
            .collect::<Vec<_>>()
            .join("  ")
    };

    let mut out = String::new();
    out.push_str(&render_row(headers));
    out.push('\n');
    out.push_str(&"-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));
    out.push('\n');
    for row in rows {
        out.push_str(&render_row(row));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::tests::seed_artifacts;
    use crate::config::Config;

    fn open_store(dir: &Path) -> (ArtifactStore, Config) {
        let config = seed_artifacts(dir);
        (ArtifactStore::open(&config).unwrap(), config)
    }

    #[test]
    fn test_every_page_renders() {
        let dir = tempfile::tempdir().unwrap();
        let (store, config) = open_store(dir.path());
        let state = ViewState::default();

        for &page in Page::ALL.iter() {
            let rendered = render(&store, page, &state, Path::new(&config.chart_dir));
            assert!(!rendered.title.is_empty());
            assert!(!rendered.body.is_empty());
        }
    }

    #[test]
    fn test_every_page_renders_without_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let config = seed_artifacts(dir.path());
        std::fs::remove_file(&config.dataset_path).unwrap();
        let store = ArtifactStore::open(&config).unwrap();
        let state = ViewState::default();

        for &page in Page::ALL.iter() {
            let rendered = render(&store, page, &state, Path::new(&config.chart_dir));
            assert!(!rendered.body.is_empty());
        }
    }

    #[test]
    fn test_format_table_alignment() {
        let out = format_table(
            &["metric".to_string(), "train".to_string()],
            &[
                vec!["rmse".to_string(), "0.11".to_string()],
                vec!["r2".to_string(), "0.94".to_string()],
            ],
        );
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("metric"));
        assert!(lines[2].starts_with("rmse"));
    }
}
