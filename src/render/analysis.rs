//! Analysis view: raw preview, descriptive statistics, a two-column
//! comparison chart, the correlation heatmap, and the embedded report.

use crate::artifact::ArtifactStore;
use crate::render::{charts, format_table, RenderedPage};
use crate::table::{Column, Dtype, Table};
use std::path::Path;

/// Which comparison a column pair gets, decided purely by dtypes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlotKind {
    /// Both numeric.
    Scatter,
    /// Both categorical.
    StackedBars,
    /// One of each: distribution of the numeric column per category.
    BoxPlot,
}

impl PlotKind {
    pub fn for_pair(x: Dtype, y: Dtype) -> PlotKind {
        match (x, y) {
            (Dtype::Numeric, Dtype::Numeric) => PlotKind::Scatter,
            (Dtype::Categorical, Dtype::Categorical) => PlotKind::StackedBars,
            _ => PlotKind::BoxPlot,
        }
    }
}

/// View-local inputs for the Analysis view.
#[derive(Clone, Debug)]
pub struct AnalysisOptions {
    /// Raw-data preview toggle.
    pub show_raw: bool,
    /// Rows the preview shows.
    pub preview_rows: usize,
    /// The column pair to compare, once chosen.
    pub pair: Option<(String, String)>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            show_raw: false,
            preview_rows: 10,
            pair: None,
        }
    }
}

pub fn render(store: &ArtifactStore, options: &AnalysisOptions, chart_dir: &Path) -> RenderedPage {
    let mut page = RenderedPage::new("Data Analysis");
    let table = store.table();

    if let Some(err) = store.dataset_error() {
        page.notice(err.to_string());
    }
    if table.is_empty() {
        page.line("No dataset loaded; nothing to analyze.");
        return page;
    }

    if options.show_raw {
        page.line("== Raw data ==");
        render_preview(&mut page, table, options.preview_rows);
        page.blank();
    }

    page.line("== Descriptive statistics ==");
    render_describe(&mut page, table);
    page.blank();

    page.line("== Two-column comparison ==");
    match &options.pair {
        None => page.line("Pick two columns with: plot <x> <y>"),
        Some((x, y)) => render_pair(&mut page, table, x, y, chart_dir),
    }
    page.blank();

    page.line("== Correlation matrix ==");
    let (names, matrix) = table.correlation_matrix();
    match charts::correlation_heatmap(chart_dir, &names, &matrix) {
        Ok(path) => page.chart(path),
        Err(err) => page.notice(err.to_string()),
    }
    page.blank();

    page.line("== Data report ==");
    match store.report() {
        Ok(html) => page.line(html),
        Err(err) => page.notice(err.to_string()),
    }

    page
}

fn render_preview(page: &mut RenderedPage, table: &Table, preview_rows: usize) {
    let headers: Vec<String> = table.column_names().iter().map(|s| s.to_string()).collect();
    let shown = table.n_rows().min(preview_rows);
    let rows: Vec<Vec<String>> = (0..shown)
        .map(|row| {
            table
                .columns()
                .iter()
                .map(|c| c.cell_display(row))
                .collect()
        })
        .collect();
    page.line(format_table(&headers, &rows));
    if shown < table.n_rows() {
        page.line(format!("({} of {} rows)", shown, table.n_rows()));
    }
}

fn render_describe(page: &mut RenderedPage, table: &Table) {
    let summaries = table.describe();
    if summaries.is_empty() {
        page.notice("no numeric columns to summarize");
        return;
    }

    let headers: Vec<String> = ["column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let rows: Vec<Vec<String>> = summaries
        .iter()
        .map(|s| {
            vec![
                s.name.clone(),
                s.count.to_string(),
                format!("{:.3}", s.mean),
                format!("{:.3}", s.std),
                format!("{:.3}", s.min),
                format!("{:.3}", s.q25),
                format!("{:.3}", s.median),
                format!("{:.3}", s.q75),
                format!("{:.3}", s.max),
            ]
        })
        .collect();
    page.line(format_table(&headers, &rows));
}

fn render_pair(page: &mut RenderedPage, table: &Table, x: &str, y: &str, chart_dir: &Path) {
    let (col_x, col_y) = match (table.column(x), table.column(y)) {
        (Some(cx), Some(cy)) => (cx, cy),
        _ => {
            page.notice(format!("unknown column in pair '{}', '{}'", x, y));
            return;
        }
    };

    let result = match PlotKind::for_pair(col_x.dtype(), col_y.dtype()) {
        PlotKind::Scatter => {
            let points: Vec<(f64, f64)> = col_x
                .numeric_values()
                .unwrap_or(&[])
                .iter()
                .zip(col_y.numeric_values().unwrap_or(&[]))
                .filter(|(a, b)| a.is_finite() && b.is_finite())
                .map(|(&a, &b)| (a, b))
                .collect();
            charts::scatter(chart_dir, x, y, &points)
        }
        PlotKind::StackedBars => {
            let x_labels = col_x.unique_values().unwrap_or_default();
            let y_labels = col_y.unique_values().unwrap_or_default();
            let xs = col_x.categorical_values().unwrap_or(&[]);
            let ys = col_y.categorical_values().unwrap_or(&[]);

            let counts: Vec<Vec<f64>> = x_labels
                .iter()
                .map(|xl| {
                    y_labels
                        .iter()
                        .map(|yl| {
                            xs.iter()
                                .zip(ys.iter())
                                .filter(|(a, b)| *a == xl && *b == yl)
                                .count() as f64
                        })
                        .collect()
                })
                .collect();
            charts::stacked_bars(chart_dir, x, y, &x_labels, &y_labels, &counts)
        }
        PlotKind::BoxPlot => {
            // Group the numeric column by the categorical one, whichever
            // way around the pair was given.
            let (group_col, group_name, value_col, value_name) =
                if col_x.dtype() == Dtype::Categorical {
                    (col_x, x, col_y, y)
                } else {
                    (col_y, y, col_x, x)
                };
            let groups = group_values(group_col, value_col);
            charts::box_plot(chart_dir, group_name, value_name, &groups)
        }
    };

    match result {
        Ok(path) => page.chart(path),
        Err(err) => page.notice(err.to_string()),
    }
}

/// Numeric values of `value_col` grouped by the levels of `group_col`.
fn group_values(group_col: &Column, value_col: &Column) -> Vec<(String, Vec<f64>)> {
    let labels = group_col.unique_values().unwrap_or_default();
    let groups = group_col.categorical_values().unwrap_or(&[]);
    let values = value_col.numeric_values().unwrap_or(&[]);

    labels
        .into_iter()
        .map(|label| {
            let members: Vec<f64> = groups
                .iter()
                .zip(values.iter())
                .filter(|(g, v)| **g == label && v.is_finite())
                .map(|(_, &v)| v)
                .collect();
            (label, members)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::tests::seed_artifacts;
    use crate::artifact::ArtifactStore;

    fn store_and_chart_dir(dir: &Path) -> (ArtifactStore, String) {
        let config = seed_artifacts(dir);
        (ArtifactStore::open(&config).unwrap(), config.chart_dir)
    }

    #[test]
    fn test_plot_kind_by_dtype_pair() {
        assert_eq!(
            PlotKind::for_pair(Dtype::Numeric, Dtype::Numeric),
            PlotKind::Scatter
        );
        assert_eq!(
            PlotKind::for_pair(Dtype::Categorical, Dtype::Categorical),
            PlotKind::StackedBars
        );
        assert_eq!(
            PlotKind::for_pair(Dtype::Numeric, Dtype::Categorical),
            PlotKind::BoxPlot
        );
        assert_eq!(
            PlotKind::for_pair(Dtype::Categorical, Dtype::Numeric),
            PlotKind::BoxPlot
        );
    }

    #[test]
    fn test_render_includes_statistics_and_report() {
        let dir = tempfile::tempdir().unwrap();
        let (store, chart_dir) = store_and_chart_dir(dir.path());

        let page = render(&store, &AnalysisOptions::default(), Path::new(&chart_dir));
        assert!(page.body.contains("Descriptive statistics"));
        assert!(page.body.contains("area"));
        assert!(page.body.contains("report"));
        // Raw preview stays hidden until toggled.
        assert!(!page.body.contains("Raw data"));
    }

    #[test]
    fn test_raw_toggle_shows_preview() {
        let dir = tempfile::tempdir().unwrap();
        let (store, chart_dir) = store_and_chart_dir(dir.path());

        let options = AnalysisOptions {
            show_raw: true,
            ..AnalysisOptions::default()
        };
        let page = render(&store, &options, Path::new(&chart_dir));
        assert!(page.body.contains("Raw data"));
        assert!(page.body.contains("house"));
    }

    #[test]
    fn test_mixed_pair_renders_box_plot_chart() {
        let dir = tempfile::tempdir().unwrap();
        let (store, chart_dir) = store_and_chart_dir(dir.path());

        let options = AnalysisOptions {
            pair: Some(("type".to_string(), "area".to_string())),
            ..AnalysisOptions::default()
        };
        let page = render(&store, &options, Path::new(&chart_dir));
        assert_eq!(
            page.charts
                .iter()
                .filter(|p| p.file_name().unwrap().to_string_lossy().starts_with("box_"))
                .count(),
            1
        );
    }

    #[test]
    fn test_unknown_pair_column_is_inline_notice() {
        let dir = tempfile::tempdir().unwrap();
        let (store, chart_dir) = store_and_chart_dir(dir.path());

        let options = AnalysisOptions {
            pair: Some(("area".to_string(), "volume".to_string())),
            ..AnalysisOptions::default()
        };
        let page = render(&store, &options, Path::new(&chart_dir));
        assert!(page.body.contains("unknown column"));
    }

    #[test]
    fn test_empty_dataset_renders_without_raising() {
        let dir = tempfile::tempdir().unwrap();
        let config = seed_artifacts(dir.path());
        std::fs::remove_file(&config.dataset_path).unwrap();
        let store = ArtifactStore::open(&config).unwrap();

        let page = render(
            &store,
            &AnalysisOptions::default(),
            Path::new(&config.chart_dir),
        );
        assert!(page.body.contains("not found"));
        assert!(page.body.contains("nothing to analyze"));
    }
}
