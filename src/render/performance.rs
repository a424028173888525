//! Performance view: per-variant metric tables and train/test charts.

use crate::artifact::ArtifactStore;
use crate::render::{charts, format_table, RenderedPage};
use std::path::Path;

pub fn render(store: &ArtifactStore, chart_dir: &Path) -> RenderedPage {
    let mut page = RenderedPage::new("Model Performance");

    for (variant, loaded) in store.performances() {
        page.line(format!("== {} ==", variant));
        match loaded {
            Ok(table) => {
                let headers: Vec<String> = ["metric", "train", "test"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect();
                let rows: Vec<Vec<String>> = table
                    .rows
                    .iter()
                    .map(|r| {
                        vec![
                            r.metric.clone(),
                            format!("{:.4}", r.train),
                            format!("{:.4}", r.test),
                        ]
                    })
                    .collect();
                page.line(format_table(&headers, &rows));

                match charts::grouped_bars(chart_dir, variant, &table.rows) {
                    Ok(path) => page.chart(path),
                    Err(err) => page.notice(err.to_string()),
                }
            }
            Err(err) => page.notice(err.to_string()),
        }
        page.blank();
    }

    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::tests::seed_artifacts;
    use crate::artifact::MODEL_VARIANTS;
    use std::path::PathBuf;

    #[test]
    fn test_all_variants_render_tables_and_charts() {
        let dir = tempfile::tempdir().unwrap();
        let config = seed_artifacts(dir.path());
        let store = ArtifactStore::open(&config).unwrap();

        let page = render(&store, Path::new(&config.chart_dir));
        for (variant, _) in MODEL_VARIANTS.iter() {
            assert!(page.body.contains(variant));
        }
        assert_eq!(page.charts.len(), MODEL_VARIANTS.len());
        assert!(page.body.contains("rmse"));
    }

    #[test]
    fn test_missing_variant_renders_notice_not_failure() {
        let dir = tempfile::tempdir().unwrap();
        let config = seed_artifacts(dir.path());
        std::fs::remove_file(PathBuf::from(&config.performance_dir).join("lgb_perform.bin"))
            .unwrap();
        let store = ArtifactStore::open(&config).unwrap();

        let page = render(&store, Path::new(&config.chart_dir));
        assert!(page.body.contains("LightGBM"));
        assert!(page.body.contains("[!]"));
        assert_eq!(page.charts.len(), MODEL_VARIANTS.len() - 1);
    }
}
