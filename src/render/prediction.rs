//! Prediction view: the schema-driven form plus the latest result.

use crate::artifact::ArtifactStore;
use crate::form::{self, FieldKind};
use crate::inference::PredictionRequest;
use crate::render::{format_table, RenderedPage};

pub fn render(
    store: &ArtifactStore,
    submitted: Option<&PredictionRequest>,
    echo_submission: bool,
) -> RenderedPage {
    let mut page = RenderedPage::new("Price Prediction");

    if let Some(err) = store.dataset_error() {
        page.notice(err.to_string());
    }

    let fields = form::field_descriptors(store.table());
    if fields.is_empty() {
        page.line("No dataset loaded; the prediction form is unavailable.");
        return page;
    }

    page.line("== Features ==");
    for field in &fields {
        let kind = match &field.kind {
            FieldKind::Numeric { .. } => "number",
            FieldKind::Categorical { .. } => "choice",
        };
        page.line(format!(
            "  {} ({}): {}",
            field.name,
            kind,
            field.domain_display()
        ));
    }
    page.blank();

    if let Some(request) = submitted {
        if echo_submission {
            page.line("== Submitted record ==");
            let headers: Vec<String> = request.iter().map(|(n, _)| n.to_string()).collect();
            let row: Vec<String> = request.iter().map(|(_, v)| v.to_string()).collect();
            page.line(format_table(&headers, &[row]));
            page.blank();
        }

        match store.pipeline().predict(request) {
            Ok(price) => page.line(format!("Predicted price: {:.2} monetary units", price)),
            Err(err) => page.notice(err.to_string()),
        }
    } else {
        page.line("Submit a record with: predict");
    }

    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::tests::seed_artifacts;
    use crate::inference::FieldValue;

    fn request(area: f64, kind: &str) -> PredictionRequest {
        let mut req = PredictionRequest::new();
        req.push("area", FieldValue::Number(area));
        req.push("type", FieldValue::Category(kind.to_string()));
        req
    }

    #[test]
    fn test_form_lists_every_column_with_domain() {
        let dir = tempfile::tempdir().unwrap();
        let config = seed_artifacts(dir.path());
        let store = ArtifactStore::open(&config).unwrap();

        let page = render(&store, None, false);
        assert!(page.body.contains("area (number): 20 .. 500"));
        assert!(page.body.contains("type (choice): house | apartment"));
        assert!(page.body.contains("Submit a record"));
    }

    #[test]
    fn test_submission_shows_price() {
        let dir = tempfile::tempdir().unwrap();
        let config = seed_artifacts(dir.path());
        let store = ArtifactStore::open(&config).unwrap();

        let req = request(120.0, "house");
        let page = render(&store, Some(&req), false);
        assert!(page.body.contains("Predicted price:"));
        assert!(!page.body.contains("Submitted record"));
    }

    #[test]
    fn test_echo_toggle_shows_submitted_record() {
        let dir = tempfile::tempdir().unwrap();
        let config = seed_artifacts(dir.path());
        let store = ArtifactStore::open(&config).unwrap();

        let req = request(120.0, "house");
        let page = render(&store, Some(&req), true);
        assert!(page.body.contains("Submitted record"));
        assert!(page.body.contains("120"));
    }

    #[test]
    fn test_unseen_category_renders_inline_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = seed_artifacts(dir.path());
        let store = ArtifactStore::open(&config).unwrap();

        let req = request(120.0, "castle");
        let page = render(&store, Some(&req), false);
        assert!(page.body.contains("[!]"));
        assert!(page.body.contains("castle"));
        assert!(!page.body.contains("Predicted price:"));
    }

    #[test]
    fn test_empty_dataset_disables_form() {
        let dir = tempfile::tempdir().unwrap();
        let config = seed_artifacts(dir.path());
        std::fs::remove_file(&config.dataset_path).unwrap();
        let store = ArtifactStore::open(&config).unwrap();

        let page = render(&store, None, false);
        assert!(page.body.contains("form is unavailable"));
    }
}
