//! Home view: welcome text plus the dataset description document.

use crate::artifact::ArtifactStore;
use crate::render::RenderedPage;
use std::path::{Path, PathBuf};

pub fn render(store: &ArtifactStore) -> RenderedPage {
    let mut page = RenderedPage::new("Home");

    page.line("Welcome!");
    page.line("This dashboard offers:");
    page.line("  - price predictions for houses from their key features,");
    page.line("  - exploration of housing market trends,");
    page.line("  - a comparison of the evaluated model variants.");
    page.blank();

    page.line("== Dataset description ==");
    match store.description() {
        Ok(text) => {
            page.line(text);
            page.blank();
            page.line("Use the navigation commands to explore the dashboard.");
        }
        Err(err) => {
            // A missing description ends this render pass; sections after
            // it stay unrendered.
            page.notice(err.to_string());
        }
    }

    page
}

/// The download action: write the description document to `dest`.
///
/// # Errors
/// Returns a display-ready message when the description is unavailable or
/// the destination cannot be written.
pub fn export_description(store: &ArtifactStore, dest: &Path) -> Result<PathBuf, String> {
    let text = store.description().map_err(|e| e.to_string())?;
    std::fs::write(dest, text).map_err(|e| format!("could not write {}: {}", dest.display(), e))?;
    Ok(dest.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::tests::seed_artifacts;

    #[test]
    fn test_home_renders_description() {
        let dir = tempfile::tempdir().unwrap();
        let config = seed_artifacts(dir.path());
        let store = ArtifactStore::open(&config).unwrap();

        let page = render(&store);
        assert!(page.body.contains("living surface"));
        assert!(page.body.contains("navigation commands"));
    }

    #[test]
    fn test_missing_description_halts_sub_render() {
        let dir = tempfile::tempdir().unwrap();
        let config = seed_artifacts(dir.path());
        std::fs::remove_file(&config.description_path).unwrap();
        let store = ArtifactStore::open(&config).unwrap();

        let page = render(&store);
        assert!(page.body.contains("[!]"));
        // Sections after the description stay unrendered.
        assert!(!page.body.contains("navigation commands"));
        // The rest of the page before it is intact.
        assert!(page.body.contains("Welcome!"));
    }

    #[test]
    fn test_export_description_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let config = seed_artifacts(dir.path());
        let store = ArtifactStore::open(&config).unwrap();

        let dest = dir.path().join("description_copy.txt");
        export_description(&store, &dest).unwrap();
        assert!(std::fs::read_to_string(dest)
            .unwrap()
            .contains("living surface"));
    }

    #[test]
    fn test_export_fails_cleanly_without_description() {
        let dir = tempfile::tempdir().unwrap();
        let config = seed_artifacts(dir.path());
        std::fs::remove_file(&config.description_path).unwrap();
        let store = ArtifactStore::open(&config).unwrap();

        let dest = dir.path().join("description_copy.txt");
        assert!(export_description(&store, &dest).is_err());
        assert!(!dest.exists());
    }
}
