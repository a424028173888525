//! Page navigation state for one dashboard session.
//!
//! The current page lives in an explicit [`Session`] value owned by the
//! driver loop, not in process-global state. Navigation is the only thing
//! that mutates it, and mutating it has no other effect; the driver
//! re-renders after every command.

/// The four fixed views of the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Analysis,
    Prediction,
    Performance,
}

impl Page {
    /// All pages in navigation-bar order.
    pub const ALL: [Page; 4] = [
        Page::Home,
        Page::Analysis,
        Page::Prediction,
        Page::Performance,
    ];

    /// Human-facing label used in the navigation bar and page titles.
    pub fn label(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Analysis => "Analysis",
            Page::Prediction => "Prediction",
            Page::Performance => "Performance",
        }
    }

    /// The navigation command selecting this page.
    pub fn command(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Analysis => "analysis",
            Page::Prediction => "predict",
            Page::Performance => "performance",
        }
    }

    /// Parse a navigation command, `None` for anything else.
    pub fn from_command(input: &str) -> Option<Page> {
        Page::ALL
            .iter()
            .copied()
            .find(|p| p.command() == input.trim().to_lowercase())
    }
}

/// Navigation state for the lifetime of one user session.
///
/// Starts on [`Page::Home`]; any page can transition to any other, only via
/// [`Session::set_page`]. There is no terminal state, the session ends when
/// the driver loop exits.
#[derive(Clone, Debug, Default)]
pub struct Session {
    page: Page,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current page.
    pub fn page(&self) -> Page {
        self.page
    }

    /// Unconditionally overwrite the current page.
    pub fn set_page(&mut self, target: Page) {
        self.page = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_page_is_home() {
        assert_eq!(Session::new().page(), Page::Home);
    }

    #[test]
    fn test_any_page_reaches_any_other() {
        for &from in Page::ALL.iter() {
            for &to in Page::ALL.iter() {
                let mut session = Session::new();
                session.set_page(from);
                session.set_page(to);
                assert_eq!(session.page(), to);
            }
        }
    }

    #[test]
    fn test_set_page_is_idempotent() {
        let mut session = Session::new();
        session.set_page(Page::Analysis);
        let snapshot = session.clone();
        session.set_page(Page::Analysis);
        assert_eq!(session.page(), snapshot.page());
    }

    #[test]
    fn test_command_parsing_roundtrip() {
        for &page in Page::ALL.iter() {
            assert_eq!(Page::from_command(page.command()), Some(page));
        }
        assert_eq!(Page::from_command("  Predict "), Some(Page::Prediction));
        assert_eq!(Page::from_command("settings"), None);
    }
}
