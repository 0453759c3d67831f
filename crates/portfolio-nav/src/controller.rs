//! Page transitions for the portfolio document.
//!
//! All input channels (link clicks, digit shortcuts, back/forward and the
//! initial load) funnel into one private transition function, so a single
//! transition always updates the section, the nav link and the address bar
//! together.

use log::{debug, warn};

use crate::document::Document;
use crate::error::NavigationError;
use crate::page::Page;

/// The page currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigationState {
    active: Page,
}

impl NavigationState {
    pub fn active(&self) -> Page {
        self.active
    }
}

/// How a transition touches browser history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryUpdate {
    /// User-initiated: add an entry unless the address bar already matches.
    Push,
    /// Load and back/forward: correct the current entry, never add one.
    Sync,
}

/// Outcome of one applied transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub page: Page,
    pub section_found: bool,
    pub nav_link_found: bool,
    pub history_pushed: bool,
    pub mobile_nav_collapsed: bool,
}

impl Transition {
    /// The elements this transition expected but did not find.
    pub fn missing_elements(&self) -> Vec<NavigationError> {
        let mut missing = Vec::new();
        if !self.section_found {
            missing.push(NavigationError::MissingElement(self.page.section_id()));
        }
        if !self.nav_link_found {
            missing.push(NavigationError::MissingElement(self.page.nav_link_id()));
        }
        missing
    }
}

pub struct NavigationController<D: Document> {
    document: D,
    state: NavigationState,
}

impl<D: Document> NavigationController<D> {
    /// Wraps `document` without touching it; call [`Self::initialize`] once
    /// the document is ready.
    pub fn new(document: D) -> Self {
        Self {
            document,
            state: NavigationState::default(),
        }
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn active_page(&self) -> Page {
        self.state.active
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn into_document(self) -> D {
        self.document
    }

    /// Shows the page named by the URL fragment, or the default page.
    pub fn initialize(&mut self) -> Transition {
        self.sync_with_location()
    }

    /// Back/forward handler: re-reads the fragment without adding history.
    pub fn handle_history_change(&mut self) -> Transition {
        self.sync_with_location()
    }

    /// Navigates to `input` if it names a page (`cv` or `#cv`); anything
    /// else is ignored and `None` is returned.
    pub fn navigate_to(&mut self, input: &str) -> Option<Transition> {
        match Page::from_fragment(input) {
            Some(page) => Some(self.navigate(page)),
            None => {
                debug!("Ignoring navigation to unknown page '{}'", input);
                None
            }
        }
    }

    /// User-initiated transition to `page`.
    pub fn navigate(&mut self, page: Page) -> Transition {
        self.apply(page, HistoryUpdate::Push)
    }

    /// Digit shortcuts: `1` projects, `2` profile, `3` cv.
    pub fn handle_key(&mut self, key: &str) -> Option<Transition> {
        Page::from_shortcut(key).map(|page| self.navigate(page))
    }

    /// Nav link click; `target` is the link's `href` or `data-page` value.
    pub fn handle_link_click(&mut self, target: &str) -> Option<Transition> {
        self.navigate_to(target)
    }

    fn sync_with_location(&mut self) -> Transition {
        let fragment = self.document.fragment();
        let page = Page::resolve_fragment(&fragment);
        if Page::from_fragment(&fragment).is_none() && !fragment.is_empty() {
            debug!("Unknown fragment '{}', showing {}", fragment, page);
        }
        self.apply(page, HistoryUpdate::Sync)
    }

    fn apply(&mut self, page: Page, history: HistoryUpdate) -> Transition {
        self.document.deactivate_sections();
        let section_found = self.document.activate_section(&page.section_id());

        self.document.deactivate_nav_links();
        let nav_link_found = self.document.activate_nav_link(&page.nav_link_id());

        self.document.scroll_to_top();

        let fragment = page.fragment();
        let at_fragment = self.document.fragment() == fragment;
        let history_pushed = match history {
            HistoryUpdate::Push if !at_fragment => {
                self.document.push_fragment(&fragment);
                true
            }
            HistoryUpdate::Sync if !at_fragment => {
                self.document.replace_fragment(&fragment);
                false
            }
            _ => false,
        };

        let mobile_nav_collapsed = self.document.collapse_mobile_nav();
        self.state.active = page;

        let transition = Transition {
            page,
            section_found,
            nav_link_found,
            history_pushed,
            mobile_nav_collapsed,
        };
        if cfg!(debug_assertions) {
            for missing in transition.missing_elements() {
                warn!("Navigation to {}: {}", page, missing);
            }
        }
        transition
    }
}
