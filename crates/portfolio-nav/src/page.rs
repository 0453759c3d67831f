//! The closed set of pages the portfolio document toggles between.

use std::fmt;
use std::str::FromStr;

use crate::error::NavigationError;

/// A logical page of the single-page document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Projects,
    Profile,
    Cv,
}

impl Page {
    /// Every page, in navigation-bar order.
    pub const ALL: [Page; 3] = [Page::Projects, Page::Profile, Page::Cv];

    /// Page shown when the URL carries no usable fragment.
    pub const DEFAULT: Page = Page::Projects;

    /// The identifier used in fragments and element ids.
    pub fn name(self) -> &'static str {
        match self {
            Page::Projects => "projects",
            Page::Profile => "profile",
            Page::Cv => "cv",
        }
    }

    /// Id of the `.page-section` element holding this page.
    pub fn section_id(self) -> String {
        format!("page-{}", self.name())
    }

    /// Id of the `.nav-link` element pointing at this page.
    pub fn nav_link_id(self) -> String {
        format!("nav-{}", self.name())
    }

    /// URL fragment including the leading `#`.
    pub fn fragment(self) -> String {
        format!("#{}", self.name())
    }

    /// Digit key that jumps to this page.
    pub fn shortcut(self) -> char {
        match self {
            Page::Projects => '1',
            Page::Profile => '2',
            Page::Cv => '3',
        }
    }

    /// Parses a fragment such as `#cv` or `cv`. Anything else is `None`.
    pub fn from_fragment(fragment: &str) -> Option<Page> {
        fragment.strip_prefix('#').unwrap_or(fragment).parse().ok()
    }

    /// Like [`Page::from_fragment`] but falls back to [`Page::DEFAULT`].
    pub fn resolve_fragment(fragment: &str) -> Page {
        Page::from_fragment(fragment).unwrap_or(Page::DEFAULT)
    }

    /// Maps a `KeyboardEvent.key` value to the page it selects.
    pub fn from_shortcut(key: &str) -> Option<Page> {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Page::ALL.into_iter().find(|p| p.shortcut() == c),
            _ => None,
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Page::DEFAULT
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Page {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| NavigationError::UnknownPage(s.to_string()))
    }
}
