//! The DOM operations the navigation controller depends on.
//!
//! The controller never queries the DOM directly. Everything it needs goes
//! through [`Document`], which the browser binding implements with
//! `web-sys` and [`crate::MemoryDocument`] implements in memory.

/// Class names and element ids that make up the page skeleton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomLayout {
    pub section_class: String,
    pub nav_link_class: String,
    pub active_class: String,
    pub mobile_nav_id: String,
    pub expanded_class: String,
}

impl Default for DomLayout {
    fn default() -> Self {
        Self {
            section_class: "page-section".to_string(),
            nav_link_class: "nav-link".to_string(),
            active_class: "active".to_string(),
            mobile_nav_id: "navbarNav".to_string(),
            expanded_class: "show".to_string(),
        }
    }
}

pub trait Document {
    /// Clears the active flag on every page section.
    fn deactivate_sections(&mut self);

    /// Marks the section with `id` active. Returns `false` if it does not exist.
    fn activate_section(&mut self, id: &str) -> bool;

    /// Clears the active flag on every navigation link.
    fn deactivate_nav_links(&mut self);

    /// Marks the navigation link with `id` active. Returns `false` if it does not exist.
    fn activate_nav_link(&mut self, id: &str) -> bool;

    fn scroll_to_top(&mut self);

    /// Current URL fragment including the leading `#`, or empty.
    fn fragment(&self) -> String;

    /// Adds a history entry for `fragment`.
    fn push_fragment(&mut self, fragment: &str);

    /// Rewrites the current history entry to `fragment`.
    fn replace_fragment(&mut self, fragment: &str);

    /// Collapses the mobile navigation overlay. Returns whether it was expanded.
    fn collapse_mobile_nav(&mut self) -> bool;
}
