//! An in-memory [`Document`] with a browser-like history stack.

use std::collections::BTreeMap;

use crate::document::Document;
use crate::page::Page;

#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    sections: BTreeMap<String, bool>,
    nav_links: BTreeMap<String, bool>,
    history: Vec<String>,
    position: usize,
    scroll_y: u32,
    mobile_nav_expanded: bool,
}

impl MemoryDocument {
    /// An empty document loaded at `fragment` (may be empty).
    pub fn new(fragment: &str) -> Self {
        Self {
            history: vec![fragment.to_string()],
            ..Default::default()
        }
    }

    /// A document with a section and a nav link for every [`Page`].
    pub fn portfolio(fragment: &str) -> Self {
        Page::ALL.into_iter().fold(Self::new(fragment), |doc, page| {
            doc.with_section(&page.section_id())
                .with_nav_link(&page.nav_link_id())
        })
    }

    pub fn with_section(mut self, id: &str) -> Self {
        self.sections.insert(id.to_string(), false);
        self
    }

    pub fn with_nav_link(mut self, id: &str) -> Self {
        self.nav_links.insert(id.to_string(), false);
        self
    }

    pub fn without_section(mut self, id: &str) -> Self {
        self.sections.remove(id);
        self
    }

    pub fn without_nav_link(mut self, id: &str) -> Self {
        self.nav_links.remove(id);
        self
    }

    pub fn active_sections(&self) -> Vec<&str> {
        active(&self.sections)
    }

    pub fn active_nav_links(&self) -> Vec<&str> {
        active(&self.nav_links)
    }

    /// Simulates the back button. Returns `false` at the start of history.
    pub fn back(&mut self) -> bool {
        if self.position == 0 {
            return false;
        }
        self.position -= 1;
        true
    }

    /// Simulates the forward button. Returns `false` at the end of history.
    pub fn forward(&mut self) -> bool {
        if self.position + 1 >= self.history.len() {
            return false;
        }
        self.position += 1;
        true
    }

    /// Simulates typing a new address: truncates forward history.
    pub fn visit(&mut self, fragment: &str) {
        self.push_fragment(fragment);
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn history_position(&self) -> usize {
        self.position
    }

    pub fn scroll_to(&mut self, y: u32) {
        self.scroll_y = y;
    }

    pub fn scroll_position(&self) -> u32 {
        self.scroll_y
    }

    pub fn expand_mobile_nav(&mut self) {
        self.mobile_nav_expanded = true;
    }

    pub fn mobile_nav_expanded(&self) -> bool {
        self.mobile_nav_expanded
    }
}

fn active(flags: &BTreeMap<String, bool>) -> Vec<&str> {
    flags
        .iter()
        .filter(|(_, on)| **on)
        .map(|(id, _)| id.as_str())
        .collect()
}

fn set_active(flags: &mut BTreeMap<String, bool>, id: &str) -> bool {
    match flags.get_mut(id) {
        Some(flag) => {
            *flag = true;
            true
        }
        None => false,
    }
}

impl Document for MemoryDocument {
    fn deactivate_sections(&mut self) {
        self.sections.values_mut().for_each(|on| *on = false);
    }

    fn activate_section(&mut self, id: &str) -> bool {
        set_active(&mut self.sections, id)
    }

    fn deactivate_nav_links(&mut self) {
        self.nav_links.values_mut().for_each(|on| *on = false);
    }

    fn activate_nav_link(&mut self, id: &str) -> bool {
        set_active(&mut self.nav_links, id)
    }

    fn scroll_to_top(&mut self) {
        self.scroll_y = 0;
    }

    fn fragment(&self) -> String {
        self.history.get(self.position).cloned().unwrap_or_default()
    }

    fn push_fragment(&mut self, fragment: &str) {
        self.history.truncate(self.position + 1);
        self.history.push(fragment.to_string());
        self.position = self.history.len() - 1;
    }

    fn replace_fragment(&mut self, fragment: &str) {
        match self.history.get_mut(self.position) {
            Some(entry) => *entry = fragment.to_string(),
            None => self.push_fragment(fragment),
        }
    }

    fn collapse_mobile_nav(&mut self) -> bool {
        std::mem::replace(&mut self.mobile_nav_expanded, false)
    }
}
