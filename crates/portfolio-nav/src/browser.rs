//! `web-sys` binding: drives the controller from real DOM events.

use std::cell::RefCell;
use std::rc::Rc;

use log::{Level, LevelFilter, Log, Metadata, Record, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, KeyboardEvent, ScrollBehavior, ScrollToOptions};

use crate::controller::NavigationController;
use crate::document::{Document, DomLayout};

pub struct BrowserDocument {
    window: web_sys::Window,
    document: web_sys::Document,
    layout: DomLayout,
}

impl BrowserDocument {
    pub fn new(layout: DomLayout) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        Ok(Self {
            window,
            document,
            layout,
        })
    }

    fn elements_with_class(&self, class: &str) -> Vec<Element> {
        let Ok(nodes) = self.document.query_selector_all(&format!(".{class}")) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn clear_class(&self, class: &str) {
        for element in self.elements_with_class(class) {
            let _ = element.class_list().remove_1(&self.layout.active_class);
        }
    }

    fn activate(&self, id: &str) -> bool {
        match self.document.get_element_by_id(id) {
            Some(element) => element.class_list().add_1(&self.layout.active_class).is_ok(),
            None => false,
        }
    }

    fn set_fragment(&self, fragment: &str, push: bool) {
        let Ok(history) = self.window.history() else {
            return;
        };
        let result = if push {
            history.push_state_with_url(&JsValue::NULL, "", Some(fragment))
        } else {
            history.replace_state_with_url(&JsValue::NULL, "", Some(fragment))
        };
        if let Err(e) = result {
            warn!("Failed to update history to {}: {:?}", fragment, e);
        }
    }
}

impl Document for BrowserDocument {
    fn deactivate_sections(&mut self) {
        self.clear_class(&self.layout.section_class);
    }

    fn activate_section(&mut self, id: &str) -> bool {
        self.activate(id)
    }

    fn deactivate_nav_links(&mut self) {
        self.clear_class(&self.layout.nav_link_class);
    }

    fn activate_nav_link(&mut self, id: &str) -> bool {
        self.activate(id)
    }

    fn scroll_to_top(&mut self) {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn fragment(&self) -> String {
        self.window.location().hash().unwrap_or_default()
    }

    fn push_fragment(&mut self, fragment: &str) {
        self.set_fragment(fragment, true);
    }

    fn replace_fragment(&mut self, fragment: &str) {
        self.set_fragment(fragment, false);
    }

    fn collapse_mobile_nav(&mut self) -> bool {
        let Some(nav) = self.document.get_element_by_id(&self.layout.mobile_nav_id) else {
            return false;
        };
        let classes = nav.class_list();
        if !classes.contains(&self.layout.expanded_class) {
            return false;
        }
        classes.remove_1(&self.layout.expanded_class).is_ok()
    }
}

type SharedController = Rc<RefCell<NavigationController<BrowserDocument>>>;

/// Entry point called by the page's module loader once the DOM is ready.
#[wasm_bindgen]
pub fn start() -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    if log::set_logger(&CONSOLE_LOGGER).is_ok() {
        log::set_max_level(if cfg!(debug_assertions) {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        });
    }

    let layout = DomLayout::default();
    let browser = BrowserDocument::new(layout.clone())?;
    let window = browser.window.clone();
    let document = browser.document.clone();

    let controller: SharedController = Rc::new(RefCell::new(NavigationController::new(browser)));
    let initial = controller.borrow_mut().initialize();
    info!("Portfolio navigation ready on {}", initial.page);

    let on_popstate = {
        let controller = Rc::clone(&controller);
        Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            controller.borrow_mut().handle_history_change();
        })
    };
    window.add_event_listener_with_callback("popstate", on_popstate.as_ref().unchecked_ref())?;
    on_popstate.forget();

    let on_keydown = {
        let controller = Rc::clone(&controller);
        Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if key.ctrl_key() || key.alt_key() || key.meta_key() || targets_editable(&event) {
                return;
            }
            controller.borrow_mut().handle_key(&key.key());
        })
    };
    document.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref())?;
    on_keydown.forget();

    let links = document.query_selector_all(&format!(".{}", layout.nav_link_class))?;
    for link in (0..links.length()).filter_map(|i| links.item(i)) {
        let Ok(link) = link.dyn_into::<Element>() else {
            continue;
        };
        let target = link
            .get_attribute("data-page")
            .or_else(|| link.get_attribute("href"))
            .unwrap_or_default();
        let controller = Rc::clone(&controller);
        let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if controller.borrow_mut().handle_link_click(&target).is_some() {
                event.prevent_default();
            }
        });
        link.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }

    Ok(())
}

fn targets_editable(event: &Event) -> bool {
    event
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .map(|el| {
            matches!(el.tag_name().as_str(), "INPUT" | "TEXTAREA" | "SELECT")
                || el.get_attribute("contenteditable").is_some()
        })
        .unwrap_or(false)
}

struct ConsoleLogger;

static CONSOLE_LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => web_sys::console::error_1(&message),
            Level::Warn => web_sys::console::warn_1(&message),
            Level::Info => web_sys::console::info_1(&message),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&message),
        }
    }

    fn flush(&self) {}
}
