//! Client-side navigation for the portfolio document.
//!
//! The document has three sections (projects, profile, cv). Exactly one is
//! visible at a time and the address bar fragment always names it.
//! [`NavigationController`] owns that state and applies every transition
//! through a [`Document`]; on `wasm32` the [`browser`] module binds it to
//! the real DOM.
//!
//! ```
//! use portfolio_nav::{MemoryDocument, NavigationController, Page};
//!
//! let mut nav = NavigationController::new(MemoryDocument::portfolio("#cv"));
//! nav.initialize();
//! assert_eq!(nav.active_page(), Page::Cv);
//!
//! nav.handle_key("2");
//! assert_eq!(nav.document().active_sections(), vec!["page-profile"]);
//! ```

pub mod controller;
pub mod document;
pub mod error;
pub mod memory;
pub mod page;

#[cfg(target_arch = "wasm32")]
pub mod browser;

pub use controller::{NavigationController, NavigationState, Transition};
pub use document::{Document, DomLayout};
pub use error::NavigationError;
pub use memory::MemoryDocument;
pub use page::Page;
