use portfolio_nav::{MemoryDocument, NavigationController, NavigationError, Page};

fn controller_at(fragment: &str) -> NavigationController<MemoryDocument> {
    let mut nav = NavigationController::new(MemoryDocument::portfolio(fragment));
    nav.initialize();
    nav
}

fn assert_only_active(nav: &NavigationController<MemoryDocument>, page: Page) {
    let doc = nav.document();
    assert_eq!(doc.active_sections(), vec![page.section_id().as_str()]);
    assert_eq!(doc.active_nav_links(), vec![page.nav_link_id().as_str()]);
    assert_eq!(nav.active_page(), page);
}

#[test]
fn every_page_activates_exactly_one_section_and_link() {
    let mut nav = controller_at("");
    for page in Page::ALL {
        let transition = nav.navigate(page);
        assert!(transition.section_found);
        assert!(transition.nav_link_found);
        assert_only_active(&nav, page);
    }
    // And back again in reverse, starting from a non-default page.
    for page in Page::ALL.into_iter().rev() {
        nav.navigate(page);
        assert_only_active(&nav, page);
    }
}

#[test]
fn initial_fragment_selects_page() {
    assert_only_active(&controller_at("#profile"), Page::Profile);
    assert_only_active(&controller_at("#cv"), Page::Cv);
}

#[test]
fn missing_or_unknown_fragment_shows_default() {
    let nav = controller_at("");
    assert_only_active(&nav, Page::Projects);
    assert_eq!(nav.document().history(), ["#projects"]);

    let nav = controller_at("#contact");
    assert_only_active(&nav, Page::Projects);
    // The address bar is corrected in place, not with a new entry.
    assert_eq!(nav.document().history(), ["#projects"]);
}

#[test]
fn reload_keeps_fragment_page() {
    let mut nav = controller_at("");
    nav.navigate(Page::Profile);
    let fragment = portfolio_nav::Document::fragment(nav.document());

    let reloaded = controller_at(&fragment);
    assert_only_active(&reloaded, Page::Profile);
}

#[test]
fn invalid_input_is_ignored() {
    let mut nav = controller_at("#cv");
    let before = nav.document().history().to_vec();

    for input in ["about", "", "#", "CV", "page-cv", "projects "] {
        assert!(nav.navigate_to(input).is_none(), "input {input:?}");
        assert_only_active(&nav, Page::Cv);
    }
    assert_eq!(nav.document().history(), before.as_slice());
}

#[test]
fn navigate_to_accepts_fragment_form() {
    let mut nav = controller_at("");
    assert_eq!(nav.navigate_to("#cv").map(|t| t.page), Some(Page::Cv));
    assert_eq!(nav.navigate_to("profile").map(|t| t.page), Some(Page::Profile));
}

#[test]
fn back_and_forward_follow_fragment_history() {
    let mut nav = controller_at("");
    nav.navigate(Page::Profile);
    nav.navigate(Page::Cv);
    assert_eq!(
        nav.document().history(),
        ["#projects", "#profile", "#cv"]
    );

    assert!(nav.document_mut().back());
    nav.handle_history_change();
    assert_only_active(&nav, Page::Profile);

    assert!(nav.document_mut().back());
    nav.handle_history_change();
    assert_only_active(&nav, Page::Projects);

    assert!(nav.document_mut().forward());
    nav.handle_history_change();
    assert_only_active(&nav, Page::Profile);

    // History handling must not have eaten the forward entry.
    assert!(nav.document_mut().forward());
    nav.handle_history_change();
    assert_only_active(&nav, Page::Cv);
    assert_eq!(nav.document().history().len(), 3);
}

#[test]
fn repeated_navigation_does_not_stack_history() {
    let mut nav = controller_at("");
    let first = nav.navigate(Page::Profile);
    let second = nav.navigate(Page::Profile);
    assert!(first.history_pushed);
    assert!(!second.history_pushed);
    assert_eq!(nav.document().history(), ["#projects", "#profile"]);
}

#[test]
fn history_to_unknown_fragment_falls_back_to_default() {
    let mut nav = controller_at("#cv");
    nav.document_mut().visit("#nowhere");
    nav.handle_history_change();
    assert_only_active(&nav, Page::Projects);
    assert_eq!(portfolio_nav::Document::fragment(nav.document()), "#projects");
}

#[test]
fn keyboard_shortcuts() {
    let mut nav = controller_at("#cv");
    assert_eq!(nav.handle_key("2").map(|t| t.page), Some(Page::Profile));
    assert_only_active(&nav, Page::Profile);

    assert_eq!(nav.handle_key("1").map(|t| t.page), Some(Page::Projects));
    assert_eq!(nav.handle_key("3").map(|t| t.page), Some(Page::Cv));

    assert!(nav.handle_key("4").is_none());
    assert!(nav.handle_key("a").is_none());
    assert_only_active(&nav, Page::Cv);
}

#[test]
fn link_clicks_use_href_or_page_name() {
    let mut nav = controller_at("");
    nav.handle_link_click("#cv");
    assert_only_active(&nav, Page::Cv);
    nav.handle_link_click("profile");
    assert_only_active(&nav, Page::Profile);
    assert!(nav.handle_link_click("https://example.com").is_none());
    assert_only_active(&nav, Page::Profile);
}

#[test]
fn transition_scrolls_and_collapses_mobile_nav() {
    let mut nav = controller_at("");
    nav.document_mut().scroll_to(900);
    nav.document_mut().expand_mobile_nav();

    let transition = nav.navigate(Page::Cv);
    assert!(transition.mobile_nav_collapsed);
    assert!(!nav.document().mobile_nav_expanded());
    assert_eq!(nav.document().scroll_position(), 0);

    let transition = nav.navigate(Page::Profile);
    assert!(!transition.mobile_nav_collapsed);
}

#[test]
fn missing_section_degrades_without_error() {
    let doc = MemoryDocument::portfolio("").without_section("page-cv");
    let mut nav = NavigationController::new(doc);
    nav.initialize();

    let transition = nav.navigate(Page::Cv);
    assert!(!transition.section_found);
    assert!(transition.nav_link_found);
    assert!(nav.document().active_sections().is_empty());
    assert_eq!(nav.document().active_nav_links(), vec!["nav-cv"]);
    assert_eq!(
        transition.missing_elements(),
        vec![NavigationError::MissingElement("page-cv".to_string())]
    );
    assert_eq!(nav.active_page(), Page::Cv);
}

#[test]
fn missing_nav_link_is_reported() {
    let doc = MemoryDocument::portfolio("").without_nav_link("nav-profile");
    let mut nav = NavigationController::new(doc);
    let transition = nav.navigate(Page::Profile);
    assert_eq!(
        transition.missing_elements(),
        vec![NavigationError::MissingElement("nav-profile".to_string())]
    );
    assert_eq!(nav.document().active_sections(), vec!["page-profile"]);
    assert!(nav.document().active_nav_links().is_empty());
}
