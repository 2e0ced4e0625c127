//! Browser tests: `wasm-pack test --headless --firefox crates/frontend`

#![cfg(target_arch = "wasm32")]

use catalog_frontend::domain::a001_course::ui::card::render_course_cards;
use catalog_frontend::domain::a003_help_item::ui::page::{render_into, HelpScope, HELP_GRID_SELECTOR};
use catalog_frontend::layout::loading_overlay;
use catalog_frontend::layout::loading_overlay::view::show_loader;
use catalog_frontend::shared::dom;
use catalog_frontend::shared::search::controller::{SearchController, ViewState};
use catalog_frontend::shared::search::dom_surface::{DomCardView, DomSurface};
use catalog_frontend::shared::search::handoff::Handoff;
use catalog_frontend::shared::search::local::run_local;
use catalog_frontend::shared::search::searchbar::{init_local, SearchBar, SEARCH_INPUT_ID};
use catalog_frontend::shared::search::Query;
use catalog_frontend::shared::storage::{
    session_set, session_take, HIGHLIGHT_COURSE_KEY, SEARCH_TERM_KEY,
};
use contracts::domain::a002_category::DEFAULT_COURSE_PAGE_DIR;
use contracts::shared::{Catalog, LoadError};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Element, HtmlElement, HtmlInputElement, Storage};

wasm_bindgen_test_configure!(run_in_browser);

const DATA: &str = r#"{"courses":{
    "lab":[{"code":"LB101","title":"Circuits","instructors":[]},
           {"code":"LB102","title":"Digital Lab","instructors":[{"name":"Dr. Karimi","telegram":"https://t.me/k"}]}],
    "general":[{"code":"GN110","title":"History of Science","instructors":[{"name":"Dr. Ahmadi","telegram":""}]}]
}}"#;

fn grid(inner: &str) -> Element {
    let document = dom::document().unwrap();
    let grid = document.create_element("div").unwrap();
    grid.set_class_name("courses-grid");
    grid.set_inner_html(inner);
    document.body().unwrap().append_child(&grid).unwrap();
    grid
}

fn count(root: &Element, selector: &str) -> usize {
    dom::query_all_within(root, selector).len()
}

fn visible_category_cards(root: &Element) -> usize {
    dom::query_all_within(root, ".course-card:not(.search-result-card)")
        .iter()
        .filter(|card| {
            card.get_attribute("style")
                .map_or(true, |style| !style.contains("none"))
        })
        .count()
}

#[wasm_bindgen_test]
fn global_search_swaps_views() {
    let catalog = Catalog::from_json(DATA, DEFAULT_COURSE_PAGE_DIR).unwrap();
    let grid = grid(r#"<article class="course-card">main</article><article class="course-card">lab</article>"#);
    let mut controller = SearchController::new(DomSurface::new(grid.clone()));

    controller.begin_load();
    assert_eq!(count(&grid, ".loading-message"), 1);
    assert_eq!(visible_category_cards(&grid), 0);

    controller.finish_load(Ok(catalog.courses));
    assert_eq!(controller.view(), &ViewState::ShowingCategories);
    assert_eq!(count(&grid, ".loading-message"), 0);
    assert_eq!(visible_category_cards(&grid), 2);

    controller.on_query("circ");
    assert_eq!(count(&grid, ".search-result-card"), 1);
    assert_eq!(count(&grid, ".search-category-header"), 1);
    assert_eq!(visible_category_cards(&grid), 0);

    controller.on_query("zz");
    assert_eq!(count(&grid, ".search-result-card"), 0);
    assert_eq!(count(&grid, ".no-results-message"), 1);

    controller.on_query("zzz");
    assert_eq!(count(&grid, ".no-results-message"), 1);

    controller.clear_query();
    assert_eq!(count(&grid, ".no-results-message"), 0);
    assert_eq!(visible_category_cards(&grid), 2);
    grid.remove();
}

#[wasm_bindgen_test]
fn load_failure_shows_retry() {
    let grid = grid("");
    let mut controller = SearchController::new(DomSurface::new(grid.clone()));
    controller.begin_load();
    controller.finish_load(Err(LoadError::Network("HTTP 404".into())));
    assert_eq!(count(&grid, ".error-message"), 1);
    assert_eq!(count(&grid, ".retry-button"), 1);
    assert_eq!(count(&grid, ".loading-message"), 0);
    grid.remove();
}

#[wasm_bindgen_test]
fn local_search_filters_rendered_cards() {
    let catalog = Catalog::from_json(DATA, DEFAULT_COURSE_PAGE_DIR).unwrap();
    let grid = grid(&render_course_cards(catalog.courses_for_page("courses-lab.html")));
    let mut view = DomCardView::new(grid.clone());
    let mut surface = DomSurface::new(grid.clone());

    let outcome = run_local(&mut view, &mut surface, &Query::new("karimi"));
    assert_eq!((outcome.total, outcome.visible), (2, 1));
    assert_eq!(count(&grid, ".course-card.search-match"), 1);

    let outcome = run_local(&mut view, &mut surface, &Query::new("nothing"));
    assert!(outcome.show_no_results);
    assert_eq!(count(&grid, ".no-results-message"), 1);

    run_local(&mut view, &mut surface, &Query::new(""));
    assert_eq!(count(&grid, ".no-results-message"), 0);
    assert_eq!(count(&grid, ".search-match"), 0);
    grid.remove();
}

fn search_wrapper() -> Element {
    let document = dom::document().unwrap();
    let wrapper = document.create_element("div").unwrap();
    wrapper.set_class_name("search-wrapper");
    wrapper.set_inner_html(r#"<input id="courseSearch" type="search">"#);
    document.body().unwrap().append_child(&wrapper).unwrap();
    wrapper
}

fn display_of(el: &Element) -> String {
    style_of(el, "display")
}

fn session() -> Storage {
    web_sys::window().unwrap().session_storage().unwrap().unwrap()
}

#[wasm_bindgen_test]
fn clear_button_follows_query() {
    let wrapper = search_wrapper();
    let bar = SearchBar::attach().unwrap();
    let clear = bar.clear_button().cloned().unwrap();
    assert_eq!(clear.class_name(), "search-clear");
    assert_eq!(clear.parent_element().unwrap().class_name(), "search-wrapper");
    assert_eq!(display_of(&clear), "none");

    bar.set_value("circ");
    assert_eq!(display_of(&clear), "flex");

    bar.set_value("   ");
    assert_eq!(display_of(&clear), "none");
    wrapper.remove();
}

#[wasm_bindgen_test]
fn session_take_reads_once() {
    session_set(SEARCH_TERM_KEY, "circ");
    assert_eq!(session_take(SEARCH_TERM_KEY).as_deref(), Some("circ"));
    assert_eq!(session().get_item(SEARCH_TERM_KEY).unwrap(), None);
    assert_eq!(session_take(SEARCH_TERM_KEY), None);
}

#[wasm_bindgen_test]
fn handoff_replays_term_and_highlights_card() {
    let catalog = Catalog::from_json(DATA, DEFAULT_COURSE_PAGE_DIR).unwrap();
    let wrapper = search_wrapper();
    let grid = grid(&render_course_cards(catalog.courses_for_page("courses-lab.html")));
    let local = init_local(&grid).unwrap();

    session_set(HIGHLIGHT_COURSE_KEY, "LB102");
    session_set(SEARCH_TERM_KEY, "digital");
    let pending = Handoff::take();
    assert_eq!(session().get_item(HIGHLIGHT_COURSE_KEY).unwrap(), None);
    assert_eq!(session().get_item(SEARCH_TERM_KEY).unwrap(), None);

    pending.apply(Some(&local));
    let input: HtmlInputElement = dom::by_id(SEARCH_INPUT_ID).unwrap();
    assert_eq!(input.value(), "digital");
    assert_eq!(visible_category_cards(&grid), 1);
    assert_eq!(count(&grid, ".course-card.highlighted-course"), 1);
    let highlighted = dom::query_within(&grid, ".highlighted-course").unwrap();
    assert!(dom::text_of(&highlighted).contains("LB102"));

    grid.remove();
    wrapper.remove();
}

#[wasm_bindgen_test]
fn unused_handoff_is_still_cleared() {
    session_set(HIGHLIGHT_COURSE_KEY, "LB101");
    let pending = Handoff::take();
    pending.discard("no courses on this page");
    assert_eq!(session().get_item(HIGHLIGHT_COURSE_KEY).unwrap(), None);
    assert!(Handoff::take().is_empty());
}

#[wasm_bindgen_test]
fn help_page_replaces_static_cards() {
    let catalog = Catalog::from_json(
        r#"{"faqs":[{"question":"How do I search?","answer":"Type in the box."}],
            "guide":[{"title":"Getting started","content":"Open a category."}]}"#,
        DEFAULT_COURSE_PAGE_DIR,
    )
    .unwrap();
    let document = dom::document().unwrap();
    let grid = document.create_element("div").unwrap();
    grid.set_class_name("courses-grid help-grid");
    grid.set_inner_html(r#"<article class="course-card">placeholder</article>"#);
    document.body().unwrap().append_child(&grid).unwrap();
    assert!(dom::query(HELP_GRID_SELECTOR).is_some());

    let local = render_into(&grid, &catalog, HelpScope::Faq);
    assert!(local.is_none());
    assert_eq!(count(&grid, ".course-card"), 1);
    assert!(!dom::text_of(&grid).contains("placeholder"));
    assert!(dom::text_of(&grid).contains("How do I search?"));
    assert!(!dom::text_of(&grid).contains("Getting started"));
    grid.remove();
}

fn style_of(el: &Element, property: &str) -> String {
    el.dyn_ref::<HtmlElement>()
        .unwrap()
        .style()
        .get_property_value(property)
        .unwrap()
}

#[wasm_bindgen_test]
fn overlay_reveals_and_hides_main_content() {
    let document = dom::document().unwrap();
    let body = document.body().unwrap();
    let overlay = document.create_element("div").unwrap();
    overlay.set_id("loading-overlay");
    body.append_child(&overlay).unwrap();
    let main = document.create_element("main").unwrap();
    main.set_id("main-content");
    body.append_child(&main).unwrap();

    loading_overlay::init();
    loading_overlay::hide();
    assert_eq!(style_of(&main, "opacity"), "1");
    assert_eq!(style_of(&main, "visibility"), "visible");

    show_loader();
    assert_eq!(style_of(&main, "opacity"), "0");
    assert_eq!(style_of(&main, "visibility"), "hidden");

    loading_overlay::hide();
    assert_eq!(style_of(&main, "opacity"), "1");
    main.remove();
    overlay.remove();
}
