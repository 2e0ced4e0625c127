//! Wiring between `#courseSearch`, the `.courses-grid` container and the two
//! search modes.
//!
//! The index page runs the global search ([`init_global`]): records are
//! loaded once and rendered as grouped result cards. Every other page with a
//! grid filters its own cards in place ([`init_local`]).

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, HtmlInputElement, KeyboardEvent, MouseEvent};

use super::controller::SearchController;
use super::dom_surface::{DomCardView, DomSurface, RETRY_BUTTON_CLASS};
use super::local::{run_local, LocalOutcome};
use super::Query;
use crate::domain::a001_course::api::fetch_catalog;
use crate::shared::config::SiteConfig;
use crate::shared::dom::{self, listen, set_display, MissingElement};
use crate::shared::icons::icon;
use crate::shared::storage::{session_set, HIGHLIGHT_COURSE_KEY, SEARCH_TERM_KEY};

pub const SEARCH_INPUT_ID: &str = "courseSearch";
pub const GRID_SELECTOR: &str = ".courses-grid";

/// The search input and its clear button.
#[derive(Clone)]
pub struct SearchBar {
    input: HtmlInputElement,
    clear: Option<Element>,
}

impl SearchBar {
    /// Find `#courseSearch`; create `.search-clear` inside `.search-wrapper`
    /// when the page does not provide one.
    pub fn attach() -> Result<Self, MissingElement> {
        let input: HtmlInputElement = dom::require_by_id(SEARCH_INPUT_ID)?;
        let clear = dom::query(".search-clear").or_else(|| create_clear_button(&input));
        let bar = Self { input, clear };
        bar.sync_clear_button();
        Ok(bar)
    }

    pub fn value(&self) -> String {
        self.input.value()
    }

    pub fn set_value(&self, value: &str) {
        self.input.set_value(value);
        self.sync_clear_button();
    }

    pub fn focus(&self) {
        let _ = self.input.focus();
    }

    /// Show the clear button only while there is something to clear.
    pub fn sync_clear_button(&self) {
        if let Some(clear) = &self.clear {
            let shown = !self.input.value().trim().is_empty();
            set_display(clear, if shown { "flex" } else { "none" });
        }
    }

    /// Empty the input and give it focus.
    pub fn reset(&self) {
        self.set_value("");
        self.focus();
    }

    pub fn input(&self) -> &HtmlInputElement {
        &self.input
    }

    pub fn clear_button(&self) -> Option<&Element> {
        self.clear.as_ref()
    }
}

fn create_clear_button(input: &HtmlInputElement) -> Option<Element> {
    let wrapper = input.closest(".search-wrapper").ok().flatten()?;
    let button = dom::document()?.create_element("button").ok()?;
    button.set_class_name("search-clear");
    let _ = button.set_attribute("type", "button");
    button.set_inner_html(icon("x"));
    set_display(&button, "none");
    wrapper.append_child(&button).ok()?;
    Some(button)
}

/// Ctrl+F / Cmd+F focuses the search input instead of the browser's find bar.
fn bind_find_shortcut(bar: &SearchBar) {
    let Some(document) = dom::document() else {
        return;
    };
    let bar = bar.clone();
    listen(document.as_ref(), "keydown", move |ev: KeyboardEvent| {
        if (ev.ctrl_key() || ev.meta_key()) && ev.key().eq_ignore_ascii_case("f") {
            ev.prevent_default();
            bar.focus();
        }
    });
}

// ---------------------------------------------------------------------------
// Global search (index page)
// ---------------------------------------------------------------------------

type SharedController = Rc<RefCell<SearchController<DomSurface>>>;

/// Start the single catalog load. Does nothing while a load is in flight or
/// after it succeeded.
fn start_load(controller: &SharedController, config: &SiteConfig) {
    if !controller.borrow_mut().begin_load() {
        return;
    }
    let controller = Rc::clone(controller);
    let config = config.clone();
    spawn_local(async move {
        let result = fetch_catalog(&config).await.map(|catalog| catalog.courses);
        controller.borrow_mut().finish_load(result);
    });
}

pub fn init_global(config: &SiteConfig) -> Result<(), MissingElement> {
    let bar = SearchBar::attach()?;
    let grid = dom::require(GRID_SELECTOR)?;
    let controller: SharedController =
        Rc::new(RefCell::new(SearchController::new(DomSurface::new(grid.clone()))));

    // a value restored by the browser is applied once records arrive
    controller.borrow_mut().on_query(&bar.value());
    start_load(&controller, config);

    {
        let bar = bar.clone();
        let controller = Rc::clone(&controller);
        listen(bar.input().clone().as_ref(), "input", move |_: Event| {
            bar.sync_clear_button();
            controller.borrow_mut().on_query(&bar.value());
        });
    }

    {
        let bar = bar.clone();
        let controller = Rc::clone(&controller);
        listen(bar.input().clone().as_ref(), "keydown", move |ev: KeyboardEvent| {
            match ev.key().as_str() {
                "Enter" => {
                    ev.prevent_default();
                    controller.borrow_mut().on_query(&bar.value());
                }
                "Escape" => {
                    bar.reset();
                    controller.borrow_mut().clear_query();
                }
                _ => {}
            }
        });
    }

    if let Some(clear) = bar.clear_button().cloned() {
        let bar = bar.clone();
        let controller = Rc::clone(&controller);
        listen(clear.as_ref(), "click", move |_: MouseEvent| {
            bar.reset();
            controller.borrow_mut().clear_query();
        });
    }

    {
        let controller = Rc::clone(&controller);
        let config = config.clone();
        listen(grid.as_ref(), "click", move |ev: MouseEvent| {
            let Some(target) = dom::event_element(&ev) else {
                return;
            };
            if closest(&target, &format!(".{}", RETRY_BUTTON_CLASS)).is_some() {
                log::info!("retrying course load");
                start_load(&controller, &config);
                return;
            }
            if closest(&target, ".category-link").is_some() {
                return;
            }
            if let Some(card) = closest(&target, ".search-result-card") {
                open_result(&card);
            }
        });
    }

    bind_find_shortcut(&bar);
    log::debug!("global search ready");
    Ok(())
}

fn closest(el: &Element, selector: &str) -> Option<Element> {
    el.closest(selector).ok().flatten()
}

/// Store the handoff for the category page and navigate there.
fn open_result(card: &Element) {
    let Some(page) = card.get_attribute("data-category-page").filter(|p| !p.is_empty()) else {
        log::warn!("search result without a category page");
        return;
    };
    if let Some(id) = card.get_attribute("data-course-id") {
        session_set(HIGHLIGHT_COURSE_KEY, &id);
    }
    let term = dom::by_id::<HtmlInputElement>(SEARCH_INPUT_ID)
        .map(|input| input.value())
        .unwrap_or_default();
    session_set(SEARCH_TERM_KEY, &term);
    dom::navigate(&page);
}

// ---------------------------------------------------------------------------
// Local search (category and help pages)
// ---------------------------------------------------------------------------

pub struct LocalSearch {
    bar: SearchBar,
    view: DomCardView,
    surface: DomSurface,
}

impl LocalSearch {
    /// Filter the cards with the input's current value.
    pub fn run(&mut self) -> LocalOutcome {
        self.bar.sync_clear_button();
        let query = Query::new(&self.bar.value());
        run_local(&mut self.view, &mut self.surface, &query)
    }

    /// Write `term` into the input and filter with it.
    pub fn replay(&mut self, term: &str) -> LocalOutcome {
        self.bar.set_value(term);
        self.run()
    }

    pub fn cards(&mut self) -> &mut DomCardView {
        &mut self.view
    }
}

pub type SharedLocalSearch = Rc<RefCell<LocalSearch>>;

/// Wire local filtering over the cards in `grid`. Returns `None` (after
/// logging) when the page has no search input.
pub fn init_local(grid: &Element) -> Option<SharedLocalSearch> {
    let bar = match SearchBar::attach() {
        Ok(bar) => bar,
        Err(err) => {
            log::error!("local search disabled: {}", err);
            return None;
        }
    };
    let local = Rc::new(RefCell::new(LocalSearch {
        bar: bar.clone(),
        view: DomCardView::new(grid.clone()),
        surface: DomSurface::new(grid.clone()),
    }));

    {
        let local = Rc::clone(&local);
        listen(bar.input().clone().as_ref(), "input", move |_: Event| {
            local.borrow_mut().run();
        });
    }

    {
        let local = Rc::clone(&local);
        let bar = bar.clone();
        listen(bar.input().clone().as_ref(), "keydown", move |ev: KeyboardEvent| {
            match ev.key().as_str() {
                "Enter" => {
                    ev.prevent_default();
                    local.borrow_mut().run();
                }
                "Escape" => {
                    bar.reset();
                    local.borrow_mut().run();
                }
                _ => {}
            }
        });
    }

    if let Some(clear) = bar.clear_button().cloned() {
        let local = Rc::clone(&local);
        let bar = bar.clone();
        listen(clear.as_ref(), "click", move |_: MouseEvent| {
            bar.reset();
            local.borrow_mut().run();
        });
    }

    bind_find_shortcut(&bar);
    log::debug!("local search ready");
    Some(local)
}

/// Clear the search box from page scripts; the regular `input` handler
/// restores the unfiltered view.
#[wasm_bindgen(js_name = clearSearch)]
pub fn clear_search() {
    let Some(input) = dom::by_id::<HtmlInputElement>(SEARCH_INPUT_ID) else {
        return;
    };
    input.set_value("");
    if let Ok(ev) = Event::new("input") {
        let _ = input.dispatch_event(&ev);
    }
    let _ = input.focus();
}
