//! DOM implementations of [`Surface`] and [`CardView`] over `.courses-grid`.

use web_sys::Element;

use super::controller::Surface;
use super::local::{CardText, CardView};
use super::CategoryGroup;
use crate::domain::a001_course::ui::card::render_search_results;
use crate::shared::dom::{add_class, query_all_within, query_within, remove_class, set_display, text_of};
use crate::shared::escape::escape_html_text;
use crate::shared::icons::icon;

const TRANSIENT_SELECTOR: &str =
    ".loading-message, .error-message, .no-results-message, .search-result-card, .search-category-header";
const CATEGORY_CARD_SELECTOR: &str = ".course-card:not(.search-result-card)";
pub const RETRY_BUTTON_CLASS: &str = "retry-button";

const LOADING_HTML: &str = r#"<div class="loading-message"><div class="loading-content"><div class="loading-spinner"></div><p>در حال بارگیری دروس...</p></div></div>"#;
const NO_RESULTS_HTML: &str = r#"<div class="no-results-message"><div class="error-content"><div class="error-icon">❌</div><h3>هیچ درسی پیدا نشد</h3><p>لطفاً عبارت جستجوی خود را بررسی کنید یا کلمه کلیدی دیگری امتحان کنید</p></div></div>"#;

pub fn error_html(message: &str) -> String {
    format!(
        r#"<div class="error-message"><div class="error-content"><div class="error-icon">⚠️</div><h3>{}</h3><button type="button" class="{}">{} تلاش مجدد</button></div></div>"#,
        escape_html_text(message),
        RETRY_BUTTON_CLASS,
        icon("refresh"),
    )
}

/// The course grid as the controller's drawing surface.
pub struct DomSurface {
    grid: Element,
}

impl DomSurface {
    pub fn new(grid: Element) -> Self {
        Self { grid }
    }

    fn append(&self, html: &str) {
        if let Err(err) = self.grid.insert_adjacent_html("beforeend", html) {
            log::warn!("grid insert failed: {:?}", err);
        }
    }
}

impl Surface for DomSurface {
    fn clear_transient(&mut self) {
        for el in query_all_within(&self.grid, TRANSIENT_SELECTOR) {
            el.remove();
        }
    }

    fn set_categories_visible(&mut self, visible: bool) {
        let display = if visible { "block" } else { "none" };
        for card in query_all_within(&self.grid, CATEGORY_CARD_SELECTOR) {
            set_display(&card, display);
        }
    }

    fn show_loading(&mut self) {
        self.append(LOADING_HTML);
    }

    fn show_results(&mut self, groups: &[CategoryGroup<'_>]) {
        self.append(&render_search_results(groups));
    }

    fn show_no_results(&mut self) {
        self.append(NO_RESULTS_HTML);
    }

    fn show_error(&mut self, message: &str) {
        self.append(&error_html(message));
    }
}

/// Cards currently in `root`, re-queried on every [`CardView::card_texts`].
pub struct DomCardView {
    root: Element,
    current: Vec<Element>,
}

impl DomCardView {
    pub fn new(root: Element) -> Self {
        Self {
            root,
            current: Vec::new(),
        }
    }

    /// Card elements as of the last `card_texts` call.
    pub fn cards(&self) -> &[Element] {
        &self.current
    }
}

impl CardView for DomCardView {
    fn card_texts(&mut self) -> Vec<CardText> {
        self.current = query_all_within(&self.root, ".course-card");
        self.current
            .iter()
            .map(|card| CardText {
                title: query_within(card, ".course-title").map(|el| text_of(&el)),
                code: query_within(card, ".course-code")
                    .map(|el| text_of(&el))
                    .unwrap_or_default(),
                badges: query_all_within(card, ".instructor-badge")
                    .iter()
                    .map(text_of)
                    .collect(),
            })
            .collect()
    }

    fn set_card_state(&mut self, index: usize, visible: bool, matched: bool) {
        let Some(card) = self.current.get(index) else {
            return;
        };
        set_display(card, if visible { "block" } else { "none" });
        if matched {
            add_class(card, "search-match");
        } else {
            remove_class(card, "search-match");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_markup_has_retry_control() {
        let html = error_html("امکان بارگیری دروس وجود ندارد");
        assert!(html.starts_with(r#"<div class="error-message">"#));
        assert!(html.contains(r#"class="retry-button""#));
        assert!(html.contains("امکان بارگیری دروس وجود ندارد"));
    }

    #[test]
    fn test_transient_selector_covers_every_message() {
        for class in ["loading-message", "error-message", "no-results-message", "search-result-card"] {
            assert!(TRANSIENT_SELECTOR.contains(class));
        }
        assert!(LOADING_HTML.contains("loading-message"));
        assert!(NO_RESULTS_HTML.contains("no-results-message"));
    }
}
