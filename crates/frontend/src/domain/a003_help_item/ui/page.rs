use contracts::domain::a003_help_item::HelpKind;
use contracts::shared::Catalog;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, HtmlInputElement};

use super::card::render_help_cards;
use crate::domain::a001_course::api::fetch_catalog;
use crate::shared::config::SiteConfig;
use crate::shared::dom::{self, MissingElement};
use crate::shared::search::searchbar::{init_local, SharedLocalSearch, SEARCH_INPUT_ID};

pub const HELP_GRID_SELECTOR: &str = ".courses-grid.help-grid";

/// Какие списки показывать на справочной странице
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpScope {
    Faq,
    Guide,
    /// Page type could not be determined.
    Both,
}

impl HelpScope {
    /// FAQ wins over guide when both markers are present.
    pub fn detect(path: &str, body_classes: &str) -> Self {
        let has_class = |name: &str| body_classes.split_whitespace().any(|c| c == name);
        if path.contains("faq") || has_class("faq-page") {
            HelpScope::Faq
        } else if path.contains("guide") || has_class("guide-page") {
            HelpScope::Guide
        } else {
            HelpScope::Both
        }
    }
}

/// Markup for every card `scope` selects, FAQ before guide.
pub fn render_scope(catalog: &Catalog, scope: HelpScope) -> String {
    let mut html = String::new();
    if matches!(scope, HelpScope::Faq | HelpScope::Both) {
        html.push_str(&render_help_cards(&catalog.faqs, HelpKind::Faq));
    }
    if matches!(scope, HelpScope::Guide | HelpScope::Both) {
        html.push_str(&render_help_cards(&catalog.guide, HelpKind::Guide));
    }
    html
}

/// Replace whatever the grid holds with the cards for `scope` and wire
/// local search when the page has an input.
pub fn render_into(grid: &Element, catalog: &Catalog, scope: HelpScope) -> Option<SharedLocalSearch> {
    grid.set_inner_html(&render_scope(catalog, scope));
    log::debug!("rendered help page ({:?})", scope);
    if dom::by_id::<HtmlInputElement>(SEARCH_INPUT_ID).is_some() {
        init_local(grid)
    } else {
        None
    }
}

pub fn init(config: &SiteConfig, scope: HelpScope) -> Result<(), MissingElement> {
    let grid = dom::require(HELP_GRID_SELECTOR)?;
    let config = config.clone();

    spawn_local(async move {
        match fetch_catalog(&config).await {
            Ok(catalog) => {
                render_into(&grid, &catalog, scope);
            }
            Err(err) => log::error!("Error fetching data: {}", err),
        }
    });
    Ok(())
}
