use leptos::prelude::*;
use web_sys::HtmlInputElement;

use crate::domain::a001_course::ui::category_page;
use crate::domain::a003_help_item::ui::page as help_page;
use crate::layout::{loading_overlay, navbar};
use crate::routes::{self, PageKind};
use crate::shared::config::SiteConfig;
use crate::shared::dom;
use crate::shared::search::searchbar::{init_global, init_local, GRID_SELECTOR, SEARCH_INPUT_ID};
use crate::shared::theme::init_theme;

/// Enhance the static page: overlay, theme, navbar, then the page script.
pub fn boot() {
    // signals below live for the whole page
    let owner = Owner::new();
    owner.set();

    let config = SiteConfig::from_document();
    loading_overlay::init();
    provide_context(init_theme());

    if let Err(err) = navbar::init() {
        log::warn!("navbar disabled: {}", err);
    }
    navbar::init_smooth_anchors();

    let result = match routes::current() {
        PageKind::Index => init_global(&config),
        PageKind::Category { page_file } => category_page::init(&config, &page_file),
        PageKind::Help(scope) => help_page::init(&config, scope),
        PageKind::Other => {
            if let Some(grid) = dom::query(GRID_SELECTOR) {
                if dom::by_id::<HtmlInputElement>(SEARCH_INPUT_ID).is_some() {
                    init_local(&grid);
                }
            }
            Ok(())
        }
    };
    if let Err(err) = result {
        log::error!("page script disabled: {}", err);
    }

    std::mem::forget(owner);
}
