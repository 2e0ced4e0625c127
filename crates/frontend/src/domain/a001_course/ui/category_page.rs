use wasm_bindgen_futures::spawn_local;
use web_sys::MouseEvent;

use super::card::render_course_cards;
use crate::domain::a001_course::api::fetch_catalog;
use crate::shared::config::SiteConfig;
use crate::shared::dom::{self, MissingElement};
use crate::shared::search::controller::Surface;
use crate::shared::search::dom_surface::{DomSurface, RETRY_BUTTON_CLASS};
use crate::shared::search::handoff::Handoff;
use crate::shared::search::searchbar::{init_local, GRID_SELECTOR};

/// Render the courses of one category page (`courses-lab.html`, ...) into
/// the grid, then wire local search and apply a pending search handoff.
pub fn init(config: &SiteConfig, page_file: &str) -> Result<(), MissingElement> {
    let grid = dom::require(GRID_SELECTOR)?;
    let local = init_local(&grid);
    let config = config.clone();
    let page_file = page_file.to_string();
    let pending = Handoff::take();

    spawn_local(async move {
        match fetch_catalog(&config).await {
            Ok(catalog) => {
                let html = render_course_cards(catalog.courses_for_page(&page_file));
                if html.is_empty() {
                    log::error!("no courses found for {}", page_file);
                    pending.discard("no courses on this page");
                    return;
                }
                grid.set_inner_html(&html);
                log::debug!("rendered courses for {}", page_file);
                pending.apply(local.as_ref());
            }
            Err(err) => {
                log::error!("Error loading data: {}", err);
                pending.discard("course data failed to load");
                let mut surface = DomSurface::new(grid.clone());
                surface.clear_transient();
                surface.show_error(err.user_message());
                // без контроллера повтор = перезагрузка страницы
                dom::listen(grid.as_ref(), "click", |ev: MouseEvent| {
                    let on_retry = dom::event_element(&ev)
                        .and_then(|el| el.closest(&format!(".{}", RETRY_BUTTON_CLASS)).ok().flatten())
                        .is_some();
                    if on_retry {
                        dom::reload();
                    }
                });
            }
        }
    });
    Ok(())
}
