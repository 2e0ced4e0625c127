//! Responsive header menu driven by the `#responsive-menu` checkbox.

use wasm_bindgen::JsCast;
use web_sys::{
    Element, Event, HtmlElement, HtmlInputElement, KeyboardEvent, MouseEvent, Node,
    ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use crate::shared::dom::{self, listen, lock_scroll, MissingElement};

/// Ширина, до которой меню считается мобильным
pub const MOBILE_BREAKPOINT_PX: f64 = 800.0;

const MENU_TOGGLE_ID: &str = "responsive-menu";
const MENU_ITEM_SELECTOR: &str = ".header__menuItem a";
const NAV_SELECTOR: &str = ".header__nav";
const LABEL_SELECTOR: &str = ".toggle-menu";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    ItemClick,
    OutsideClick,
    Escape,
    Resize,
}

pub fn is_mobile(width: f64) -> bool {
    width <= MOBILE_BREAKPOINT_PX
}

/// Whether `event` closes the menu, given its state and the viewport width.
pub fn should_close(event: MenuEvent, open: bool, width: f64) -> bool {
    match event {
        MenuEvent::ItemClick => is_mobile(width),
        MenuEvent::OutsideClick => open && is_mobile(width),
        MenuEvent::Escape => open,
        MenuEvent::Resize => open && !is_mobile(width),
    }
}

/// Tab past the last item, or Shift+Tab before the first, while the menu
/// is open returns focus to the toggle label.
pub fn wraps_focus(index: usize, count: usize, shift: bool, open: bool) -> bool {
    if !open || count == 0 {
        return false;
    }
    (index == count - 1 && !shift) || (index == 0 && shift)
}

fn close_menu(menu: &HtmlInputElement) {
    menu.set_checked(false);
    lock_scroll(false);
}

pub fn init() -> Result<(), MissingElement> {
    let menu: HtmlInputElement = dom::require_by_id(MENU_TOGGLE_ID)?;
    let items = dom::query_all(MENU_ITEM_SELECTOR);

    for item in &items {
        let menu = menu.clone();
        listen(item.as_ref(), "click", move |_: MouseEvent| {
            if should_close(MenuEvent::ItemClick, menu.checked(), dom::inner_width()) {
                close_menu(&menu);
            }
        });
    }

    if let Some(document) = dom::document() {
        let nav = dom::query(NAV_SELECTOR);
        {
            let menu = menu.clone();
            listen(document.as_ref(), "click", move |ev: MouseEvent| {
                if !should_close(MenuEvent::OutsideClick, menu.checked(), dom::inner_width()) {
                    return;
                }
                let target = ev.target().and_then(|t| t.dyn_into::<Node>().ok());
                let inside = match (&nav, &target) {
                    (Some(nav), Some(target)) => nav.contains(Some(target)),
                    _ => false,
                };
                if !inside {
                    close_menu(&menu);
                }
            });
        }

        let menu = menu.clone();
        listen(document.as_ref(), "keydown", move |ev: KeyboardEvent| {
            if ev.key() == "Escape" && should_close(MenuEvent::Escape, menu.checked(), 0.0) {
                close_menu(&menu);
            }
        });
    }

    if let Some(window) = web_sys::window() {
        let menu = menu.clone();
        listen(window.as_ref(), "resize", move |_: Event| {
            if should_close(MenuEvent::Resize, menu.checked(), dom::inner_width()) {
                close_menu(&menu);
            }
        });
    }

    {
        let target = menu.clone();
        listen(menu.as_ref(), "change", move |_: Event| lock_scroll(target.checked()));
    }

    match dom::query(LABEL_SELECTOR).and_then(|el| el.dyn_into::<HtmlElement>().ok()) {
        Some(label) => bind_keyboard(&menu, &label, &items),
        None => log::warn!("{} not found; menu keyboard navigation disabled", LABEL_SELECTOR),
    }

    log::debug!("navbar ready ({} items)", items.len());
    Ok(())
}

fn bind_keyboard(menu: &HtmlInputElement, label: &HtmlElement, items: &[Element]) {
    {
        let menu = menu.clone();
        listen(label.as_ref(), "keydown", move |ev: KeyboardEvent| {
            if matches!(ev.key().as_str(), "Enter" | " ") {
                ev.prevent_default();
                menu.click();
            }
        });
    }

    let count = items.len();
    for (index, item) in items.iter().enumerate() {
        let menu = menu.clone();
        let label = label.clone();
        listen(item.as_ref(), "keydown", move |ev: KeyboardEvent| {
            if ev.key() == "Tab" && wraps_focus(index, count, ev.shift_key(), menu.checked()) {
                ev.prevent_default();
                let _ = label.focus();
            }
        });
    }
}

/// Smooth scrolling for in-page `#anchor` links.
pub fn init_smooth_anchors() {
    for anchor in dom::query_all(r##"a[href^="#"]"##) {
        let link = anchor.clone();
        listen(anchor.as_ref(), "click", move |ev: MouseEvent| {
            let Some(href) = link.get_attribute("href") else {
                return;
            };
            ev.prevent_default();
            if let Some(target) = dom::query(&href) {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                options.set_block(ScrollLogicalPosition::Start);
                target.scroll_into_view_with_scroll_into_view_options(&options);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_click_closes_on_mobile_only() {
        assert!(should_close(MenuEvent::ItemClick, true, 800.0));
        assert!(!should_close(MenuEvent::ItemClick, true, 801.0));
    }

    #[test]
    fn test_outside_click_needs_open_mobile_menu() {
        assert!(should_close(MenuEvent::OutsideClick, true, 500.0));
        assert!(!should_close(MenuEvent::OutsideClick, false, 500.0));
        assert!(!should_close(MenuEvent::OutsideClick, true, 1200.0));
    }

    #[test]
    fn test_escape_and_resize() {
        assert!(should_close(MenuEvent::Escape, true, 1200.0));
        assert!(!should_close(MenuEvent::Escape, false, 300.0));
        assert!(should_close(MenuEvent::Resize, true, 1024.0));
        assert!(!should_close(MenuEvent::Resize, true, 640.0));
    }

    #[test]
    fn test_focus_wrap() {
        assert!(wraps_focus(3, 4, false, true));
        assert!(wraps_focus(0, 4, true, true));
        assert!(!wraps_focus(1, 4, false, true));
        assert!(!wraps_focus(3, 4, false, false));
        assert!(!wraps_focus(0, 0, true, true));
    }
}
