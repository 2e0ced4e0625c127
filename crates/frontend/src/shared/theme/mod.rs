//! Theme management: light, dark or auto (follow the system preference).
//!
//! The choice lives in a `RwSignal` inside [`ThemeContext`], is persisted in
//! localStorage under `theme` and is applied to `<html>` through the
//! `data-theme` attribute and the `color-scheme` property.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use wasm_bindgen::JsValue;
use web_sys::{CustomEvent, CustomEventInit, Element, Event, HtmlInputElement};

use crate::shared::dom::{self, listen, set_style};
use crate::shared::storage::{local_get, local_set, THEME_KEY};

pub const THEME_CHANGED_EVENT: &str = "themeChanged";
const TOGGLE_ID: &str = "theme-toggle";
const STATUS_TEXT_ID: &str = "theme-status-text";
const AUTO_INDICATOR_ID: &str = "auto-indicator";
const DARK_QUERY: &str = "(prefers-color-scheme: dark)";
/// Задержка перед синхронизацией переключателя
const TOGGLE_SYNC_DELAY_MS: u32 = 100;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Theme {
    Light,
    Dark,
    #[default]
    Auto,
}

impl Theme {
    /// Name used in localStorage and in the `themeChanged` event detail.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Auto => "auto",
        }
    }

    /// Unknown or missing values mean `Auto`.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("light") => Theme::Light,
            Some("dark") => Theme::Dark,
            _ => Theme::Auto,
        }
    }

    pub fn status_label(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::Auto => "Auto",
        }
    }

    /// auto → light → dark → auto
    pub fn next(&self) -> Self {
        match self {
            Theme::Auto => Theme::Light,
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Auto,
        }
    }

    /// `data-theme` value; `Auto` leaves the attribute off so CSS media
    /// queries decide.
    pub fn data_theme(&self) -> Option<&'static str> {
        match self {
            Theme::Light => Some("light"),
            Theme::Dark => Some("dark"),
            Theme::Auto => None,
        }
    }

    pub fn color_scheme(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Auto => "light dark",
        }
    }

    /// Checked state of the toggle: on for dark, and for auto when the
    /// system prefers dark.
    pub fn toggle_checked(&self, system_dark: bool) -> bool {
        match self {
            Theme::Light => false,
            Theme::Dark => true,
            Theme::Auto => system_dark,
        }
    }
}

pub fn system_prefers_dark() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media(DARK_QUERY).ok().flatten())
        .map_or(false, |mq| mq.matches())
}

fn apply_theme(theme: Theme) {
    let Some(root) = dom::document().and_then(|d| d.document_element()) else {
        return;
    };
    let _ = root.remove_attribute("data-theme");
    if let Some(value) = theme.data_theme() {
        let _ = root.set_attribute("data-theme", value);
    }
    set_style(&root, "color-scheme", theme.color_scheme());

    if let Some(status) = dom::by_id::<Element>(STATUS_TEXT_ID) {
        status.set_text_content(Some(theme.status_label()));
    }
    if theme != Theme::Auto {
        if let Some(indicator) = dom::by_id::<Element>(AUTO_INDICATOR_ID) {
            indicator.set_text_content(Some(""));
        }
    }

    local_set(THEME_KEY, theme.as_str());
    dispatch_theme_changed(theme);
}

fn dispatch_theme_changed(theme: Theme) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let init = CustomEventInit::new();
    init.set_detail(&JsValue::from_str(theme.as_str()));
    match CustomEvent::new_with_event_init_dict(THEME_CHANGED_EVENT, &init) {
        Ok(event) => {
            let _ = window.dispatch_event(&event);
        }
        Err(err) => log::warn!("themeChanged not dispatched: {:?}", err),
    }
}

/// Theme context type.
#[derive(Clone, Copy)]
pub struct ThemeContext {
    pub theme: RwSignal<Theme>,
}

impl ThemeContext {
    /// Set, apply and persist the theme.
    pub fn set_theme(&self, theme: Theme) {
        self.theme.set(theme);
        apply_theme(theme);
    }

    pub fn get_theme(&self) -> Theme {
        self.theme.get_untracked()
    }

    pub fn cycle_theme(&self) {
        self.set_theme(self.get_theme().next());
    }

    /// Match the toggle's checked state to the current theme.
    pub fn sync_toggle(&self) {
        if let Some(toggle) = dom::by_id::<HtmlInputElement>(TOGGLE_ID) {
            toggle.set_checked(self.get_theme().toggle_checked(system_prefers_dark()));
        }
    }
}

/// Apply the stored theme and wire `#theme-toggle` and the system
/// preference listener.
pub fn init_theme() -> ThemeContext {
    let initial = Theme::from_stored(local_get(THEME_KEY).as_deref());
    let ctx = ThemeContext {
        theme: RwSignal::new(initial),
    };
    ctx.set_theme(initial);
    ctx.sync_toggle();

    match dom::by_id::<HtmlInputElement>(TOGGLE_ID) {
        Some(toggle) => listen(toggle.as_ref(), "change", move |_: Event| {
            ctx.cycle_theme();
            Timeout::new(TOGGLE_SYNC_DELAY_MS, move || ctx.sync_toggle()).forget();
        }),
        None => log::warn!("#{} not found; theme toggle disabled", TOGGLE_ID),
    }

    if let Some(mq) = web_sys::window().and_then(|w| w.match_media(DARK_QUERY).ok().flatten()) {
        listen(mq.as_ref(), "change", move |_: Event| {
            if ctx.get_theme() == Theme::Auto {
                ctx.set_theme(Theme::Auto);
                ctx.sync_toggle();
            }
        });
    }

    log::debug!("theme initialized: {}", initial.as_str());
    ctx
}
