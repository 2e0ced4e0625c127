//! Browser storage keys and accessors.
//!
//! `localStorage` keeps the theme preference. `sessionStorage` carries the
//! one-shot handoff from the index search to a category page; those values
//! are removed as soon as they are read.

use web_sys::{window, Storage};

pub const THEME_KEY: &str = "theme";
pub const HIGHLIGHT_COURSE_KEY: &str = "highlightCourse";
pub const SEARCH_TERM_KEY: &str = "searchTerm";

fn local() -> Option<Storage> {
    window().and_then(|w| w.local_storage().ok().flatten())
}

fn session() -> Option<Storage> {
    window().and_then(|w| w.session_storage().ok().flatten())
}

pub fn local_get(key: &str) -> Option<String> {
    local().and_then(|storage| storage.get_item(key).ok().flatten())
}

pub fn local_set(key: &str, value: &str) {
    if let Some(storage) = local() {
        let _ = storage.set_item(key, value);
    }
}

pub fn session_set(key: &str, value: &str) {
    if let Some(storage) = session() {
        let _ = storage.set_item(key, value);
    }
}

/// Read a session value and remove it in the same step.
pub fn session_take(key: &str) -> Option<String> {
    let storage = session()?;
    let value = storage.get_item(key).ok().flatten();
    if value.is_some() {
        let _ = storage.remove_item(key);
    }
    value.filter(|v| !v.is_empty())
}
