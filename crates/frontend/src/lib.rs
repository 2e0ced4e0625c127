pub mod app;
pub mod domain;
pub mod layout;
pub mod routes;
pub mod shared;

use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::Event;

#[wasm_bindgen(start)]
pub fn start() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    match shared::dom::document() {
        Some(document) if document.ready_state() == "loading" => {
            shared::dom::listen(document.as_ref(), "DOMContentLoaded", |_: Event| app::boot());
        }
        Some(_) => app::boot(),
        None => log::error!("no document; nothing to enhance"),
    }
}
