use std::cell::RefCell;

use gloo_timers::callback::Timeout;
use js_sys::{Array, Function, Promise, Reflect};
use leptos::prelude::*;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Element, Event, EventTarget, HtmlImageElement, HtmlLinkElement, VisibilityState};

use super::schedule::{
    ConnectionProfile, OverlaySchedule, Readiness, FADE_OUT_MS, MAX_OVERLAY_MS,
    RESOURCE_CHECK_DELAY_MS,
};
use crate::shared::dom::{self, add_class, listen, lock_scroll, remove_class, set_style};

const OVERLAY_ID: &str = "loading-overlay";
const MAIN_CONTENT_ID: &str = "main-content";
const PROBE_IMAGE: &str =
    "data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OverlayPhase {
    Visible,
    FadingOut,
    Removed,
}

/// Overlay for pages whose markup has no `#loading-overlay`.
#[component]
pub fn LoadingOverlay(phase: RwSignal<OverlayPhase>) -> impl IntoView {
    view! {
        <Show when=move || phase.get() != OverlayPhase::Removed>
            <div
                id=OVERLAY_ID
                class=move || {
                    if phase.get() == OverlayPhase::FadingOut {
                        "loading-overlay hidden"
                    } else {
                        "loading-overlay"
                    }
                }
            >
                <div class="loading-content">
                    <div class="loading-spinner"></div>
                </div>
            </div>
        </Show>
    }
}

enum OverlayHandle {
    /// Markup provided by the page.
    Host(Element),
    Mounted(RwSignal<OverlayPhase>),
}

impl OverlayHandle {
    fn show(&self) {
        match self {
            OverlayHandle::Host(el) => {
                if el.parent_node().is_none() {
                    if let Some(body) = dom::body() {
                        let _ = body.append_child(el);
                    }
                }
                set_style(el, "opacity", "");
                set_style(el, "visibility", "");
                remove_class(el, "hidden");
            }
            OverlayHandle::Mounted(phase) => phase.set(OverlayPhase::Visible),
        }
    }

    fn fade_out(&self) {
        match self {
            OverlayHandle::Host(el) => {
                set_style(el, "transition", "opacity 0.5s ease-out, visibility 0.5s ease-out");
                set_style(el, "opacity", "0");
                set_style(el, "visibility", "hidden");
                add_class(el, "hidden");
            }
            OverlayHandle::Mounted(phase) => phase.set(OverlayPhase::FadingOut),
        }
    }

    fn remove(&self) {
        match self {
            OverlayHandle::Host(el) => el.remove(),
            OverlayHandle::Mounted(phase) => phase.set(OverlayPhase::Removed),
        }
    }
}

struct OverlayState {
    schedule: OverlaySchedule,
    handle: OverlayHandle,
}

thread_local! {
    static OVERLAY: RefCell<Option<OverlayState>> = const { RefCell::new(None) };
}

fn with_schedule<R>(f: impl FnOnce(&mut OverlaySchedule) -> R) -> Option<R> {
    OVERLAY.with(|cell| cell.borrow_mut().as_mut().map(|state| f(&mut state.schedule)))
}

/// Show the overlay and start the readiness checks.
pub fn init() {
    lock_scroll(true);
    let handle = match dom::by_id::<Element>(OVERLAY_ID) {
        Some(el) => OverlayHandle::Host(el),
        None => {
            let phase = RwSignal::new(OverlayPhase::Visible);
            leptos::mount::mount_to_body(move || view! { <LoadingOverlay phase=phase /> });
            OverlayHandle::Mounted(phase)
        }
    };
    OVERLAY.with(|cell| {
        *cell.borrow_mut() = Some(OverlayState {
            schedule: OverlaySchedule::new(dom::now_ms()),
            handle,
        })
    });

    check_connection();

    Timeout::new(RESOURCE_CHECK_DELAY_MS, || {
        spawn_local(async {
            wait_for_resources().await;
            with_schedule(|s| s.mark_loaded());
            log::debug!("All resources loaded");
            check_ready();
        });
    })
    .forget();

    arm_force_hide();

    if let Some(connection) = connection_target() {
        listen(&connection, "change", |_: Event| {
            if !content_loaded() {
                check_connection();
            }
        });
    }
    if let Some(document) = dom::document() {
        let doc = document.clone();
        listen(document.as_ref(), "visibilitychange", move |_: Event| {
            if doc.visibility_state() == VisibilityState::Visible && !content_loaded() {
                check_connection();
            }
        });
    }
}

/// Hide after [`MAX_OVERLAY_MS`] unless this showing already ended.
fn arm_force_hide() {
    let Some(showing) = with_schedule(|s| s.showing()) else {
        return;
    };
    Timeout::new(MAX_OVERLAY_MS, move || {
        if with_schedule(|s| s.force_hide_due(showing)).unwrap_or(false) {
            log::info!("Force hiding loader after maximum time");
            hide();
        }
    })
    .forget();
}

fn content_loaded() -> bool {
    with_schedule(|s| s.content_loaded()).unwrap_or(true)
}

fn navigator_connection() -> Option<JsValue> {
    let navigator = web_sys::window()?.navigator();
    Reflect::get(&navigator, &JsValue::from_str("connection"))
        .ok()
        .filter(|c| !c.is_undefined() && !c.is_null())
}

fn connection_target() -> Option<EventTarget> {
    navigator_connection()?.dyn_into::<EventTarget>().ok()
}

/// `effectiveType` when the Network Information API is available.
fn effective_type() -> Option<String> {
    let connection = navigator_connection()?;
    Some(
        Reflect::get(&connection, &JsValue::from_str("effectiveType"))
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default(),
    )
}

fn check_connection() {
    match effective_type() {
        Some(kind) => {
            let profile = ConnectionProfile::EffectiveType(kind.clone());
            let min = profile.min_display_ms();
            with_schedule(|s| s.set_profile(&profile));
            log::info!("Connection type: {}, minimum load time: {}ms", kind, min);
        }
        None => probe_connection(),
    }
}

/// Time a tiny image load when `navigator.connection` is missing.
fn probe_connection() {
    let Ok(img) = HtmlImageElement::new() else {
        return;
    };
    let started = dom::now_ms();
    listen(img.as_ref(), "load", move |_: Event| {
        let profile = ConnectionProfile::Probe {
            duration_ms: dom::now_ms() - started,
        };
        log::info!("Connection test: minimum load time {}ms", profile.min_display_ms());
        with_schedule(|s| s.set_profile(&profile));
        check_ready();
    });
    listen(img.as_ref(), "error", |_: Event| {
        log::warn!("Connection test failed, using slow connection settings");
        with_schedule(|s| s.set_profile(&ConnectionProfile::ProbeFailed));
        check_ready();
    });
    img.set_src(&format!("{}?{}", PROBE_IMAGE, js_sys::Math::random()));
}

/// A promise that settles on the first `load` or `error` of `target`.
fn settled(target: &EventTarget) -> Promise {
    Promise::new(&mut |resolve: Function, _reject: Function| {
        for event in ["load", "error"] {
            let resolve = resolve.clone();
            listen(target, event, move |_: Event| {
                let _ = resolve.call0(&JsValue::NULL);
            });
        }
    })
}

/// Wait for every image and stylesheet; failed ones count as loaded.
async fn wait_for_resources() {
    let pending = Array::new();
    for el in dom::query_all("img") {
        if let Some(img) = el.dyn_ref::<HtmlImageElement>() {
            if !img.complete() {
                pending.push(&settled(img.as_ref()));
            }
        }
    }
    for el in dom::query_all(r#"link[rel="stylesheet"]"#) {
        if let Some(link) = el.dyn_ref::<HtmlLinkElement>() {
            if link.sheet().is_none() {
                pending.push(&settled(link.as_ref()));
            }
        }
    }
    if pending.length() > 0 {
        let _ = JsFuture::from(Promise::all(&pending)).await;
    }
}

fn check_ready() {
    match with_schedule(|s| s.check(dom::now_ms())) {
        Some(Readiness::Hide) => hide(),
        Some(Readiness::RecheckAfter(ms)) => {
            Timeout::new(ms, || {
                if with_schedule(|s| s.recheck(dom::now_ms())).unwrap_or(false) {
                    hide();
                }
            })
            .forget();
        }
        Some(Readiness::AlreadyHidden) | None => {}
    }
}

/// Fade the overlay out and reveal the page. Safe to call repeatedly.
pub fn hide() {
    let dismissed = OVERLAY.with(|cell| {
        let mut guard = cell.borrow_mut();
        let state = guard.as_mut()?;
        if !state.schedule.dismiss() {
            return None;
        }
        state.handle.fade_out();
        Some(())
    });
    if dismissed.is_none() {
        return;
    }

    if let Some(body) = dom::body() {
        remove_class(&body, "loading");
    }
    if let Some(main) = dom::by_id::<Element>(MAIN_CONTENT_ID) {
        set_style(&main, "transition", "opacity 0.5s ease-in, visibility 0.5s ease-in");
        set_style(&main, "opacity", "1");
        set_style(&main, "visibility", "visible");
        add_class(&main, "visible");
    }

    Timeout::new(FADE_OUT_MS, || {
        let still_hidden = OVERLAY.with(|cell| {
            let guard = cell.borrow();
            match guard.as_ref() {
                Some(state) if state.schedule.is_hidden() => {
                    state.handle.remove();
                    true
                }
                _ => false,
            }
        });
        if still_hidden {
            lock_scroll(false);
            log::info!("Loading complete");
        }
    })
    .forget();
}

#[wasm_bindgen(js_name = showLoader)]
pub fn show_loader() {
    let shown = OVERLAY.with(|cell| {
        let mut guard = cell.borrow_mut();
        let state = guard.as_mut()?;
        state.schedule.reopen(dom::now_ms());
        state.handle.show();
        Some(())
    });
    if shown.is_none() {
        log::warn!("showLoader called before the overlay was initialized");
        return;
    }
    lock_scroll(true);
    if let Some(main) = dom::by_id::<Element>(MAIN_CONTENT_ID) {
        set_style(&main, "opacity", "0");
        set_style(&main, "visibility", "hidden");
        remove_class(&main, "visible");
    }
    arm_force_hide();
}

#[wasm_bindgen(js_name = hideLoader)]
pub fn hide_loader() {
    hide();
}
