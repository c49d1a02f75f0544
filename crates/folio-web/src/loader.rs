use crate::dom;
use folio_core::config::LoaderConfig;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const LOADER_SELECTOR: &str = ".loader";

pub fn fade(document: &web::Document, fade_ms: u32) {
    if let Some(el) = dom::query_one(document, LOADER_SELECTOR) {
        let style = el.style();
        let _ = style.set_property("transition", &format!("opacity {}ms ease", fade_ms));
        let _ = style.set_property("opacity", "0");
    }
}

pub fn hide(document: &web::Document) {
    if let Some(el) = dom::query_one(document, LOADER_SELECTOR) {
        let _ = el.class_list().add_1("hidden");
    }
}

pub fn is_hidden(document: &web::Document) -> bool {
    dom::query_one(document, LOADER_SELECTOR)
        .map(|el| el.class_list().contains("hidden"))
        .unwrap_or(true)
}

fn after(window: &web::Window, ms: u32, f: impl FnOnce() + 'static) {
    let closure = Closure::once(f);
    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        ms as i32,
    );
    closure.forget();
}

/// Fades the loader out after `delay_ms`, then hides it once the fade ends.
pub fn schedule_hide(window: &web::Window, cfg: &LoaderConfig) {
    let fade_ms = cfg.fade_ms;
    let w = window.clone();
    after(window, cfg.delay_ms, move || {
        let Some(document) = dom::window_document() else {
            return;
        };
        fade(&document, fade_ms);
        after(&w, fade_ms, || {
            if let Some(document) = dom::window_document() {
                hide(&document);
                log::info!("[loader] hidden");
            }
        });
    });
}
