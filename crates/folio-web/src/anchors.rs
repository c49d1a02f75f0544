use crate::dom;
use folio_core::anchor::{anchor_scroll_top, anchor_selector};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const ANCHOR_LINKS: &str = r##"a[href^="#"]:not([href="#"])"##;

/// Smooth-scrolls to `href`'s target, leaving room for the fixed header.
/// Returns false when there is nothing to scroll to.
pub fn scroll_to_anchor(window: &web::Window, document: &web::Document, href: &str) -> bool {
    let Some(selector) = anchor_selector(href) else {
        return false;
    };
    let Some(target) = dom::query_one(document, selector) else {
        log::debug!("[anchor] no target for {}", href);
        return false;
    };
    let header_h = dom::query_one(document, ".header")
        .map(|h| h.offset_height() as f64)
        .unwrap_or(0.0);
    let top = anchor_scroll_top(
        target.get_bounding_client_rect().top(),
        window.scroll_y().unwrap_or(0.0),
        header_h,
    );
    let opts = web::ScrollToOptions::new();
    opts.set_top(top);
    opts.set_behavior(web::ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&opts);
    true
}

pub fn wire(document: &web::Document) {
    for link in dom::query_all(document, ANCHOR_LINKS) {
        let Some(href) = link.get_attribute("href") else {
            continue;
        };
        let doc = document.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::Event| {
            ev.prevent_default();
            if let Some(w) = web::window() {
                scroll_to_anchor(&w, &doc, &href);
            }
        }) as Box<dyn FnMut(_)>);
        let _ = link.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
