use crate::dom;
use folio_core::config::CursorConfig;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use web_sys as web;

const CURSOR_SELECTOR: &str = ".custom-cursor";
const HOVER_TARGETS: &str = "a, button";

pub fn is_touch_device(window: &web::Window) -> bool {
    js_sys::Reflect::has(window, &JsValue::from_str("ontouchstart")).unwrap_or(false)
}

fn set_size(cursor: &web::HtmlElement, px: f32) {
    let style = cursor.style();
    let v = format!("{}px", px);
    let _ = style.set_property("width", &v);
    let _ = style.set_property("height", &v);
}

fn set_opacity(cursor: &web::HtmlElement, visible: bool) {
    let _ = cursor
        .style()
        .set_property("opacity", if visible { "1" } else { "0" });
}

/// Cursor chrome: visibility and hover size. Following the pointer is the
/// engine's `cursor-follow` behavior.
pub fn wire(window: &web::Window, document: &web::Document, cfg: &CursorConfig) {
    let Some(cursor) = dom::query_one(document, CURSOR_SELECTOR) else {
        return;
    };
    if is_touch_device(window) {
        let _ = cursor.style().set_property("display", "none");
        log::info!("[cursor] touch device; custom cursor disabled");
        return;
    }
    let cursor = Rc::new(cursor);

    {
        let cursor = cursor.clone();
        dom::add_listener(document, "mousemove", move || {
            if cursor.style().get_property_value("opacity").unwrap_or_default() != "1" {
                set_opacity(&cursor, true);
            }
        });
    }
    {
        let cursor = cursor.clone();
        dom::add_listener(document, "mouseleave", move || set_opacity(&cursor, false));
    }
    {
        let cursor = cursor.clone();
        dom::add_listener(document, "mouseenter", move || set_opacity(&cursor, true));
    }

    let (size, hover) = (cfg.size_px, cfg.hover_size_px);
    for link in dom::query_all(document, HOVER_TARGETS) {
        let grow = cursor.clone();
        dom::add_listener(&link, "mouseenter", move || set_size(&grow, hover));
        let shrink = cursor.clone();
        dom::add_listener(&link, "mouseleave", move || set_size(&shrink, size));
    }
}
