use crate::dom;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A click this soon after a touch on the card is the browser's synthetic
/// follow-up to that touch.
const SYNTHETIC_CLICK_MS: f64 = 800.0;

pub fn flip(card: &web::HtmlElement) {
    let _ = card.class_list().toggle("flipped");
}

/// Consumes the pending touch time and reports whether `click_at` belongs
/// to it.
pub fn is_synthetic_click(touched_at: &Cell<Option<f64>>, click_at: f64) -> bool {
    touched_at
        .take()
        .map_or(false, |t| click_at >= t && click_at - t < SYNTHETIC_CLICK_MS)
}

/// Click and touch both flip the card. Touch listens passively so scrolls
/// that start on the card still scroll. Tilt is the engine's `card-tilt`.
pub fn wire(document: &web::Document) {
    let Some(card) = dom::query_one(document, ".business-card") else {
        return;
    };
    let touched_at: Rc<Cell<Option<f64>>> = Rc::new(Cell::new(None));

    {
        let c = card.clone();
        let touched_at = touched_at.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::Event| {
            if !is_synthetic_click(&touched_at, ev.time_stamp()) {
                flip(&c);
            }
        }) as Box<dyn FnMut(_)>);
        let _ = card.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    let c = card.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        touched_at.set(Some(ev.time_stamp()));
        flip(&c);
    }) as Box<dyn FnMut(_)>);
    let options = web::AddEventListenerOptions::new();
    options.set_passive(true);
    let _ = card.add_event_listener_with_callback_and_add_event_listener_options(
        "touchstart",
        closure.as_ref().unchecked_ref(),
        &options,
    );
    closure.forget();
}
