use super::EngineWiring;
use glam::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Records the latest client position; the frame loop hands it to the engine
/// so a burst of moves costs one evaluation.
pub fn wire_pointermove(w: &EngineWiring) {
    let pointer = w.pointer.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        pointer.set(Some(Vec2::new(ev.client_x() as f32, ev.client_y() as f32)));
    }) as Box<dyn FnMut(_)>);
    let _ = w
        .window
        .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
    closure.forget();
}
