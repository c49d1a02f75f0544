use super::EngineWiring;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

pub fn wire_scroll(w: &EngineWiring) {
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move || {
        let y = w.window.scroll_y().unwrap_or(0.0) as f32;
        let (Ok(mut engine), Ok(mut surface)) = (w.engine.try_borrow_mut(), w.surface.try_borrow_mut())
        else {
            log::warn!("[scroll] engine busy; dropping sample at y={:.0}", y);
            return;
        };
        engine.on_scroll(y, &mut *surface);
    }) as Box<dyn FnMut()>);
    let _ = w
        .window
        .add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn wire_resize(w: &EngineWiring) {
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move || {
        let (Ok(mut engine), Ok(mut surface)) = (w.engine.try_borrow_mut(), w.surface.try_borrow_mut())
        else {
            return;
        };
        engine.on_resize(&mut *surface);
    }) as Box<dyn FnMut()>);
    let _ = w
        .window
        .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}
