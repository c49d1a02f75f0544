use crate::dom::DomSurface;
use crate::typed::TypedText;
use folio_core::Engine;
use glam::Vec2;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub engine: Rc<RefCell<Engine>>,
    pub surface: Rc<RefCell<DomSurface>>,
    pub pointer: Rc<Cell<Option<Vec2>>>,
    pub typed: Option<TypedText>,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        let dt_sec = dt.as_secs_f32();

        {
            let (Ok(mut engine), Ok(mut surface)) =
                (self.engine.try_borrow_mut(), self.surface.try_borrow_mut())
            else {
                return;
            };
            if let Some(p) = self.pointer.take() {
                engine.on_pointer(p.x, p.y, &mut *surface);
            }
            engine.frame(dt_sec, &mut *surface);
        }

        if let Some(typed) = self.typed.as_mut() {
            typed.tick(dt_sec * 1000.0);
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
