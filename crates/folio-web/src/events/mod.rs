use crate::dom::DomSurface;
use folio_core::Engine;
use glam::Vec2;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use web_sys as web;

pub mod pointer;
pub mod scroll;

/// Handles shared by the window listeners that feed the engine.
#[derive(Clone)]
pub struct EngineWiring {
    pub window: web::Window,
    pub engine: Rc<RefCell<Engine>>,
    pub surface: Rc<RefCell<DomSurface>>,
    /// Latest pointer sample, consumed by the next frame.
    pub pointer: Rc<Cell<Option<Vec2>>>,
}

pub fn wire_engine_handlers(w: &EngineWiring) {
    scroll::wire_scroll(w);
    scroll::wire_resize(w);
    pointer::wire_pointermove(w);
}
