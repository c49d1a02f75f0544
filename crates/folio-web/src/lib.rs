#![cfg(target_arch = "wasm32")]
use folio_core::{Engine, EngineConfig, ThemeBridge};
use glam::Vec2;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub mod anchors;
pub mod card;
pub mod config;
pub mod contact;
pub mod cursor;
pub mod dom;
mod events;
mod frame;
pub mod loader;
pub mod menu;
pub mod storage;
pub mod theme;
pub mod typed;

pub use config::{load_config, parse_config, CONFIG_ELEMENT_ID};
pub use dom::DomSurface;
pub use storage::{prefers_dark, LocalStorage};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("folio-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let cfg: EngineConfig = config::load_config(&document);

    // Page chrome that does not depend on the engine
    loader::schedule_hide(&window, &cfg.loader);
    menu::wire(&document);
    card::wire(&document);
    anchors::wire(&document);
    contact::wire(&document);

    let bridge = Rc::new(RefCell::new(ThemeBridge::new(
        LocalStorage,
        cfg.theme_key.clone(),
    )));
    theme::apply_initial(&document, &bridge);
    theme::wire_toggle(&document, bridge);

    let surface = Rc::new(RefCell::new(DomSurface::new(window.clone(), document.clone())));
    let engine = Rc::new(RefCell::new(Engine::new()));
    {
        let mut engine = engine.borrow_mut();
        let mut surface = surface.borrow_mut();
        let y = window.scroll_y().unwrap_or(0.0) as f32;
        engine.on_scroll(y, &mut *surface);
        let active = engine.register_all(cfg.behaviors, &mut *surface)?;
        log::info!("[engine] {} behaviors active", active);
    }

    let pointer: Rc<Cell<Option<Vec2>>> = Rc::new(Cell::new(None));
    let wiring = events::EngineWiring {
        window: window.clone(),
        engine: engine.clone(),
        surface: surface.clone(),
        pointer: pointer.clone(),
    };
    events::wire_engine_handlers(&wiring);
    cursor::wire(&window, &document, &cfg.cursor);

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        engine,
        surface,
        pointer,
        typed: typed::TypedText::attach(&document, &cfg.typewriter),
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);

    Ok(())
}
