use crate::dom;
use crate::storage::{prefers_dark, LocalStorage};
use folio_core::{Theme, ThemeBridge};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub type SharedBridge = Rc<RefCell<ThemeBridge<LocalStorage>>>;

/// Swaps the `light-mode` / `dark-mode` body classes.
pub fn apply(document: &web::Document, theme: Theme) {
    if let Some(body) = dom::body_classes(document) {
        let _ = body.remove_1(theme.toggled().body_class());
        let _ = body.add_1(theme.body_class());
    }
}

pub fn apply_initial(document: &web::Document, bridge: &SharedBridge) {
    let theme = bridge.borrow_mut().resolve_theme(prefers_dark());
    apply(document, theme);
    log::info!("[theme] {}", theme);
}

pub fn wire_toggle(document: &web::Document, bridge: SharedBridge) {
    let Some(button) = dom::query_one(document, ".theme-toggle") else {
        return;
    };
    let doc = document.clone();
    dom::add_click_listener(&button, move || {
        let theme = bridge.borrow_mut().toggle(prefers_dark());
        apply(&doc, theme);
        log::info!("[theme] toggled to {}", theme);
    });
}
