use crate::dom;
use web_sys as web;

const ACTIVE: &str = "active";
const MENU_OPEN: &str = "menu-open";

pub fn toggle(document: &web::Document) {
    for sel in [".menu-toggle", ".nav"] {
        if let Some(el) = dom::query_one(document, sel) {
            let _ = el.class_list().toggle(ACTIVE);
        }
    }
    if let Some(body) = dom::body_classes(document) {
        let _ = body.toggle(MENU_OPEN);
    }
}

pub fn close(document: &web::Document) {
    for sel in [".menu-toggle", ".nav"] {
        if let Some(el) = dom::query_one(document, sel) {
            let _ = el.class_list().remove_1(ACTIVE);
        }
    }
    if let Some(body) = dom::body_classes(document) {
        let _ = body.remove_1(MENU_OPEN);
    }
}

pub fn is_open(document: &web::Document) -> bool {
    dom::body_classes(document)
        .map(|b| b.contains(MENU_OPEN))
        .unwrap_or(false)
}

pub fn wire(document: &web::Document) {
    let Some(toggle_el) = dom::query_one(document, ".menu-toggle") else {
        return;
    };
    let doc = document.clone();
    dom::add_click_listener(&toggle_el, move || {
        toggle(&doc);
        log::info!("[menu] open={}", is_open(&doc));
    });
    for link in dom::query_all(document, ".nav__link") {
        let doc = document.clone();
        dom::add_click_listener(&link, move || close(&doc));
    }
}
