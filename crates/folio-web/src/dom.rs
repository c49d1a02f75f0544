use folio_core::{Mutation, Rect, Surface, TargetId, Viewport};
use glam::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn body_classes(document: &web::Document) -> Option<web::DomTokenList> {
    document.body().map(|b| b.class_list())
}

/// All elements matching `selector`; an invalid selector yields none.
pub fn query_all(document: &web::Document, selector: &str) -> Vec<web::HtmlElement> {
    let Ok(list) = document.query_selector_all(selector) else {
        log::warn!("[dom] invalid selector `{}`", selector);
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<web::HtmlElement>().ok())
        .collect()
}

pub fn query_one(document: &web::Document, selector: &str) -> Option<web::HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

pub fn add_listener(target: &web::EventTarget, event: &str, mut handler: impl FnMut() + 'static) {
    let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
    let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

#[inline]
pub fn add_click_listener(element: &web::EventTarget, handler: impl FnMut() + 'static) {
    add_listener(element, "click", handler);
}

/// CSS `transform` carrying both motion components, so a translate and a
/// tilt on the same element never erase each other.
pub fn transform_css(offset: Vec2, rotate_y_deg: f32) -> String {
    format!(
        "translate3d({:.2}px, {:.2}px, 0) rotateY({:.2}deg)",
        offset.x, offset.y, rotate_y_deg
    )
}

/// The live page as an engine surface.
///
/// Elements are interned on first query; `TargetId` is the index into the
/// arena, so repeated queries hand back the same ids.
pub struct DomSurface {
    window: web::Window,
    document: web::Document,
    elements: Vec<web::HtmlElement>,
    // (translate, rotateY) last written per element
    transforms: Vec<(Vec2, f32)>,
}

impl DomSurface {
    pub fn new(window: web::Window, document: web::Document) -> Self {
        Self {
            window,
            document,
            elements: Vec::new(),
            transforms: Vec::new(),
        }
    }

    fn intern(&mut self, el: web::HtmlElement) -> TargetId {
        let existing = self
            .elements
            .iter()
            .position(|e| e.is_same_node(Some(el.as_ref())));
        let index = existing.unwrap_or_else(|| {
            self.elements.push(el);
            self.transforms.push((Vec2::ZERO, 0.0));
            self.elements.len() - 1
        });
        TargetId(index as u32)
    }

    fn element(&self, target: TargetId) -> Option<&web::HtmlElement> {
        self.elements.get(target.0 as usize)
    }
}

impl Surface for DomSurface {
    fn query(&mut self, selector: &str) -> Vec<TargetId> {
        query_all(&self.document, selector)
            .into_iter()
            .map(|el| self.intern(el))
            .collect()
    }

    fn bounds(&self, target: TargetId) -> Option<Rect> {
        let r = self.element(target)?.get_bounding_client_rect();
        Some(Rect::new(
            r.left() as f32,
            r.top() as f32,
            r.width() as f32,
            r.height() as f32,
        ))
    }

    fn viewport(&self) -> Viewport {
        let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
        };
        Viewport::new(
            dim(self.window.inner_width()),
            dim(self.window.inner_height()),
        )
    }

    fn attribute(&self, target: TargetId, name: &str) -> Option<String> {
        self.element(target)?.get_attribute(name)
    }

    fn has_class(&self, target: TargetId, class: &str) -> bool {
        self.element(target)
            .map(|el| el.class_list().contains(class))
            .unwrap_or(false)
    }

    fn apply(&mut self, target: TargetId, mutation: &Mutation) {
        let i = target.0 as usize;
        let (Some(el), Some(transform)) = (self.elements.get(i), self.transforms.get_mut(i)) else {
            return;
        };
        let style = el.style();
        match mutation {
            Mutation::AddClass(c) => {
                let _ = el.class_list().add_1(c);
            }
            Mutation::RemoveClass(c) => {
                let _ = el.class_list().remove_1(c);
            }
            Mutation::SetStyle { property, value } => {
                let _ = style.set_property(property, value);
            }
            Mutation::Translate(v) => {
                transform.0 = *v;
                let _ = style.set_property("transform", &transform_css(transform.0, transform.1));
            }
            Mutation::RotateY(deg) => {
                transform.1 = *deg;
                let _ = style.set_property("transform", &transform_css(transform.0, transform.1));
            }
        }
    }
}
