use fnv::FnvHashMap;
use glam::Vec2;
use std::collections::{BTreeMap, BTreeSet};

/// Opaque handle for an element on the rendering surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u32);

/// Bounding box in viewport (client) coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.left
            && p.x <= self.left + self.width
            && p.y >= self.top
            && p.y <= self.bottom()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// A single visual write against one target.
#[derive(Clone, Debug, PartialEq)]
pub enum Mutation {
    AddClass(String),
    RemoveClass(String),
    SetStyle { property: String, value: String },
    Translate(Vec2),
    RotateY(f32),
}

/// The rendering surface the engine reads layout from and writes mutations to.
///
/// The engine never asks for more layout than a bounding box and the viewport
/// size.
pub trait Surface {
    fn query(&mut self, selector: &str) -> Vec<TargetId>;
    fn bounds(&self, target: TargetId) -> Option<Rect>;
    fn viewport(&self) -> Viewport;
    fn attribute(&self, target: TargetId, name: &str) -> Option<String>;
    fn has_class(&self, target: TargetId, class: &str) -> bool;
    fn apply(&mut self, target: TargetId, mutation: &Mutation);
}

// ---------------- In-memory surface ----------------

/// An element of [`MemorySurface`]. Selectors match by exact string.
#[derive(Clone, Debug, Default)]
pub struct MemoryElement {
    pub selectors: Vec<String>,
    pub rect: Rect,
    pub attributes: BTreeMap<String, String>,
    pub classes: BTreeSet<String>,
    pub styles: BTreeMap<String, String>,
    pub translate: Vec2,
    pub rotate_y: f32,
}

impl MemoryElement {
    pub fn new(selector: &str) -> Self {
        Self {
            selectors: vec![selector.to_string()],
            ..Default::default()
        }
    }

    pub fn also(mut self, selector: &str) -> Self {
        self.selectors.push(selector.to_string());
        self
    }

    pub fn at(mut self, top: f32, height: f32) -> Self {
        self.rect.top = top;
        self.rect.height = height;
        self
    }

    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.insert(class.to_string());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }
}

/// Host-side surface used by tests and by anything that wants to drive the
/// engine without a browser.
///
/// `scroll_to` moves every element's rect the way a real page would, so
/// visibility behaves like a document scrolled by `y` pixels.
#[derive(Clone, Debug, Default)]
pub struct MemorySurface {
    viewport: Viewport,
    elements: Vec<MemoryElement>,
    document_tops: FnvHashMap<u32, f32>,
    writes: usize,
}

impl MemorySurface {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Default::default()
        }
    }

    /// Adds an element whose rect top is its document offset.
    pub fn add(&mut self, element: MemoryElement) -> TargetId {
        let id = self.elements.len() as u32;
        self.document_tops.insert(id, element.rect.top);
        self.elements.push(element);
        TargetId(id)
    }

    pub fn element(&self, id: TargetId) -> &MemoryElement {
        &self.elements[id.0 as usize]
    }

    pub fn element_mut(&mut self, id: TargetId) -> &mut MemoryElement {
        &mut self.elements[id.0 as usize]
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Shifts all rects as if the document were scrolled to `y`.
    pub fn scroll_to(&mut self, y: f32) {
        for (i, el) in self.elements.iter_mut().enumerate() {
            let doc_top = self.document_tops.get(&(i as u32)).copied().unwrap_or(0.0);
            el.rect.top = doc_top - y;
        }
    }

    /// Number of mutations that reached the surface.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Surface for MemorySurface {
    fn query(&mut self, selector: &str) -> Vec<TargetId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, el)| el.selectors.iter().any(|s| s == selector))
            .map(|(i, _)| TargetId(i as u32))
            .collect()
    }

    // Like `getBoundingClientRect`, the box includes the applied translation.
    fn bounds(&self, target: TargetId) -> Option<Rect> {
        self.elements.get(target.0 as usize).map(|el| {
            let mut r = el.rect;
            r.left += el.translate.x;
            r.top += el.translate.y;
            r
        })
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn attribute(&self, target: TargetId, name: &str) -> Option<String> {
        self.elements
            .get(target.0 as usize)
            .and_then(|el| el.attributes.get(name).cloned())
    }

    fn has_class(&self, target: TargetId, class: &str) -> bool {
        self.elements
            .get(target.0 as usize)
            .map(|el| el.has_class(class))
            .unwrap_or(false)
    }

    fn apply(&mut self, target: TargetId, mutation: &Mutation) {
        let Some(el) = self.elements.get_mut(target.0 as usize) else {
            return;
        };
        self.writes += 1;
        match mutation {
            Mutation::AddClass(c) => {
                el.classes.insert(c.clone());
            }
            Mutation::RemoveClass(c) => {
                el.classes.remove(c);
            }
            Mutation::SetStyle { property, value } => {
                el.styles.insert(property.clone(), value.clone());
            }
            Mutation::Translate(v) => el.translate = *v,
            Mutation::RotateY(deg) => el.rotate_y = *deg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_edges() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert!(r.contains(Vec2::new(10.0, 20.0)));
        assert!(r.contains(Vec2::new(110.0, 70.0)));
        assert!(!r.contains(Vec2::new(9.9, 30.0)));
        assert!(!r.contains(Vec2::new(50.0, 70.1)));
    }

    #[test]
    fn memory_surface_scroll_moves_rects() {
        let mut s = MemorySurface::new(Viewport::new(800.0, 600.0));
        let id = s.add(MemoryElement::new(".section").at(1000.0, 400.0));
        s.scroll_to(300.0);
        assert_eq!(s.bounds(id).map(|r| r.top), Some(700.0));
        s.scroll_to(0.0);
        assert_eq!(s.bounds(id).map(|r| r.top), Some(1000.0));
    }
}
