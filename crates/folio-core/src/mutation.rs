use crate::constants::WRITE_EPSILON;
use crate::surface::{Mutation, Surface, TargetId};
use fnv::FnvHashMap;
use glam::Vec2;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum Slot {
    Class(String),
    Style(String),
    Translate,
    RotateY,
}

#[derive(Clone, Debug, PartialEq)]
enum Written {
    Present(bool),
    Text(String),
    Offset(Vec2),
    Angle(f32),
}

impl Written {
    fn same_as(&self, other: &Written) -> bool {
        match (self, other) {
            (Written::Offset(a), Written::Offset(b)) => {
                (*a - *b).abs().max_element() < WRITE_EPSILON
            }
            (Written::Angle(a), Written::Angle(b)) => (a - b).abs() < WRITE_EPSILON,
            _ => self == other,
        }
    }
}

fn slot_of(mutation: &Mutation) -> (Slot, Written) {
    match mutation {
        Mutation::AddClass(c) => (Slot::Class(c.clone()), Written::Present(true)),
        Mutation::RemoveClass(c) => (Slot::Class(c.clone()), Written::Present(false)),
        Mutation::SetStyle { property, value } => {
            (Slot::Style(property.clone()), Written::Text(value.clone()))
        }
        Mutation::Translate(v) => (Slot::Translate, Written::Offset(*v)),
        Mutation::RotateY(deg) => (Slot::RotateY, Written::Angle(*deg)),
    }
}

/// Writes mutations to a surface, dropping any write that would leave the
/// target unchanged since the last write through this applier.
#[derive(Debug, Default)]
pub struct Applier {
    last: FnvHashMap<(TargetId, Slot), Written>,
    written: u64,
    skipped: u64,
}

impl Applier {
    /// Returns whether the surface was touched.
    pub fn apply<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        target: TargetId,
        mutation: &Mutation,
    ) -> bool {
        let (slot, value) = slot_of(mutation);
        let key = (target, slot);
        if let Some(prev) = self.last.get(&key) {
            if prev.same_as(&value) {
                self.skipped += 1;
                return false;
            }
        }
        surface.apply(target, mutation);
        self.last.insert(key, value);
        self.written += 1;
        true
    }

    pub fn clear(&mut self) {
        self.last.clear();
    }

    #[inline]
    pub fn written(&self) -> u64 {
        self.written
    }

    #[inline]
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{MemoryElement, MemorySurface, Viewport};

    #[test]
    fn redundant_class_and_offset_writes_are_skipped() {
        let mut surface = MemorySurface::new(Viewport::new(100.0, 100.0));
        let t = surface.add(MemoryElement::new(".header"));
        let mut applier = Applier::default();

        let add = Mutation::AddClass("scrolled".into());
        assert!(applier.apply(&mut surface, t, &add));
        assert!(!applier.apply(&mut surface, t, &add));
        assert!(applier.apply(&mut surface, t, &Mutation::RemoveClass("scrolled".into())));

        assert!(applier.apply(&mut surface, t, &Mutation::Translate(Vec2::new(1.0, 1.0))));
        assert!(!applier.apply(&mut surface, t, &Mutation::Translate(Vec2::new(1.001, 1.0))));

        assert_eq!(surface.writes(), 3);
        assert_eq!(applier.skipped(), 2);
    }
}
