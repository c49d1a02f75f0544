// Host-side tests for the trigger engine driven through an in-memory surface.

use folio_core::{
    BehaviorSpec, Effect, Engine, EngineError, MemoryElement, MemorySurface, Predicate,
    Registration, SignalKind, Viewport,
};
use glam::Vec2;

fn reveal(id: &str, selector: &str) -> BehaviorSpec {
    BehaviorSpec::new(
        id,
        selector,
        SignalKind::Visibility,
        Predicate::InViewport { threshold: 0.8 },
        Effect::add_classes(["reveal", "active"]),
    )
    .once()
}

fn scroll(engine: &mut Engine, surface: &mut MemorySurface, y: f32) {
    surface.scroll_to(y);
    engine.on_scroll(y, surface);
}

fn run_frames(engine: &mut Engine, surface: &mut MemorySurface, frames: usize) -> bool {
    let mut moving = true;
    for _ in 0..frames {
        moving = engine.frame(1.0 / 60.0, surface);
    }
    moving
}

#[test]
fn once_behavior_fires_exactly_once() {
    let mut surface = MemorySurface::new(Viewport::new(1200.0, 1000.0));
    let section = surface.add(MemoryElement::new(".section").at(1500.0, 400.0));
    let mut engine = Engine::new();

    let reg = engine.register(reveal("reveal", ".section"), &mut surface);
    assert_eq!(reg, Ok(Registration::Active { targets: 1 }));
    assert!(!surface.element(section).has_class("reveal"));

    scroll(&mut engine, &mut surface, 800.0);
    assert!(surface.element(section).has_class("reveal"));
    assert!(surface.element(section).has_class("active"));
    let writes_after_fire = surface.writes();

    // Strip the classes; repeated crossings must not put them back.
    surface.element_mut(section).classes.clear();
    for y in [0.0, 900.0, 0.0, 1200.0, 750.0] {
        scroll(&mut engine, &mut surface, y);
    }
    assert!(!surface.element(section).has_class("reveal"));
    assert_eq!(surface.writes(), writes_after_fire);

    let b = engine.behavior("reveal").expect("registered");
    assert!(b.fired());
    assert_eq!(b.fired_count(), 1);
    assert_eq!(engine.subscribers(SignalKind::Visibility), 0);
}

#[test]
fn eased_once_behavior_unsubscribes_after_firing() {
    let mut surface = MemorySurface::new(Viewport::new(800.0, 600.0));
    let cursor = surface.add(MemoryElement::new(".custom-cursor"));
    let mut engine = Engine::new();
    engine
        .register(
            BehaviorSpec::new(
                "cursor-once",
                ".custom-cursor",
                SignalKind::Pointer,
                Predicate::Always,
                Effect::CursorFollow,
            )
            .smoothed(0.05)
            .once(),
            &mut surface,
        )
        .unwrap();
    assert_eq!(engine.subscribers(SignalKind::Pointer), 1);

    engine.on_pointer(100.0, 100.0, &mut surface);
    run_frames(&mut engine, &mut surface, 120);
    assert!(engine.behavior("cursor-once").unwrap().fired());
    assert_eq!(engine.subscribers(SignalKind::Pointer), 0);
    assert!((surface.element(cursor).translate - Vec2::new(100.0, 100.0)).length() < 0.01);

    // later samples no longer reach it
    let writes = surface.writes();
    engine.on_pointer(700.0, 500.0, &mut surface);
    assert!(!run_frames(&mut engine, &mut surface, 30));
    assert_eq!(surface.writes(), writes);
    assert!((surface.element(cursor).translate - Vec2::new(100.0, 100.0)).length() < 0.01);
}

#[test]
fn experience_items_enter_from_alternating_sides() {
    let mut surface = MemorySurface::new(Viewport::new(1200.0, 1000.0));
    let items: Vec<_> = [100.0, 300.0, 500.0]
        .into_iter()
        .map(|top| surface.add(MemoryElement::new(".experience__item").at(top, 150.0)))
        .collect();
    let mut engine = Engine::new();
    engine
        .register_all(folio_core::config::default_behaviors(), &mut surface)
        .unwrap();

    let sides: Vec<(bool, bool)> = items
        .iter()
        .map(|id| {
            let el = surface.element(*id);
            assert!(el.has_class("reveal") && el.has_class("active"));
            (el.has_class("from-left"), el.has_class("from-right"))
        })
        .collect();
    assert_eq!(sides, vec![(true, false), (false, true), (true, false)]);
}

#[test]
fn once_behavior_tracks_each_target() {
    let mut surface = MemorySurface::new(Viewport::new(1200.0, 1000.0));
    let near = surface.add(MemoryElement::new(".section").at(500.0, 300.0));
    let far = surface.add(MemoryElement::new(".section").at(3000.0, 300.0));
    let mut engine = Engine::new();
    engine.register(reveal("reveal", ".section"), &mut surface).unwrap();

    // Already inside the viewport at load.
    assert!(surface.element(near).has_class("reveal"));
    assert!(!surface.element(far).has_class("reveal"));
    assert!(!engine.behavior("reveal").unwrap().fired());
    assert_eq!(engine.subscribers(SignalKind::Visibility), 1);

    scroll(&mut engine, &mut surface, 2500.0);
    assert!(surface.element(far).has_class("reveal"));
    assert!(engine.behavior("reveal").unwrap().fired());
}

#[test]
fn duplicate_id_fails_and_leaves_registry_unchanged() {
    let mut surface = MemorySurface::new(Viewport::new(800.0, 600.0));
    surface.add(MemoryElement::new(".section").at(2000.0, 300.0));
    surface.add(MemoryElement::new(".header"));
    let mut engine = Engine::new();
    engine.register(reveal("a", ".section"), &mut surface).unwrap();

    let dup = BehaviorSpec::new(
        "a",
        ".header",
        SignalKind::Scroll,
        Predicate::Always,
        Effect::add_classes(["x"]),
    );
    assert_eq!(
        engine.register(dup, &mut surface),
        Err(EngineError::DuplicateBehavior("a".into()))
    );
    assert_eq!(engine.len(), 1);
    assert_eq!(engine.ids().collect::<Vec<_>>(), vec!["a"]);
    assert_eq!(engine.subscribers(SignalKind::Scroll), 0);
    assert_eq!(engine.subscribers(SignalKind::Visibility), 1);
}

#[test]
fn selector_without_matches_is_a_silent_noop() {
    let mut surface = MemorySurface::new(Viewport::new(800.0, 600.0));
    let mut engine = Engine::new();

    let reg = engine.register(reveal("ghost", ".does-not-exist"), &mut surface);
    assert_eq!(reg, Ok(Registration::Inactive));
    assert!(engine.is_empty());
    assert!(engine.behavior("ghost").is_none());
    for kind in [SignalKind::Scroll, SignalKind::Pointer, SignalKind::Visibility] {
        assert_eq!(engine.subscribers(kind), 0);
    }
    assert_eq!(surface.writes(), 0);
}

#[test]
fn pointer_updates_do_not_touch_scroll_behaviors() {
    let mut surface = MemorySurface::new(Viewport::new(800.0, 600.0));
    let header = surface.add(MemoryElement::new(".header"));
    surface.add(MemoryElement::new(".custom-cursor"));
    let mut engine = Engine::new();
    engine
        .register_all(folio_core::config::default_behaviors(), &mut surface)
        .unwrap();

    scroll(&mut engine, &mut surface, 100.0);
    assert!(surface.element(header).has_class("scrolled"));
    let writes = surface.writes();
    let state = *engine.behavior("header").unwrap().header().unwrap();

    engine.on_pointer(10.0, 10.0, &mut surface);
    engine.on_pointer(20.0, 20.0, &mut surface);
    assert_eq!(surface.writes(), writes);
    assert_eq!(*engine.behavior("header").unwrap().header().unwrap(), state);
}

#[test]
fn eased_pointer_behaviors_write_once_per_frame() {
    let mut surface = MemorySurface::new(Viewport::new(800.0, 600.0));
    let cursor = surface.add(MemoryElement::new(".custom-cursor"));
    let mut engine = Engine::new();
    let spec = BehaviorSpec::new(
        "cursor",
        ".custom-cursor",
        SignalKind::Pointer,
        Predicate::Always,
        Effect::CursorFollow,
    )
    .smoothed(0.05);
    engine.register(spec, &mut surface).unwrap();
    assert_eq!(surface.writes(), 0);

    for x in [100.0, 200.0, 400.0] {
        engine.on_pointer(x, 300.0, &mut surface);
    }
    assert_eq!(surface.writes(), 0);

    engine.frame(1.0 / 60.0, &mut surface);
    assert_eq!(surface.writes(), 1);
    // first target snaps
    assert_eq!(surface.element(cursor).translate, Vec2::new(400.0, 300.0));

    engine.on_pointer(800.0, 600.0, &mut surface);
    engine.frame(1.0 / 60.0, &mut surface);
    let x = surface.element(cursor).translate.x;
    assert!(x > 400.0 && x < 800.0, "cursor should trail, got {x}");

    let moving = run_frames(&mut engine, &mut surface, 120);
    assert!(!moving);
    assert_eq!(surface.element(cursor).translate, Vec2::new(800.0, 600.0));

    let settled_writes = surface.writes();
    engine.frame(1.0 / 60.0, &mut surface);
    assert_eq!(surface.writes(), settled_writes);
}

#[test]
fn pointer_parallax_scales_with_shape_index() {
    let mut surface = MemorySurface::new(Viewport::new(1000.0, 500.0));
    let a = surface.add(MemoryElement::new(".hero__shape"));
    let b = surface.add(MemoryElement::new(".hero__shape"));
    let mut engine = Engine::new();
    let spec = BehaviorSpec::new(
        "hero",
        ".hero__shape",
        SignalKind::Pointer,
        Predicate::Always,
        Effect::PointerParallax { strength: 20.0 },
    )
    .smoothed(0.3);
    engine.register(spec, &mut surface).unwrap();

    engine.on_pointer(1000.0, 0.0, &mut surface);
    engine.frame(1.0 / 60.0, &mut surface);
    let first = surface.element(a).translate;
    assert!(first.x > 0.0 && first.x < 10.0);

    run_frames(&mut engine, &mut surface, 600);
    assert_eq!(surface.element(a).translate, Vec2::new(10.0, -10.0));
    assert_eq!(surface.element(b).translate, Vec2::new(20.0, -20.0));
}

#[test]
fn scroll_parallax_follows_progress_through_viewport() {
    let mut surface = MemorySurface::new(Viewport::new(1000.0, 800.0));
    let plain = surface.add(MemoryElement::new(".section").at(1000.0, 500.0));
    let deep = surface.add(
        MemoryElement::new(".section")
            .at(1000.0, 500.0)
            .with_attribute("data-parallax-depth", "0.2"),
    );
    let mut engine = Engine::new();
    let spec = BehaviorSpec::new(
        "parallax",
        ".section",
        SignalKind::Scroll,
        Predicate::Always,
        Effect::ScrollParallax {
            depth: 0.1,
            depth_attribute: Some("data-parallax-depth".into()),
        },
    );
    engine.register(spec, &mut surface).unwrap();
    assert_eq!(surface.element(plain).translate, Vec2::ZERO);

    scroll(&mut engine, &mut surface, 700.0);
    let expected = (800.0 - 300.0) / 1300.0 * 800.0 * 0.1;
    assert!((surface.element(plain).translate.y - expected).abs() < 1e-3);
    assert!((surface.element(deep).translate.y - 2.0 * expected).abs() < 1e-3);

    // The applied offset must not feed back into the next measurement.
    scroll(&mut engine, &mut surface, 700.0);
    assert!((surface.element(plain).translate.y - expected).abs() < 1e-3);

    scroll(&mut engine, &mut surface, 5000.0);
    assert!((surface.element(plain).translate.y - 80.0).abs() < 1e-3);
}

#[test]
fn hover_tilt_respects_flipped_cards() {
    let mut surface = MemorySurface::new(Viewport::new(1000.0, 1000.0));
    let card = surface.add(
        MemoryElement::new(".business-card")
            .with_rect(folio_core::Rect::new(100.0, 100.0, 200.0, 100.0)),
    );
    let mut engine = Engine::new();
    let spec = BehaviorSpec::new(
        "tilt",
        ".business-card",
        SignalKind::Pointer,
        Predicate::Always,
        Effect::HoverTilt {
            degrees: 15.0,
            unless_class: Some("flipped".into()),
        },
    )
    .smoothed(0.1);
    engine.register(spec, &mut surface).unwrap();

    engine.on_pointer(150.0, 150.0, &mut surface);
    run_frames(&mut engine, &mut surface, 120);
    assert_eq!(surface.element(card).rotate_y, 15.0);

    surface.element_mut(card).classes.insert("flipped".into());
    engine.on_pointer(900.0, 900.0, &mut surface);
    run_frames(&mut engine, &mut surface, 120);
    assert_eq!(surface.element(card).rotate_y, 15.0);

    surface.element_mut(card).classes.remove("flipped");
    engine.on_pointer(901.0, 900.0, &mut surface);
    run_frames(&mut engine, &mut surface, 120);
    assert_eq!(surface.element(card).rotate_y, 0.0);
}

#[test]
fn skill_bar_progress_is_copied_at_load() {
    let mut surface = MemorySurface::new(Viewport::new(1000.0, 800.0));
    let bar = surface.add(
        MemoryElement::new(".skill-bar__progress")
            .at(3000.0, 10.0)
            .with_attribute("data-width", "85%"),
    );
    let mut engine = Engine::new();
    engine
        .register_all(folio_core::config::default_behaviors(), &mut surface)
        .unwrap();

    assert_eq!(
        surface.element(bar).styles.get("--progress").map(String::as_str),
        Some("85%")
    );
    assert!(!surface.element(bar).has_class("animate"));
    assert!(engine.behavior("skill-progress").unwrap().fired());

    scroll(&mut engine, &mut surface, 2400.0);
    assert!(surface.element(bar).has_class("animate"));
}

#[test]
fn later_behaviors_overwrite_earlier_ones() {
    let mut surface = MemorySurface::new(Viewport::new(800.0, 600.0));
    let el = surface.add(
        MemoryElement::new(".bar")
            .with_attribute("data-a", "10%")
            .with_attribute("data-b", "90%"),
    );
    let mut engine = Engine::new();
    for (id, attr) in [("first", "data-a"), ("second", "data-b")] {
        let spec = BehaviorSpec::new(
            id,
            ".bar",
            SignalKind::Scroll,
            Predicate::Always,
            Effect::StyleFromAttribute {
                attribute: attr.into(),
                property: "--progress".into(),
            },
        );
        engine.register(spec, &mut surface).unwrap();
    }
    assert_eq!(engine.ids().collect::<Vec<_>>(), vec!["first", "second"]);

    scroll(&mut engine, &mut surface, 10.0);
    assert_eq!(
        surface.element(el).styles.get("--progress").map(String::as_str),
        Some("90%")
    );
}

#[test]
fn scroll_past_predicate_gates_effect() {
    let mut surface = MemorySurface::new(Viewport::new(800.0, 600.0));
    let top = surface.add(MemoryElement::new(".back-to-top"));
    let mut engine = Engine::new();
    let spec = BehaviorSpec::new(
        "back-to-top",
        ".back-to-top",
        SignalKind::Scroll,
        Predicate::ScrollPast { px: 400.0 },
        Effect::add_classes(["visible"]),
    );
    engine.register(spec, &mut surface).unwrap();

    scroll(&mut engine, &mut surface, 400.0);
    assert!(!surface.element(top).has_class("visible"));
    scroll(&mut engine, &mut surface, 401.0);
    assert!(surface.element(top).has_class("visible"));
}

#[test]
fn unregister_all_drops_behaviors_and_subscriptions() {
    let mut surface = MemorySurface::new(Viewport::new(800.0, 600.0));
    surface.add(MemoryElement::new(".header"));
    surface.add(MemoryElement::new(".section").at(5000.0, 100.0));
    surface.add(MemoryElement::new(".custom-cursor"));
    let mut engine = Engine::new();
    let active = engine
        .register_all(folio_core::config::default_behaviors(), &mut surface)
        .unwrap();
    assert!(active >= 3);

    engine.unregister_all();
    assert!(engine.is_empty());
    for kind in [SignalKind::Scroll, SignalKind::Pointer, SignalKind::Visibility] {
        assert_eq!(engine.subscribers(kind), 0);
    }

    let writes = surface.writes();
    scroll(&mut engine, &mut surface, 4800.0);
    engine.on_pointer(5.0, 5.0, &mut surface);
    engine.frame(1.0 / 60.0, &mut surface);
    assert_eq!(surface.writes(), writes);

    // ids are free again
    assert!(engine.register(reveal("reveal-sections", ".section"), &mut surface).is_ok());
}

#[test]
fn resize_reveals_targets_that_came_into_view() {
    let mut surface = MemorySurface::new(Viewport::new(800.0, 600.0));
    let section = surface.add(MemoryElement::new(".section").at(700.0, 100.0));
    let mut engine = Engine::new();
    engine.register(reveal("reveal", ".section"), &mut surface).unwrap();
    assert!(!surface.element(section).has_class("reveal"));

    surface.set_viewport(Viewport::new(800.0, 1200.0));
    engine.on_resize(&mut surface);
    assert!(surface.element(section).has_class("reveal"));
}
