use crate::behavior::{Behavior, BehaviorSpec, Effect, Predicate, Registration};
use crate::constants::MAX_FRAME_DT_SEC;
use crate::error::{EngineError, Result};
use crate::header::HeaderVisibility;
use crate::mutation::Applier;
use crate::signal::{
    in_viewport, PointerSource, ScrollSource, ScrollState, SignalKind, Subscribers,
    VisibilitySource,
};
use crate::surface::{Mutation, Surface, TargetId, Viewport};
use fnv::FnvHashMap;
use glam::Vec2;
use smallvec::SmallVec;

/// Signal values a behavior is evaluated against.
#[derive(Clone, Copy, Debug)]
struct Inputs {
    scroll: ScrollState,
    pointer: Vec2,
    viewport: Viewport,
}

/// Registry, signal sources and trigger evaluation for one page.
///
/// Discrete behaviors run synchronously inside `on_scroll` / `on_pointer` /
/// `on_resize`. Eased motion behaviors only record that they are stale there
/// and are advanced by [`Engine::frame`], at most once per animation frame.
#[derive(Debug, Default)]
pub struct Engine {
    behaviors: Vec<Behavior>,
    index: FnvHashMap<String, usize>,
    scroll: ScrollSource,
    pointer: PointerSource,
    visibility: VisibilitySource,
    applier: Applier,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------- Registry ----------------

    /// Registers a behavior and evaluates it once against the current signals.
    ///
    /// A selector that matches nothing leaves the engine untouched and returns
    /// [`Registration::Inactive`].
    pub fn register<S: Surface + ?Sized>(
        &mut self,
        spec: BehaviorSpec,
        surface: &mut S,
    ) -> Result<Registration> {
        if self.index.contains_key(&spec.id) {
            return Err(EngineError::DuplicateBehavior(spec.id));
        }
        let targets = surface.query(&spec.selector);
        if targets.is_empty() {
            log::debug!(
                "[engine] `{}` inactive: {}",
                spec.id,
                EngineError::MissingTarget(spec.selector.clone())
            );
            return Ok(Registration::Inactive);
        }

        let slot = self.behaviors.len();
        let n = targets.len();
        match spec.signal {
            SignalKind::Scroll => self.scroll.signal_mut().subscribe(slot),
            SignalKind::Pointer => self.pointer.signal_mut().subscribe(slot),
            SignalKind::Visibility => {
                self.visibility
                    .watch(slot, spec.visibility_threshold(), n)
            }
        }
        self.index.insert(spec.id.clone(), slot);
        self.behaviors.push(Behavior::new(spec, targets));
        log::debug!("[engine] registered `{}` on {} target(s)", self.behaviors[slot].id(), n);

        if self.behaviors[slot].spec.signal == SignalKind::Visibility {
            self.refresh_visibility(slot, surface);
        }
        self.evaluate(slot, surface);
        Ok(Registration::Active { targets: n })
    }

    /// Registers behaviors in order. Stops at the first duplicate id.
    pub fn register_all<S, I>(&mut self, specs: I, surface: &mut S) -> Result<usize>
    where
        S: Surface + ?Sized,
        I: IntoIterator<Item = BehaviorSpec>,
    {
        let mut active = 0;
        for spec in specs {
            if let Registration::Active { .. } = self.register(spec, surface)? {
                active += 1;
            }
        }
        log::info!("[engine] {} behavior(s) active", active);
        Ok(active)
    }

    /// Drops every behavior and subscription.
    pub fn unregister_all(&mut self) {
        self.behaviors.clear();
        self.index.clear();
        self.scroll.signal_mut().clear_subscribers();
        self.pointer.signal_mut().clear_subscribers();
        self.visibility.clear();
        self.applier.clear();
    }

    pub fn behavior(&self, id: &str) -> Option<&Behavior> {
        self.index.get(id).map(|slot| &self.behaviors[*slot])
    }

    /// Ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.behaviors.iter().map(|b| b.id())
    }

    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }

    /// Number of behaviors currently listening to `kind`.
    pub fn subscribers(&self, kind: SignalKind) -> usize {
        match kind {
            SignalKind::Scroll => self.scroll.signal().subscribers().len(),
            SignalKind::Pointer => self.pointer.signal().subscribers().len(),
            SignalKind::Visibility => self.visibility.subscribers().len(),
        }
    }

    #[inline]
    pub fn scroll_state(&self) -> &ScrollState {
        self.scroll.state()
    }

    #[inline]
    pub fn pointer(&self) -> Vec2 {
        self.pointer.get()
    }

    pub fn applier(&self) -> &Applier {
        &self.applier
    }

    // ---------------- Signal input ----------------

    pub fn on_scroll<S: Surface + ?Sized>(&mut self, y: f32, surface: &mut S) {
        self.scroll.sample(y);
        let subs: Subscribers = self.scroll.signal().subscribers().into();
        for slot in subs {
            self.evaluate(slot, surface);
        }
        self.refresh_all_visibility(surface);
    }

    pub fn on_pointer<S: Surface + ?Sized>(&mut self, client_x: f32, client_y: f32, surface: &mut S) {
        let viewport = surface.viewport();
        self.pointer.sample(client_x, client_y, viewport);
        let subs: Subscribers = self.pointer.signal().subscribers().into();
        for slot in subs {
            self.evaluate(slot, surface);
        }
    }

    /// Layout changed: re-measure visibility and re-target every motion.
    pub fn on_resize<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.refresh_all_visibility(surface);
        for b in self.behaviors.iter_mut() {
            if b.spec.effect.is_motion() {
                b.pending = true;
            }
        }
        for slot in 0..self.behaviors.len() {
            if !self.behaviors[slot].spec.is_continuous() && self.behaviors[slot].pending {
                self.evaluate(slot, surface);
            }
        }
    }

    /// Advances eased behaviors by `dt_sec`. Returns whether any target is
    /// still moving.
    pub fn frame<S: Surface + ?Sized>(&mut self, dt_sec: f32, surface: &mut S) -> bool {
        let dt = dt_sec.clamp(0.0, MAX_FRAME_DT_SEC);
        let inputs = self.inputs(surface.viewport());
        let mut moving = false;
        let Self {
            behaviors,
            applier,
            scroll,
            pointer,
            visibility,
            ..
        } = self;
        for (slot, b) in behaviors.iter_mut().enumerate() {
            if !b.spec.is_continuous() {
                continue;
            }
            let retargeted = std::mem::take(&mut b.pending);
            if retargeted {
                retarget(b, &inputs, surface);
                if b.fired() {
                    release(b, slot, scroll, pointer, visibility);
                }
            }
            let tau = b.spec.smoothing_tau.unwrap_or(0.0);
            for i in 0..b.targets.len() {
                let m = &mut b.motion[i];
                if m.is_settled() && !retargeted {
                    continue;
                }
                let v = m.step(dt, tau);
                if !m.is_settled() {
                    moving = true;
                }
                applier.apply(surface, b.targets[i], &motion_mutation(&b.spec.effect, v));
            }
        }
        moving
    }

    // ---------------- Evaluation ----------------

    fn inputs(&self, viewport: Viewport) -> Inputs {
        Inputs {
            scroll: *self.scroll.state(),
            pointer: self.pointer.get(),
            viewport,
        }
    }

    fn refresh_all_visibility<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let subs: Subscribers = self.visibility.subscribers().into();
        for slot in subs {
            if self.refresh_visibility(slot, surface) {
                self.evaluate(slot, surface);
            }
        }
    }

    /// Returns whether any target of `slot` changed visibility.
    fn refresh_visibility<S: Surface + ?Sized>(&mut self, slot: usize, surface: &mut S) -> bool {
        let viewport = surface.viewport();
        let mut changed = false;
        for (i, target) in self.behaviors[slot].targets.iter().enumerate() {
            if let Some(rect) = surface.bounds(*target) {
                if self.visibility.refresh(slot, i, rect, viewport).is_some() {
                    changed = true;
                }
            }
        }
        changed
    }

    fn evaluate<S: Surface + ?Sized>(&mut self, slot: usize, surface: &mut S) {
        let inputs = self.inputs(surface.viewport());
        let Self {
            behaviors,
            applier,
            scroll,
            pointer,
            visibility,
            ..
        } = self;
        let b = &mut behaviors[slot];

        if b.spec.is_continuous() {
            b.pending = true;
            return;
        }
        b.pending = false;

        let header = b.header.as_mut().map(|h| {
            let state = h.advance(&inputs.scroll);
            (state, h.scrolled())
        });

        for i in 0..b.targets.len() {
            if b.spec.once && b.fired[i] {
                continue;
            }
            let target = b.targets[i];
            let holds = match b.spec.predicate {
                Predicate::Always => true,
                Predicate::ScrollPast { px } => inputs.scroll.position > px,
                Predicate::InViewport { threshold } => {
                    if b.spec.signal == SignalKind::Visibility {
                        visibility.is_visible(slot, i)
                    } else {
                        surface
                            .bounds(target)
                            .map(|r| in_viewport(r, inputs.viewport, threshold))
                            .unwrap_or(false)
                    }
                }
            };
            if !holds {
                continue;
            }

            if b.spec.effect.is_motion() {
                let natural = b.motion[i].value();
                if let Some(t) = motion_target(&b.spec.effect, i, target, natural, &inputs, surface) {
                    b.motion[i].snap(t);
                    applier.apply(surface, target, &motion_mutation(&b.spec.effect, t));
                }
            } else {
                for m in discrete_mutations(&b.spec.effect, i, target, header, surface) {
                    applier.apply(surface, target, &m);
                }
            }
            if b.spec.once {
                b.fired[i] = true;
            }
        }

        if b.fired() {
            release(b, slot, scroll, pointer, visibility);
        }
    }
}

/// Drops a finished once-behavior's subscription.
fn release(
    b: &Behavior,
    slot: usize,
    scroll: &mut ScrollSource,
    pointer: &mut PointerSource,
    visibility: &mut VisibilitySource,
) {
    log::debug!("[engine] `{}` fired on every target; unsubscribing", b.id());
    match b.spec.signal {
        SignalKind::Scroll => scroll.signal_mut().unsubscribe(slot),
        SignalKind::Pointer => pointer.signal_mut().unsubscribe(slot),
        SignalKind::Visibility => visibility.unwatch(slot),
    }
}

/// Recomputes eased targets for every target whose predicate holds.
fn retarget<S: Surface + ?Sized>(b: &mut Behavior, inputs: &Inputs, surface: &S) {
    for i in 0..b.targets.len() {
        if b.spec.once && b.fired[i] {
            continue;
        }
        let target = b.targets[i];
        let holds = match b.spec.predicate {
            Predicate::Always => true,
            Predicate::ScrollPast { px } => inputs.scroll.position > px,
            Predicate::InViewport { threshold } => surface
                .bounds(target)
                .map(|r| in_viewport(r, inputs.viewport, threshold))
                .unwrap_or(false),
        };
        if !holds {
            continue;
        }
        let natural = b.motion[i].value();
        if let Some(t) = motion_target(&b.spec.effect, i, target, natural, inputs, surface) {
            b.motion[i].set_target(t);
            if b.spec.once {
                b.fired[i] = true;
            }
        }
    }
}

fn discrete_mutations<S: Surface + ?Sized>(
    effect: &Effect,
    index: usize,
    target: TargetId,
    header: Option<(HeaderVisibility, bool)>,
    surface: &S,
) -> SmallVec<[Mutation; 3]> {
    let mut out = SmallVec::new();
    match effect {
        Effect::AddClasses { classes } => {
            out.extend(classes.iter().cloned().map(Mutation::AddClass));
        }
        Effect::AlternatingClasses { classes, even, odd } => {
            out.extend(classes.iter().cloned().map(Mutation::AddClass));
            let side = if index % 2 == 0 { even } else { odd };
            out.push(Mutation::AddClass(side.clone()));
        }
        Effect::StyleFromAttribute {
            attribute,
            property,
        } => {
            if let Some(value) = surface.attribute(target, attribute) {
                out.push(Mutation::SetStyle {
                    property: property.clone(),
                    value,
                });
            }
        }
        Effect::HeaderAutoHide {
            scrolled_class,
            hidden_class,
            ..
        } => {
            if let Some((state, scrolled)) = header {
                out.push(if scrolled {
                    Mutation::AddClass(scrolled_class.clone())
                } else {
                    Mutation::RemoveClass(scrolled_class.clone())
                });
                out.push(match state {
                    HeaderVisibility::Hidden => Mutation::AddClass(hidden_class.clone()),
                    HeaderVisibility::Visible => Mutation::RemoveClass(hidden_class.clone()),
                });
            }
        }
        _ => {}
    }
    out
}

/// Target value of a motion effect. `current` is the offset this engine has
/// already applied, so measured rects can be mapped back to their untransformed
/// position.
fn motion_target<S: Surface + ?Sized>(
    effect: &Effect,
    index: usize,
    target: TargetId,
    current: Vec2,
    inputs: &Inputs,
    surface: &S,
) -> Option<Vec2> {
    match effect {
        Effect::PointerParallax { strength } => {
            Some((inputs.pointer - Vec2::splat(0.5)) * *strength * (index + 1) as f32)
        }
        Effect::CursorFollow => Some(inputs.pointer * inputs.viewport.size()),
        Effect::ScrollParallax {
            depth,
            depth_attribute,
        } => {
            let rect = surface.bounds(target)?;
            let depth = depth_attribute
                .as_deref()
                .and_then(|a| surface.attribute(target, a))
                .and_then(|raw| raw.trim().parse::<f32>().ok())
                .unwrap_or(*depth);
            let vh = inputs.viewport.height;
            let span = vh + rect.height;
            if span <= 0.0 {
                return None;
            }
            let top = rect.top - current.y;
            let progress = ((vh - top) / span).clamp(0.0, 1.0);
            Some(Vec2::new(0.0, progress * vh * depth))
        }
        Effect::HoverTilt {
            degrees,
            unless_class,
        } => {
            if let Some(c) = unless_class {
                if surface.has_class(target, c) {
                    return None;
                }
            }
            let rect = surface.bounds(target)?;
            let hovered = rect.contains(inputs.pointer * inputs.viewport.size());
            Some(Vec2::new(if hovered { *degrees } else { 0.0 }, 0.0))
        }
        _ => None,
    }
}

fn motion_mutation(effect: &Effect, value: Vec2) -> Mutation {
    match effect {
        Effect::HoverTilt { .. } => Mutation::RotateY(value.x),
        _ => Mutation::Translate(value),
    }
}
