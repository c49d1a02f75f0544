use crate::header::HeaderMachine;
use crate::signal::SignalKind;
use crate::smoothing::Smoothed;
use crate::surface::TargetId;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// When a behavior's effect applies to a target.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Predicate {
    Always,
    /// Page scrolled strictly beyond `px`.
    ScrollPast { px: f32 },
    /// Target top above `threshold` of the viewport height.
    InViewport { threshold: f32 },
}

/// What a behavior does to its targets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Effect {
    AddClasses {
        classes: Vec<String>,
    },
    /// `classes` on every target plus `even` or `odd` by target index, for
    /// entrances that alternate sides.
    AlternatingClasses {
        classes: Vec<String>,
        even: String,
        odd: String,
    },
    /// Copies an attribute into a style property (`data-width` → `--progress`).
    StyleFromAttribute {
        attribute: String,
        property: String,
    },
    HeaderAutoHide {
        scrolled_class: String,
        hidden_class: String,
        #[serde(default = "default_scrolled_after")]
        scrolled_after: f32,
        #[serde(default = "default_hide_after")]
        hide_after: f32,
    },
    /// Offset `(pointer - 0.5) * strength * (index + 1)`.
    PointerParallax {
        strength: f32,
    },
    /// Translate to the pointer in viewport pixels.
    CursorFollow,
    /// TranslateY by `progress * viewport height * depth` while the target
    /// crosses the viewport.
    ScrollParallax {
        depth: f32,
        #[serde(default)]
        depth_attribute: Option<String>,
    },
    /// RotateY toward `degrees` while hovered, back to zero otherwise.
    HoverTilt {
        degrees: f32,
        #[serde(default)]
        unless_class: Option<String>,
    },
}

fn default_scrolled_after() -> f32 {
    crate::constants::HEADER_SCROLLED_AFTER_PX
}

fn default_hide_after() -> f32 {
    crate::constants::HEADER_HIDE_AFTER_PX
}

impl Effect {
    pub fn add_classes<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Effect::AddClasses {
            classes: classes.into_iter().map(Into::into).collect(),
        }
    }

    /// Motion effects produce a numeric target that can be eased.
    pub fn is_motion(&self) -> bool {
        matches!(
            self,
            Effect::PointerParallax { .. }
                | Effect::CursorFollow
                | Effect::ScrollParallax { .. }
                | Effect::HoverTilt { .. }
        )
    }
}

/// Declarative description of one behavior, as stored in configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BehaviorSpec {
    pub id: String,
    pub selector: String,
    pub signal: SignalKind,
    pub predicate: Predicate,
    pub effect: Effect,
    #[serde(default)]
    pub once: bool,
    /// Exponential smoothing time constant in seconds; motion effects with a
    /// positive value are eased once per frame.
    #[serde(default)]
    pub smoothing_tau: Option<f32>,
}

impl BehaviorSpec {
    pub fn new(
        id: impl Into<String>,
        selector: impl Into<String>,
        signal: SignalKind,
        predicate: Predicate,
        effect: Effect,
    ) -> Self {
        Self {
            id: id.into(),
            selector: selector.into(),
            signal,
            predicate,
            effect,
            once: false,
            smoothing_tau: None,
        }
    }

    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }

    pub fn smoothed(mut self, tau_sec: f32) -> Self {
        self.smoothing_tau = Some(tau_sec);
        self
    }

    pub fn is_continuous(&self) -> bool {
        self.effect.is_motion() && self.smoothing_tau.map_or(false, |t| t > 0.0)
    }

    pub(crate) fn visibility_threshold(&self) -> Option<f32> {
        match self.predicate {
            Predicate::InViewport { threshold } => Some(threshold),
            _ => None,
        }
    }
}

/// Outcome of a registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Registration {
    Active { targets: usize },
    /// Nothing matched the selector; the behavior was not stored.
    Inactive,
}

/// A registered behavior and its per-target bookkeeping.
#[derive(Clone, Debug)]
pub struct Behavior {
    pub(crate) spec: BehaviorSpec,
    pub(crate) targets: SmallVec<[TargetId; 4]>,
    pub(crate) fired: SmallVec<[bool; 4]>,
    pub(crate) motion: SmallVec<[Smoothed; 4]>,
    pub(crate) header: Option<HeaderMachine>,
    pub(crate) pending: bool,
}

impl Behavior {
    pub(crate) fn new(spec: BehaviorSpec, targets: Vec<TargetId>) -> Self {
        let n = targets.len();
        let motion = if spec.effect.is_motion() {
            let start = match spec.effect {
                Effect::CursorFollow => Smoothed::snapping(),
                _ => Smoothed::at_rest(),
            };
            SmallVec::from_elem(start, n)
        } else {
            SmallVec::new()
        };
        let header = match spec.effect {
            Effect::HeaderAutoHide {
                scrolled_after,
                hide_after,
                ..
            } => Some(HeaderMachine::with_thresholds(scrolled_after, hide_after)),
            _ => None,
        };
        Self {
            spec,
            targets: targets.into_iter().collect(),
            fired: SmallVec::from_elem(false, n),
            motion,
            header,
            pending: false,
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.spec.id
    }

    #[inline]
    pub fn spec(&self) -> &BehaviorSpec {
        &self.spec
    }

    #[inline]
    pub fn targets(&self) -> &[TargetId] {
        &self.targets
    }

    /// True once a once-behavior has applied to every target.
    pub fn fired(&self) -> bool {
        self.spec.once && self.fired.iter().all(|f| *f)
    }

    pub fn fired_count(&self) -> usize {
        self.fired.iter().filter(|f| **f).count()
    }

    pub fn header(&self) -> Option<&HeaderMachine> {
        self.header.as_ref()
    }

    pub fn motion(&self, index: usize) -> Option<&Smoothed> {
        self.motion.get(index)
    }
}
