use crate::behavior::{BehaviorSpec, Effect, Predicate};
use crate::constants::*;
use crate::error::{EngineError, Result};
use crate::signal::SignalKind;
use crate::typewriter::TypewriterConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub delay_ms: u32,
    pub fade_ms: u32,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delay_ms: LOADER_DELAY_MS,
            fade_ms: LOADER_FADE_MS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    pub size_px: f32,
    pub hover_size_px: f32,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            size_px: CURSOR_SIZE_PX,
            hover_size_px: CURSOR_HOVER_SIZE_PX,
        }
    }
}

/// Everything the page binds at load time. Missing JSON fields fall back to
/// the defaults below.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Registered in order.
    pub behaviors: Vec<BehaviorSpec>,
    pub theme_key: String,
    pub loader: LoaderConfig,
    pub typewriter: TypewriterConfig,
    pub cursor: CursorConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            behaviors: default_behaviors(),
            theme_key: THEME_STORAGE_KEY.to_string(),
            loader: LoaderConfig::default(),
            typewriter: TypewriterConfig::default(),
            cursor: CursorConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Rejects duplicate ids and out-of-range numbers before anything is
    /// registered.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for b in &self.behaviors {
            if !seen.insert(b.id.as_str()) {
                return Err(EngineError::Config(format!("duplicate behavior id `{}`", b.id)));
            }
            if let Predicate::InViewport { threshold } = b.predicate {
                if !(threshold > 0.0 && threshold <= 1.0) {
                    return Err(EngineError::Config(format!(
                        "`{}`: viewport threshold {} outside (0, 1]",
                        b.id, threshold
                    )));
                }
            }
            if let Some(tau) = b.smoothing_tau {
                if !(tau >= 0.0 && tau.is_finite()) {
                    return Err(EngineError::Config(format!(
                        "`{}`: smoothing constant {} must be a non-negative number",
                        b.id, tau
                    )));
                }
            }
        }
        if self.theme_key.is_empty() {
            return Err(EngineError::Config("empty theme storage key".into()));
        }
        Ok(())
    }
}

/// The portfolio page's behaviors.
pub fn default_behaviors() -> Vec<BehaviorSpec> {
    vec![
        BehaviorSpec::new(
            "header",
            ".header",
            SignalKind::Scroll,
            Predicate::Always,
            Effect::HeaderAutoHide {
                scrolled_class: "scrolled".into(),
                hidden_class: "hidden".into(),
                scrolled_after: HEADER_SCROLLED_AFTER_PX,
                hide_after: HEADER_HIDE_AFTER_PX,
            },
        ),
        BehaviorSpec::new(
            "reveal-sections",
            ".section",
            SignalKind::Visibility,
            Predicate::InViewport {
                threshold: REVEAL_THRESHOLD,
            },
            Effect::add_classes(["reveal", "active"]),
        )
        .once(),
        BehaviorSpec::new(
            "reveal-skill-categories",
            ".skills__category",
            SignalKind::Visibility,
            Predicate::InViewport {
                threshold: REVEAL_THRESHOLD,
            },
            Effect::add_classes(["stagger-reveal", "active"]),
        )
        .once(),
        BehaviorSpec::new(
            "reveal-experience",
            ".experience__item",
            SignalKind::Visibility,
            Predicate::InViewport {
                threshold: REVEAL_THRESHOLD,
            },
            Effect::AlternatingClasses {
                classes: vec!["reveal".into(), "active".into()],
                even: "from-left".into(),
                odd: "from-right".into(),
            },
        )
        .once(),
        BehaviorSpec::new(
            "skill-progress",
            ".skill-bar__progress",
            SignalKind::Scroll,
            Predicate::Always,
            Effect::StyleFromAttribute {
                attribute: "data-width".into(),
                property: "--progress".into(),
            },
        )
        .once(),
        BehaviorSpec::new(
            "skill-animate",
            ".skill-bar__progress",
            SignalKind::Visibility,
            Predicate::InViewport {
                threshold: SKILL_BAR_THRESHOLD,
            },
            Effect::add_classes(["animate"]),
        )
        .once(),
        BehaviorSpec::new(
            "hero-parallax",
            ".hero__shape",
            SignalKind::Pointer,
            Predicate::Always,
            Effect::PointerParallax {
                strength: HERO_PARALLAX_STRENGTH,
            },
        )
        .smoothed(PARALLAX_TAU_SEC),
        BehaviorSpec::new(
            "section-parallax",
            ".section",
            SignalKind::Scroll,
            Predicate::Always,
            Effect::ScrollParallax {
                depth: SECTION_PARALLAX_DEPTH,
                depth_attribute: Some("data-parallax-depth".into()),
            },
        ),
        BehaviorSpec::new(
            "cursor-follow",
            ".custom-cursor",
            SignalKind::Pointer,
            Predicate::Always,
            Effect::CursorFollow,
        )
        .smoothed(CURSOR_TAU_SEC),
        BehaviorSpec::new(
            "card-tilt",
            ".business-card",
            SignalKind::Pointer,
            Predicate::Always,
            Effect::HoverTilt {
                degrees: CARD_TILT_DEG,
                unless_class: Some("flipped".into()),
            },
        )
        .smoothed(TILT_TAU_SEC),
    ]
}
