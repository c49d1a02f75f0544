//! Viewport reactivity engine for the portfolio page.
//!
//! Behaviors are data: each one binds a selector to a signal (scroll, pointer
//! or element visibility), a predicate and an effect. The [`Engine`] samples
//! signals, evaluates only the behaviors subscribed to the signal that
//! changed, and writes the resulting mutations through a [`Surface`].
//! Nothing here touches the browser; `folio-web` supplies the DOM surface and
//! storage.

pub mod anchor;
pub mod behavior;
pub mod config;
pub mod constants;
pub mod contact;
pub mod engine;
pub mod error;
pub mod header;
pub mod mutation;
pub mod signal;
pub mod smoothing;
pub mod surface;
pub mod theme;
pub mod typewriter;

pub use behavior::{Behavior, BehaviorSpec, Effect, Predicate, Registration};
pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{EngineError, Result};
pub use header::{HeaderMachine, HeaderVisibility};
pub use signal::{ScrollDirection, ScrollState, SignalKind};
pub use surface::{MemoryElement, MemorySurface, Mutation, Rect, Surface, TargetId, Viewport};
pub use theme::{MemoryStore, PreferenceStore, Theme, ThemeBridge};
pub use typewriter::{Typewriter, TypewriterConfig};
