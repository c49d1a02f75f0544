use crate::constants::{BACK_DELAY_MS, BACK_SPEED_MS, TYPE_SPEED_MS};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterConfig {
    pub strings: Vec<String>,
    pub type_speed_ms: u32,
    pub back_speed_ms: u32,
    pub back_delay_ms: u32,
    pub looped: bool,
    pub cursor_char: String,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            strings: [
                "scalable microservices.",
                "high-performance APIs.",
                "cloud-native applications.",
                "secure backend systems.",
                "optimized databases.",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            type_speed_ms: TYPE_SPEED_MS,
            back_speed_ms: BACK_SPEED_MS,
            back_delay_ms: BACK_DELAY_MS,
            looped: true,
            cursor_char: "|".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Typing,
    Holding,
    Erasing,
    Done,
}

/// Types each string a character at a time, holds it, erases it and moves on.
#[derive(Clone, Debug)]
pub struct Typewriter {
    strings: Vec<Vec<char>>,
    type_ms: f32,
    back_ms: f32,
    hold_ms: f32,
    looped: bool,
    index: usize,
    shown: usize,
    phase: Phase,
    elapsed_ms: f32,
    text: String,
}

impl Typewriter {
    pub fn new(config: &TypewriterConfig) -> Self {
        let strings: Vec<Vec<char>> = config.strings.iter().map(|s| s.chars().collect()).collect();
        let phase = if strings.is_empty() {
            Phase::Done
        } else {
            Phase::Typing
        };
        Self {
            strings,
            type_ms: config.type_speed_ms as f32,
            back_ms: config.back_speed_ms as f32,
            // a zero hold over empty strings would never yield
            hold_ms: (config.back_delay_ms as f32).max(1.0),
            looped: config.looped,
            index: 0,
            shown: 0,
            phase,
            elapsed_ms: 0.0,
            text: String::new(),
        }
    }

    /// Advances by `dt_ms`. Returns whether the visible text changed.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        if self.phase == Phase::Done {
            return false;
        }
        self.elapsed_ms += dt_ms.max(0.0);
        let before = self.shown;
        let before_index = self.index;
        loop {
            let len = self.strings[self.index].len();
            match self.phase {
                Phase::Typing => {
                    if self.shown >= len {
                        self.phase = Phase::Holding;
                    } else if self.elapsed_ms >= self.type_ms {
                        self.elapsed_ms -= self.type_ms;
                        self.shown += 1;
                    } else {
                        break;
                    }
                }
                Phase::Holding => {
                    if !self.looped && self.index + 1 == self.strings.len() {
                        self.phase = Phase::Done;
                        self.elapsed_ms = 0.0;
                        break;
                    }
                    if self.elapsed_ms >= self.hold_ms {
                        self.elapsed_ms -= self.hold_ms;
                        self.phase = Phase::Erasing;
                    } else {
                        break;
                    }
                }
                Phase::Erasing => {
                    if self.shown == 0 {
                        self.index = (self.index + 1) % self.strings.len();
                        self.phase = Phase::Typing;
                    } else if self.elapsed_ms >= self.back_ms {
                        self.elapsed_ms -= self.back_ms;
                        self.shown -= 1;
                    } else {
                        break;
                    }
                }
                Phase::Done => break,
            }
        }
        let changed = self.shown != before || self.index != before_index;
        if changed {
            self.text = self.strings[self.index][..self.shown].iter().collect();
        }
        changed
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }
}
