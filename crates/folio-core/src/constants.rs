// Viewport, trigger and timing constants shared by the engine and the web front-end.

// Header
pub const HEADER_SCROLLED_AFTER_PX: f32 = 50.0; // `scrolled` style flag threshold
pub const HEADER_HIDE_AFTER_PX: f32 = 200.0; // hide-on-scroll-down threshold

// Visibility thresholds (fraction of viewport height measured from the top)
pub const REVEAL_THRESHOLD: f32 = 0.8; // "top 80%"
pub const SKILL_BAR_THRESHOLD: f32 = 0.9; // "top 90%"

// Smoothing time constants (seconds)
pub const CURSOR_TAU_SEC: f32 = 0.05;
pub const PARALLAX_TAU_SEC: f32 = 0.30;
pub const TILT_TAU_SEC: f32 = 0.10;

// Largest frame delta fed to smoothing; longer gaps (background tabs) snap forward
pub const MAX_FRAME_DT_SEC: f32 = 0.1;

// Values closer than this are treated as equal when writing and settling
pub const WRITE_EPSILON: f32 = 0.01;

// Parallax and tilt
pub const HERO_PARALLAX_STRENGTH: f32 = 20.0; // px per shape index at the viewport edge
pub const SECTION_PARALLAX_DEPTH: f32 = 0.1; // fraction of viewport height
pub const CARD_TILT_DEG: f32 = 15.0;

// Loader
pub const LOADER_DELAY_MS: u32 = 1500;
pub const LOADER_FADE_MS: u32 = 500;

// Typewriter
pub const TYPE_SPEED_MS: u32 = 50;
pub const BACK_SPEED_MS: u32 = 30;
pub const BACK_DELAY_MS: u32 = 2000;

// Cursor
pub const CURSOR_SIZE_PX: f32 = 40.0;
pub const CURSOR_HOVER_SIZE_PX: f32 = 60.0;

// Persistence
pub const THEME_STORAGE_KEY: &str = "theme";
