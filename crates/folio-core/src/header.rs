use crate::constants::{HEADER_HIDE_AFTER_PX, HEADER_SCROLLED_AFTER_PX};
use crate::signal::ScrollState;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HeaderVisibility {
    #[default]
    Visible,
    Hidden,
}

/// Hide-on-scroll-down header.
///
/// The header hides while the page moves down past `hide_after` and shows
/// again on any other sample. `scrolled` tracks `position > scrolled_after`
/// and depends on the latest position only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeaderMachine {
    state: HeaderVisibility,
    scrolled: bool,
    scrolled_after: f32,
    hide_after: f32,
}

impl Default for HeaderMachine {
    fn default() -> Self {
        Self::with_thresholds(HEADER_SCROLLED_AFTER_PX, HEADER_HIDE_AFTER_PX)
    }
}

impl HeaderMachine {
    pub fn with_thresholds(scrolled_after: f32, hide_after: f32) -> Self {
        Self {
            state: HeaderVisibility::Visible,
            scrolled: false,
            scrolled_after,
            hide_after,
        }
    }

    pub fn advance(&mut self, scroll: &ScrollState) -> HeaderVisibility {
        let y = scroll.position;
        self.scrolled = y > self.scrolled_after;
        self.state = if y > scroll.last_position && y > self.hide_after {
            HeaderVisibility::Hidden
        } else {
            HeaderVisibility::Visible
        };
        self.state
    }

    #[inline]
    pub fn state(&self) -> HeaderVisibility {
        self.state
    }

    #[inline]
    pub fn scrolled(&self) -> bool {
        self.scrolled
    }
}
