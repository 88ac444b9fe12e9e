//! Scroll state for the slot-machine style reveal of a [`DrawStrip`].
//!
//! Pure tick-driven state: the UI calls [`RevealAnimation::tick`] once per
//! frame and reads back which strip slot sits under the marker.

use super::strip::{DrawStrip, FINAL_SLOT, STRIP_LEN};
use std::ops::Range;

/// Frames it takes for the strip to settle on the final slot.
pub const DEFAULT_REVEAL_TICKS: u32 = 45;

#[derive(Debug, Clone)]
pub struct RevealAnimation {
    strip: DrawStrip,
    tick: u32,
    total_ticks: u32,
}

impl RevealAnimation {
    pub fn new(strip: DrawStrip) -> Self {
        Self::with_ticks(strip, DEFAULT_REVEAL_TICKS)
    }

    pub fn with_ticks(strip: DrawStrip, total_ticks: u32) -> Self {
        Self {
            strip,
            tick: 0,
            total_ticks: total_ticks.max(1),
        }
    }

    pub fn strip(&self) -> &DrawStrip {
        &self.strip
    }

    /// Advances one frame. Returns true once the strip has landed.
    pub fn tick(&mut self) -> bool {
        if self.tick < self.total_ticks {
            self.tick += 1;
        }
        self.is_finished()
    }

    /// Jumps straight to the landed state.
    pub fn skip(&mut self) {
        self.tick = self.total_ticks;
    }

    pub fn is_finished(&self) -> bool {
        self.tick >= self.total_ticks
    }

    /// Fraction of the animation elapsed, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.tick as f64 / self.total_ticks as f64
    }

    /// Fractional strip position under the marker, eased out so the strip
    /// decelerates into the final slot.
    pub fn position(&self) -> f64 {
        let t = self.progress();
        let eased = 1.0 - (1.0 - t).powi(3);
        eased * FINAL_SLOT as f64
    }

    /// Strip slot currently under the marker.
    pub fn centered_slot(&self) -> usize {
        if self.is_finished() {
            return FINAL_SLOT;
        }
        (self.position().round() as usize).min(STRIP_LEN - 1)
    }

    /// Slots to draw for a viewport `width` slots wide, centered on the marker.
    pub fn visible_window(&self, width: usize) -> Range<usize> {
        let width = width.clamp(1, STRIP_LEN);
        let center = self.centered_slot();
        let start = center.saturating_sub(width / 2).min(STRIP_LEN - width);
        start..start + width
    }
}
