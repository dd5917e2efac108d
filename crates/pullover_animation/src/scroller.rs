//! Settle scroller
//!
//! A frame-driven animation that moves an integer offset from a start
//! position to `start + delta` over a fixed duration. The host advances it
//! once per frame with [`Scroller::compute_offset`] and reads
//! [`Scroller::current`]; nothing runs in the background.

use crate::easing::Easing;

/// Default settle duration in milliseconds
pub const DEFAULT_DURATION_MS: u32 = 250;

/// Interruptible settle-to-target scroll animation
#[derive(Clone, Debug)]
pub struct Scroller {
    easing: Easing,
    start: i32,
    final_position: i32,
    delta: i32,
    current: i32,
    duration_ms: f32,
    elapsed_ms: f32,
    finished: bool,
}

impl Scroller {
    pub fn new(easing: Easing) -> Self {
        Self {
            easing,
            start: 0,
            final_position: 0,
            delta: 0,
            current: 0,
            duration_ms: DEFAULT_DURATION_MS as f32,
            elapsed_ms: 0.0,
            finished: true,
        }
    }

    /// Start scrolling from `start` by `delta` pixels over `duration_ms`.
    ///
    /// Any animation in progress is replaced.
    pub fn start_scroll(&mut self, start: i32, delta: i32, duration_ms: u32) {
        self.start = start;
        self.delta = delta;
        self.final_position = start.saturating_add(delta);
        self.current = start;
        self.duration_ms = duration_ms as f32;
        self.elapsed_ms = 0.0;
        self.finished = false;

        tracing::trace!(
            "Scroller start={} delta={} final={} duration={}ms",
            start,
            delta,
            self.final_position,
            duration_ms
        );
    }

    /// Advance the animation by delta time (in milliseconds).
    ///
    /// Returns true if the animation produced a new position this frame,
    /// false if it had already finished. The frame that reaches the end
    /// returns true and lands exactly on the final position.
    pub fn compute_offset(&mut self, dt_ms: f32) -> bool {
        if self.finished {
            return false;
        }

        self.elapsed_ms += dt_ms.max(0.0);

        if self.elapsed_ms < self.duration_ms {
            let progress = self.elapsed_ms / self.duration_ms;
            let eased = self.easing.apply(progress);
            self.current = self.start + (eased * self.delta as f32).round() as i32;
        } else {
            self.current = self.final_position;
            self.finished = true;
        }

        true
    }

    /// Force the finished flag. Stopping leaves the current position in place.
    pub fn force_finished(&mut self, finished: bool) {
        self.finished = finished;
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Current animated position
    pub fn current(&self) -> i32 {
        self.current
    }

    /// Where the animation ends
    pub fn final_position(&self) -> i32 {
        self.final_position
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    /// Progress through the current animation (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }
}

impl Default for Scroller {
    fn default() -> Self {
        Self::new(Easing::default())
    }
}
