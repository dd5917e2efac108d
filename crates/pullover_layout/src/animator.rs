//! Offset animator
//!
//! Thin wrapper over [`Scroller`] that smooths the container's offset toward
//! a target. The latest request always wins; zero-distance requests leave
//! the running animation alone.

use pullover_animation::{Easing, Scroller, DEFAULT_DURATION_MS};

/// Duration and curve used for settle animations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub duration_ms: u32,
    pub easing: Easing,
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            easing: Easing::ViscousFluid,
        }
    }
}

/// One animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationFrame {
    /// Offset to render this frame
    pub offset: i32,
    /// Whether this is the final frame
    pub done: bool,
}

/// Drives the container offset through settle animations
#[derive(Debug, Clone)]
pub struct OffsetAnimator {
    scroller: Scroller,
    spec: AnimationSpec,
}

impl OffsetAnimator {
    pub fn new(spec: AnimationSpec) -> Self {
        Self {
            scroller: Scroller::new(spec.easing),
            spec,
        }
    }

    pub fn spec(&self) -> AnimationSpec {
        self.spec
    }

    /// Change duration and easing for subsequent animations
    pub fn set_spec(&mut self, spec: AnimationSpec) {
        self.spec = spec;
        self.scroller.set_easing(spec.easing);
    }

    /// Animate from `start` by `delta`.
    ///
    /// Returns false, touching nothing, when `delta` is zero.
    pub fn smooth_by(&mut self, start: i32, delta: i32) -> bool {
        if delta == 0 {
            return false;
        }
        self.scroller.force_finished(true);
        self.scroller.start_scroll(start, delta, self.spec.duration_ms);
        true
    }

    /// Animate from `start` to `target`
    pub fn smooth_to(&mut self, start: i32, target: i32) -> bool {
        self.smooth_by(start, target.saturating_sub(start))
    }

    /// Advance one frame. Returns None when nothing is animating.
    pub fn tick(&mut self, dt_ms: f32) -> Option<AnimationFrame> {
        if !self.scroller.compute_offset(dt_ms) {
            return None;
        }
        Some(AnimationFrame {
            offset: self.scroller.current(),
            done: self.scroller.is_finished(),
        })
    }

    /// Stop where the animation currently is
    pub fn cancel(&mut self) {
        self.scroller.force_finished(true);
    }

    pub fn is_running(&self) -> bool {
        !self.scroller.is_finished()
    }

    /// Target of the running animation
    pub fn target(&self) -> Option<i32> {
        self.is_running().then(|| self.scroller.final_position())
    }
}

impl Default for OffsetAnimator {
    fn default() -> Self {
        Self::new(AnimationSpec::default())
    }
}
