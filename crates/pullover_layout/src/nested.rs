//! Nested scrolling parent protocol
//!
//! The scrolling child drives a session through these callbacks:
//!
//! 1. `on_start_nested_scroll` / `on_nested_scroll_accepted` when a drag begins
//! 2. `on_nested_pre_scroll` before the child scrolls by a delta
//! 3. `on_nested_scroll` with whatever the child could not consume
//! 4. `on_stop_nested_scroll` when the drag ends
//!
//! Deltas follow the child's convention: positive scrolls content toward the
//! end (finger moving up or left).

use pullover_core::ScrollAxes;

/// A container that takes part in a child's nested scroll
pub trait NestedScrollParent {
    /// Whether to join a session on `axes`
    fn on_start_nested_scroll(&mut self, axes: ScrollAxes) -> bool;

    /// The session on `axes` was accepted
    fn on_nested_scroll_accepted(&mut self, axes: ScrollAxes);

    /// Take part of `(dx, dy)` before the child scrolls, recording it in `consumed`
    fn on_nested_pre_scroll(&mut self, dx: i32, dy: i32, consumed: &mut [i32; 2]);

    /// The child scrolled; the unconsumed remainder is offered to the parent
    fn on_nested_scroll(
        &mut self,
        dx_consumed: i32,
        dy_consumed: i32,
        dx_unconsumed: i32,
        dy_unconsumed: i32,
    );

    /// The session ended
    fn on_stop_nested_scroll(&mut self);

    /// Whether the parent consumes a fling before the child sees it
    fn on_nested_pre_fling(&mut self, _velocity_x: f32, _velocity_y: f32) -> bool {
        false
    }

    /// Whether the parent consumed a fling the child has already handled
    fn on_nested_fling(&mut self, _velocity_x: f32, _velocity_y: f32, _consumed: bool) -> bool {
        false
    }

    /// Axes of the session currently in progress
    fn nested_scroll_axes(&self) -> ScrollAxes;
}
