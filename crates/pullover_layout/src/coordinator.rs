//! Refresh coordinator
//!
//! The nested scroll state machine behind [`RefreshLayout`](crate::RefreshLayout).
//! It owns the offset, the loading flag and the regions, and decides for every
//! forwarded delta how much the container takes:
//!
//! - **Pre-scroll**: while displaced, movement back toward rest is consumed
//!   undamped and never overshoots zero.
//! - **Unconsumed scroll**: once the child runs out of room, the leftover
//!   moves the container at half speed ([`DAMPING`]).
//! - **Release**: past the threshold a refresh starts and the offset settles
//!   on the refresh position; short of it the offset settles back to rest.
//!
//! While loading, no user-driven movement is applied. Every operation returns
//! the [`RefreshEvent`]s it produced instead of calling listeners.

use pullover_core::event_types::{REFRESH, RESET, REVERT, SESSION_END, SESSION_START, SETTLED};
use pullover_core::StateMachine;

use crate::animator::{AnimationSpec, OffsetAnimator};
use crate::listener::{RefreshEvent, RefreshEvents, Side};
use crate::move_type::MoveType;
use crate::options::{Orientation, RefreshOptions, RefreshRegion, Threshold};
use crate::phase::RefreshPhase;

/// Over-scroll resistance: each pixel of leftover drag moves the offset by half
pub const DAMPING: f32 = 0.5;

/// Nested scroll state machine for one container
pub struct RefreshCoordinator {
    /// Signed displacement from rest (negative = header side)
    offset: i32,
    /// True while a refresh is active
    loading: bool,
    /// Side of the active refresh
    refreshing: Option<Side>,
    /// True between an accepted session start and its end
    session_active: bool,
    threshold: Threshold,
    orientation: Orientation,
    header: Option<Box<dyn RefreshRegion>>,
    tail: Option<Box<dyn RefreshRegion>>,
    animator: OffsetAnimator,
    phase: StateMachine<RefreshPhase>,
}

impl RefreshCoordinator {
    pub fn new(options: RefreshOptions) -> Self {
        Self::with_animation(options, AnimationSpec::default())
    }

    pub fn with_animation(options: RefreshOptions, spec: AnimationSpec) -> Self {
        let (threshold, orientation, header, tail) = options.into_parts();
        Self {
            offset: 0,
            loading: false,
            refreshing: None,
            session_active: false,
            threshold,
            orientation,
            header,
            tail,
            animator: OffsetAnimator::new(spec),
            phase: StateMachine::new(RefreshPhase::Idle),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Side of the active refresh, if any
    pub fn refreshing_side(&self) -> Option<Side> {
        self.refreshing
    }

    pub fn is_session_active(&self) -> bool {
        self.session_active
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_running()
    }

    pub fn phase(&self) -> RefreshPhase {
        self.phase.current_state()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    pub fn has_region(&self, side: Side) -> bool {
        match side {
            Side::Header => self.header.is_some(),
            Side::Tail => self.tail.is_some(),
        }
    }

    /// Header trigger size, measured now
    pub fn header_size(&self) -> i32 {
        self.threshold
            .resolve(self.header.as_deref(), self.orientation)
    }

    /// Tail trigger size, measured now
    pub fn tail_size(&self) -> i32 {
        self.threshold.resolve(self.tail.as_deref(), self.orientation)
    }

    pub fn size(&self, side: Side) -> i32 {
        match side {
            Side::Header => self.header_size(),
            Side::Tail => self.tail_size(),
        }
    }

    pub fn animation_spec(&self) -> AnimationSpec {
        self.animator.spec()
    }

    pub fn set_animation_spec(&mut self, spec: AnimationSpec) {
        self.animator.set_spec(spec);
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Replace the whole configuration.
    ///
    /// Old regions are detached and scroll state is cleared without
    /// notifying anyone.
    pub fn apply_options(&mut self, options: RefreshOptions) {
        let (threshold, orientation, header, tail) = options.into_parts();

        if let Some(mut old) = self.header.take() {
            old.on_detach();
        }
        if let Some(mut old) = self.tail.take() {
            old.on_detach();
        }

        self.threshold = threshold;
        self.orientation = orientation;
        self.header = header;
        self.tail = tail;

        self.animator.cancel();
        self.offset = 0;
        self.loading = false;
        self.refreshing = None;
        self.session_active = false;
        self.phase.send(RESET);

        tracing::debug!(
            "options applied: threshold={:?} orientation={:?} header={} tail={}",
            self.threshold,
            self.orientation,
            self.header.is_some(),
            self.tail.is_some()
        );
    }

    // =========================================================================
    // Nested scroll session
    // =========================================================================

    /// Begin a gesture. Refused while loading.
    ///
    /// An in-flight settle animation stops so the user takes over from the
    /// current offset.
    pub fn start_session(&mut self) -> bool {
        if self.loading {
            tracing::trace!("session refused: refresh in progress");
            return false;
        }
        if self.animator.is_running() {
            self.animator.cancel();
            tracing::debug!("settle interrupted by user at offset {}", self.offset);
        }
        self.session_active = true;
        self.phase.send(SESSION_START);
        true
    }

    /// Offer `delta` to the container before the child scrolls.
    ///
    /// Only movement back toward rest is taken, and never past zero.
    /// Returns the consumed amount.
    pub fn pre_consume(&mut self, delta: i32) -> (i32, RefreshEvents) {
        let mut events = RefreshEvents::new();
        if self.loading {
            return (0, events);
        }

        let consumed = match MoveType::classify(delta, self.offset) {
            MoveType::BelowUp => delta.min(self.offset.saturating_neg()),
            MoveType::AboveDown => delta.max(self.offset.saturating_neg()),
            _ => 0,
        };

        if consumed != 0 {
            tracing::trace!(
                "pre-consume delta={} consumed={} offset={}",
                delta,
                consumed,
                self.offset
            );
            self.offset_changed(self.offset + consumed, &mut events);
        }

        (consumed, events)
    }

    /// Apply the delta the child could not use, damped.
    ///
    /// Movement toward a side without a region stops at rest.
    pub fn on_unconsumed_scroll(&mut self, delta: i32) -> RefreshEvents {
        let mut events = RefreshEvents::new();
        if self.loading || MoveType::classify(delta, self.offset) == MoveType::None {
            return events;
        }

        // Truncates toward zero, so a single pixel of drag never moves us
        let damped = (delta as f32 * DAMPING) as i32;
        let mut target = self.offset.saturating_add(damped);
        if Side::of(target).is_some_and(|side| !self.has_region(side)) {
            target = 0;
        }

        if target != self.offset {
            tracing::trace!(
                "overscroll delta={} damped={} offset={} -> {}",
                delta,
                damped,
                self.offset,
                target
            );
            self.offset_changed(target, &mut events);
        }

        events
    }

    /// Finish the gesture and decide between refresh and revert
    pub fn on_gesture_end(&mut self) -> RefreshEvents {
        let mut events = RefreshEvents::new();
        if self.session_active {
            self.session_active = false;
            self.phase.send(SESSION_END);
        }

        if self.loading {
            return events;
        }

        let header_size = self.header_size();
        let tail_size = self.tail_size();
        tracing::debug!(
            "release at offset {} (header {}, tail {})",
            self.offset,
            header_size,
            tail_size
        );

        if self.header.is_some()
            && header_size > 0
            && self.offset.saturating_neg() >= header_size
        {
            self.refresh(Side::Header, &mut events);
        } else if self.tail.is_some() && tail_size > 0 && self.offset >= tail_size {
            self.refresh(Side::Tail, &mut events);
        } else {
            self.revert();
        }

        events
    }

    // =========================================================================
    // Programmatic control
    // =========================================================================

    /// Start (`true`) or stop (`false`) a header refresh
    pub fn refresh_header(&mut self, active: bool) -> RefreshEvents {
        self.request_refresh(Side::Header, active)
    }

    /// Start (`true`) or stop (`false`) a tail refresh
    pub fn refresh_tail(&mut self, active: bool) -> RefreshEvents {
        self.request_refresh(Side::Tail, active)
    }

    /// Settle back to rest, whatever the current state
    pub fn cancel_refresh(&mut self) -> RefreshEvents {
        self.revert();
        RefreshEvents::new()
    }

    fn request_refresh(&mut self, side: Side, active: bool) -> RefreshEvents {
        let mut events = RefreshEvents::new();

        if !self.has_region(side) {
            tracing::debug!("refresh request for {} ignored: no region", side);
            return events;
        }

        if active {
            if self.loading {
                tracing::debug!(
                    "refresh request for {} ignored: {:?} already refreshing",
                    side,
                    self.refreshing
                );
                return events;
            }
            if self.size(side) <= 0 {
                tracing::debug!("refresh request for {} ignored: zero size", side);
                return events;
            }
            self.refresh(side, &mut events);
        } else {
            if self.refreshing == Some(side.opposite()) {
                tracing::debug!("stop request for {} ignored: other side refreshing", side);
                return events;
            }
            self.loading = false;
            self.refreshing = None;
            self.revert();
        }

        events
    }

    fn refresh(&mut self, side: Side, events: &mut RefreshEvents) {
        let target = match side {
            Side::Header => -self.header_size(),
            Side::Tail => self.tail_size(),
        };

        self.loading = true;
        self.refreshing = Some(side);
        self.phase.send(REFRESH);
        if !self.animator.smooth_to(self.offset, target) {
            // Already in place
            self.animator.cancel();
        }

        tracing::debug!("{} refresh: offset {} -> {}", side, self.offset, target);
        events.push(RefreshEvent::Refreshed { side });
    }

    fn revert(&mut self) {
        if self.offset == 0 {
            // Nothing to animate; drop any animation still heading elsewhere
            self.animator.cancel();
            self.loading = false;
            self.refreshing = None;
            self.phase.send(SETTLED);
            return;
        }

        self.animator.smooth_to(self.offset, 0);
        self.phase.send(REVERT);
        tracing::debug!("revert from offset {}", self.offset);
    }

    // =========================================================================
    // Frames
    // =========================================================================

    /// Advance the settle animation by one frame
    pub fn tick(&mut self, dt_ms: f32) -> RefreshEvents {
        let mut events = RefreshEvents::new();
        if let Some(frame) = self.animator.tick(dt_ms) {
            self.offset_changed(frame.offset, &mut events);
            if frame.done {
                tracing::trace!("settle finished at {}", frame.offset);
            }
        }
        events
    }

    /// Render hook: every offset mutation funnels through here.
    ///
    /// Reaching or crossing rest ends the displaced side. Loading is cleared
    /// unless the offset is on its way into the refreshing side.
    /// `Started` is only reported while a gesture drives the offset.
    fn offset_changed(&mut self, new_offset: i32, events: &mut RefreshEvents) {
        let old_offset = self.offset;
        if new_offset == old_offset {
            return;
        }
        self.offset = new_offset;

        let left_side = Side::of(old_offset).filter(|side| Side::of(new_offset) != Some(*side));
        if let Some(side) = left_side {
            events.push(RefreshEvent::Ended { side });
            if self.entering_refresh(side, new_offset) {
                tracing::trace!(
                    "{} side left on the way into {:?} refresh",
                    side,
                    self.refreshing
                );
            } else {
                if self.loading {
                    tracing::debug!("{:?} refresh finished", self.refreshing);
                }
                self.loading = false;
                self.refreshing = None;
                if new_offset == 0 && !self.session_active {
                    self.phase.send(SETTLED);
                }
            }
        }

        if self.session_active {
            if let Some(side) = Side::of(new_offset) {
                events.push(RefreshEvent::Started {
                    side,
                    offset: new_offset.unsigned_abs(),
                });
            }
        }
    }

    /// Whether leaving `side` at `new_offset` is part of the animation
    /// carrying the offset into the other side's refresh
    fn entering_refresh(&self, side: Side, new_offset: i32) -> bool {
        let Some(refreshing) = self.refreshing.filter(|r| *r != side) else {
            return false;
        };
        Side::of(new_offset) == Some(refreshing)
            || self.animator.target().and_then(Side::of) == Some(refreshing)
    }
}

impl Default for RefreshCoordinator {
    fn default() -> Self {
        Self::new(RefreshOptions::default())
    }
}

impl std::fmt::Debug for RefreshCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshCoordinator")
            .field("offset", &self.offset)
            .field("loading", &self.loading)
            .field("refreshing", &self.refreshing)
            .field("session_active", &self.session_active)
            .field("threshold", &self.threshold)
            .field("orientation", &self.orientation)
            .field("header", &self.header.is_some())
            .field("tail", &self.tail.is_some())
            .field("phase", &self.phase.current_state())
            .finish()
    }
}
