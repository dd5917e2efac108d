//! Refresh container host
//!
//! [`RefreshLayout`] is the piece a UI tree embeds. It joins the child's
//! nested scroll sessions, forwards deltas along its orientation to the
//! [`RefreshCoordinator`] and hands every produced event to the
//! [`ListenerBridge`]. The host calls [`RefreshLayout::compute_scroll`] once
//! per frame to drive settle animations.

use pullover_core::ScrollAxes;

use crate::animator::AnimationSpec;
use crate::config::RefreshConfig;
use crate::coordinator::RefreshCoordinator;
use crate::listener::{ListenerBridge, RefreshEvent, RefreshListener, Side};
use crate::nested::NestedScrollParent;
use crate::options::{Orientation, RefreshOptions};
use crate::phase::RefreshPhase;

/// Pull-to-refresh / pull-to-load container
#[derive(Debug, Default)]
pub struct RefreshLayout {
    coordinator: RefreshCoordinator,
    listeners: ListenerBridge,
    /// Axes of the accepted nested scroll session
    axes: ScrollAxes,
}

impl RefreshLayout {
    /// Container with default options: vertical, no regions
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RefreshOptions) -> Self {
        Self {
            coordinator: RefreshCoordinator::new(options),
            listeners: ListenerBridge::new(),
            axes: ScrollAxes::NONE,
        }
    }

    /// Container configured from a config file; regions are added with [`options`](Self::options)
    pub fn from_config(config: &RefreshConfig) -> Self {
        let spec = config.animation_spec();
        let mut layout = Self::with_options(config.clone().into_options());
        layout.coordinator.set_animation_spec(spec);
        layout
    }

    /// Replace the whole options bundle.
    ///
    /// Scroll state is reset without notifying listeners.
    pub fn options(&mut self, options: RefreshOptions) -> &mut Self {
        self.coordinator.apply_options(options);
        self.axes = ScrollAxes::NONE;
        self
    }

    pub fn set_animation(&mut self, spec: AnimationSpec) -> &mut Self {
        self.coordinator.set_animation_spec(spec);
        self
    }

    pub fn set_header_listener(&mut self, listener: impl RefreshListener + 'static) -> &mut Self {
        self.listeners.set(Side::Header, Some(Box::new(listener)));
        self
    }

    pub fn set_tail_listener(&mut self, listener: impl RefreshListener + 'static) -> &mut Self {
        self.listeners.set(Side::Tail, Some(Box::new(listener)));
        self
    }

    pub fn with_header_listener(mut self, listener: impl RefreshListener + 'static) -> Self {
        self.set_header_listener(listener);
        self
    }

    pub fn with_tail_listener(mut self, listener: impl RefreshListener + 'static) -> Self {
        self.set_tail_listener(listener);
        self
    }

    /// Remove the listener for `side`
    pub fn clear_listener(&mut self, side: Side) -> &mut Self {
        self.listeners.set(side, None);
        self
    }

    /// Start (`true`) or finish (`false`) a header refresh
    pub fn refresh_header(&mut self, active: bool) {
        let events = self.coordinator.refresh_header(active);
        self.dispatch(&events);
    }

    /// Start (`true`) or finish (`false`) a tail refresh
    pub fn refresh_tail(&mut self, active: bool) {
        let events = self.coordinator.refresh_tail(active);
        self.dispatch(&events);
    }

    /// Settle back to rest, ending any refresh
    pub fn refresh_cancel(&mut self) {
        let events = self.coordinator.cancel_refresh();
        self.dispatch(&events);
    }

    /// Advance the settle animation by `dt_ms`.
    ///
    /// Returns true while more frames are pending.
    pub fn compute_scroll(&mut self, dt_ms: f32) -> bool {
        let events = self.coordinator.tick(dt_ms);
        self.dispatch(&events);
        self.coordinator.is_animating()
    }

    pub fn offset(&self) -> i32 {
        self.coordinator.offset()
    }

    pub fn is_loading(&self) -> bool {
        self.coordinator.is_loading()
    }

    pub fn phase(&self) -> RefreshPhase {
        self.coordinator.phase()
    }

    pub fn orientation(&self) -> Orientation {
        self.coordinator.orientation()
    }

    pub fn coordinator(&self) -> &RefreshCoordinator {
        &self.coordinator
    }

    fn dispatch(&mut self, events: &[RefreshEvent]) {
        if events.is_empty() {
            return;
        }
        self.listeners.dispatch(events);
    }
}

impl NestedScrollParent for RefreshLayout {
    fn on_start_nested_scroll(&mut self, axes: ScrollAxes) -> bool {
        !self.coordinator.is_loading() && axes.contains(self.coordinator.orientation().axes())
    }

    fn on_nested_scroll_accepted(&mut self, axes: ScrollAxes) {
        self.axes = axes;
        if !self.coordinator.start_session() {
            tracing::debug!("nested scroll accepted while refreshing; offset stays put");
        }
    }

    fn on_nested_pre_scroll(&mut self, dx: i32, dy: i32, consumed: &mut [i32; 2]) {
        let orientation = self.coordinator.orientation();
        let (taken, events) = self.coordinator.pre_consume(orientation.pick(dx, dy));
        consumed[orientation.index()] = taken;
        self.dispatch(&events);
    }

    fn on_nested_scroll(
        &mut self,
        dx_consumed: i32,
        dy_consumed: i32,
        dx_unconsumed: i32,
        dy_unconsumed: i32,
    ) {
        tracing::trace!(
            "nested scroll consumed=({}, {}) unconsumed=({}, {})",
            dx_consumed,
            dy_consumed,
            dx_unconsumed,
            dy_unconsumed
        );
        let orientation = self.coordinator.orientation();
        let events = self
            .coordinator
            .on_unconsumed_scroll(orientation.pick(dx_unconsumed, dy_unconsumed));
        self.dispatch(&events);
    }

    fn on_stop_nested_scroll(&mut self) {
        self.axes = ScrollAxes::NONE;
        let events = self.coordinator.on_gesture_end();
        self.dispatch(&events);
    }

    fn nested_scroll_axes(&self) -> ScrollAxes {
        self.axes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::FixedRegion;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Log(Rc<RefCell<Vec<String>>>);

    impl Log {
        fn take(&self) -> Vec<String> {
            std::mem::take(&mut *self.0.borrow_mut())
        }
    }

    impl RefreshListener for Log {
        fn on_start(&mut self, offset: u32) {
            self.0.borrow_mut().push(format!("start:{offset}"));
        }

        fn on_refresh(&mut self) {
            self.0.borrow_mut().push("refresh".to_string());
        }

        fn on_end(&mut self) {
            self.0.borrow_mut().push("end".to_string());
        }
    }

    fn vertical_layout() -> (RefreshLayout, Log, Log) {
        let header = Log::default();
        let tail = Log::default();
        let mut layout = RefreshLayout::with_options(
            RefreshOptions::new()
                .header(FixedRegion::new(320, 50))
                .tail(FixedRegion::new(320, 40)),
        )
        .with_header_listener(header.clone())
        .with_tail_listener(tail.clone());
        layout.set_animation(AnimationSpec {
            duration_ms: 64,
            easing: pullover_animation::Easing::Linear,
        });
        (layout, header, tail)
    }

    fn begin(layout: &mut RefreshLayout) {
        assert!(layout.on_start_nested_scroll(ScrollAxes::VERTICAL));
        layout.on_nested_scroll_accepted(ScrollAxes::VERTICAL);
    }

    #[test]
    fn test_rejects_other_axis() {
        let (mut layout, _, _) = vertical_layout();
        assert!(!layout.on_start_nested_scroll(ScrollAxes::HORIZONTAL));
        assert!(layout.on_start_nested_scroll(ScrollAxes::BOTH));
        assert!(!layout.on_start_nested_scroll(ScrollAxes::NONE));
    }

    #[test]
    fn test_pre_scroll_reports_consumed_on_axis() {
        let (mut layout, header, _) = vertical_layout();
        begin(&mut layout);
        layout.on_nested_scroll(0, 0, 0, -40);
        assert_eq!(layout.offset(), -20);

        let mut consumed = [0, 0];
        layout.on_nested_pre_scroll(7, 30, &mut consumed);
        assert_eq!(consumed, [0, 20]);
        assert_eq!(layout.offset(), 0);
        assert_eq!(header.take(), vec!["start:20", "end"]);
    }

    #[test]
    fn test_pull_release_refresh_and_finish() {
        let (mut layout, header, tail) = vertical_layout();
        begin(&mut layout);
        layout.on_nested_scroll(0, 0, 0, -120);
        layout.on_stop_nested_scroll();
        assert_eq!(layout.nested_scroll_axes(), ScrollAxes::NONE);
        assert!(layout.is_loading());
        while layout.compute_scroll(16.0) {}
        assert_eq!(layout.offset(), -50);

        // Blocked while loading
        assert!(!layout.on_start_nested_scroll(ScrollAxes::VERTICAL));

        layout.refresh_header(false);
        while layout.compute_scroll(16.0) {}
        assert_eq!(layout.offset(), 0);
        assert_eq!(header.take(), vec!["start:60", "refresh", "end"]);
        assert!(tail.take().is_empty());
    }

    #[test]
    fn test_flings_are_never_consumed() {
        let (mut layout, _, _) = vertical_layout();
        begin(&mut layout);
        assert!(!layout.on_nested_pre_fling(0.0, -3000.0));
        assert!(!layout.on_nested_fling(0.0, -3000.0, false));
    }

    #[test]
    fn test_horizontal_reads_x_component() {
        let mut layout =
            RefreshLayout::with_options(RefreshOptions::new().horizontal().tail(FixedRegion::new(30, 300)));
        assert!(layout.on_start_nested_scroll(ScrollAxes::HORIZONTAL));
        layout.on_nested_scroll_accepted(ScrollAxes::HORIZONTAL);
        layout.on_nested_scroll(0, 0, 80, -500);
        assert_eq!(layout.offset(), 40);

        let mut consumed = [0, 0];
        layout.on_nested_pre_scroll(-10, 99, &mut consumed);
        assert_eq!(consumed, [-10, 0]);
        assert_eq!(layout.offset(), 30);
    }

    #[test]
    fn test_options_resets_silently() {
        let (mut layout, header, _) = vertical_layout();
        begin(&mut layout);
        layout.on_nested_scroll(0, 0, 0, -60);
        header.take();

        layout
            .options(RefreshOptions::new().threshold(10))
            .refresh_header(true);
        assert_eq!(layout.offset(), 0);
        assert!(!layout.is_loading());
        assert_eq!(layout.nested_scroll_axes(), ScrollAxes::NONE);
        assert!(header.take().is_empty());
    }

    #[test]
    fn test_from_config() {
        let config = RefreshConfig::from_toml_str(
            "threshold = 25\norientation = \"horizontal\"\n[animation]\nsettle_duration_ms = 100",
        )
        .unwrap();
        let layout = RefreshLayout::from_config(&config);
        assert_eq!(layout.orientation(), Orientation::Horizontal);
        assert_eq!(layout.coordinator().tail_size(), 25);
        assert_eq!(layout.coordinator().animation_spec().duration_ms, 100);
    }
}
