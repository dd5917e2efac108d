//! Pullover Refresh Container
//!
//! A pull-to-refresh / pull-to-load container for a nested scrolling child.
//! Dragging the child past its edge reveals a header (negative offset) or a
//! tail (positive offset); releasing past the threshold starts a refresh,
//! releasing short of it settles back to rest.
//!
//! # Example
//!
//! ```rust
//! use pullover_layout::prelude::*;
//!
//! let mut layout = RefreshLayout::new();
//! layout.options(
//!     RefreshOptions::new()
//!         .threshold(50)
//!         .header(FixedRegion::new(320, 60)),
//! );
//!
//! // The child has no room left above: every 2px of drag moves 1px
//! assert!(layout.on_start_nested_scroll(ScrollAxes::VERTICAL));
//! layout.on_nested_scroll_accepted(ScrollAxes::VERTICAL);
//! layout.on_nested_scroll(0, 0, 0, -120);
//! assert_eq!(layout.offset(), -60);
//!
//! layout.on_stop_nested_scroll();
//! assert!(layout.is_loading());
//! while layout.compute_scroll(16.0) {}
//! assert_eq!(layout.offset(), -50);
//! ```

pub mod animator;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod listener;
pub mod move_type;
pub mod nested;
pub mod options;
pub mod phase;
pub mod refresh_layout;

pub use animator::{AnimationFrame, AnimationSpec, OffsetAnimator};
pub use config::{AnimationConfig, RefreshConfig};
pub use coordinator::{RefreshCoordinator, DAMPING};
pub use error::{ConfigError, Result};
pub use listener::{ListenerBridge, RefreshEvent, RefreshEvents, RefreshListener, Side};
pub use move_type::MoveType;
pub use nested::NestedScrollParent;
pub use options::{
    FixedRegion, MeasuredRegion, Orientation, RefreshOptions, RefreshRegion, Threshold,
};
pub use phase::RefreshPhase;
pub use refresh_layout::RefreshLayout;

/// Commonly used types for building a refresh container
pub mod prelude {
    pub use crate::listener::{RefreshEvent, RefreshListener, Side};
    pub use crate::nested::NestedScrollParent;
    pub use crate::options::{
        FixedRegion, MeasuredRegion, Orientation, RefreshOptions, RefreshRegion, Threshold,
    };
    pub use crate::phase::RefreshPhase;
    pub use crate::refresh_layout::RefreshLayout;
    pub use pullover_core::ScrollAxes;
}
