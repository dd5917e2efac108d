//! Pullover Animation System
//!
//! Easing curves and the settle-to-target scroll primitive that drives a
//! container's offset back to rest or to a refresh position.
//!
//! # Features
//!
//! - **Easing**: Decelerating curves, including the viscous-fluid curve used
//!   by platform scrollers
//! - **Scroller**: Frame-driven, interruptible settle animation over integer
//!   pixel offsets; the host advances it with `compute_offset(dt_ms)`

pub mod easing;
pub mod scroller;

pub use easing::Easing;
pub use scroller::{Scroller, DEFAULT_DURATION_MS};
