//! Container options
//!
//! The options bundle carries the threshold, orientation and the optional
//! header and tail regions. It is applied atomically by
//! [`RefreshLayout::options`](crate::RefreshLayout::options).
//!
//! Regions are opaque handles: the container only asks them for their
//! measured extent, lazily, every time a threshold is evaluated.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use pullover_core::ScrollAxes;
use serde::{Deserialize, Serialize};

// ============================================================================
// Orientation
// ============================================================================

/// Scroll axis of the container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    /// Vertical pulling (default)
    #[default]
    Vertical,
}

impl Orientation {
    /// The nested scroll axis this orientation listens to
    pub fn axes(&self) -> ScrollAxes {
        match self {
            Orientation::Horizontal => ScrollAxes::HORIZONTAL,
            Orientation::Vertical => ScrollAxes::VERTICAL,
        }
    }

    /// Pick the component of an (x, y) pair that lies on this axis
    pub fn pick(&self, x: i32, y: i32) -> i32 {
        match self {
            Orientation::Horizontal => x,
            Orientation::Vertical => y,
        }
    }

    /// Index of this axis in an `[x, y]` array
    pub fn index(&self) -> usize {
        match self {
            Orientation::Horizontal => 0,
            Orientation::Vertical => 1,
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Orientation::Horizontal)
    }
}

// ============================================================================
// Threshold
// ============================================================================

/// Displacement needed before a release activates a refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Threshold {
    /// Use the region's own measured extent
    #[default]
    Extent,
    /// Fixed pixel distance, shared by header and tail
    Pixels(u32),
}

impl Threshold {
    /// Raw value used by configuration: any negative value means `Extent`
    pub fn from_raw(raw: i32) -> Self {
        if raw < 0 {
            Threshold::Extent
        } else {
            Threshold::Pixels(raw as u32)
        }
    }

    /// Inverse of [`Threshold::from_raw`]; `Extent` maps to -1
    pub fn to_raw(&self) -> i32 {
        match self {
            Threshold::Extent => -1,
            Threshold::Pixels(px) => (*px).min(i32::MAX as u32) as i32,
        }
    }

    /// Resolve the trigger size for one side.
    ///
    /// Returns 0 when no threshold is set and the region is absent.
    pub fn resolve(&self, region: Option<&dyn RefreshRegion>, orientation: Orientation) -> i32 {
        match self {
            Threshold::Pixels(_) => self.to_raw(),
            Threshold::Extent => region
                .map(|region| region.extent(orientation).max(0))
                .unwrap_or(0),
        }
    }
}

impl From<i32> for Threshold {
    fn from(raw: i32) -> Self {
        Threshold::from_raw(raw)
    }
}

// ============================================================================
// Regions
// ============================================================================

/// A header or tail view, seen only through its measured size
pub trait RefreshRegion {
    fn measured_width(&self) -> i32;

    fn measured_height(&self) -> i32;

    /// Called when the region is replaced by a new options bundle
    fn on_detach(&mut self) {}

    /// Measured size along the container's scroll axis
    fn extent(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.measured_width(),
            Orientation::Vertical => self.measured_height(),
        }
    }
}

/// A region with a fixed measured size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedRegion {
    pub width: i32,
    pub height: i32,
}

impl FixedRegion {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl RefreshRegion for FixedRegion {
    fn measured_width(&self) -> i32 {
        self.width
    }

    fn measured_height(&self) -> i32 {
        self.height
    }
}

/// A shared region handle whose size can change between layout passes.
///
/// Clones share the same measurements, so the host keeps one handle to
/// re-measure while the container holds another.
#[derive(Debug, Clone, Default)]
pub struct MeasuredRegion {
    size: Rc<Cell<(i32, i32)>>,
    detached: Rc<Cell<bool>>,
}

impl MeasuredRegion {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            size: Rc::new(Cell::new((width, height))),
            detached: Rc::new(Cell::new(false)),
        }
    }

    /// Update only the extent along `orientation`
    pub fn set_extent(&self, orientation: Orientation, extent: i32) {
        let (width, height) = self.size.get();
        match orientation {
            Orientation::Horizontal => self.size.set((extent, height)),
            Orientation::Vertical => self.size.set((width, extent)),
        }
    }

    /// Whether the container has let go of this region
    pub fn is_detached(&self) -> bool {
        self.detached.get()
    }
}

impl RefreshRegion for MeasuredRegion {
    fn measured_width(&self) -> i32 {
        self.size.get().0
    }

    fn measured_height(&self) -> i32 {
        self.size.get().1
    }

    fn on_detach(&mut self) {
        self.detached.set(true);
    }
}

// ============================================================================
// Options bundle
// ============================================================================

/// Immutable configuration bundle for a refresh container
#[derive(Default)]
pub struct RefreshOptions {
    threshold: Threshold,
    orientation: Orientation,
    header: Option<Box<dyn RefreshRegion>>,
    tail: Option<Box<dyn RefreshRegion>>,
}

impl RefreshOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the threshold in pixels; a negative value means "use the extent"
    pub fn threshold(mut self, threshold: impl Into<Threshold>) -> Self {
        self.threshold = threshold.into();
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Shorthand for `orientation(Orientation::Horizontal)`
    pub fn horizontal(self) -> Self {
        self.orientation(Orientation::Horizontal)
    }

    pub fn header(mut self, header: impl RefreshRegion + 'static) -> Self {
        self.header = Some(Box::new(header));
        self
    }

    pub fn tail(mut self, tail: impl RefreshRegion + 'static) -> Self {
        self.tail = Some(Box::new(tail));
        self
    }

    pub fn threshold_value(&self) -> Threshold {
        self.threshold
    }

    pub fn orientation_value(&self) -> Orientation {
        self.orientation
    }

    pub fn has_header(&self) -> bool {
        self.header.is_some()
    }

    pub fn has_tail(&self) -> bool {
        self.tail.is_some()
    }

    pub(crate) fn into_parts(
        self,
    ) -> (
        Threshold,
        Orientation,
        Option<Box<dyn RefreshRegion>>,
        Option<Box<dyn RefreshRegion>>,
    ) {
        (self.threshold, self.orientation, self.header, self.tail)
    }
}

impl fmt::Debug for RefreshOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshOptions")
            .field("threshold", &self.threshold)
            .field("orientation", &self.orientation)
            .field("header", &self.header.is_some())
            .field("tail", &self.tail.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_raw_mapping() {
        assert_eq!(Threshold::from_raw(-1), Threshold::Extent);
        assert_eq!(Threshold::from_raw(-42), Threshold::Extent);
        assert_eq!(Threshold::from_raw(0), Threshold::Pixels(0));
        assert_eq!(Threshold::from(80), Threshold::Pixels(80));
        assert_eq!(Threshold::Extent.to_raw(), -1);
        assert_eq!(Threshold::Pixels(u32::MAX).to_raw(), i32::MAX);
    }

    #[test]
    fn test_threshold_resolves_against_orientation() {
        let region = FixedRegion::new(120, 48);
        let region: &dyn RefreshRegion = &region;

        assert_eq!(
            Threshold::Extent.resolve(Some(region), Orientation::Vertical),
            48
        );
        assert_eq!(
            Threshold::Extent.resolve(Some(region), Orientation::Horizontal),
            120
        );
        assert_eq!(Threshold::Extent.resolve(None, Orientation::Vertical), 0);
        // An explicit threshold ignores the region, even when absent
        assert_eq!(Threshold::Pixels(30).resolve(None, Orientation::Vertical), 30);
    }

    #[test]
    fn test_measured_region_shares_size() {
        let host = MeasuredRegion::new(100, 40);
        let held = host.clone();

        host.set_extent(Orientation::Vertical, 64);
        assert_eq!(held.extent(Orientation::Vertical), 64);
        assert_eq!(held.extent(Orientation::Horizontal), 100);

        let mut held = held;
        held.on_detach();
        assert!(host.is_detached());
    }

    #[test]
    fn test_options_builder() {
        let options = RefreshOptions::new()
            .threshold(-1)
            .horizontal()
            .tail(FixedRegion::new(30, 10));

        assert_eq!(options.threshold_value(), Threshold::Extent);
        assert_eq!(options.orientation_value(), Orientation::Horizontal);
        assert!(!options.has_header());
        assert!(options.has_tail());
    }

    #[test]
    fn test_orientation_axis_helpers() {
        assert_eq!(Orientation::Vertical.pick(3, 7), 7);
        assert_eq!(Orientation::Horizontal.pick(3, 7), 3);
        assert_eq!(Orientation::Horizontal.index(), 0);
        assert_eq!(Orientation::Vertical.axes(), ScrollAxes::VERTICAL);
        assert_eq!(Orientation::default(), Orientation::Vertical);
    }
}
