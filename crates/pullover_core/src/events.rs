//! Nested scroll vocabulary
//!
//! Event identifiers for the refresh lifecycle and the scroll axes negotiated
//! between a parent container and its scrolling child.

use crate::fsm::EventId;

/// Refresh lifecycle events
pub mod event_types {
    use super::EventId;

    /// A nested scroll session was accepted by the parent
    pub const SESSION_START: EventId = 1;
    /// The nested scroll session ended (finger lifted)
    pub const SESSION_END: EventId = 2;
    /// A header or tail refresh was activated
    pub const REFRESH: EventId = 10;
    /// A revert-to-rest animation was scheduled
    pub const REVERT: EventId = 11;
    /// The offset arrived back at rest
    pub const SETTLED: EventId = 12;
    /// Configuration was replaced
    pub const RESET: EventId = 20;
}

/// Scroll axes bit set used in nested scroll negotiation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScrollAxes {
    bits: u8,
}

impl ScrollAxes {
    pub const NONE: ScrollAxes = ScrollAxes { bits: 0 };
    pub const HORIZONTAL: ScrollAxes = ScrollAxes { bits: 0b01 };
    pub const VERTICAL: ScrollAxes = ScrollAxes { bits: 0b10 };
    pub const BOTH: ScrollAxes = ScrollAxes { bits: 0b11 };

    /// Create from raw bits (unknown bits are dropped)
    pub const fn from_bits(bits: u8) -> Self {
        Self { bits: bits & 0b11 }
    }

    /// Raw bit representation
    pub const fn bits(&self) -> u8 {
        self.bits
    }

    /// Check if no axis is set
    pub const fn is_none(&self) -> bool {
        self.bits == 0
    }

    /// Check if every axis in `other` is also set here
    pub const fn contains(&self, other: ScrollAxes) -> bool {
        other.bits != 0 && self.bits & other.bits == other.bits
    }

    pub const fn horizontal(&self) -> bool {
        self.bits & Self::HORIZONTAL.bits != 0
    }

    pub const fn vertical(&self) -> bool {
        self.bits & Self::VERTICAL.bits != 0
    }

    /// Union of two axis sets
    pub const fn union(self, other: ScrollAxes) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }
}

impl std::ops::BitOr for ScrollAxes {
    type Output = ScrollAxes;

    fn bitor(self, rhs: ScrollAxes) -> ScrollAxes {
        self.union(rhs)
    }
}
