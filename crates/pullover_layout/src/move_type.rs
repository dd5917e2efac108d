//! Drag classification
//!
//! Every scroll delta is classified against the container's current offset.
//! "Above" means the content sits at rest or is displaced toward the tail
//! (offset >= 0); "below" means it sits at rest or is displaced toward the
//! header (offset <= 0). "Up" is a positive delta, "down" a negative one.

/// Direction of a scroll delta relative to the current displacement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveType {
    /// At rest or tail-displaced, moving further toward the tail
    AboveUp,
    /// Tail-displaced, moving back toward rest
    AboveDown,
    /// Header-displaced, moving back toward rest
    BelowUp,
    /// At rest or header-displaced, moving further toward the header
    BelowDown,
    /// No movement
    None,
}

impl MoveType {
    /// Classify `delta` against `offset`.
    ///
    /// At rest a positive delta is `AboveUp` and a negative one `BelowDown`.
    pub fn classify(delta: i32, offset: i32) -> MoveType {
        if offset >= 0 && delta > 0 {
            MoveType::AboveUp
        } else if offset > 0 && delta < 0 {
            MoveType::AboveDown
        } else if offset < 0 && delta > 0 {
            MoveType::BelowUp
        } else if offset <= 0 && delta < 0 {
            MoveType::BelowDown
        } else {
            MoveType::None
        }
    }
}
