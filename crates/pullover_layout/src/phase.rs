//! Refresh lifecycle phase
//!
//! A coarse view of what the container is doing, kept for diagnostics and
//! host rendering decisions. Offset and the loading flag remain the source
//! of truth for every scroll decision.

use pullover_core::event_types::{REFRESH, RESET, REVERT, SESSION_END, SESSION_START, SETTLED};
use pullover_core::{EventId, StateTransitions};

/// What the container is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RefreshPhase {
    /// At rest, no gesture
    #[default]
    Idle,
    /// A nested scroll session is driving the offset
    Dragging,
    /// A refresh is active (loading)
    Refreshing,
    /// Animating back to rest
    Settling,
}

impl RefreshPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefreshPhase::Idle => "idle",
            RefreshPhase::Dragging => "dragging",
            RefreshPhase::Refreshing => "refreshing",
            RefreshPhase::Settling => "settling",
        }
    }
}

impl StateTransitions for RefreshPhase {
    fn on_event(&self, event: EventId) -> Option<Self> {
        use RefreshPhase::*;
        match (self, event) {
            (Idle | Settling, SESSION_START) => Some(Dragging),
            (Dragging, SESSION_END) => Some(Idle),
            (_, REFRESH) => Some(Refreshing),
            (_, REVERT) => Some(Settling),
            // Reaching rest mid-drag keeps the gesture going
            (Idle | Settling | Refreshing, SETTLED) => Some(Idle),
            (_, RESET) => Some(Idle),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pullover_core::StateMachine;

    #[test]
    fn test_drag_then_release_to_rest() {
        let mut fsm = StateMachine::new(RefreshPhase::Idle);
        fsm.send(SESSION_START);
        assert!(fsm.is_in(RefreshPhase::Dragging));
        fsm.send(SESSION_END);
        fsm.send(REVERT);
        assert!(fsm.is_in(RefreshPhase::Settling));
        fsm.send(SETTLED);
        assert!(fsm.is_in(RefreshPhase::Idle));
    }

    #[test]
    fn test_settled_does_not_interrupt_drag() {
        let mut fsm = StateMachine::new(RefreshPhase::Dragging);
        assert_eq!(fsm.send(SETTLED), RefreshPhase::Dragging);
    }

    #[test]
    fn test_refreshing_ignores_session_events() {
        let mut fsm = StateMachine::new(RefreshPhase::Refreshing);
        assert_eq!(fsm.send(SESSION_START), RefreshPhase::Refreshing);
        assert_eq!(fsm.send(SESSION_END), RefreshPhase::Refreshing);
        assert_eq!(fsm.send(SETTLED), RefreshPhase::Idle);
    }

    #[test]
    fn test_user_interrupts_settle() {
        let mut fsm = StateMachine::new(RefreshPhase::Settling);
        assert_eq!(fsm.send(SESSION_START), RefreshPhase::Dragging);
    }
}
