//! State Machine Runtime
//!
//! Typed flat state machines for container phases. States are plain
//! enums that implement [`StateTransitions`]; the machine owns the current
//! state and a bounded transition history.
//!
//! Supports:
//! - Flat state machines
//! - Transition history (for debugging and diagnostics)

use std::fmt::Debug;
use std::hash::Hash;

use smallvec::SmallVec;

/// Identifier for an event type
pub type EventId = u32;

/// Maximum number of transitions kept in history
const HISTORY_LIMIT: usize = 32;

/// Trait for state enums that define their own transitions
pub trait StateTransitions: Clone + Copy + PartialEq + Eq + Hash + Debug + 'static {
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventId) -> Option<Self>;
}

/// A state machine instance
pub struct StateMachine<S: StateTransitions> {
    current_state: S,
    /// History of state transitions (oldest first, bounded)
    history: SmallVec<[(S, EventId, S); 8]>,
}

impl<S: StateTransitions> StateMachine<S> {
    /// Create a new state machine in its initial state
    pub fn new(initial_state: S) -> Self {
        Self {
            current_state: initial_state,
            history: SmallVec::new(),
        }
    }

    /// Get the current state
    pub fn current_state(&self) -> S {
        self.current_state
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current_state == state
    }

    /// Get transition history
    pub fn history(&self) -> &[(S, EventId, S)] {
        &self.history
    }

    /// Send an event to the state machine, potentially triggering a transition.
    ///
    /// Returns the state after the event.
    pub fn send(&mut self, event: EventId) -> S {
        let current = self.current_state;
        let Some(to_state) = current.on_event(event) else {
            return current;
        };

        self.current_state = to_state;

        if self.history.len() == HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push((current, event, to_state));

        tracing::trace!("fsm {:?} --{}--> {:?}", current, event, to_state);

        to_state
    }
}

impl<S: StateTransitions + Default> Default for StateMachine<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: StateTransitions> Debug for StateMachine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("current_state", &self.current_state)
            .field("history", &self.history)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Event constants for tests
    const PRESS: EventId = 1;
    const RELEASE: EventId = 2;
    const DISABLE: EventId = 3;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    enum Switch {
        #[default]
        Off,
        Held,
        Disabled,
    }

    impl StateTransitions for Switch {
        fn on_event(&self, event: EventId) -> Option<Self> {
            match (self, event) {
                (Switch::Off, PRESS) => Some(Switch::Held),
                (Switch::Held, RELEASE) => Some(Switch::Off),
                (Switch::Held, PRESS) => Some(Switch::Held),
                (Switch::Disabled, _) => None,
                (_, DISABLE) => Some(Switch::Disabled),
                _ => None,
            }
        }
    }

    #[test]
    fn test_simple_transitions() {
        let mut fsm = StateMachine::new(Switch::Off);
        assert_eq!(fsm.current_state(), Switch::Off);

        fsm.send(PRESS);
        assert_eq!(fsm.current_state(), Switch::Held);

        fsm.send(RELEASE);
        assert_eq!(fsm.current_state(), Switch::Off);
    }

    #[test]
    fn test_invalid_event_no_transition() {
        let mut fsm = StateMachine::new(Switch::Off);

        // RELEASE is not valid in Off state
        assert_eq!(fsm.send(RELEASE), Switch::Off);
        assert!(fsm.history().is_empty());
    }

    #[test]
    fn test_disabled_ignores_everything() {
        let mut fsm = StateMachine::<Switch>::default();
        fsm.send(DISABLE);
        assert!(fsm.is_in(Switch::Disabled));
        assert_eq!(fsm.send(PRESS), Switch::Disabled);
        assert_eq!(fsm.history().len(), 1);
    }

    #[test]
    fn test_history() {
        let mut fsm = StateMachine::new(Switch::Off);
        fsm.send(PRESS);
        fsm.send(RELEASE);

        let history = fsm.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0], (Switch::Off, PRESS, Switch::Held));
        assert_eq!(history[1], (Switch::Held, RELEASE, Switch::Off));
    }

    #[test]
    fn test_history_is_bounded() {
        let mut fsm = StateMachine::new(Switch::Off);
        for _ in 0..50 {
            fsm.send(PRESS);
            fsm.send(RELEASE);
        }
        assert_eq!(fsm.history().len(), HISTORY_LIMIT);
        assert_eq!(
            fsm.history().last(),
            Some(&(Switch::Held, RELEASE, Switch::Off))
        );
    }
}
