//! Pullover Core Runtime
//!
//! This crate provides the foundational primitives for the Pullover refresh
//! container:
//!
//! - **Nested Scroll Vocabulary**: Event identifiers and scroll axes shared by
//!   the parent container and the scrolling child
//! - **State Machines**: Typed, enum-based state machines with transition history
//!
//! # Example
//!
//! ```rust
//! use pullover_core::events::event_types::{SESSION_END, SESSION_START};
//! use pullover_core::fsm::{EventId, StateMachine, StateTransitions};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Gesture {
//!     Idle,
//!     Active,
//! }
//!
//! impl StateTransitions for Gesture {
//!     fn on_event(&self, event: EventId) -> Option<Self> {
//!         match (self, event) {
//!             (Gesture::Idle, SESSION_START) => Some(Gesture::Active),
//!             (Gesture::Active, SESSION_END) => Some(Gesture::Idle),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut fsm = StateMachine::new(Gesture::Idle);
//! fsm.send(SESSION_START);
//! assert!(fsm.is_in(Gesture::Active));
//! ```

pub mod events;
pub mod fsm;

pub use events::{event_types, ScrollAxes};
pub use fsm::{EventId, StateMachine, StateTransitions};
