//! Refresh notifications
//!
//! The coordinator never calls listeners directly. Every operation returns
//! the [`RefreshEvent`]s it produced and the host hands them to a
//! [`ListenerBridge`], which routes each one to the listener of its side.

use std::fmt;

use smallvec::SmallVec;

/// Which auxiliary region an event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Revealed by a negative offset
    Header,
    /// Revealed by a positive offset
    Tail,
}

impl Side {
    /// The side displaced by `offset`, or None at rest
    pub fn of(offset: i32) -> Option<Side> {
        match offset {
            o if o < 0 => Some(Side::Header),
            o if o > 0 => Some(Side::Tail),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Header => "header",
            Side::Tail => "tail",
        }
    }

    pub fn opposite(&self) -> Side {
        match self {
            Side::Header => Side::Tail,
            Side::Tail => Side::Header,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notification produced by the refresh state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefreshEvent {
    /// A gesture moved the offset; `offset` is the displacement magnitude
    Started { side: Side, offset: u32 },
    /// A refresh was activated
    Refreshed { side: Side },
    /// The offset returned to rest
    Ended { side: Side },
}

impl RefreshEvent {
    pub fn side(&self) -> Side {
        match self {
            RefreshEvent::Started { side, .. }
            | RefreshEvent::Refreshed { side }
            | RefreshEvent::Ended { side } => *side,
        }
    }
}

/// Formats as `side:kind[:offset]`, e.g. `header:start:24` or `tail:end`
impl fmt::Display for RefreshEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefreshEvent::Started { side, offset } => write!(f, "{side}:start:{offset}"),
            RefreshEvent::Refreshed { side } => write!(f, "{side}:refresh"),
            RefreshEvent::Ended { side } => write!(f, "{side}:end"),
        }
    }
}

/// Events produced by a single operation (rarely more than two)
pub type RefreshEvents = SmallVec<[RefreshEvent; 2]>;

/// Callbacks for one side of the container
pub trait RefreshListener {
    /// The user is pulling; `offset` is the distance from rest
    fn on_start(&mut self, offset: u32);

    /// A refresh has started
    fn on_refresh(&mut self);

    /// The container is back at rest
    fn on_end(&mut self);
}

/// Routes refresh events to per-side listeners
#[derive(Default)]
pub struct ListenerBridge {
    header: Option<Box<dyn RefreshListener>>,
    tail: Option<Box<dyn RefreshListener>>,
}

impl ListenerBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the listener for `side`
    pub fn set(&mut self, side: Side, listener: Option<Box<dyn RefreshListener>>) {
        match side {
            Side::Header => self.header = listener,
            Side::Tail => self.tail = listener,
        }
    }

    pub fn has_listener(&self, side: Side) -> bool {
        match side {
            Side::Header => self.header.is_some(),
            Side::Tail => self.tail.is_some(),
        }
    }

    /// Deliver events in order. Events for a side without a listener are dropped.
    pub fn dispatch(&mut self, events: &[RefreshEvent]) {
        for event in events {
            let listener = match event.side() {
                Side::Header => self.header.as_deref_mut(),
                Side::Tail => self.tail.as_deref_mut(),
            };
            let Some(listener) = listener else {
                continue;
            };

            match *event {
                RefreshEvent::Started { offset, .. } => listener.on_start(offset),
                RefreshEvent::Refreshed { .. } => listener.on_refresh(),
                RefreshEvent::Ended { .. } => listener.on_end(),
            }
        }
    }
}

impl fmt::Debug for ListenerBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerBridge")
            .field("header", &self.header.is_some())
            .field("tail", &self.tail.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder {
        name: &'static str,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl RefreshListener for Recorder {
        fn on_start(&mut self, offset: u32) {
            self.log.borrow_mut().push(format!("{}:start:{offset}", self.name));
        }

        fn on_refresh(&mut self) {
            self.log.borrow_mut().push(format!("{}:refresh", self.name));
        }

        fn on_end(&mut self) {
            self.log.borrow_mut().push(format!("{}:end", self.name));
        }
    }

    #[test]
    fn test_side_of_offset() {
        assert_eq!(Side::of(-1), Some(Side::Header));
        assert_eq!(Side::of(1), Some(Side::Tail));
        assert_eq!(Side::of(0), None);
        assert_eq!(Side::Header.opposite(), Side::Tail);
    }

    #[test]
    fn test_event_display() {
        let started = RefreshEvent::Started {
            side: Side::Header,
            offset: 24,
        };
        assert_eq!(started.to_string(), "header:start:24");
        assert_eq!(
            RefreshEvent::Refreshed { side: Side::Tail }.to_string(),
            "tail:refresh"
        );
        assert_eq!(
            RefreshEvent::Ended { side: Side::Tail }.to_string(),
            "tail:end"
        );
    }

    #[test]
    fn test_dispatch_routes_by_side() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bridge = ListenerBridge::new();
        bridge.set(
            Side::Header,
            Some(Box::new(Recorder {
                name: "h",
                log: log.clone(),
            })),
        );
        bridge.set(
            Side::Tail,
            Some(Box::new(Recorder {
                name: "t",
                log: log.clone(),
            })),
        );

        bridge.dispatch(&[
            RefreshEvent::Started {
                side: Side::Header,
                offset: 5,
            },
            RefreshEvent::Refreshed { side: Side::Header },
            RefreshEvent::Ended { side: Side::Tail },
        ]);

        assert_eq!(*log.borrow(), vec!["h:start:5", "h:refresh", "t:end"]);
    }

    #[test]
    fn test_dispatch_without_listener_is_silent() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bridge = ListenerBridge::new();
        bridge.set(
            Side::Tail,
            Some(Box::new(Recorder {
                name: "t",
                log: log.clone(),
            })),
        );
        assert!(!bridge.has_listener(Side::Header));

        bridge.dispatch(&[RefreshEvent::Ended { side: Side::Header }]);
        assert!(log.borrow().is_empty());

        bridge.set(Side::Tail, None);
        bridge.dispatch(&[RefreshEvent::Ended { side: Side::Tail }]);
        assert!(log.borrow().is_empty());
    }
}
