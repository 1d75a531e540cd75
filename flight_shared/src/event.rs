//! Flight notifications.
//!
//! The provider pushes an event for every activation transition; the host
//! drains the queue once per frame and forwards events to audio, animation
//! or whatever else is listening.

use serde::{Deserialize, Serialize};

/// Fire-and-forget activation notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightEvent {
    /// The provider entered the active state.
    Started,
    /// The provider left the active state.
    Finished,
}

/// FIFO of pending flight events.
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: Vec<FlightEvent>,
}

impl EventQueue {
    /// Pushes an event into the queue.
    pub fn push(&mut self, e: FlightEvent) {
        self.pending.push(e);
    }

    /// Drains all queued events in emission order.
    pub fn drain(&mut self) -> Vec<FlightEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_in_order() {
        let mut q = EventQueue::default();
        q.push(FlightEvent::Started);
        q.push(FlightEvent::Finished);
        assert_eq!(q.len(), 2);
        assert_eq!(q.drain(), vec![FlightEvent::Started, FlightEvent::Finished]);
        assert!(q.is_empty());
        assert!(q.drain().is_empty());
    }
}
