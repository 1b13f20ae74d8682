//! Events emitted by the health controller

use crate::entity::EntityId;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// How a points event should be applied by the scoring system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointsMethod {
    /// Add to the current score
    Add,
    /// Replace the current score
    Set,
}

/// Events emitted by the health system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HealthEvent {
    /// The entity was hit, even if the hit dealt no damage
    Hit {
        entity: Option<EntityId>,
        position: [f32; 3],
    },
    /// Damage was applied
    DamageTaken {
        /// The damaged entity
        source: Option<EntityId>,
        /// Whoever dealt the damage
        instigator: Option<EntityId>,
        new_health: u32,
        damage: u32,
        previous_health: u32,
    },
    /// Points should be awarded for this death
    PointsEarned { method: PointsMethod, amount: i32 },
    /// A player character died
    PlayerDied { entity: EntityId },
}

impl HealthEvent {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hit { .. } => "Hit",
            Self::DamageTaken { .. } => "DamageTaken",
            Self::PointsEarned { .. } => "PointsEarned",
            Self::PlayerDied { .. } => "PlayerDied",
        }
    }
}

/// Receiver of health events (game manager, analytics, UI)
pub trait EventSink {
    /// Deliver an event
    fn emit(&mut self, event: HealthEvent);
}

impl<F> EventSink for F
where
    F: FnMut(HealthEvent),
{
    fn emit(&mut self, event: HealthEvent) {
        self(event)
    }
}

/// Shared in-memory event queue
///
/// Clones share the same storage, so one handle can be given to the
/// controller while another is drained by the consumer.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Arc<Mutex<Vec<HealthEvent>>>,
}

impl EventQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an event
    pub fn send(&self, event: HealthEvent) {
        self.events.lock().push(event);
    }

    /// Take all pending events in emission order
    pub fn drain(&self) -> Vec<HealthEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    /// Copy pending events without consuming them
    pub fn snapshot(&self) -> Vec<HealthEvent> {
        self.events.lock().clone()
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Drop all pending events
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl EventSink for EventQueue {
    fn emit(&mut self, event: HealthEvent) {
        self.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_shares_storage() {
        let queue = EventQueue::new();
        let mut sink = queue.clone();

        sink.emit(HealthEvent::PointsEarned {
            method: PointsMethod::Add,
            amount: 10,
        });
        sink.emit(HealthEvent::PlayerDied {
            entity: EntityId::new(1),
        });

        assert_eq!(queue.len(), 2);
        let events = queue.drain();
        assert_eq!(events[0].name(), "PointsEarned");
        assert_eq!(events[1].name(), "PlayerDied");
        assert!(queue.is_empty());
    }

    #[test]
    fn test_closure_sink() {
        let mut received = Vec::new();
        {
            let mut sink = |event: HealthEvent| received.push(event);
            sink.emit(HealthEvent::Hit {
                entity: None,
                position: [1.0, 2.0, 3.0],
            });
        }
        assert_eq!(received.len(), 1);
    }
}
