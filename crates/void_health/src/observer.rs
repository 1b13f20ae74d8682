//! Hit / death / revive observers

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_OBSERVER_ID: AtomicU64 = AtomicU64::new(1);

/// Observer callback
pub type Observer = Box<dyn Fn() + Send + Sync>;

/// Observer ID returned on subscription, unique across every list
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(pub u64);

/// Ordered list of observers
///
/// Observers are notified synchronously in the order they subscribed.
pub struct ObserverList {
    observers: Vec<(ObserverId, Observer)>,
}

impl ObserverList {
    /// Create an empty list
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    /// Add an observer
    pub fn subscribe<F>(&mut self, observer: F) -> ObserverId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = ObserverId(NEXT_OBSERVER_ID.fetch_add(1, Ordering::Relaxed));
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer; returns false if it was not subscribed
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    /// Call every observer
    pub fn notify(&self) {
        for (_, observer) in &self.observers {
            observer();
        }
    }

    /// Remove all observers
    pub fn clear(&mut self) {
        self.observers.clear();
    }

    /// Number of observers
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl Default for ObserverList {
    fn default() -> Self {
        Self::new()
    }
}

/// The three observer lists of a health controller
#[derive(Default)]
pub struct Observers {
    /// Called on every accepted hit
    pub on_hit: ObserverList,
    /// Called during the death pipeline
    pub on_death: ObserverList,
    /// Called at the end of a revive
    pub on_revive: ObserverList,
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_registration_order() {
        let mut list = ObserverList::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for name in ["first", "second", "third"] {
            let order = order.clone();
            list.subscribe(move || order.lock().push(name));
        }

        list.notify();
        assert_eq!(*order.lock(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_unsubscribe() {
        let mut list = ObserverList::new();
        let calls = Arc::new(Mutex::new(0));

        let calls_a = calls.clone();
        let a = list.subscribe(move || *calls_a.lock() += 1);
        let calls_b = calls.clone();
        list.subscribe(move || *calls_b.lock() += 10);

        assert!(list.unsubscribe(a));
        assert!(!list.unsubscribe(a));
        assert_eq!(list.len(), 1);

        list.notify();
        assert_eq!(*calls.lock(), 10);
    }

    #[test]
    fn test_ids_unique_across_lists() {
        let mut observers = Observers::default();
        let hit = observers.on_hit.subscribe(|| {});
        let death = observers.on_death.subscribe(|| {});
        let revive = observers.on_revive.subscribe(|| {});

        assert_ne!(hit, death);
        assert_ne!(death, revive);
        assert!(!observers.on_death.unsubscribe(hit));
        assert_eq!(observers.on_death.len(), 1);
    }
}
