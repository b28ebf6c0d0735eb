//! Index-change observers
//!
//! Optional hook for hosts that want to follow navigation. Callbacks run on
//! the owner thread, after the index write, in registration order.

use crate::index::Origin;
use serde::Serialize;

/// A completed index change
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct IndexChange {
    pub previous: usize,
    pub current: usize,
    pub origin: Origin,
}

/// Handle returned by [`Observers::subscribe`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Callback = Box<dyn Fn(&IndexChange) + Send + Sync>;

/// Registry of index-change callbacks
#[derive(Default)]
pub struct Observers {
    next_id: u64,
    callbacks: Vec<(ObserverId, Callback)>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback
    pub fn subscribe<F>(&mut self, callback: F) -> ObserverId
    where
        F: Fn(&IndexChange) + Send + Sync + 'static,
    {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback; returns false if it was already gone
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(existing, _)| *existing != id);
        self.callbacks.len() != before
    }

    pub fn notify(&self, change: &IndexChange) {
        for (_, callback) in &self.callbacks {
            callback(change);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub fn clear(&mut self) {
        self.callbacks.clear();
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.callbacks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn change(previous: usize, current: usize) -> IndexChange {
        IndexChange {
            previous,
            current,
            origin: Origin::Manual,
        }
    }

    #[test]
    fn test_notify_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut observers = Observers::new();

        for tag in ["first", "second"] {
            let log = Arc::clone(&log);
            observers.subscribe(move |c| log.lock().unwrap().push((tag, c.current)));
        }

        observers.notify(&change(0, 2));
        assert_eq!(*log.lock().unwrap(), vec![("first", 2), ("second", 2)]);
    }

    #[test]
    fn test_unsubscribe() {
        let hits = Arc::new(Mutex::new(0));
        let mut observers = Observers::new();

        let counter = Arc::clone(&hits);
        let id = observers.subscribe(move |_| *counter.lock().unwrap() += 1);

        observers.notify(&change(0, 1));
        assert!(observers.unsubscribe(id));
        assert!(!observers.unsubscribe(id));
        observers.notify(&change(1, 2));

        assert_eq!(*hits.lock().unwrap(), 1);
        assert!(observers.is_empty());
    }
}
