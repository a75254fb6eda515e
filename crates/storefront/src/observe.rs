//! Explicit observer registration for state containers.
//!
//! Replaces ambient broadcast subjects with a per-container registry:
//! each container owns an [`ObserverSet`] and publishes the full updated
//! snapshot to its subscribers synchronously, before the mutating call
//! returns.

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A set of observers over snapshots of type `T`.
pub struct ObserverSet<T: ?Sized> {
    observers: Vec<(SubscriptionId, Box<dyn FnMut(&T) + Send>)>,
    next_id: u64,
}

impl<T: ?Sized> Default for ObserverSet<T> {
    fn default() -> Self {
        Self {
            observers: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T: ?Sized> ObserverSet<T> {
    /// Create an empty observer set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer and return its subscription handle.
    pub fn subscribe(&mut self, observer: impl FnMut(&T) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns `false` if the handle was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    /// Synchronously invoke every observer with the given snapshot.
    pub fn notify(&mut self, snapshot: &T) {
        for (_, observer) in &mut self.observers {
            observer(snapshot);
        }
    }

    /// Number of registered observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Whether no observers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl<T: ?Sized> core::fmt::Debug for ObserverSet<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ObserverSet")
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[test]
    fn test_notify_reaches_all_subscribers() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut set: ObserverSet<i32> = ObserverSet::new();
        for tag in 0..3 {
            let seen = Arc::clone(&seen);
            set.subscribe(move |value| seen.lock().unwrap().push((tag, *value)));
        }
        set.notify(&7);
        let seen = seen.lock().unwrap();
        assert_eq!(seen.as_slice(), &[(0, 7), (1, 7), (2, 7)]);
    }

    #[test]
    fn test_unsubscribe() {
        let seen = Arc::new(Mutex::new(0));
        let mut set: ObserverSet<i32> = ObserverSet::new();
        let id = {
            let seen = Arc::clone(&seen);
            set.subscribe(move |_| *seen.lock().unwrap() += 1)
        };
        set.notify(&1);
        assert!(set.unsubscribe(id));
        assert!(!set.unsubscribe(id));
        set.notify(&2);
        assert_eq!(*seen.lock().unwrap(), 1);
    }
}
