//! Synchronous "step" notification channel
//!
//! Subscribers run in subscription order on the caller's thread, once per
//! fixed step and before any body is integrated.

use tracing::debug;

/// Handle returned by [`StepEvents::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type StepCallback = Box<dyn FnMut()>;

/// Ordered observer list for the fixed step
#[derive(Default)]
pub struct StepEvents {
    subscribers: Vec<(SubscriptionId, StepCallback)>,
    next_id: u64,
}

impl StepEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a callback to the end of the notification order
    pub fn subscribe(&mut self, callback: impl FnMut() + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        debug!(?id, count = self.subscribers.len(), "Step subscriber added");
        id
    }

    /// Remove a callback. Returns `false` if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        let removed = self.subscribers.len() != before;
        if removed {
            debug!(?id, count = self.subscribers.len(), "Step subscriber removed");
        }
        removed
    }

    /// Invoke every subscriber in order
    pub fn publish(&mut self) {
        for (_, callback) in self.subscribers.iter_mut() {
            callback();
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl std::fmt::Debug for StepEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepEvents")
            .field("subscribers", &self.subscribers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_publish_in_subscription_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut events = StepEvents::new();

        for tag in ["a", "b", "c"] {
            let log = log.clone();
            events.subscribe(move || log.borrow_mut().push(tag));
        }

        assert_eq!(events.len(), 3);

        events.publish();
        events.publish();
        assert_eq!(*log.borrow(), vec!["a", "b", "c", "a", "b", "c"]);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut events = StepEvents::new();

        let counter = count.clone();
        let id = events.subscribe(move || *counter.borrow_mut() += 1);
        events.publish();

        assert!(events.unsubscribe(id));
        assert!(!events.unsubscribe(id));
        assert!(events.is_empty());

        events.publish();
        assert_eq!(*count.borrow(), 1);
    }
}
