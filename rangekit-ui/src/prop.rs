//! Callback handles and listener lists for change notifications.
//!
//! ## Usage
//!
//! Wrap a closure in [`CallbackWith`] and subscribe it to a
//! [`RangeModel`](crate::RangeModel). Handles compare by identity, so the same
//! callback can be recognised again without comparing closures.

use std::sync::Arc;

use smallvec::SmallVec;

/// Listener callback taking an event by value.
///
/// Clones share the closure, and two handles are equal only when they share
/// it.
pub struct CallbackWith<T, R = ()> {
    handler: Arc<dyn Fn(T) -> R + Send + Sync>,
}

impl<T, R> CallbackWith<T, R> {
    /// Wraps a closure.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Runs the callback.
    pub fn call(&self, value: T) -> R {
        (self.handler)(value)
    }
}

impl<T, R, F> From<F> for CallbackWith<T, R>
where
    F: Fn(T) -> R + Send + Sync + 'static,
{
    fn from(handler: F) -> Self {
        Self::new(handler)
    }
}

impl<T, R> Clone for CallbackWith<T, R> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<T, R> PartialEq for CallbackWith<T, R> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.handler, &other.handler)
    }
}

impl<T, R> Eq for CallbackWith<T, R> {}

/// Identifies one subscription in a [`Listeners`] list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// An ordered list of callbacks notified with a borrowed event.
///
/// Most controls carry one or two listeners, so the list lives inline.
pub struct Listeners<E> {
    entries: SmallVec<[(ListenerId, CallbackWith<E>); 2]>,
    next_id: u64,
}

impl<E> Listeners<E> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
            next_id: 0,
        }
    }

    /// Appends a callback; listeners are notified in subscription order.
    pub fn subscribe(&mut self, callback: impl Into<CallbackWith<E>>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, callback.into()));
        id
    }

    /// Removes a subscription. Returns `false` when `id` is unknown.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nobody is listening.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E: Clone> Listeners<E> {
    /// Delivers `event` to every listener.
    pub fn notify(&self, event: &E) {
        for (_, callback) in &self.entries {
            callback.call(event.clone());
        }
    }
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for Listeners<E> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            next_id: self.next_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn callbacks_compare_by_identity() {
        let a = CallbackWith::<i32>::new(|_| {});
        let b = a.clone();
        let c = CallbackWith::<i32>::new(|_| {});
        assert!(a == b);
        assert!(a != c);
    }

    #[test]
    fn listeners_notify_in_order_and_unsubscribe() {
        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let mut listeners = Listeners::<u8>::new();

        let first = {
            let seen = seen.clone();
            listeners.subscribe(move |v: u8| seen.lock().push(("first", v)))
        };
        {
            let seen = seen.clone();
            listeners.subscribe(move |v: u8| seen.lock().push(("second", v)));
        }

        listeners.notify(&7);
        assert_eq!(*seen.lock(), vec![("first", 7), ("second", 7)]);

        assert!(listeners.unsubscribe(first));
        assert!(!listeners.unsubscribe(first));
        listeners.notify(&9);
        assert_eq!(seen.lock().last(), Some(&("second", 9)));
        assert_eq!(listeners.len(), 1);
    }

    #[test]
    fn cloned_lists_share_callbacks() {
        let seen = Arc::new(parking_lot::Mutex::new(0));
        let mut listeners = Listeners::<u32>::default();
        {
            let seen = seen.clone();
            listeners.subscribe(move |v: u32| *seen.lock() += v);
        }
        let copy = listeners.clone();
        listeners.notify(&2);
        copy.notify(&3);
        assert_eq!(*seen.lock(), 5);
    }
}
