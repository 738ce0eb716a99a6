//! Change notifications.

use std::fmt;

use turbo_store::StoreError;

use crate::LineItem;

/// Something observable happened to the cart.
#[derive(Debug)]
pub enum CartEvent<'a> {
    /// The line items changed. Carries the new snapshot and its total quantity.
    ItemsChanged {
        items: &'a [LineItem],
        cart_quantity: i64,
    },
    /// The cart panel was opened.
    Opened,
    /// The cart panel was closed.
    Closed,
    /// A change was applied in memory but could not be written to the store.
    PersistFailed { key: &'a str, error: &'a StoreError },
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&CartEvent<'_>)>;

/// Listener list. Listeners run in subscription order.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

impl Listeners {
    pub(crate) fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let len_before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() < len_before
    }

    pub(crate) fn notify(&mut self, event: &CartEvent<'_>) {
        for (_, listener) in &mut self.entries {
            listener(event);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_notify_in_subscription_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::default();

        for tag in ["first", "second"] {
            let seen = Rc::clone(&seen);
            listeners.subscribe(Box::new(move |_| seen.borrow_mut().push(tag)));
        }
        listeners.notify(&CartEvent::Opened);

        assert_eq!(*seen.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut listeners = Listeners::default();

        let counter = Rc::clone(&count);
        let id = listeners.subscribe(Box::new(move |_| *counter.borrow_mut() += 1));

        listeners.notify(&CartEvent::Closed);
        assert!(listeners.unsubscribe(id));
        assert!(!listeners.unsubscribe(id));
        listeners.notify(&CartEvent::Closed);

        assert_eq!(*count.borrow(), 1);
        assert_eq!(listeners.len(), 0);
    }
}
