// ── Synchronous snapshot observers ──
//
// Callbacks registered on a store run inline after each mutation. The
// registry lock is released before callbacks run, so a callback may drop
// its own subscription.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use super::collection::Snapshot;

type Callback<R> = Arc<dyn Fn(&Snapshot<R>) + Send + Sync>;

struct Slots<R> {
    next_id: u64,
    callbacks: Vec<(u64, Callback<R>)>,
}

pub(crate) struct ObserverRegistry<R> {
    slots: Arc<Mutex<Slots<R>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<R: Send + Sync + 'static> ObserverRegistry<R> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Arc::new(Mutex::new(Slots {
                next_id: 0,
                callbacks: Vec::new(),
            })),
        }
    }

    pub(crate) fn register(&self, callback: Callback<R>) -> Subscription {
        let id = {
            let mut slots = lock(&self.slots);
            let id = slots.next_id;
            slots.next_id += 1;
            slots.callbacks.push((id, callback));
            id
        };

        let registry: Weak<Mutex<Slots<R>>> = Arc::downgrade(&self.slots);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(slots) = registry.upgrade() {
                    lock(&slots).callbacks.retain(|(slot, _)| *slot != id);
                }
            })),
        }
    }

    pub(crate) fn notify(&self, snapshot: &Snapshot<R>) {
        let callbacks: Vec<Callback<R>> = lock(&self.slots)
            .callbacks
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();
        for callback in callbacks {
            callback(snapshot);
        }
    }

    pub(crate) fn len(&self) -> usize {
        lock(&self.slots).callbacks.len()
    }
}

/// Handle for a registered store callback.
///
/// Dropping the handle (or calling [`unsubscribe`](Self::unsubscribe))
/// deregisters the callback.
#[must_use = "dropping a Subscription immediately unsubscribes"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    /// Keep the callback registered for the lifetime of the store.
    pub fn detach(mut self) {
        self.cancel = None;
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
