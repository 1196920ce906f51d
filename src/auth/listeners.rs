use {
    crate::auth::AuthState,
    dashmap::DashMap,
    std::sync::{
        Arc, Weak,
        atomic::{AtomicU64, Ordering},
    },
    tracing::debug,
};

pub type Listener = Arc<dyn Fn(&AuthState) + Send + Sync>;

#[derive(Default)]
pub struct Listeners {
    next_id: AtomicU64,
    entries: DashMap<u64, Listener>,
}

impl Listeners {
    pub fn add(self: &Arc<Self>, listener: Listener) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.entries.insert(id, listener);
        debug!("Auth listener {} added", id);

        Subscription {
            id,
            listeners: Arc::downgrade(self),
        }
    }

    fn remove(&self, id: u64) {
        if self.entries.remove(&id).is_some() {
            debug!("Auth listener {} removed", id);
        }
    }

    /// Invokes every registered listener with `state`.
    ///
    /// The listener set is copied first so a listener may drop its own
    /// subscription while being notified.
    pub fn notify(&self, state: &AuthState) {
        let snapshot: Vec<Listener> = self
            .entries
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        for listener in snapshot {
            listener(state);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Handle to a registered auth listener. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes the listener immediately"]
pub struct Subscription {
    id: u64,
    listeners: Weak<Listeners>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.remove(self.id);
        }
    }
}
