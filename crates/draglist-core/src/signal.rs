//! Observer channels for list and gesture notifications.
//!
//! A [`Signal<Args>`] holds any number of connected slots. Emitting the
//! signal calls every slot synchronously on the emitting thread, in
//! connection order. Slots are cloned out of the connection table before
//! they run, so a slot may connect to or disconnect from the signal that
//! invoked it without deadlocking.
//!
//! # Example
//!
//! ```
//! use draglist_core::Signal;
//!
//! let removed = Signal::<usize>::new();
//! let id = removed.connect(|row| println!("row {row} removed"));
//! removed.emit(3);
//! assert!(removed.disconnect(id));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// Identifies one signal-slot connection.
    ///
    /// Valid until passed to [`Signal::disconnect`] or the signal is dropped.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A type-safe notification channel with multiple connected slots.
///
/// `Args` is the payload handed to every slot by reference. Use `()` for
/// payload-less notifications or a tuple for several values.
pub struct Signal<Args> {
    connections: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot. Returns an ID usable with [`disconnect`](Self::disconnect).
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Arc::new(slot))
    }

    /// Disconnect a slot. Returns `false` if the ID was unknown.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Remove every connection.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Temporarily suppress emission. While blocked, [`emit`](Self::emit) is a no-op.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Invoke every connected slot with `args`.
    #[tracing::instrument(skip_all, target = "draglist_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return;
        }

        let slots: Vec<Slot<Args>> = self.connections.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");

        for slot in slots {
            slot(&args);
        }
    }
}

static_assertions::assert_impl_all!(Signal<usize>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_emit_reaches_all_slots_in_order() {
        let signal = Signal::<i32>::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let log_a = log.clone();
        signal.connect(move |v| log_a.lock().push(("a", *v)));
        let log_b = log.clone();
        signal.connect(move |v| log_b.lock().push(("b", *v)));

        signal.emit(7);

        assert_eq!(*log.lock(), vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn test_disconnect() {
        let signal = Signal::<()>::new();
        let count = Arc::new(AtomicUsize::new(0));

        let c = count.clone();
        let id = signal.connect(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        signal.emit(());
        assert!(signal.disconnect(id));
        assert!(!signal.disconnect(id));
        signal.emit(());

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_blocked_signal_skips_slots() {
        let signal = Signal::<()>::new();
        let count = Arc::new(AtomicUsize::new(0));

        let c = count.clone();
        signal.connect(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        signal.set_blocked(true);
        signal.emit(());
        assert!(signal.is_blocked());
        assert_eq!(count.load(Ordering::SeqCst), 0);

        signal.set_blocked(false);
        signal.emit(());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_slot_may_disconnect_all_while_emitting() {
        let signal = Arc::new(Signal::<()>::new());
        let inner = signal.clone();
        signal.connect(move |_| inner.disconnect_all());
        signal.connect(|_| {});

        signal.emit(());

        assert_eq!(signal.connection_count(), 0);
    }
}
