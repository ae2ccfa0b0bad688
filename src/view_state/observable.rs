//! Observable building blocks shared by the view state holders.
//!
//! - [`ErrorSlot`]: the screen's last error message
//! - [`Slice`]: one piece of fetched data, guarded by a request sequencer
//! - [`LoadingFlag`]: true while at least one tracked operation runs
//!
//! All of them are cheap to clone; clones observe the same value.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

#[derive(Clone)]
pub struct ErrorSlot {
    tx: Arc<watch::Sender<Option<String>>>,
}

impl ErrorSlot {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    pub fn set(&self, message: impl Into<String>) {
        self.tx.send_replace(Some(message.into()));
    }

    pub fn clear(&self) {
        self.tx.send_if_modified(|current| current.take().is_some());
    }

    pub fn get(&self) -> Option<String> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.tx.subscribe()
    }
}

impl Default for ErrorSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ErrorSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ErrorSlot").field(&*self.tx.borrow()).finish()
    }
}

/// Sequence number handed out when a fetch for a [`Slice`] starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
struct Sequence {
    issued: u64,
    committed: u64,
}

/// Observable value written by asynchronous fetches.
///
/// Writers take a [`Ticket`] before the request and commit with it after.
/// A commit only lands if no later ticket has committed already, so a slow
/// old response never overwrites a newer one. [`invalidate`](Self::invalidate)
/// makes every outstanding ticket stale.
pub struct Slice<T> {
    tx: Arc<watch::Sender<T>>,
    seq: Arc<Mutex<Sequence>>,
}

impl<T> Clone for Slice<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            seq: self.seq.clone(),
        }
    }
}

impl<T: Clone> Slice<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            tx: Arc::new(tx),
            seq: Arc::new(Mutex::new(Sequence::default())),
        }
    }

    fn sequence(&self) -> MutexGuard<'_, Sequence> {
        self.seq.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn begin(&self) -> Ticket {
        let mut seq = self.sequence();
        seq.issued += 1;
        Ticket(seq.issued)
    }

    /// Publish `value` unless `ticket` is stale. Returns whether it landed.
    pub fn commit(&self, ticket: Ticket, value: T) -> bool {
        self.commit_with(ticket, |slot| *slot = value)
    }

    /// Like [`commit`](Self::commit), editing the current value in place.
    pub fn commit_with(&self, ticket: Ticket, edit: impl FnOnce(&mut T)) -> bool {
        let mut seq = self.sequence();
        if ticket.0 <= seq.committed {
            return false;
        }
        seq.committed = ticket.0;
        self.tx.send_modify(edit);
        true
    }

    /// Whether a commit with `ticket` would be discarded.
    pub fn is_stale(&self, ticket: Ticket) -> bool {
        ticket.0 <= self.sequence().committed
    }

    /// Whether a later ticket was issued or the slice was invalidated
    /// after `ticket`. A superseded writer no longer owns the value.
    pub fn is_superseded(&self, ticket: Ticket) -> bool {
        ticket.0 < self.sequence().issued
    }

    /// Discard the results of every fetch started so far.
    pub fn invalidate(&self) {
        let mut seq = self.sequence();
        seq.issued += 1;
        seq.committed = seq.issued;
    }

    /// Immediate local write, ordered after every earlier ticket.
    pub fn set(&self, value: T) {
        let ticket = self.begin();
        self.commit(ticket, value);
    }

    /// Overwrite the value without touching the sequence, for transient
    /// states such as a spinner shown while a ticket is outstanding.
    pub fn publish(&self, value: T) {
        self.tx.send_replace(value);
    }

    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T: Clone + std::fmt::Debug> std::fmt::Debug for Slice<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Slice").field(&*self.tx.borrow()).finish()
    }
}

/// Loading indicator that stays on while any [`LoadingGuard`] is alive.
#[derive(Clone)]
pub struct LoadingFlag {
    tx: Arc<watch::Sender<bool>>,
    active: Arc<Mutex<usize>>,
}

impl LoadingFlag {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            tx: Arc::new(tx),
            active: Arc::new(Mutex::new(0)),
        }
    }

    pub fn start(&self) -> LoadingGuard {
        self.adjust(|n| *n += 1);
        LoadingGuard { flag: self.clone() }
    }

    fn adjust(&self, f: impl FnOnce(&mut usize)) {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut active);
        let loading = *active > 0;
        self.tx.send_if_modified(|current| {
            let changed = *current != loading;
            *current = loading;
            changed
        });
    }

    pub fn is_loading(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

impl Default for LoadingFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LoadingFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("LoadingFlag").field(&self.is_loading()).finish()
    }
}

#[must_use = "loading ends when the guard is dropped"]
pub struct LoadingGuard {
    flag: LoadingFlag,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.flag.adjust(|n| *n = n.saturating_sub(1));
    }
}
