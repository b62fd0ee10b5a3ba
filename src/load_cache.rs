//! Load-state tracking for (family, weight, style) triples.
//!
//! Guarantees the subsystem's central invariant: at most one load attempt
//! is ever outstanding per triple. Successes are remembered for the life of
//! the process; failures are forgotten so a later request can retry.

use crate::catalog::FontStyle;
use futures::channel::oneshot;
use futures::future::{BoxFuture, FutureExt, Shared};
use log::debug;
use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

/// A (family, weight, style) combination, the unit of cache granularity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TripleKey {
    pub family: String,
    pub weight: u16,
    pub style: FontStyle,
}

impl TripleKey {
    pub fn new(family: impl Into<String>, weight: u16, style: FontStyle) -> Self {
        Self {
            family: family.into(),
            weight,
            style,
        }
    }
}

impl fmt::Display for TripleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.family, self.weight, self.style)
    }
}

/// Future shared by every caller waiting on one in-flight attempt. Resolves
/// to the attempt's boolean outcome.
pub type LoadHandle = Shared<BoxFuture<'static, bool>>;

enum EntryState {
    InFlight {
        handle: LoadHandle,
        notify: Option<oneshot::Sender<bool>>,
    },
    Loaded,
}

/// Outcome of [`FontLoadCache::acquire`].
pub enum AcquireOutcome {
    /// The triple already loaded; nothing to do.
    Loaded,
    /// Another caller's attempt is running; await the shared handle.
    InFlight(LoadHandle),
    /// The caller owns the attempt and must report back via `complete`.
    Begin,
}

/// Tracks which triples are loaded or in flight.
///
/// A plain value with interior locking; owners decide how widely to share
/// it. The lock is never held across a suspension point, and `acquire`
/// installs the in-flight marker before returning, so two racing callers
/// can never both start an attempt for one triple.
#[derive(Default)]
pub struct FontLoadCache {
    entries: Mutex<HashMap<TripleKey, EntryState>>,
}

impl FontLoadCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff the triple has finished loading successfully.
    pub fn has(&self, key: &TripleKey) -> bool {
        matches!(
            self.entries.lock().unwrap().get(key),
            Some(EntryState::Loaded)
        )
    }

    /// Atomically claims the triple.
    pub fn acquire(&self, key: &TripleKey) -> AcquireOutcome {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(EntryState::Loaded) => AcquireOutcome::Loaded,
            Some(EntryState::InFlight { handle, .. }) => {
                debug!("Load join: {}", key);
                AcquireOutcome::InFlight(handle.clone())
            }
            None => {
                let (tx, rx) = oneshot::channel();
                // A dropped sender resolves waiters to failure rather than
                // leaving them pending.
                let handle: LoadHandle = rx.map(|r| r.unwrap_or(false)).boxed().shared();
                entries.insert(
                    key.clone(),
                    EntryState::InFlight {
                        handle,
                        notify: Some(tx),
                    },
                );
                debug!("Load begin: {}", key);
                AcquireOutcome::Begin
            }
        }
    }

    /// Records the outcome of an attempt started through `acquire`.
    ///
    /// Success pins the triple as loaded; failure removes the entry so a
    /// later `acquire` restarts the attempt. Every waiter on the shared
    /// handle is woken with the outcome either way.
    pub fn complete(&self, key: &TripleKey, success: bool) {
        let notify = {
            let mut entries = self.entries.lock().unwrap();
            match entries.remove(key) {
                Some(EntryState::InFlight { notify, .. }) => {
                    if success {
                        entries.insert(key.clone(), EntryState::Loaded);
                    }
                    debug!(
                        "Load {}: {}",
                        if success { "complete" } else { "failed" },
                        key
                    );
                    notify
                }
                Some(state @ EntryState::Loaded) => {
                    entries.insert(key.clone(), state);
                    debug!("Ignoring completion for already-loaded triple: {}", key);
                    None
                }
                None => {
                    debug!("Ignoring completion for untracked triple: {}", key);
                    None
                }
            }
        };

        if let Some(tx) = notify {
            let _ = tx.send(success);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_std::task;

    fn key() -> TripleKey {
        TripleKey::new("Test", 400, FontStyle::Normal)
    }

    #[test]
    fn unknown_triple_is_not_loaded() {
        let cache = FontLoadCache::new();
        assert!(!cache.has(&key()));
    }

    #[test]
    fn first_acquire_begins_later_acquires_join() {
        let cache = FontLoadCache::new();
        assert!(matches!(cache.acquire(&key()), AcquireOutcome::Begin));

        let AcquireOutcome::InFlight(second) = cache.acquire(&key()) else {
            panic!("second acquire should join the in-flight attempt");
        };
        let AcquireOutcome::InFlight(third) = cache.acquire(&key()) else {
            panic!("third acquire should join the in-flight attempt");
        };

        cache.complete(&key(), true);
        assert!(task::block_on(second));
        assert!(task::block_on(third));
        assert!(cache.has(&key()));
    }

    #[test]
    fn success_is_remembered() {
        let cache = FontLoadCache::new();
        assert!(matches!(cache.acquire(&key()), AcquireOutcome::Begin));
        cache.complete(&key(), true);
        assert!(cache.has(&key()));
        assert!(matches!(cache.acquire(&key()), AcquireOutcome::Loaded));
    }

    #[test]
    fn failure_is_not_cached() {
        let cache = FontLoadCache::new();
        assert!(matches!(cache.acquire(&key()), AcquireOutcome::Begin));

        let AcquireOutcome::InFlight(waiter) = cache.acquire(&key()) else {
            panic!("expected in-flight attempt");
        };
        cache.complete(&key(), false);

        assert!(!task::block_on(waiter));
        assert!(!cache.has(&key()));
        // The failed entry is gone, so the next caller starts fresh.
        assert!(matches!(cache.acquire(&key()), AcquireOutcome::Begin));
    }

    #[test]
    fn completion_of_untracked_triple_is_ignored() {
        let cache = FontLoadCache::new();
        cache.complete(&key(), true);
        assert!(!cache.has(&key()));
    }

    #[test]
    fn triples_are_independent() {
        let cache = FontLoadCache::new();
        let italic = TripleKey::new("Test", 400, FontStyle::Italic);
        assert!(matches!(cache.acquire(&key()), AcquireOutcome::Begin));
        assert!(matches!(cache.acquire(&italic), AcquireOutcome::Begin));
        cache.complete(&key(), true);
        assert!(cache.has(&key()));
        assert!(!cache.has(&italic));
    }
}
