//! Response memoization keyed by query target.
//!
//! Each key holds either a finished result or a marker for the computation in
//! flight. A second thread asking for the same key waits for the marker
//! instead of computing again; the computing thread asking for its own key
//! gets [`CacheOutcome::Recursive`].

use crate::path::JustificationPath;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::{self, ThreadId};
use tracing::debug;

pub type CachedPaths = Arc<Vec<JustificationPath>>;

/// Result of a cached lookup
#[derive(Debug, Clone)]
pub enum CacheOutcome {
    /// Value was already cached (or finished by another thread while waiting)
    Hit(CachedPaths),
    /// Value was computed by this call
    Computed(CachedPaths),
    /// The calling thread is already computing this key
    Recursive,
}

impl CacheOutcome {
    /// Paths of a hit or a fresh computation; `None` for a recursive request
    pub fn paths(&self) -> Option<&[JustificationPath]> {
        match self {
            CacheOutcome::Hit(paths) | CacheOutcome::Computed(paths) => Some(paths.as_slice()),
            CacheOutcome::Recursive => None,
        }
    }

    pub fn is_recursive(&self) -> bool {
        matches!(self, CacheOutcome::Recursive)
    }
}

/// Completion flag waited on by other threads
#[derive(Debug, Default)]
struct Signal {
    done: Mutex<bool>,
    cond: Condvar,
}

impl Signal {
    fn wait(&self) {
        let mut done = self.done.lock().unwrap_or_else(PoisonError::into_inner);
        while !*done {
            done = self.cond.wait(done).unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn finish(&self) {
        *self.done.lock().unwrap_or_else(PoisonError::into_inner) = true;
        self.cond.notify_all();
    }
}

#[derive(Debug)]
enum CacheSlot {
    InProgress { owner: ThreadId, signal: Arc<Signal> },
    Ready(CachedPaths),
}

/// Concurrent memoization cache for explanation results
#[derive(Debug, Default)]
pub struct ExplanationCache {
    slots: DashMap<String, CacheSlot>,
}

enum Claim {
    Cached(CachedPaths),
    Recursive,
    Wait(Arc<Signal>),
    Owned(Arc<Signal>),
}

impl ExplanationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finished value for the key, if any
    pub fn get(&self, key: &str) -> Option<CachedPaths> {
        self.slots.get(key).and_then(|slot| match slot.value() {
            CacheSlot::Ready(paths) => Some(Arc::clone(paths)),
            CacheSlot::InProgress { .. } => None,
        })
    }

    /// Look up `key`, computing it with `compute` when absent.
    pub fn get_or_compute<F>(&self, key: &str, compute: F) -> CacheOutcome
    where
        F: FnOnce() -> Vec<JustificationPath>,
    {
        let me = thread::current().id();
        let signal = loop {
            match self.claim(key, me) {
                Claim::Cached(paths) => return CacheOutcome::Hit(paths),
                Claim::Recursive => {
                    debug!(key, "Recursive explanation request");
                    return CacheOutcome::Recursive;
                }
                Claim::Wait(signal) => signal.wait(),
                Claim::Owned(signal) => break signal,
            }
        };

        let mut guard = InProgressGuard { cache: self, key, signal, completed: false };
        let paths: CachedPaths = Arc::new(compute());
        self.slots.insert(key.to_string(), CacheSlot::Ready(Arc::clone(&paths)));
        guard.completed = true;
        drop(guard);
        CacheOutcome::Computed(paths)
    }

    /// Inspect the slot without holding the shard lock past this call
    fn claim(&self, key: &str, me: ThreadId) -> Claim {
        match self.slots.entry(key.to_string()) {
            Entry::Occupied(entry) => match entry.get() {
                CacheSlot::Ready(paths) => Claim::Cached(Arc::clone(paths)),
                CacheSlot::InProgress { owner, .. } if *owner == me => Claim::Recursive,
                CacheSlot::InProgress { signal, .. } => Claim::Wait(Arc::clone(signal)),
            },
            Entry::Vacant(entry) => {
                let signal = Arc::new(Signal::default());
                entry.insert(CacheSlot::InProgress { owner: me, signal: Arc::clone(&signal) });
                Claim::Owned(signal)
            }
        }
    }

    pub fn invalidate(&self, key: &str) {
        self.slots.remove(key);
    }

    pub fn clear(&self) {
        self.slots.clear();
    }

    /// Number of finished entries
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| matches!(slot.value(), CacheSlot::Ready(_))).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Releases the in-progress marker. A computation that never completed
/// (panic inside `compute`) leaves no entry behind.
struct InProgressGuard<'c> {
    cache: &'c ExplanationCache,
    key: &'c str,
    signal: Arc<Signal>,
    completed: bool,
}

impl Drop for InProgressGuard<'_> {
    fn drop(&mut self) {
        if !self.completed {
            self.cache
                .slots
                .remove_if(self.key, |_, slot| matches!(slot, CacheSlot::InProgress { .. }));
        }
        self.signal.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::ReasoningType;
    use fukurow_core::model::{Axiom, Individual, OwlIri};
    use std::panic::{self, AssertUnwindSafe};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sample() -> Vec<JustificationPath> {
        let axioms = vec![
            Axiom::subclass(&OwlIri::new("ex:Man"), &OwlIri::new("ex:Person")),
            Axiom::class_assertion(&OwlIri::new("ex:Man"), &Individual::new("ex:john")),
        ];
        vec![JustificationPath::new(axioms, "sample", ReasoningType::Subsumption, "class_hierarchy")]
    }

    #[test]
    fn test_compute_then_hit() {
        let cache = ExplanationCache::new();
        assert!(matches!(cache.get_or_compute("k", sample), CacheOutcome::Computed(_)));
        assert!(matches!(cache.get_or_compute("k", || unreachable!()), CacheOutcome::Hit(_)));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("k").map(|p| p.len()), Some(1));
    }

    #[test]
    fn test_reentrant_request_is_recursive() {
        let cache = ExplanationCache::new();
        let outcome = cache.get_or_compute("k", || {
            let inner = cache.get_or_compute("k", sample);
            assert!(inner.is_recursive());
            assert!(inner.paths().is_none());
            sample()
        });
        assert_eq!(outcome.paths().map(|p| p.len()), Some(1));
    }

    #[test]
    fn test_abandoned_computation_leaves_no_marker() {
        let cache = ExplanationCache::new();
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            cache.get_or_compute("k", || panic!("boom"));
        }));
        assert!(result.is_err());
        assert!(cache.get("k").is_none());
        assert!(matches!(cache.get_or_compute("k", sample), CacheOutcome::Computed(_)));
    }

    #[test]
    fn test_concurrent_requests_compute_once() {
        let cache = ExplanationCache::new();
        let calls = AtomicUsize::new(0);
        thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    let outcome = cache.get_or_compute("shared", || {
                        calls.fetch_add(1, Ordering::SeqCst);
                        thread::sleep(std::time::Duration::from_millis(20));
                        sample()
                    });
                    assert_eq!(outcome.paths().map(|p| p.len()), Some(1));
                });
            }
        });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
