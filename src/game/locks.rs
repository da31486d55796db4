//! Per-(user, day) write serialization

use super::UserId;
use chrono::NaiveDate;
use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Key = (UserId, NaiveDate);

/// Registry of one mutex per (user, day)
///
/// Writers for the same key run one at a time; different keys never contend
/// beyond the brief registry lookup. An entry lives only while some caller is
/// inside [`KeyLocks::with`] for its key.
#[derive(Debug, Default)]
pub struct KeyLocks {
    locks: Mutex<FxHashMap<Key, Arc<Mutex<()>>>>,
}

impl KeyLocks {
    /// Run `f` while holding the mutex for `(user, date)`
    pub fn with<T>(&self, user: &UserId, date: NaiveDate, f: impl FnOnce() -> T) -> T {
        let key = (user.clone(), date);
        let lock = Arc::clone(self.registry().entry(key.clone()).or_default());

        let value = {
            // Guards `()`; a panicking holder leaves nothing inconsistent
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            f()
        };

        // Handles are only cloned and dropped under the registry lock, so the
        // count is exact here: the map's reference plus ours means nobody waits
        let mut locks = self.registry();
        if Arc::strong_count(&lock) == 2 {
            locks.remove(&key);
        }
        drop(lock);
        value
    }

    fn registry(&self) -> MutexGuard<'_, FxHashMap<Key, Arc<Mutex<()>>>> {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.registry().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn registry_empties_after_use() {
        let locks = KeyLocks::default();
        let value = locks.with(&UserId::new("alice"), day(), || {
            assert_eq!(locks.len(), 1);
            7
        });
        assert_eq!(value, 7);
        assert_eq!(locks.len(), 0);
    }

    #[test]
    fn nested_keys_are_independent() {
        let locks = KeyLocks::default();
        locks.with(&UserId::new("alice"), day(), || {
            locks.with(&UserId::new("bob"), day(), || {
                locks.with(&UserId::new("alice"), day().succ_opt().unwrap(), || {
                    assert_eq!(locks.len(), 3);
                });
            });
        });
        assert_eq!(locks.len(), 0);
    }

    #[test]
    fn same_key_runs_one_at_a_time() {
        let locks = KeyLocks::default();
        let alice = UserId::new("alice");
        let inside = AtomicUsize::new(0);
        let peak = AtomicUsize::new(0);

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..50 {
                        locks.with(&alice, day(), || {
                            let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                            peak.fetch_max(now, Ordering::SeqCst);
                            std::thread::yield_now();
                            inside.fetch_sub(1, Ordering::SeqCst);
                        });
                    }
                });
            }
        });

        assert_eq!(peak.load(Ordering::SeqCst), 1);
        assert_eq!(locks.len(), 0);
    }
}
