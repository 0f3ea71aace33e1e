use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{error::MapError, hashmap::OpenAddressingMap, stats::MapStats};

/// An [`OpenAddressingMap`] behind one coarse lock, for sharing between threads.
///
/// Every call takes the lock for the whole probe. Use [`SharedHashMap::with`] when several
/// operations have to happen without another thread interleaving, e.g. check then insert.
pub struct SharedHashMap<K, V, F> {
    inner: Mutex<OpenAddressingMap<K, V, F>>,
}

pub type SharedMap<K, V, F> = Arc<SharedHashMap<K, V, F>>;

impl<K, V, F> SharedHashMap<K, V, F>
where
    K: Eq,
    F: Fn(&K) -> i64,
{
    pub fn new(map: OpenAddressingMap<K, V, F>) -> SharedHashMap<K, V, F> {
        SharedHashMap {
            inner: Mutex::new(map),
        }
    }

    pub fn with_capacity(capacity: usize, hasher: F) -> SharedHashMap<K, V, F> {
        SharedHashMap::new(OpenAddressingMap::with_capacity(capacity, hasher))
    }

    // A poisoned map is still consistent: every operation finishes probing before it writes.
    fn lock(&self) -> MutexGuard<'_, OpenAddressingMap<K, V, F>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut OpenAddressingMap<K, V, F>) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn get(&self, key: &K) -> Result<V, MapError>
    where
        V: Clone,
    {
        self.lock().get(key).cloned()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.lock().contains_key(key)
    }

    pub fn assign(&self, key: &K, value: V) -> Result<(), MapError> {
        self.lock().assign(key, value)
    }

    pub fn insert(&self, key: K, value: V) -> Result<(), MapError> {
        self.lock().insert(key, value)
    }

    pub fn remove(&self, key: &K) -> Result<V, MapError> {
        self.lock().remove(key)
    }

    pub fn clear(&self) {
        self.lock().clear()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }

    pub fn stats(&self) -> MapStats {
        self.lock().stats()
    }

    pub fn into_inner(self) -> OpenAddressingMap<K, V, F> {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;
    use crate::hash::{identity, std_hash};

    #[test]
    fn concurrent_inserts() {
        let hasher: fn(&u64) -> i64 = std_hash::<u64>;
        let shared: SharedMap<u64, u64, _> = Arc::new(SharedHashMap::with_capacity(1024, hasher));
        let pool = threadpool::ThreadPool::new(8);
        for worker in 0..8u64 {
            let shared = shared.clone();
            pool.execute(move || {
                for i in 0..100 {
                    let key = worker * 1000 + i;
                    shared.insert(key, key * 2).unwrap();
                }
            });
        }
        pool.join();

        assert_eq!(pool.panic_count(), 0);
        assert_eq!(shared.len(), 800);
        for worker in 0..8u64 {
            for i in 0..100 {
                let key = worker * 1000 + i;
                assert_eq!(shared.get(&key), Ok(key * 2));
            }
        }
    }

    #[test]
    fn racing_inserts_of_one_key() {
        let shared = Arc::new(SharedHashMap::with_capacity(16, identity));
        let pool = threadpool::ThreadPool::new(4);
        let (tx, rx) = mpsc::channel();
        for worker in 0..16i64 {
            let shared = shared.clone();
            let tx = tx.clone();
            pool.execute(move || {
                tx.send(shared.insert(7, worker)).unwrap();
            });
        }
        drop(tx);

        let results: Vec<_> = rx.iter().collect();
        assert_eq!(results.len(), 16);
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .filter_map(|r| r.err())
            .all(|e| e == MapError::DuplicateKey));
        assert_eq!(shared.len(), 1);
    }

    #[test]
    fn check_then_insert_under_one_lock() {
        let shared = SharedHashMap::with_capacity(8, identity);
        let inserted = shared.with(|map| {
            if map.contains_key(&3) {
                return false;
            }
            map.insert(3, "three").is_ok()
        });
        assert!(inserted);
        assert_eq!(shared.get(&3), Ok("three"));
        assert_eq!(shared.assign(&3, "drei"), Ok(()));
        assert_eq!(shared.remove(&3), Ok("drei"));
        assert!(!shared.contains_key(&3));
    }

    #[test]
    fn survives_poisoning() {
        let shared = Arc::new(SharedHashMap::with_capacity(8, identity));
        shared.insert(1, 10).unwrap();

        let poisoner = shared.clone();
        let handle = std::thread::spawn(move || {
            poisoner.with(|_| panic!("poison"));
        });
        assert!(handle.join().is_err());

        assert_eq!(shared.get(&1), Ok(10));
        shared.clear();
        assert!(shared.is_empty());
        assert_eq!(shared.capacity(), 8);
    }

    #[test]
    fn stats_and_into_inner() {
        let shared = SharedHashMap::with_capacity(8, identity);
        shared.insert(1, ()).unwrap();
        assert!(shared.get(&2).is_err());
        assert_eq!(shared.stats().misses, 1);
        let map = shared.into_inner();
        assert_eq!(map.len(), 1);
    }
}
