//! Load cache for file-backed stores.
//!
//! A loaded table stays valid until [`TableCache::invalidate`] is called or, when a
//! time-to-live is configured, until it is older than that TTL.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

struct CachedValue<T> {
    loaded_at: Instant,
    value: Arc<T>,
}

pub struct TableCache<T> {
    ttl: Option<Duration>,
    slot: Mutex<Option<CachedValue<T>>>,
}

impl<T> TableCache<T> {
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// Return the cached value, or run `load` and cache its result.
    /// Errors are returned without touching the cache.
    pub fn get_or_try_load<E, F>(&self, load: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(cached) = slot.as_ref() {
            if self.is_fresh(cached.loaded_at) {
                return Ok(Arc::clone(&cached.value));
            }
        }

        let value = Arc::new(load()?);
        *slot = Some(CachedValue {
            loaded_at: Instant::now(),
            value: Arc::clone(&value),
        });
        Ok(value)
    }

    pub fn invalidate(&self) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = None;
    }

    fn is_fresh(&self, loaded_at: Instant) -> bool {
        match self.ttl {
            Some(ttl) => loaded_at.elapsed() < ttl,
            None => true,
        }
    }
}
