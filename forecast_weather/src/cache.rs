//! Shared cache of fitted models, keyed by country
//!
//! The cache only ever saves refitting work; correctness never depends on
//! it. A stale entry still produces a valid forecast for the series it was
//! fitted on, so callers that replace their dataset should [`clear`] it.
//!
//! [`clear`]: ModelCache::clear

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use crate::error::Result;
use crate::models::arima::TrainedArimaModel;

/// Default number of countries kept.
pub const DEFAULT_CAPACITY: usize = 16;

/// Bounded, thread-safe model cache with least-recently-used eviction.
///
/// Each key owns a slot with its own lock, so concurrent requests for the
/// same country serialize on that slot and only the first one fits, while
/// requests for different countries never block each other during a fit.
#[derive(Debug)]
pub struct ModelCache {
    capacity: usize,
    inner: Mutex<CacheInner>,
}

#[derive(Debug)]
struct CacheInner {
    slots: HashMap<String, Arc<Slot>>,
    /// Keys from least to most recently used
    order: VecDeque<String>,
}

#[derive(Debug, Default)]
struct Slot {
    model: Mutex<Option<Arc<TrainedArimaModel>>>,
}

impl ModelCache {
    /// Cache holding up to `capacity` countries.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: Mutex::new(CacheInner {
                slots: HashMap::new(),
                order: VecDeque::new(),
            }),
        }
    }

    /// Return the cached model for `country`, fitting on a miss.
    ///
    /// A failed fit leaves the slot empty so the next caller retries.
    pub fn get_or_fit<F>(&self, country: &str, fit: F) -> Result<Arc<TrainedArimaModel>>
    where
        F: FnOnce() -> Result<TrainedArimaModel>,
    {
        let slot = self.slot_for(country);

        let mut entry = slot.model.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(model) = entry.as_ref() {
            debug!(country, "model cache hit");
            return Ok(Arc::clone(model));
        }

        debug!(country, "model cache miss, fitting");
        let fitted = Arc::new(fit()?);
        *entry = Some(Arc::clone(&fitted));
        Ok(fitted)
    }

    /// Number of cached countries.
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .slots
            .len()
    }

    /// Whether the cache holds no models.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a country currently has a slot.
    pub fn contains(&self, country: &str) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .slots
            .contains_key(country)
    }

    /// Drop everything, e.g. after the input dataset is replaced.
    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.slots.clear();
        inner.order.clear();
    }

    /// Fetch or create the slot for a key, updating recency and evicting
    /// the least recently used key when over capacity.
    fn slot_for(&self, country: &str) -> Arc<Slot> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);

        inner.order.retain(|key| key != country);
        let slot = match inner.slots.get(country) {
            Some(slot) => Arc::clone(slot),
            None => {
                let slot = Arc::new(Slot::default());
                inner.slots.insert(country.to_string(), Arc::clone(&slot));
                slot
            }
        };
        inner.order.push_back(country.to_string());

        while inner.slots.len() > self.capacity {
            match inner.order.pop_front() {
                Some(oldest) => {
                    debug!(country = %oldest, "evicting least recently used model");
                    inner.slots.remove(&oldest);
                }
                None => break,
            }
        }

        slot
    }
}

impl Default for ModelCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
