//! Detector handle cache
//!
//! Keeps up to `capacity` detectors alive, keyed by language set, and evicts
//! the least recently used one when full. With a capacity of 1 a request for
//! a different language set replaces the single shared handle.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use domain::LanguageSet;
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::{
    error::VisionError,
    ports::{DetectorFactory, TextDetector},
};

struct CachedDetector {
    languages: LanguageSet,
    detector: Arc<dyn TextDetector>,
}

/// Shares detector handles between requests
///
/// The lock is held across lookup and construction, so concurrent requests
/// for an uncached language set build exactly one detector.
pub struct DetectorCache {
    factory: Arc<dyn DetectorFactory>,
    capacity: usize,
    // Front is least recently used
    entries: Mutex<VecDeque<CachedDetector>>,
    constructions: AtomicU64,
}

impl fmt::Debug for DetectorCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetectorCache")
            .field("factory", &self.factory.name())
            .field("capacity", &self.capacity)
            .field("cached", &self.cached_languages())
            .field("constructions", &self.constructions())
            .finish()
    }
}

impl DetectorCache {
    /// Create an empty cache; a capacity of 0 is treated as 1
    #[must_use]
    pub fn new(factory: Arc<dyn DetectorFactory>, capacity: usize) -> Self {
        Self {
            factory,
            capacity: capacity.max(1),
            entries: Mutex::new(VecDeque::new()),
            constructions: AtomicU64::new(0),
        }
    }

    /// Return the detector for `languages`, building it on a miss
    ///
    /// # Errors
    ///
    /// Propagates construction failures; a failed construction leaves the
    /// cache unchanged.
    pub fn get(&self, languages: &LanguageSet) -> Result<Arc<dyn TextDetector>, VisionError> {
        let mut entries = self.entries.lock();

        let position = entries.iter().position(|e| &e.languages == languages);
        if let Some(entry) = position.and_then(|pos| entries.remove(pos)) {
            let detector = Arc::clone(&entry.detector);
            entries.push_back(entry);
            debug!(languages = %languages, "Reusing cached text detector");
            return Ok(detector);
        }

        info!(
            languages = %languages,
            backend = self.factory.name(),
            "Initializing text detector"
        );
        let detector = self.factory.create(languages)?;
        self.constructions.fetch_add(1, Ordering::Relaxed);

        while entries.len() >= self.capacity {
            if let Some(evicted) = entries.pop_front() {
                debug!(languages = %evicted.languages, "Evicting text detector");
            }
        }

        entries.push_back(CachedDetector {
            languages: languages.clone(),
            detector: Arc::clone(&detector),
        });

        Ok(detector)
    }

    /// Number of detectors built since the cache was created
    #[must_use]
    pub fn constructions(&self) -> u64 {
        self.constructions.load(Ordering::Relaxed)
    }

    /// Maximum number of cached detectors
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Language sets currently cached, least recently used first
    #[must_use]
    pub fn cached_languages(&self) -> Vec<LanguageSet> {
        self.entries
            .lock()
            .iter()
            .map(|e| e.languages.clone())
            .collect()
    }

    /// Number of cached detectors
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether no detector has been cached yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
