//! Tag-invalidated cache for derived report views.
//!
//! Mutations publish an invalidation for a logical resource tag before they
//! report success; readers recompute on the next read. Invalidation bumps a
//! per-tag generation counter that is part of every cache key, so stale
//! entries can never be served again — they simply age out of the
//! underlying cache.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde_json::Value;

/// Logical resource names mutations are tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceTag {
    /// Fund records and their ordering.
    Funds,
    /// The transaction set and everything derived from it.
    Finance,
}

impl ResourceTag {
    /// Returns the tag's wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Funds => "funds",
            Self::Finance => "finance",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Funds => 0,
            Self::Finance => 1,
        }
    }
}

/// Recompute-on-next-read cache for serialized report views.
///
/// Values are stored as rendered `serde_json::Value` so the cache stays
/// decoupled from any particular report shape.
pub struct SummaryCache {
    generations: [AtomicU64; 2],
    entries: moka::sync::Cache<(ResourceTag, u64, String), Arc<Value>>,
}

impl SummaryCache {
    /// Creates a cache holding at most `capacity` entries, each expiring
    /// `ttl` after insertion.
    #[must_use]
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        Self {
            generations: [AtomicU64::new(0), AtomicU64::new(0)],
            entries: moka::sync::Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Looks up a cached view for the tag's current generation.
    #[must_use]
    pub fn get(&self, tag: ResourceTag, key: &str) -> Option<Arc<Value>> {
        let generation = self.generations[tag.index()].load(Ordering::Acquire);
        self.entries.get(&(tag, generation, key.to_string()))
    }

    /// Stores a computed view under the tag's current generation.
    pub fn insert(&self, tag: ResourceTag, key: String, value: Value) {
        let generation = self.generations[tag.index()].load(Ordering::Acquire);
        self.entries.insert((tag, generation, key), Arc::new(value));
    }

    /// Invalidates every view cached under `tag`.
    ///
    /// Fire-and-forget: bumping the generation is the entire cost, and it
    /// completes before the caller can report success.
    pub fn invalidate(&self, tag: ResourceTag) {
        self.generations[tag.index()].fetch_add(1, Ordering::AcqRel);
    }
}

impl std::fmt::Debug for SummaryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummaryCache")
            .field("entries", &self.entries.entry_count())
            .finish_non_exhaustive()
    }
}
