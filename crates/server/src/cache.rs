use std::collections::HashMap;
use std::time::{Duration, Instant};

use factly_common::types::EvidenceCollection;

/// In-memory TTL cache over whole evidence searches, keyed by the
/// normalized claim text. Scoring itself is deterministic and cheap,
/// so only the provider fan-out is worth caching.
pub struct SearchCache {
    entries: HashMap<String, CacheEntry>,
    ttl: Duration,
}

struct CacheEntry {
    collection: EvidenceCollection,
    inserted_at: Instant,
}

/// Cache key: lower-cased, whitespace-collapsed claim text, so
/// trivially re-phrased whitespace does not miss.
pub fn cache_key(claim: &str) -> String {
    claim
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl SearchCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    pub fn get(&self, claim: &str) -> Option<EvidenceCollection> {
        let entry = self.entries.get(&cache_key(claim))?;
        if entry.inserted_at.elapsed() < self.ttl {
            metrics::counter!("search.cache.hits").increment(1);
            return Some(entry.collection.clone());
        }
        metrics::counter!("search.cache.expired").increment(1);
        None
    }

    /// Insert a search result, evicting expired entries.
    pub fn insert(&mut self, claim: &str, collection: EvidenceCollection) {
        // Evict expired entries on insert.
        self.entries
            .retain(|_, entry| entry.inserted_at.elapsed() < self.ttl);

        self.entries.insert(
            cache_key(claim),
            CacheEntry {
                collection,
                inserted_at: Instant::now(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_hit_miss() {
        let mut cache = SearchCache::new(Duration::from_secs(3600));
        assert!(cache.get("some claim").is_none());

        cache.insert("some claim", EvidenceCollection::new("some claim"));

        let hit = cache.get("some claim");
        assert!(hit.is_some());
        assert_eq!(hit.unwrap().claim_text, "some claim");
    }

    #[test]
    fn test_cache_key_normalizes_whitespace_and_case() {
        let mut cache = SearchCache::new(Duration::from_secs(3600));
        cache.insert("Some   Claim", EvidenceCollection::new("Some   Claim"));
        assert!(cache.get("some claim").is_some());
    }

    #[test]
    fn test_cache_expiry() {
        let mut cache = SearchCache::new(Duration::from_millis(1));
        cache.insert("claim", EvidenceCollection::new("claim"));

        std::thread::sleep(Duration::from_millis(10));
        assert!(cache.get("claim").is_none());
    }
}
