//! Process-lifetime memo of translations.
//!
//! Owned by the worker; nothing else reads or writes it, so there is no
//! locking here.

use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroUsize;

use lens_config::pipeline::CachePolicyConfig;
use lens_types::LanguagePair;
use lru::LruCache;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub text: String,
    pub source: String,
    pub dest: String,
}

impl CacheKey {
    /// Key on trimmed text, recognition source code and translation target code
    pub fn new(text: &str, languages: &LanguagePair) -> Self {
        Self {
            text: text.trim().to_string(),
            source: languages.source.code().to_string(),
            dest: languages.dest.translation_code().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    Unbounded,
    Lru(NonZeroUsize),
}

impl From<CachePolicyConfig> for CachePolicy {
    fn from(config: CachePolicyConfig) -> Self {
        match config {
            CachePolicyConfig::Unbounded => CachePolicy::Unbounded,
            CachePolicyConfig::Lru { capacity } => match NonZeroUsize::new(capacity) {
                Some(capacity) => CachePolicy::Lru(capacity),
                None => {
                    tracing::warn!("LRU cache capacity 0 requested, keeping every entry");
                    CachePolicy::Unbounded
                }
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lookups = self.hits + self.misses;
        let rate = if lookups == 0 {
            0.0
        } else {
            self.hits as f64 * 100.0 / lookups as f64
        };
        write!(
            f,
            "{} hits / {} lookups ({:.0}%), {} inserts",
            self.hits, lookups, rate, self.inserts
        )
    }
}

enum Store {
    Unbounded(HashMap<CacheKey, String>),
    Lru(LruCache<CacheKey, String>),
}

pub struct TranslationCache {
    store: Store,
    stats: CacheStats,
}

impl TranslationCache {
    pub fn new(policy: CachePolicy) -> Self {
        let store = match policy {
            CachePolicy::Unbounded => Store::Unbounded(HashMap::new()),
            CachePolicy::Lru(capacity) => Store::Lru(LruCache::new(capacity)),
        };
        Self {
            store,
            stats: CacheStats::default(),
        }
    }

    pub fn get(&mut self, key: &CacheKey) -> Option<String> {
        let found = match &mut self.store {
            Store::Unbounded(map) => map.get(key).cloned(),
            Store::Lru(lru) => lru.get(key).cloned(),
        };
        if found.is_some() {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
        }
        found
    }

    /// Look up without touching recency or stats
    pub fn peek(&self, key: &CacheKey) -> Option<&str> {
        match &self.store {
            Store::Unbounded(map) => map.get(key).map(String::as_str),
            Store::Lru(lru) => lru.peek(key).map(String::as_str),
        }
    }

    pub fn put(&mut self, key: CacheKey, translation: String) {
        match &mut self.store {
            Store::Unbounded(map) => {
                map.insert(key, translation);
            }
            Store::Lru(lru) => {
                lru.put(key, translation);
            }
        }
        self.stats.inserts += 1;
    }

    pub fn len(&self) -> usize {
        match &self.store {
            Store::Unbounded(map) => map.len(),
            Store::Lru(lru) => lru.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new(CachePolicy::Unbounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lens_types::OcrLanguage;

    fn key(text: &str) -> CacheKey {
        CacheKey::new(text, &LanguagePair::default())
    }

    #[test]
    fn test_key_shape() {
        let key = key("  Hello \n");
        assert_eq!(key.text, "Hello");
        assert_eq!(key.source, "eng");
        assert_eq!(key.dest, "zh-cn");
    }

    #[test]
    fn test_key_differs_by_language() {
        let ja = CacheKey::new("Hello", &LanguagePair::new(OcrLanguage::English, OcrLanguage::Japanese));
        assert_ne!(key("Hello"), ja);
    }

    #[test]
    fn test_unbounded_keeps_everything() {
        let mut cache = TranslationCache::default();
        for i in 0..1000 {
            cache.put(key(&format!("line {}", i)), format!("行 {}", i));
        }
        assert_eq!(cache.len(), 1000);
        assert_eq!(cache.get(&key("line 0")), Some("行 0".to_string()));
        assert_eq!(cache.get(&key("line 999")).as_deref(), Some("行 999"));
    }

    #[test]
    fn test_lru_evicts_least_recent() {
        let mut cache = TranslationCache::new(CachePolicy::Lru(NonZeroUsize::new(2).unwrap()));
        cache.put(key("a"), "A".into());
        cache.put(key("b"), "B".into());
        assert!(cache.get(&key("a")).is_some());
        cache.put(key("c"), "C".into());

        assert_eq!(cache.len(), 2);
        assert!(cache.get(&key("b")).is_none());
        assert!(cache.get(&key("a")).is_some());
        assert!(cache.get(&key("c")).is_some());
    }

    #[test]
    fn test_stats() {
        let mut cache = TranslationCache::default();
        assert!(cache.get(&key("Hello")).is_none());
        cache.put(key("Hello"), "你好".into());
        assert!(cache.get(&key("Hello")).is_some());
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                inserts: 1
            }
        );
    }

    #[test]
    fn test_stats_summary() {
        assert_eq!(
            CacheStats::default().to_string(),
            "0 hits / 0 lookups (0%), 0 inserts"
        );
        let stats = CacheStats {
            hits: 3,
            misses: 1,
            inserts: 1,
        };
        assert_eq!(stats.to_string(), "3 hits / 4 lookups (75%), 1 inserts");
    }

    #[test]
    fn test_policy_from_config() {
        assert_eq!(CachePolicy::from(CachePolicyConfig::Unbounded), CachePolicy::Unbounded);
        assert_eq!(
            CachePolicy::from(CachePolicyConfig::Lru { capacity: 0 }),
            CachePolicy::Unbounded
        );
        assert_eq!(
            CachePolicy::from(CachePolicyConfig::Lru { capacity: 8 }),
            CachePolicy::Lru(NonZeroUsize::new(8).unwrap())
        );
    }
}
