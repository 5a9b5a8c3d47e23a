use std::{
    collections::HashMap,
    hash::{DefaultHasher, Hash, Hasher},
    sync::{LazyLock, RwLock}
};

use crate::{
    config::ExtractConfig,
    query::{Query, SqlDialect}
};

/// Global extraction cache
static QUERY_CACHE: LazyLock<RwLock<QueryCache>> =
    LazyLock::new(|| RwLock::new(QueryCache::new(1000)));

/// Bounded cache of extracted scripts.
///
/// Extraction is deterministic, so identical text, dialect and settings
/// always map to the same models.
pub struct QueryCache {
    cache:    HashMap<u64, Vec<Query>>,
    max_size: usize
}

impl QueryCache {
    pub fn new(max_size: usize) -> Self {
        Self {
            cache: HashMap::with_capacity(max_size),
            max_size
        }
    }

    fn hash_key(sql: &str, dialect: SqlDialect, config: &ExtractConfig) -> u64 {
        let mut hasher = DefaultHasher::new();
        sql.hash(&mut hasher);
        dialect.hash(&mut hasher);
        config.hash(&mut hasher);
        hasher.finish()
    }

    pub fn get(&self, sql: &str, dialect: SqlDialect, config: &ExtractConfig) -> Option<Vec<Query>> {
        let key = Self::hash_key(sql, dialect, config);
        self.cache.get(&key).cloned()
    }

    pub fn insert(
        &mut self,
        sql: &str,
        dialect: SqlDialect,
        config: &ExtractConfig,
        queries: Vec<Query>
    ) {
        // Simple eviction: clear half when full
        if self.cache.len() >= self.max_size {
            let keys: Vec<_> = self.cache.keys().take(self.max_size / 2).copied().collect();
            for key in keys {
                self.cache.remove(&key);
            }
        }

        let key = Self::hash_key(sql, dialect, config);
        self.cache.insert(key, queries);
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

/// Get cached queries or None
pub fn get_cached(sql: &str, dialect: SqlDialect, config: &ExtractConfig) -> Option<Vec<Query>> {
    QUERY_CACHE.read().ok()?.get(sql, dialect, config)
}

/// Cache extracted queries
pub fn cache_queries(sql: &str, dialect: SqlDialect, config: &ExtractConfig, queries: Vec<Query>) {
    if let Ok(mut cache) = QUERY_CACHE.write() {
        cache.insert(sql, dialect, config, queries);
    }
}
