//! In-process fallback backend.
//!
//! Mirrors the remote store's read/write semantics over plain maps behind a
//! [`tokio::sync::RwLock`]. Data is lost on process restart; this backend
//! exists only for environments without the external service and as the
//! degrade target when the remote store errors.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::gateway::Gateway;

/// Backing maps for the in-process store.
#[derive(Debug, Default)]
struct MemoryInner {
    /// Plain string values.
    strings: HashMap<String, String>,
    /// Unordered sets.
    sets: HashMap<String, BTreeSet<String>>,
    /// Sorted sets: member -> score.
    zsets: HashMap<String, HashMap<String, f64>>,
}

/// In-memory [`Gateway`] implementation. Cheap to clone; all clones share
/// the same state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<MemoryInner>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Gateway for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.strings.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner.strings.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner.strings.remove(key);
        inner.sets.remove(key);
        inner.zsets.remove(key);
        Ok(())
    }

    async fn sadd(&self, key: &str, member: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner
            .sets
            .entry(key.to_owned())
            .or_default()
            .insert(member.to_owned());
        Ok(())
    }

    async fn smembers(&self, key: &str) -> Result<Vec<String>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .sets
            .get(key)
            .map_or_else(Vec::new, |s| s.iter().cloned().collect()))
    }

    async fn zadd(&self, key: &str, score: f64, member: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner
            .zsets
            .entry(key.to_owned())
            .or_default()
            .insert(member.to_owned(), score);
        Ok(())
    }

    async fn ztop(&self, key: &str, limit: usize) -> Result<Vec<(String, f64)>, StoreError> {
        let inner = self.inner.read().await;
        let Some(zset) = inner.zsets.get(key) else {
            return Ok(Vec::new());
        };

        let mut rows: Vec<(String, f64)> = zset
            .iter()
            .map(|(member, score)| (member.clone(), *score))
            .collect();
        // Highest score first; equal scores order by member descending to
        // match ZREVRANGE semantics.
        rows.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| b.0.cmp(&a.0)));
        rows.truncate(limit);
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::indexing_slicing)]

    use super::*;

    #[tokio::test]
    async fn set_then_get_roundtrips() {
        let store = MemoryStore::new();
        store.set("k", "v").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
        assert_eq!(store.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_replaces_previous_value() {
        let store = MemoryStore::new();
        store.set("k", "old").await.unwrap();
        store.set("k", "new").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("new"));
    }

    #[tokio::test]
    async fn del_removes_all_shapes() {
        let store = MemoryStore::new();
        store.set("k", "v").await.unwrap();
        store.sadd("k", "m").await.unwrap();
        store.zadd("k", 1.0, "m").await.unwrap();
        store.del("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
        assert!(store.smembers("k").await.unwrap().is_empty());
        assert!(store.ztop("k", 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn sadd_deduplicates() {
        let store = MemoryStore::new();
        store.sadd("s", "a").await.unwrap();
        store.sadd("s", "a").await.unwrap();
        store.sadd("s", "b").await.unwrap();
        let mut members = store.smembers("s").await.unwrap();
        members.sort();
        assert_eq!(members, vec!["a".to_owned(), "b".to_owned()]);
    }

    #[tokio::test]
    async fn zadd_upserts_score() {
        let store = MemoryStore::new();
        store.zadd("z", 10.0, "alice").await.unwrap();
        store.zadd("z", 40.0, "alice").await.unwrap();
        let rows = store.ztop("z", 10).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], ("alice".to_owned(), 40.0));
    }

    #[tokio::test]
    async fn ztop_orders_descending_and_caps() {
        let store = MemoryStore::new();
        store.zadd("z", 30.0, "a").await.unwrap();
        store.zadd("z", 50.0, "b").await.unwrap();
        store.zadd("z", 10.0, "c").await.unwrap();
        store.zadd("z", 40.0, "d").await.unwrap();

        let rows = store.ztop("z", 3).await.unwrap();
        let members: Vec<&str> = rows.iter().map(|(m, _)| m.as_str()).collect();
        assert_eq!(members, vec!["b", "d", "a"]);
    }

    #[tokio::test]
    async fn ztop_breaks_ties_by_member_descending() {
        let store = MemoryStore::new();
        store.zadd("z", 20.0, "alpha").await.unwrap();
        store.zadd("z", 20.0, "beta").await.unwrap();
        let rows = store.ztop("z", 10).await.unwrap();
        let members: Vec<&str> = rows.iter().map(|(m, _)| m.as_str()).collect();
        assert_eq!(members, vec!["beta", "alpha"]);
    }

    #[tokio::test]
    async fn ztop_with_zero_limit_is_empty() {
        let store = MemoryStore::new();
        store.zadd("z", 1.0, "a").await.unwrap();
        assert!(store.ztop("z", 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = MemoryStore::new();
        let clone = store.clone();
        store.set("k", "v").await.unwrap();
        assert_eq!(clone.get("k").await.unwrap().as_deref(), Some("v"));
    }
}
