//! The storage capability contract shared by both backends.
//!
//! Game logic is written against these primitives only, so the core stays
//! backend-agnostic. Scores are `f64` because that is the native sorted-set
//! score type of the remote store; the game only ever writes whole point
//! values into them.

use crate::error::StoreError;

/// Key/value + set + sorted-set primitives required by the game.
///
/// Implemented by [`crate::RedisStore`] (durable remote) and
/// [`crate::MemoryStore`] (in-process fallback) with identical read/write
/// semantics.
pub trait Gateway {
    /// Read the string value at `key`, if present.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StoreError>>;

    /// Write `value` at `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StoreError>>;

    /// Delete `key`. Deleting a missing key is not an error.
    fn del(&self, key: &str) -> impl Future<Output = Result<(), StoreError>>;

    /// Add `member` to the unordered set at `key`.
    fn sadd(&self, key: &str, member: &str) -> impl Future<Output = Result<(), StoreError>>;

    /// Return all members of the unordered set at `key`.
    fn smembers(&self, key: &str) -> impl Future<Output = Result<Vec<String>, StoreError>>;

    /// Upsert `member` with `score` into the sorted set at `key`.
    fn zadd(
        &self,
        key: &str,
        score: f64,
        member: &str,
    ) -> impl Future<Output = Result<(), StoreError>>;

    /// Return up to `limit` members of the sorted set at `key` with their
    /// scores, highest score first. Equal scores order by member,
    /// descending (`ZREVRANGE` semantics).
    fn ztop(
        &self,
        key: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<(String, f64)>, StoreError>>;
}
