//! The [`Store`] facade: remote-first with silent degrade to memory.
//!
//! Every operation tries the remote backend when one is configured. A
//! remote failure is logged and the call transparently retries on the
//! in-process fallback; failed remote writes are mirrored into the fallback
//! so later degraded reads observe them. Remote errors never propagate to
//! game logic.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;
use crate::gateway::Gateway;
use crate::memory::MemoryStore;
use crate::redis::RedisStore;

/// Storage facade over an optional remote backend and the always-present
/// in-process fallback. Cheap to clone; clones share both backends.
#[derive(Clone)]
pub struct Store {
    remote: Option<RedisStore>,
    local: MemoryStore,
}

impl Store {
    /// Create a store with no remote backend. All data lives in process
    /// memory and is lost on restart.
    pub fn in_memory() -> Self {
        Self {
            remote: None,
            local: MemoryStore::new(),
        }
    }

    /// Connect to a remote Redis-compatible store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the URL is invalid or the connection
    /// fails. Callers that prefer availability can fall back to
    /// [`Store::in_memory`]; see [`Store::connect_or_memory`].
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let remote = RedisStore::connect(url).await?;
        Ok(Self {
            remote: Some(remote),
            local: MemoryStore::new(),
        })
    }

    /// Connect to the remote store when a URL is configured, degrading to
    /// memory-only when it is absent or the connection fails.
    pub async fn connect_or_memory(url: Option<&str>) -> Self {
        match url {
            Some(url) => match Self::connect(url).await {
                Ok(store) => store,
                Err(e) => {
                    tracing::warn!(error = %e, "remote store unavailable; using in-memory fallback");
                    Self::in_memory()
                }
            },
            None => {
                tracing::info!("no remote store configured; using in-memory fallback");
                Self::in_memory()
            }
        }
    }

    /// Whether a remote backend is configured.
    pub const fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    // =========================================================================
    // Raw primitives with degrade
    // =========================================================================

    /// Read the string value at `key`, if present.
    pub async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if let Some(remote) = &self.remote {
            match remote.get(key).await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    tracing::warn!(key, error = %e, "remote get failed; reading fallback");
                }
            }
        }
        self.local.get(key).await
    }

    /// Write `value` at `key`. A failed remote write lands in the fallback
    /// instead.
    pub async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if let Some(remote) = &self.remote {
            match remote.set(key, value).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::warn!(key, error = %e, "remote set failed; writing fallback");
                }
            }
        }
        self.local.set(key, value).await
    }

    /// Delete `key` from whichever backend is reachable.
    pub async fn del(&self, key: &str) -> Result<(), StoreError> {
        if let Some(remote) = &self.remote {
            match remote.del(key).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::warn!(key, error = %e, "remote del failed; deleting from fallback");
                }
            }
        }
        self.local.del(key).await
    }

    /// Add `member` to the unordered set at `key`.
    pub async fn sadd(&self, key: &str, member: &str) -> Result<(), StoreError> {
        if let Some(remote) = &self.remote {
            match remote.sadd(key, member).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::warn!(key, error = %e, "remote sadd failed; writing fallback");
                }
            }
        }
        self.local.sadd(key, member).await
    }

    /// Return all members of the unordered set at `key`.
    pub async fn smembers(&self, key: &str) -> Result<Vec<String>, StoreError> {
        if let Some(remote) = &self.remote {
            match remote.smembers(key).await {
                Ok(members) => return Ok(members),
                Err(e) => {
                    tracing::warn!(key, error = %e, "remote smembers failed; reading fallback");
                }
            }
        }
        self.local.smembers(key).await
    }

    /// Upsert `member` with `score` into the sorted set at `key`.
    pub async fn zadd(&self, key: &str, score: f64, member: &str) -> Result<(), StoreError> {
        if let Some(remote) = &self.remote {
            match remote.zadd(key, score, member).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::warn!(key, error = %e, "remote zadd failed; writing fallback");
                }
            }
        }
        self.local.zadd(key, score, member).await
    }

    /// Return up to `limit` members of the sorted set at `key`, highest
    /// score first.
    pub async fn ztop(&self, key: &str, limit: usize) -> Result<Vec<(String, f64)>, StoreError> {
        if let Some(remote) = &self.remote {
            match remote.ztop(key, limit).await {
                Ok(rows) => return Ok(rows),
                Err(e) => {
                    tracing::warn!(key, error = %e, "remote ztop failed; reading fallback");
                }
            }
        }
        self.local.ztop(key, limit).await
    }

    // =========================================================================
    // Typed JSON helpers
    // =========================================================================

    /// Read the value at `key` and deserialize from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialization`] if a stored value cannot be
    /// parsed.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.get(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Serialize `value` as JSON and store it at `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialization`] if serialization fails.
    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value)?;
        self.set(key, &json).await
    }
}
