//! Durable remote backend on a Redis-compatible server.
//!
//! Wraps a [`fred::prelude::Client`] and implements the [`Gateway`]
//! primitives. Connection is established once at startup from a Redis URL;
//! all game keys live in the default logical database.

use fred::prelude::*;

use crate::error::StoreError;
use crate::gateway::Gateway;

/// Connection handle to a Redis-compatible instance.
#[derive(Clone)]
pub struct RedisStore {
    client: Client,
}

impl RedisStore {
    /// Connect to the store at the given URL.
    ///
    /// The URL follows the Redis URL scheme: `redis://host:port` or
    /// `redis://host:port/db`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] if the URL cannot be parsed.
    /// Returns [`StoreError::Redis`] if the connection fails.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let config = Config::from_url(url)
            .map_err(|e| StoreError::Config(format!("invalid Redis URL: {e}")))?;

        let client = Builder::from_config(config).build()?;
        client.init().await?;

        tracing::info!("connected to Redis");
        Ok(Self { client })
    }

    /// Flush all keys from the instance.
    ///
    /// **WARNING:** this deletes all data. Only use for testing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Redis`] if the flush fails.
    pub async fn flush_all(&self) -> Result<(), StoreError> {
        let _: () = self.client.flushall(false).await?;
        Ok(())
    }

    /// Return a reference to the underlying [`Client`].
    pub const fn client(&self) -> &Client {
        &self.client
    }
}

impl Gateway for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value: Option<String> = self.client.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _: () = self.client.set(key, value, None, None, false).await?;
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), StoreError> {
        let _: u32 = self.client.del(key).await?;
        Ok(())
    }

    async fn sadd(&self, key: &str, member: &str) -> Result<(), StoreError> {
        let _: u32 = self.client.sadd(key, member).await?;
        Ok(())
    }

    async fn smembers(&self, key: &str) -> Result<Vec<String>, StoreError> {
        let members: Vec<String> = self.client.smembers(key).await?;
        Ok(members)
    }

    async fn zadd(&self, key: &str, score: f64, member: &str) -> Result<(), StoreError> {
        let _: () = self
            .client
            .zadd(key, None, None, false, false, (score, member))
            .await?;
        Ok(())
    }

    async fn ztop(&self, key: &str, limit: usize) -> Result<Vec<(String, f64)>, StoreError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        // ZREVRANGE stop is inclusive.
        let stop = i64::try_from(limit).unwrap_or(i64::MAX).saturating_sub(1);
        let rows: Vec<(String, f64)> = self.client.zrevrange(key, 0, stop, true).await?;
        Ok(rows)
    }
}
