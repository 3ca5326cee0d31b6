//! Thin async Redis client wrapper.

use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use tracing::debug;

use mc_shared::config::cache::CacheConfig;

use crate::InfrastructureError;

/// Redis client sharing one multiplexed connection.
///
/// Key prefixing comes from the cache configuration so deployments can
/// namespace their keys.
#[derive(Clone)]
pub struct RedisClient {
    connection: MultiplexedConnection,
    config: CacheConfig,
}

impl RedisClient {
    /// Connect to the configured Redis instance
    pub async fn connect(config: CacheConfig) -> Result<Self, InfrastructureError> {
        let client = redis::Client::open(config.url.as_str())?;
        let connection = client.get_multiplexed_tokio_connection().await?;
        debug!(url = %config.url, "Connected to Redis");
        Ok(Self { connection, config })
    }

    /// Fetch a string value, `None` when the key does not exist
    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(self.config.make_key(key)).await?;
        Ok(value)
    }

    /// Store a string value with an expiry in seconds
    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), InfrastructureError> {
        let mut conn = self.connection.clone();
        redis::cmd("SET")
            .arg(self.config.make_key(key))
            .arg(value)
            .arg("EX")
            .arg(expiry_seconds)
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }

    /// Delete a key; missing keys are not an error
    pub async fn delete(&self, key: &str) -> Result<(), InfrastructureError> {
        let mut conn = self.connection.clone();
        let _: () = conn.del(self.config.make_key(key)).await?;
        Ok(())
    }
}
