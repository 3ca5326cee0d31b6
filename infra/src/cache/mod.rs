//! Cache module for Redis-based storage
//!
//! Provides the Redis connection wrapper the credential store is built on.

pub mod redis_client;

pub use redis_client::RedisClient;

// Re-export commonly used types
pub use mc_shared::config::cache::CacheConfig;
