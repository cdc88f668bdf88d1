pub mod app_config;
pub mod amadeus;
pub mod redis_repo;

pub use amadeus::{AmadeusClient, TokenCache};
pub use redis_repo::{RedisClient, RouteSummary, SearchHistoryEntry, StoreError};
