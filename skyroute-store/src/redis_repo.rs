use std::collections::HashMap;

use chrono::{DateTime, Utc};
use redis::{AsyncCommands, RedisResult};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use skyroute_core::SearchParams;
use tracing::info;

const HISTORY_KEY: &str = "search:history";
/// History entries scanned when aggregating routes.
const ROUTE_SCAN_DEPTH: usize = 100;
/// Recent routes considered when ranking by popularity.
const POPULAR_ROUTE_POOL: usize = 50;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHistoryEntry {
    pub search_id: String,
    pub params: SearchParams,
    pub results_count: usize,
    pub cheapest_price: Option<i64>,
    pub searched_at: DateTime<Utc>,
}

/// One origin/destination pair aggregated over the search history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteSummary {
    pub origin: String,
    pub destination: String,
    pub count: usize,
    pub last_searched: DateTime<Utc>,
}

/// Groups history entries by route, newest `last_searched` first.
pub fn summarize_routes(entries: &[SearchHistoryEntry], limit: usize) -> Vec<RouteSummary> {
    let mut summaries: Vec<RouteSummary> = Vec::new();
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();

    for entry in entries {
        let key = (entry.params.origin.as_str(), entry.params.destination.as_str());
        match index.get(&key) {
            Some(&slot) => {
                let summary = &mut summaries[slot];
                summary.count += 1;
                summary.last_searched = summary.last_searched.max(entry.searched_at);
            }
            None => {
                index.insert(key, summaries.len());
                summaries.push(RouteSummary {
                    origin: entry.params.origin.clone(),
                    destination: entry.params.destination.clone(),
                    count: 1,
                    last_searched: entry.searched_at,
                });
            }
        }
    }

    summaries.sort_by(|a, b| b.last_searched.cmp(&a.last_searched));
    summaries.truncate(limit);
    summaries
}

/// Most searched routes among the recent ones. Equal counts keep recency order.
pub fn popular_routes_from(entries: &[SearchHistoryEntry], limit: usize) -> Vec<RouteSummary> {
    let mut routes = summarize_routes(entries, POPULAR_ROUTE_POOL);
    routes.sort_by(|a, b| b.count.cmp(&a.count));
    routes.truncate(limit);
    routes
}

/// Identical parameters always map to the same key, so repeated searches
/// hit the cache.
pub fn results_cache_key(params: &SearchParams) -> Result<String, StoreError> {
    Ok(format!("search:results:{}", serde_json::to_string(params)?))
}

#[derive(Clone)]
pub struct RedisClient {
    client: redis::Client,
}

impl RedisClient {
    pub async fn new(connection_string: &str) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(connection_string)?;
        Ok(Self { client })
    }

    pub async fn get_cached_results<T: DeserializeOwned>(
        &self,
        params: &SearchParams,
    ) -> Result<Option<T>, StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let payload: Option<String> = conn.get(results_cache_key(params)?).await?;
        match payload {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    pub async fn cache_results<T: Serialize>(
        &self,
        params: &SearchParams,
        results: &T,
        ttl_seconds: u64,
    ) -> Result<(), StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let key = results_cache_key(params)?;
        let payload = serde_json::to_string(results)?;
        conn.set_ex::<_, _, ()>(&key, payload, ttl_seconds).await?;
        info!("Cached search results under {} for {}s", key, ttl_seconds);
        Ok(())
    }

    /// Newest first; the list is trimmed to `capacity` entries.
    pub async fn push_search_history(
        &self,
        entry: &SearchHistoryEntry,
        capacity: usize,
    ) -> Result<(), StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let payload = serde_json::to_string(entry)?;
        let stop = capacity.max(1) as isize - 1;

        let _: () = redis::pipe()
            .atomic()
            .lpush(HISTORY_KEY, payload)
            .ignore()
            .ltrim(HISTORY_KEY, 0, stop)
            .ignore()
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    pub async fn recent_search_history(&self, limit: usize) -> Result<Vec<SearchHistoryEntry>, StoreError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let raw: Vec<String> = conn.lrange(HISTORY_KEY, 0, limit as isize - 1).await?;
        raw.iter()
            .map(|json| serde_json::from_str(json).map_err(StoreError::from))
            .collect()
    }

    pub async fn recent_routes(&self, limit: usize) -> Result<Vec<RouteSummary>, StoreError> {
        let entries = self.recent_search_history(ROUTE_SCAN_DEPTH).await?;
        Ok(summarize_routes(&entries, limit))
    }

    pub async fn popular_routes(&self, limit: usize) -> Result<Vec<RouteSummary>, StoreError> {
        let entries = self.recent_search_history(ROUTE_SCAN_DEPTH).await?;
        Ok(popular_routes_from(&entries, limit))
    }

    /// Returns false when no entry carries `search_id`.
    pub async fn delete_search(&self, search_id: &str) -> Result<bool, StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let raw: Vec<String> = conn.lrange(HISTORY_KEY, 0, -1).await?;

        let Some(payload) = raw.into_iter().find(|json| {
            serde_json::from_str::<SearchHistoryEntry>(json)
                .map(|entry| entry.search_id == search_id)
                .unwrap_or(false)
        }) else {
            return Ok(false);
        };

        let removed: i64 = conn.lrem(HISTORY_KEY, 1, payload).await?;
        if removed > 0 {
            info!("Deleted search {} from history", search_id);
        }
        Ok(removed > 0)
    }

    pub async fn clear_search_history(&self) -> Result<(), StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del::<_, ()>(HISTORY_KEY).await?;
        info!("Cleared search history");
        Ok(())
    }

    pub async fn check_rate_limit(&self, key: &str, limit: i64, window_seconds: i64) -> RedisResult<bool> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        let (count,): (i64,) = redis::pipe()
            .atomic()
            .incr(key, 1)
            .expire(key, window_seconds)
            .ignore()
            .query_async(&mut conn)
            .await?;

        Ok(count <= limit)
    }
}
