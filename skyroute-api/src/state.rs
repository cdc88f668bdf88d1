use std::sync::Arc;
use skyroute_engine::FlightSearchEngine;
use skyroute_store::app_config::SearchConfig;
use skyroute_store::RedisClient;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<FlightSearchEngine>,
    /// Results cache, search history and rate limiting. Searches still work
    /// without it.
    pub redis: Option<Arc<RedisClient>>,
    pub search: SearchConfig,
}
