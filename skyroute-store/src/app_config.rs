use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub redis: RedisConfig,
    pub amadeus: AmadeusConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RedisConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AmadeusConfig {
    pub base_url: String,
    pub api_key: String,
    pub api_secret: String,
    /// Every fare is requested in this currency.
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

fn default_currency() -> String { "USD".to_string() }
fn default_max_results() -> u32 { 50 }
fn default_request_timeout() -> u64 { 15 }

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_max_hub_candidates")]
    pub max_hub_candidates: usize,
    #[serde(default = "default_results_ttl")]
    pub results_cache_ttl_seconds: u64,
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    #[serde(default = "default_rate_limit")]
    pub rate_limit_per_minute: i64,
}

fn default_max_hub_candidates() -> usize { 5 }
fn default_results_ttl() -> u64 { 30 * 60 }
fn default_history_capacity() -> usize { 100 }
fn default_rate_limit() -> i64 { 100 }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_hub_candidates: default_max_hub_candidates(),
            results_cache_ttl_seconds: default_results_ttl(),
            history_capacity: default_history_capacity(),
            rate_limit_per_minute: default_rate_limit(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides are optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `SKYROUTE__AMADEUS__API_KEY=...`
            .add_source(config::Environment::with_prefix("SKYROUTE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
