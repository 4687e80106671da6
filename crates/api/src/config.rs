//! Environment-driven application configuration.

use std::time::Duration;

use redrive_core::constants::{DEFAULT_BATCH_SIZE, DEFAULT_POLL_INTERVAL};
use redrive_infra::{RedisConfig, RedisMode};

/// All application configuration values.
#[derive(Debug, Clone)]
pub struct Config {
    pub http_addr: String,
    pub redis: RedisConfig,
    /// Global Kafka broker list. Empty selects per-destination writers.
    pub kafka_brokers: Vec<String>,
    pub poll_interval: Duration,
    pub batch_size: usize,
    pub environment: String,
    pub log_level: String,
}

impl Config {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, fallback: &str| lookup(key).unwrap_or_else(|| fallback.to_string());

        let mode: RedisMode = get("REDIS_MODE", "standalone").parse().unwrap_or_default();

        let redis = RedisConfig {
            mode,
            addr: format!(
                "{}:{}",
                get("REDIS_HOST", "localhost"),
                get("REDIS_PORT", "6379")
            ),
            password: get("REDIS_PASSWORD", ""),
            db: get("REDIS_DB", "0").parse().unwrap_or(0),
            sentinel_addrs: split_list(&get("REDIS_SENTINEL_ADDRS", "")),
            master_name: get("REDIS_MASTER_NAME", "mymaster"),
            cluster_addrs: split_list(&get("REDIS_CLUSTER_ADDRS", "")),
        };

        Self {
            http_addr: get("HTTP_ADDR", "0.0.0.0:8080"),
            redis,
            kafka_brokers: split_list(&get("KAFKA_BROKERS", "localhost:9092")),
            poll_interval: get("POLL_INTERVAL_SECS", "")
                .parse()
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_POLL_INTERVAL),
            batch_size: get("BATCH_SIZE", "").parse().unwrap_or(DEFAULT_BATCH_SIZE),
            environment: get("ENVIRONMENT", "local"),
            log_level: get("LOG_LEVEL", "info"),
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
