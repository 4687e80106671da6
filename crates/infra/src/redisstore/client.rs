//! Redis connection management.
//!
//! Supported deployment modes:
//! - `standalone` (default): single instance via `addr`
//! - `sentinel`: high-availability via `sentinel_addrs` + `master_name`
//! - `cluster`: Redis Cluster via `cluster_addrs`

use std::str::FromStr;

use redis::aio::{ConnectionLike, ConnectionManager, MultiplexedConnection};
use redis::cluster::ClusterClient;
use redis::cluster_async::ClusterConnection;
use redis::sentinel::{SentinelClient, SentinelServerType};
use redis::{Cmd, Pipeline, RedisFuture, Value};
use tracing::info;

use redrive_core::SchedulerError;

/// Connection mode selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RedisMode {
    #[default]
    Standalone,
    Sentinel,
    Cluster,
}

impl FromStr for RedisMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "standalone" => Ok(RedisMode::Standalone),
            "sentinel" => Ok(RedisMode::Sentinel),
            "cluster" => Ok(RedisMode::Cluster),
            other => Err(format!("unsupported redis mode {other:?}")),
        }
    }
}

/// Connection settings for the scheduler store.
#[derive(Debug, Clone, Default)]
pub struct RedisConfig {
    pub mode: RedisMode,
    /// `host:port` for standalone mode.
    pub addr: String,
    pub password: String,
    pub db: i64,
    pub sentinel_addrs: Vec<String>,
    pub master_name: String,
    pub cluster_addrs: Vec<String>,
}

/// Cloneable handle to the configured Redis deployment.
#[derive(Clone)]
pub enum RedisConn {
    Standalone(ConnectionManager),
    Sentinel(MultiplexedConnection),
    Cluster(ClusterConnection),
}

impl ConnectionLike for RedisConn {
    fn req_packed_command<'a>(&'a mut self, cmd: &'a Cmd) -> RedisFuture<'a, Value> {
        match self {
            RedisConn::Standalone(conn) => conn.req_packed_command(cmd),
            RedisConn::Sentinel(conn) => conn.req_packed_command(cmd),
            RedisConn::Cluster(conn) => conn.req_packed_command(cmd),
        }
    }

    fn req_packed_commands<'a>(
        &'a mut self,
        cmd: &'a Pipeline,
        offset: usize,
        count: usize,
    ) -> RedisFuture<'a, Vec<Value>> {
        match self {
            RedisConn::Standalone(conn) => conn.req_packed_commands(cmd, offset, count),
            RedisConn::Sentinel(conn) => conn.req_packed_commands(cmd, offset, count),
            RedisConn::Cluster(conn) => conn.req_packed_commands(cmd, offset, count),
        }
    }

    fn get_db(&self) -> i64 {
        match self {
            RedisConn::Standalone(conn) => conn.get_db(),
            RedisConn::Sentinel(conn) => conn.get_db(),
            RedisConn::Cluster(conn) => conn.get_db(),
        }
    }
}

/// Connect according to `cfg` and verify the connection with a ping.
pub async fn connect(cfg: &RedisConfig) -> Result<RedisConn, SchedulerError> {
    let mut conn = match cfg.mode {
        RedisMode::Standalone => {
            info!(addr = %cfg.addr, "connecting to redis standalone");
            let client = redis::Client::open(redis_url(&cfg.addr, &cfg.password, Some(cfg.db)))
                .map_err(store_err)?;
            RedisConn::Standalone(client.get_connection_manager().await.map_err(store_err)?)
        }
        RedisMode::Sentinel => {
            info!(
                master = %cfg.master_name,
                sentinels = ?cfg.sentinel_addrs,
                "connecting to redis via sentinel"
            );
            let addrs: Vec<String> = cfg
                .sentinel_addrs
                .iter()
                .map(|addr| redis_url(addr, "", None))
                .collect();
            let mut client = SentinelClient::build(
                addrs,
                cfg.master_name.clone(),
                None,
                SentinelServerType::Master,
            )
            .map_err(store_err)?;
            RedisConn::Sentinel(client.get_async_connection().await.map_err(store_err)?)
        }
        RedisMode::Cluster => {
            info!(addrs = ?cfg.cluster_addrs, "connecting to redis cluster");
            let addrs: Vec<String> = cfg
                .cluster_addrs
                .iter()
                .map(|addr| redis_url(addr, &cfg.password, None))
                .collect();
            let client = ClusterClient::new(addrs).map_err(store_err)?;
            RedisConn::Cluster(client.get_async_connection().await.map_err(store_err)?)
        }
    };

    let _: String = redis::cmd("PING")
        .query_async(&mut conn)
        .await
        .map_err(|err| SchedulerError::Store(format!("redis ping: {err}")))?;

    Ok(conn)
}

fn redis_url(addr: &str, password: &str, db: Option<i64>) -> String {
    let mut url = String::from("redis://");
    if !password.is_empty() {
        url.push(':');
        url.push_str(password);
        url.push('@');
    }
    url.push_str(addr);
    if let Some(db) = db {
        url.push('/');
        url.push_str(&db.to_string());
    }
    url
}

fn store_err(err: redis::RedisError) -> SchedulerError {
    SchedulerError::Store(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_known_values() {
        assert_eq!("standalone".parse::<RedisMode>(), Ok(RedisMode::Standalone));
        assert_eq!("".parse::<RedisMode>(), Ok(RedisMode::Standalone));
        assert_eq!("sentinel".parse::<RedisMode>(), Ok(RedisMode::Sentinel));
        assert_eq!("cluster".parse::<RedisMode>(), Ok(RedisMode::Cluster));
        assert!("memcached".parse::<RedisMode>().is_err());
    }

    #[test]
    fn url_includes_password_and_db_when_present() {
        assert_eq!(redis_url("localhost:6379", "", Some(0)), "redis://localhost:6379/0");
        assert_eq!(
            redis_url("localhost:6379", "hunter2", Some(3)),
            "redis://:hunter2@localhost:6379/3"
        );
        assert_eq!(redis_url("10.0.0.1:26379", "", None), "redis://10.0.0.1:26379");
    }
}
