use async_trait::async_trait;

use redrive_core::{HealthCheck, HealthError};

use super::client::RedisConn;

/// Health probe that pings the scheduler store.
pub struct RedisHealth {
    conn: RedisConn,
}

impl RedisHealth {
    pub fn new(conn: RedisConn) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl HealthCheck for RedisHealth {
    fn name(&self) -> &str {
        "redis"
    }

    async fn check(&self) -> Result<(), HealthError> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|err| HealthError(err.to_string()))?;
        Ok(())
    }
}
