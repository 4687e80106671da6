//! Sorted-set scheduler store.
//!
//! Tasks are members of a single sorted set scored by their due time in
//! Unix seconds. Claiming removes the member before it is handed to the
//! caller, so an entry is observed by at most one replica even when
//! several poll the same set concurrently.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, error, warn};

use redrive_core::constants::RETRY_QUEUE_KEY;
use redrive_core::{SchedulerError, Task, TaskScheduler};

use super::client::RedisConn;

pub struct RedisScheduler {
    conn: RedisConn,
    key: String,
}

impl RedisScheduler {
    pub fn new(conn: RedisConn) -> Self {
        Self {
            conn,
            key: RETRY_QUEUE_KEY.to_string(),
        }
    }
}

#[async_trait]
impl TaskScheduler for RedisScheduler {
    async fn schedule(&self, task: &Task, delay: Duration) -> Result<(), SchedulerError> {
        let data = serde_json::to_string(task)?;
        let score = Utc::now().timestamp() + delay.as_secs() as i64;

        let mut conn = self.conn.clone();
        let _: () = redis::cmd("ZADD")
            .arg(&self.key)
            .arg(score)
            .arg(&data)
            .query_async(&mut conn)
            .await
            .map_err(|err| SchedulerError::Store(format!("scheduling task in redis: {err}")))?;

        Ok(())
    }

    async fn fetch_due(&self, limit: usize) -> Result<Vec<Task>, SchedulerError> {
        let now = Utc::now().timestamp();

        let mut conn = self.conn.clone();
        let members: Vec<String> = redis::cmd("ZRANGEBYSCORE")
            .arg(&self.key)
            .arg(0)
            .arg(now)
            .arg("LIMIT")
            .arg(0)
            .arg(limit as i64)
            .query_async(&mut conn)
            .await
            .map_err(|err| SchedulerError::Store(format!("fetching due tasks from redis: {err}")))?;

        let mut tasks = Vec::with_capacity(members.len());
        for member in members {
            // Removing the member is the claim; only the caller that
            // observes a removal count of one owns the entry.
            let removed: i64 = match redis::cmd("ZREM")
                .arg(&self.key)
                .arg(&member)
                .query_async(&mut conn)
                .await
            {
                Ok(n) => n,
                Err(err) => {
                    error!(error = %err, member = %member, "failed to remove task from queue");
                    continue;
                }
            };
            if removed == 0 {
                debug!(member = %member, "entry already claimed by another replica");
                continue;
            }

            match serde_json::from_str::<Task>(&member) {
                Ok(task) => tasks.push(task),
                Err(err) => warn!(error = %err, raw = %member, "invalid task data in redis"),
            }
        }

        Ok(tasks)
    }

    async fn remove(&self, raw_member: &str) -> Result<(), SchedulerError> {
        let mut conn = self.conn.clone();
        let _: i64 = redis::cmd("ZREM")
            .arg(&self.key)
            .arg(raw_member)
            .query_async(&mut conn)
            .await
            .map_err(|err| SchedulerError::Store(err.to_string()))?;
        Ok(())
    }
}
