//! In-memory scheduler store for tests and local development.
//!
//! Mirrors the Redis store's contract: entries are `(score, raw member)`
//! pairs, duplicate pairs collapse into one, claiming removes the entry
//! under the lock, and malformed members are dropped with a warning.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tracing::warn;

use redrive_core::{SchedulerError, Task, TaskScheduler};

#[derive(Default)]
pub struct InMemoryScheduler {
    entries: Mutex<Vec<(i64, String)>>,
}

impl InMemoryScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw member at the given due time, bypassing serialization.
    /// Members are unique; re-inserting one updates its score.
    pub fn insert_raw(&self, score: i64, raw: impl Into<String>) {
        let raw = raw.into();
        let mut entries = self.entries.lock().unwrap();
        if let Some(entry) = entries.iter_mut().find(|(_, member)| *member == raw) {
            entry.0 = score;
        } else {
            entries.push((score, raw));
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TaskScheduler for InMemoryScheduler {
    async fn schedule(&self, task: &Task, delay: Duration) -> Result<(), SchedulerError> {
        let data = serde_json::to_string(task)?;
        let score = Utc::now().timestamp() + delay.as_secs() as i64;
        self.insert_raw(score, data);
        Ok(())
    }

    async fn fetch_due(&self, limit: usize) -> Result<Vec<Task>, SchedulerError> {
        let now = Utc::now().timestamp();

        let claimed: Vec<String> = {
            let mut entries = self.entries.lock().unwrap();
            entries.sort_by_key(|(score, _)| *score);

            let mut due = Vec::new();
            while due.len() < limit && entries.first().is_some_and(|(score, _)| *score <= now) {
                due.push(entries.remove(0).1);
            }
            due
        };

        let mut tasks = Vec::with_capacity(claimed.len());
        for member in claimed {
            match serde_json::from_str::<Task>(&member) {
                Ok(task) => tasks.push(task),
                Err(err) => warn!(error = %err, raw = %member, "invalid task data in store"),
            }
        }

        Ok(tasks)
    }

    async fn remove(&self, raw_member: &str) -> Result<(), SchedulerError> {
        self.entries
            .lock()
            .unwrap()
            .retain(|(_, member)| member != raw_member);
        Ok(())
    }
}
