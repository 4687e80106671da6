//! Shared scheduling and validation limits.

use std::time::Duration;

/// Sorted-set key under which pending tasks are stored.
pub const RETRY_QUEUE_KEY: &str = "retry:schedule:";

/// Interval between worker polling cycles.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Maximum number of tasks fetched per poll cycle.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// Lowest accepted base delay in seconds.
pub const MIN_BASE_DELAY: u64 = 1;

/// Highest accepted base delay in seconds.
pub const MAX_BASE_DELAY: u64 = 3600;

/// Highest accepted retry budget.
pub const MAX_RETRY_LIMIT: u32 = 100;
