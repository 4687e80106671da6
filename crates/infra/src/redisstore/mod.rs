//! Redis-backed scheduler store and health probe.

mod client;
mod health;
mod scheduler;

pub use client::{connect, RedisConfig, RedisConn, RedisMode};
pub use health::RedisHealth;
pub use scheduler::RedisScheduler;
