//! Infrastructure adapters for the redrive orchestrator: the Redis
//! scheduler store, Kafka and HTTP producers, the producer router, and
//! the delivery worker.

pub mod http_producer;
pub mod kafka;
pub mod memory;
pub mod redisstore;
pub mod router;
pub mod worker;

pub use http_producer::HttpProducer;
pub use kafka::{DestinationKafkaProducer, KafkaProducer};
pub use memory::InMemoryScheduler;
pub use redisstore::{connect, RedisConfig, RedisConn, RedisHealth, RedisMode, RedisScheduler};
pub use router::ProducerRouter;
pub use worker::DeliveryWorker;
