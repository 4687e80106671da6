//! Production wiring: connect the store, choose producers, assemble the
//! task service.

use std::sync::Arc;

use tracing::info;

use redrive_core::{HealthCheck, MessageProducer, TaskService};
use redrive_infra::{
    connect, DestinationKafkaProducer, HttpProducer, KafkaProducer, ProducerRouter, RedisHealth,
    RedisScheduler,
};

use crate::config::Config;

pub struct Services {
    pub task_service: Arc<TaskService>,
    pub producer: Arc<dyn MessageProducer>,
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
}

/// Build the production service graph from configuration.
pub async fn build(cfg: &Config) -> Result<Services, Box<dyn std::error::Error + Send + Sync>> {
    let conn = connect(&cfg.redis).await?;
    let scheduler = Arc::new(RedisScheduler::new(conn.clone()));

    let kafka: Arc<dyn MessageProducer> = if cfg.kafka_brokers.is_empty() {
        info!("no kafka brokers configured, using per-destination writers");
        Arc::new(DestinationKafkaProducer::new())
    } else {
        Arc::new(KafkaProducer::new(&cfg.kafka_brokers)?)
    };
    let http = Arc::new(HttpProducer::new()?);
    let producer: Arc<dyn MessageProducer> = Arc::new(ProducerRouter::new(kafka, http));

    let task_service =
        Arc::new(TaskService::new(scheduler, producer.clone()).with_batch_size(cfg.batch_size));

    let health_checks: Vec<Arc<dyn HealthCheck>> = vec![Arc::new(RedisHealth::new(conn))];

    Ok(Services {
        task_service,
        producer,
        health_checks,
    })
}
