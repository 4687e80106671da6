use std::time::Duration;

use async_trait::async_trait;
use rdkafka::producer::{FutureProducer, Producer};
use rdkafka::util::Timeout;
use tracing::{debug, info};

use redrive_core::{Destination, MessageProducer, ProduceError};

/// Kafka producer backed by a single long-lived writer configured from
/// the global broker list.
pub struct KafkaProducer {
    producer: FutureProducer,
}

impl KafkaProducer {
    pub fn new(brokers: &[String]) -> Result<Self, ProduceError> {
        let producer = super::client_config(&brokers.join(","))
            .create()
            .map_err(|err| ProduceError::Transport(format!("creating kafka producer: {err}")))?;

        info!(brokers = ?brokers, "kafka producer initialized");

        Ok(Self { producer })
    }
}

#[async_trait]
impl MessageProducer for KafkaProducer {
    async fn produce(
        &self,
        destination: &Destination,
        key: &[u8],
        value: &[u8],
    ) -> Result<(), ProduceError> {
        let topic = match destination {
            Destination::Kafka { topic, .. } if !topic.is_empty() => topic,
            _ => {
                return Err(ProduceError::InvalidDestination(
                    "kafka destination requires a topic".to_string(),
                ))
            }
        };

        super::send(&self.producer, topic, key, value).await?;

        debug!(topic = %topic, value_size = value.len(), "message produced");
        Ok(())
    }

    async fn close(&self) -> Result<(), ProduceError> {
        self.producer
            .flush(Timeout::After(Duration::from_secs(5)))
            .map_err(|err| ProduceError::Close(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_non_kafka_destinations() {
        let producer = KafkaProducer::new(&["localhost:9092".to_string()]).unwrap();

        let err = producer
            .produce(&Destination::http("http://x/y"), b"k", b"v")
            .await
            .unwrap_err();
        assert!(matches!(err, ProduceError::InvalidDestination(_)), "got {err:?}");

        let err = producer
            .produce(&Destination::kafka("localhost", "9092", ""), b"k", b"v")
            .await
            .unwrap_err();
        assert!(matches!(err, ProduceError::InvalidDestination(_)), "got {err:?}");
    }
}
