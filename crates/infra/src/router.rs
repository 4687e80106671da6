//! Routes deliveries to the producer matching the destination shape.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use redrive_core::{Destination, MessageProducer, ProduceError};

/// Selects a producer by inspecting the destination rather than the
/// task's declared type, which keeps routing robust to caller
/// inconsistencies between the two.
pub struct ProducerRouter {
    kafka: Arc<dyn MessageProducer>,
    http: Arc<dyn MessageProducer>,
}

impl ProducerRouter {
    pub fn new(kafka: Arc<dyn MessageProducer>, http: Arc<dyn MessageProducer>) -> Self {
        Self { kafka, http }
    }
}

#[async_trait]
impl MessageProducer for ProducerRouter {
    async fn produce(
        &self,
        destination: &Destination,
        key: &[u8],
        value: &[u8],
    ) -> Result<(), ProduceError> {
        match destination {
            Destination::Http { url } => {
                debug!(url = %url, "routing to http producer");
                self.http.produce(destination, key, value).await
            }
            Destination::Kafka { topic, .. } => {
                debug!(topic = %topic, "routing to kafka producer");
                self.kafka.produce(destination, key, value).await
            }
            Destination::Unset => Err(ProduceError::InvalidDestination(
                "unable to determine destination type: neither URL nor topic is set".to_string(),
            )),
        }
    }

    async fn close(&self) -> Result<(), ProduceError> {
        let mut errors = Vec::new();

        if let Err(err) = self.kafka.close().await {
            errors.push(format!("closing kafka producer: {err}"));
        }
        if let Err(err) = self.http.close().await {
            errors.push(format!("closing http producer: {err}"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ProduceError::Close(errors.join("; ")))
        }
    }
}
