use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rdkafka::producer::{FutureProducer, Producer};
use rdkafka::util::Timeout;
use tracing::{debug, info};

use redrive_core::{Destination, MessageProducer, ProduceError};

/// Kafka producer that creates writers on demand per broker address
/// derived from the task destination. Writers are cached by `host:port`
/// and reused across calls.
///
/// The cache mutex also guards against `close` racing an in-flight
/// `produce` during shutdown.
pub struct DestinationKafkaProducer {
    writers: Mutex<HashMap<String, FutureProducer>>,
}

impl DestinationKafkaProducer {
    pub fn new() -> Self {
        Self {
            writers: Mutex::new(HashMap::new()),
        }
    }

    fn writer_for(&self, addr: &str) -> Result<FutureProducer, ProduceError> {
        let mut writers = self.writers.lock().unwrap();
        if let Some(writer) = writers.get(addr) {
            return Ok(writer.clone());
        }

        let writer: FutureProducer = super::client_config(addr)
            .create()
            .map_err(|err| ProduceError::Transport(format!("creating kafka writer: {err}")))?;
        writers.insert(addr.to_string(), writer.clone());

        info!(broker = %addr, "kafka writer created");

        Ok(writer)
    }
}

impl Default for DestinationKafkaProducer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageProducer for DestinationKafkaProducer {
    async fn produce(
        &self,
        destination: &Destination,
        key: &[u8],
        value: &[u8],
    ) -> Result<(), ProduceError> {
        let (host, port, topic) = match destination {
            Destination::Kafka { host, port, topic } => (host, port, topic),
            _ => {
                return Err(ProduceError::InvalidDestination(
                    "kafka destination requires a topic".to_string(),
                ))
            }
        };
        if host.is_empty() || port.is_empty() {
            return Err(ProduceError::InvalidDestination(
                "kafka destination requires host and port".to_string(),
            ));
        }
        if topic.is_empty() {
            return Err(ProduceError::InvalidDestination(
                "kafka destination requires a topic".to_string(),
            ));
        }

        let addr = format!("{host}:{port}");
        let writer = self.writer_for(&addr)?;

        super::send(&writer, topic, key, value).await?;

        debug!(broker = %addr, topic = %topic, value_size = value.len(), "message produced");
        Ok(())
    }

    async fn close(&self) -> Result<(), ProduceError> {
        let writers: Vec<(String, FutureProducer)> =
            self.writers.lock().unwrap().drain().collect();

        let mut errors = Vec::new();
        for (addr, writer) in writers {
            if let Err(err) = writer.flush(Timeout::After(Duration::from_secs(5))) {
                errors.push(format!("closing writer for {addr}: {err}"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ProduceError::Close(errors.join("; ")))
        }
    }
}
