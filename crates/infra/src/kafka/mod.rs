//! Kafka producers.
//!
//! Two connection modes are supported: [`KafkaProducer`] keeps a single
//! writer configured from the global broker list, while
//! [`DestinationKafkaProducer`] creates writers on demand per broker
//! address taken from the task destination (used when no global broker
//! list is configured).
//!
//! Both require acknowledgement from the full in-sync replica set and
//! batch writes for up to 100 ms.

mod destination_producer;
mod producer;

pub use destination_producer::DestinationKafkaProducer;
pub use producer::KafkaProducer;

use rdkafka::config::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::util::Timeout;

use redrive_core::ProduceError;

fn client_config(bootstrap: &str) -> ClientConfig {
    let mut config = ClientConfig::new();
    config
        .set("bootstrap.servers", bootstrap)
        .set("acks", "all")
        .set("linger.ms", "100")
        .set("message.timeout.ms", "30000");
    config
}

async fn send(
    producer: &FutureProducer,
    topic: &str,
    key: &[u8],
    value: &[u8],
) -> Result<(), ProduceError> {
    let record = FutureRecord::to(topic).key(key).payload(value);
    producer
        .send(record, Timeout::Never)
        .await
        .map(|_| ())
        .map_err(|(err, _)| {
            ProduceError::Transport(format!("writing message to kafka topic {topic:?}: {err}"))
        })
}
