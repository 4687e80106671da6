//! Delivery destinations.
//!
//! A destination is either a Kafka topic on a specific broker or an HTTP
//! endpoint. The wire and storage layout is a flat object with all four
//! fields (`host`, `port`, `topic`, `url`), absent fields as empty
//! strings; [`DestinationRecord`] carries that layout and the conversion
//! in both directions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Discriminator for the delivery backend of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DestinationKind {
    Kafka,
    Http,
}

impl DestinationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DestinationKind::Kafka => "kafka",
            DestinationKind::Http => "http",
        }
    }
}

impl fmt::Display for DestinationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DestinationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kafka" => Ok(DestinationKind::Kafka),
            "http" => Ok(DestinationKind::Http),
            "" => Err("destination type is required".to_string()),
            other => Err(format!("unsupported destination type {other:?}")),
        }
    }
}

/// Target endpoint of a delivery.
///
/// `Unset` represents the all-empty wire object; it is valid only for a
/// dead-letter destination that was never configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DestinationRecord", into = "DestinationRecord")]
pub enum Destination {
    Kafka {
        host: String,
        port: String,
        topic: String,
    },
    Http {
        url: String,
    },
    #[default]
    Unset,
}

impl Destination {
    pub fn kafka(
        host: impl Into<String>,
        port: impl Into<String>,
        topic: impl Into<String>,
    ) -> Self {
        Destination::Kafka {
            host: host.into(),
            port: port.into(),
            topic: topic.into(),
        }
    }

    pub fn http(url: impl Into<String>) -> Self {
        Destination::Http { url: url.into() }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Destination::Unset)
    }

    /// `host:port` for Kafka connections.
    pub fn address(&self) -> Option<String> {
        match self {
            Destination::Kafka { host, port, .. } => Some(format!("{host}:{port}")),
            _ => None,
        }
    }
}

/// Flat wire/storage layout shared with the HTTP API and the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DestinationRecord {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub port: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub url: String,
}

impl From<DestinationRecord> for Destination {
    fn from(record: DestinationRecord) -> Self {
        if !record.url.is_empty() {
            Destination::Http { url: record.url }
        } else if !record.topic.is_empty() || !record.host.is_empty() || !record.port.is_empty() {
            Destination::Kafka {
                host: record.host,
                port: record.port,
                topic: record.topic,
            }
        } else {
            Destination::Unset
        }
    }
}

impl From<Destination> for DestinationRecord {
    fn from(destination: Destination) -> Self {
        match destination {
            Destination::Kafka { host, port, topic } => DestinationRecord {
                host,
                port,
                topic,
                url: String::new(),
            },
            Destination::Http { url } => DestinationRecord {
                url,
                ..DestinationRecord::default()
            },
            Destination::Unset => DestinationRecord::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_known_values() {
        assert_eq!("kafka".parse::<DestinationKind>(), Ok(DestinationKind::Kafka));
        assert_eq!("http".parse::<DestinationKind>(), Ok(DestinationKind::Http));
    }

    #[test]
    fn kind_rejects_empty_and_unknown() {
        let err = "".parse::<DestinationKind>().unwrap_err();
        assert_eq!(err, "destination type is required");

        let err = "sqs".parse::<DestinationKind>().unwrap_err();
        assert!(err.contains("unsupported destination type"));
    }

    #[test]
    fn record_with_url_maps_to_http() {
        let record = DestinationRecord {
            url: "http://api.example.com/webhook".to_string(),
            ..DestinationRecord::default()
        };
        assert_eq!(
            Destination::from(record),
            Destination::http("http://api.example.com/webhook")
        );
    }

    #[test]
    fn url_wins_over_kafka_fields() {
        let record = DestinationRecord {
            host: "localhost".to_string(),
            port: "9092".to_string(),
            topic: "my-topic".to_string(),
            url: "http://api.example.com/webhook".to_string(),
        };
        assert_eq!(
            Destination::from(record),
            Destination::http("http://api.example.com/webhook")
        );
    }

    #[test]
    fn record_with_kafka_fields_maps_to_kafka() {
        let record = DestinationRecord {
            host: "localhost".to_string(),
            port: "9092".to_string(),
            topic: "my-topic".to_string(),
            url: String::new(),
        };
        assert_eq!(
            Destination::from(record),
            Destination::kafka("localhost", "9092", "my-topic")
        );
    }

    #[test]
    fn partial_kafka_fields_stay_on_the_kafka_variant() {
        let record = DestinationRecord {
            host: "localhost".to_string(),
            port: "9092".to_string(),
            topic: String::new(),
            url: String::new(),
        };
        let destination = Destination::from(record);
        assert_eq!(destination, Destination::kafka("localhost", "9092", ""));

        let back = DestinationRecord::from(destination);
        assert_eq!(back.host, "localhost");
        assert_eq!(back.port, "9092");
        assert_eq!(back.topic, "");
    }

    #[test]
    fn empty_record_maps_to_unset_and_back() {
        let destination = Destination::from(DestinationRecord::default());
        assert!(destination.is_unset());

        let record = DestinationRecord::from(destination);
        assert_eq!(record.host, "");
        assert_eq!(record.port, "");
        assert_eq!(record.topic, "");
        assert_eq!(record.url, "");
    }

    #[test]
    fn serialized_destination_always_carries_all_four_fields() {
        let json = serde_json::to_value(Destination::http("http://x/y")).unwrap();
        let object = json.as_object().unwrap();
        for field in ["host", "port", "topic", "url"] {
            assert!(object.contains_key(field), "missing field {field}");
        }
    }

    #[test]
    fn address_combines_host_and_port() {
        let destination = Destination::kafka("localhost", "9092", "my-topic");
        assert_eq!(destination.address().as_deref(), Some("localhost:9092"));
        assert_eq!(Destination::http("http://x").address(), None);
    }
}
