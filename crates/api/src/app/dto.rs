//! Request/response DTOs for the ingress API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use redrive_core::destination::DestinationRecord;
use redrive_core::{Destination, Task};

/// `POST /tasks` request body. Missing fields decode to their zero
/// values and are rejected by validation rather than by the decoder.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub destination: DestinationRecord,
    #[serde(default)]
    pub dead_destination: DestinationRecord,
    #[serde(default)]
    pub max_retries: i64,
    #[serde(default)]
    pub base_delay: i64,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub is_priority: bool,
    #[serde(default)]
    pub message_data: String,
    #[serde(default)]
    pub destination_type: String,
}

impl CreateTaskRequest {
    /// Convert to a domain task. Fails on an unusable destination type or
    /// numeric fields outside their representable range; everything else
    /// is left to service validation.
    pub fn into_task(self) -> Result<Task, String> {
        let destination_type = self.destination_type.parse()?;

        let max_retries = u32::try_from(self.max_retries)
            .map_err(|_| "max_retries must be between 0 and 100".to_string())?;
        let base_delay = u64::try_from(self.base_delay)
            .map_err(|_| "base_delay must be between 1 and 3600".to_string())?;

        Ok(Task {
            id: self.id,
            attempt: 0,
            source: self.source,
            destination: Destination::from(self.destination),
            dead_destination: Destination::from(self.dead_destination),
            max_retries,
            base_delay,
            client_id: self.client_id,
            is_priority: self.is_priority,
            message_data: self.message_data,
            destination_type,
        })
    }
}

/// Returned on successful task creation.
#[derive(Debug, Serialize)]
pub struct CreateTaskResponse {
    pub message: String,
}

/// The standard error payload.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

/// Returned by the health check endpoint.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub checks: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use redrive_core::DestinationKind;

    use super::*;

    fn request() -> CreateTaskRequest {
        CreateTaskRequest {
            id: "task-1".to_string(),
            source: "test-app".to_string(),
            destination: DestinationRecord {
                host: "localhost".to_string(),
                port: "9092".to_string(),
                topic: "my-topic".to_string(),
                url: String::new(),
            },
            dead_destination: DestinationRecord::default(),
            max_retries: 3,
            base_delay: 2,
            client_id: "client-1".to_string(),
            is_priority: false,
            message_data: "hi".to_string(),
            destination_type: "kafka".to_string(),
        }
    }

    #[test]
    fn maps_fields_onto_the_domain_task() {
        let task = request().into_task().unwrap();

        assert_eq!(task.id, "task-1");
        assert_eq!(task.attempt, 0);
        assert_eq!(task.destination_type, DestinationKind::Kafka);
        assert_eq!(
            task.destination,
            Destination::kafka("localhost", "9092", "my-topic")
        );
        assert!(task.dead_destination.is_unset());
        assert_eq!(task.max_retries, 3);
        assert_eq!(task.base_delay, 2);
    }

    #[test]
    fn rejects_missing_destination_type() {
        let req = CreateTaskRequest {
            destination_type: String::new(),
            ..request()
        };
        assert_eq!(req.into_task().unwrap_err(), "destination type is required");
    }

    #[test]
    fn rejects_unknown_destination_type() {
        let req = CreateTaskRequest {
            destination_type: "sqs".to_string(),
            ..request()
        };
        assert!(req
            .into_task()
            .unwrap_err()
            .contains("unsupported destination type"));
    }

    #[test]
    fn rejects_negative_numeric_fields() {
        let req = CreateTaskRequest {
            max_retries: -1,
            ..request()
        };
        assert_eq!(
            req.into_task().unwrap_err(),
            "max_retries must be between 0 and 100"
        );

        let req = CreateTaskRequest {
            base_delay: -1,
            ..request()
        };
        assert_eq!(
            req.into_task().unwrap_err(),
            "base_delay must be between 1 and 3600"
        );
    }
}
