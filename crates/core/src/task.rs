//! The task entity and its retry accounting.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::destination::{Destination, DestinationKind};

/// A retryable unit of delivery work.
///
/// Field order matches the canonical storage encoding; `attempt` counts
/// delivery attempts already made (zero on first enqueue).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub attempt: u32,
    pub source: String,
    pub destination: Destination,
    #[serde(default)]
    pub dead_destination: Destination,
    pub max_retries: u32,
    pub base_delay: u64,
    pub client_id: String,
    pub is_priority: bool,
    pub message_data: String,
    pub destination_type: DestinationKind,
}

impl Task {
    /// Advance the attempt counter by one.
    pub fn increment_attempt(&mut self) {
        self.attempt += 1;
    }

    /// Whether the task can still be retried.
    pub fn has_retries_left(&self) -> bool {
        self.attempt <= self.max_retries
    }

    /// Whether the task has exhausted all retries and should be routed to
    /// its dead-letter destination.
    pub fn should_send_to_dead_destination(&self) -> bool {
        !self.has_retries_left()
    }

    /// Exponential backoff for the current attempt:
    /// `base_delay * 2^(attempt - 1)`, saturating instead of overflowing.
    pub fn next_retry_delay(&self) -> Duration {
        let exponent = self.attempt.saturating_sub(1);
        let multiplier = 1u64.checked_shl(exponent).unwrap_or(u64::MAX);
        Duration::from_secs(self.base_delay.saturating_mul(multiplier))
    }

    /// Message key for a delivery attempt: `"{id}|{attempt}"`.
    /// Downstream consumers rely on this format to observe retry lineage.
    pub fn delivery_key(&self) -> String {
        format!("{}|{}", self.id, self.attempt)
    }

    /// Message key for the dead-letter dispatch: `"{id}|dead|{attempt}"`.
    pub fn dead_letter_key(&self) -> String {
        format!("{}|dead|{}", self.id, self.attempt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(attempt: u32, max_retries: u32, base_delay: u64) -> Task {
        Task {
            id: "task-1".to_string(),
            attempt,
            source: "test-app".to_string(),
            destination: Destination::kafka("localhost", "9092", "my-topic"),
            dead_destination: Destination::kafka("localhost", "9092", "dead-topic"),
            max_retries,
            base_delay,
            client_id: "client-1".to_string(),
            is_priority: false,
            message_data: "test message data".to_string(),
            destination_type: DestinationKind::Kafka,
        }
    }

    #[test]
    fn increment_attempt_advances_counter() {
        let mut t = task(0, 3, 2);
        t.increment_attempt();
        assert_eq!(t.attempt, 1);
    }

    #[test]
    fn has_retries_left_cases() {
        let cases = [
            // (attempt, max_retries, want)
            (0, 3, true),
            (3, 3, true),
            (4, 3, false),
            (1, 0, false),
        ];
        for (attempt, max_retries, want) in cases {
            let t = task(attempt, max_retries, 2);
            assert_eq!(
                t.has_retries_left(),
                want,
                "attempt={attempt} max_retries={max_retries}"
            );
        }
    }

    #[test]
    fn next_retry_delay_doubles_per_attempt() {
        let cases = [
            // (attempt, base_delay, want_secs)
            (1, 2, 2),
            (2, 2, 4),
            (3, 2, 8),
            (0, 1, 1),
            (4, 1, 8),
        ];
        for (attempt, base_delay, want) in cases {
            let t = task(attempt, 100, base_delay);
            assert_eq!(
                t.next_retry_delay(),
                Duration::from_secs(want),
                "attempt={attempt} base_delay={base_delay}"
            );
        }
    }

    #[test]
    fn next_retry_delay_saturates_on_large_attempts() {
        let t = task(100, 100, 3600);
        assert_eq!(t.next_retry_delay(), Duration::from_secs(u64::MAX));
    }

    #[test]
    fn should_send_to_dead_destination_cases() {
        assert!(!task(1, 3, 2).should_send_to_dead_destination());
        assert!(task(4, 3, 2).should_send_to_dead_destination());
    }

    #[test]
    fn delivery_keys_embed_id_and_attempt() {
        let t = task(2, 3, 2);
        assert_eq!(t.delivery_key(), "task-1|2");
        assert_eq!(t.dead_letter_key(), "task-1|dead|2");
    }

    #[test]
    fn task_round_trips_through_json() {
        let mut t = task(3, 5, 7);
        t.is_priority = true;
        t.dead_destination = Destination::Unset;

        let encoded = serde_json::to_string(&t).unwrap();
        let decoded: Task = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, t);
    }

    #[test]
    fn http_task_round_trips_through_json() {
        let t = Task {
            destination: Destination::http("http://localhost:8090/webhook"),
            dead_destination: Destination::http("http://localhost:8090/dead"),
            destination_type: DestinationKind::Http,
            ..task(0, 3, 2)
        };

        let encoded = serde_json::to_string(&t).unwrap();
        let decoded: Task = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, t);
    }

    #[test]
    fn encoding_uses_the_canonical_field_set() {
        let value = serde_json::to_value(task(0, 3, 2)).unwrap();
        let object = value.as_object().unwrap();

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            [
                "attempt",
                "base_delay",
                "client_id",
                "dead_destination",
                "destination",
                "destination_type",
                "id",
                "is_priority",
                "max_retries",
                "message_data",
                "source",
            ]
        );
        assert_eq!(object["destination_type"], "kafka");
    }
}
