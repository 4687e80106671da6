//! HTTP producer: delivers a message with a POST to the destination URL.
//!
//! The key travels in the `X-Message-Key` header and the value is the
//! request body, verbatim. Any 2xx response counts as delivered.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use redrive_core::{Destination, MessageProducer, ProduceError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);
const MAX_IDLE_PER_HOST: usize = 10;

/// Longest response-body prefix carried inside a delivery error.
const ERROR_BODY_LIMIT: usize = 256;

pub struct HttpProducer {
    client: reqwest::Client,
}

impl HttpProducer {
    pub fn new() -> Result<Self, ProduceError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .pool_idle_timeout(POOL_IDLE_TIMEOUT)
            .pool_max_idle_per_host(MAX_IDLE_PER_HOST)
            .user_agent(concat!("redrive/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| ProduceError::Transport(format!("creating http client: {err}")))?;

        info!(timeout_secs = REQUEST_TIMEOUT.as_secs(), "http producer initialized");

        Ok(Self { client })
    }
}

#[async_trait]
impl MessageProducer for HttpProducer {
    async fn produce(
        &self,
        destination: &Destination,
        key: &[u8],
        value: &[u8],
    ) -> Result<(), ProduceError> {
        let url = match destination {
            Destination::Http { url } if !url.is_empty() => url,
            _ => {
                return Err(ProduceError::InvalidDestination(
                    "destination URL is required for HTTP delivery".to_string(),
                ))
            }
        };

        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .header("X-Message-Key", String::from_utf8_lossy(key).into_owned())
            .body(value.to_vec())
            .send()
            .await
            .map_err(|err| {
                ProduceError::Transport(format!("executing http request to {url:?}: {err}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProduceError::Status {
                status: status.as_u16(),
                body: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        debug!(
            url = %url,
            status_code = status.as_u16(),
            value_size = value.len(),
            "message produced via http"
        );

        Ok(())
    }

    async fn close(&self) -> Result<(), ProduceError> {
        // The connection pool drains when the client is dropped.
        Ok(())
    }
}
