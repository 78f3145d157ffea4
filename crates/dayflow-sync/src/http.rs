//! HTTP implementation of the remote event store.

use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;

use dayflow_schedule::{Event, EventDraft, EventPatch};

use crate::error::StoreError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Structured error body the server returns on failed mutations.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for the `/api/events` endpoint family.
pub struct HttpEventStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpEventStore {
    /// Create a client for the given base URL (scheme + host, no trailing
    /// path).
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn events_url(&self) -> String {
        format!("{}/api/events", self.base_url)
    }

    fn event_url(&self, id: &str) -> String {
        format!("{}/api/events/{}", self.base_url, urlencoding::encode(id))
    }

    /// Fetch the full event set.
    ///
    /// Any non-2xx maps to a generic transport error; the list endpoint
    /// carries no structured error body.
    #[instrument(skip(self), level = "info")]
    pub async fn list_events(&self) -> Result<Vec<Event>, StoreError> {
        let response = self.client.get(self.events_url()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Transport(format!(
                "event list failed with status {status}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| StoreError::Transport(format!("event list decode failed: {e}")))
    }

    /// Create an event. The server assigns `id` and `createdAt`.
    #[instrument(skip(self, draft), level = "info")]
    pub async fn create_event(&self, draft: &EventDraft) -> Result<Event, StoreError> {
        let response = self
            .client
            .post(self.events_url())
            .json(draft)
            .send()
            .await?;

        Self::read_event(response, "(new)").await
    }

    /// Apply a partial field set to an existing event.
    #[instrument(skip(self, patch), level = "info")]
    pub async fn update_event(&self, id: &str, patch: &EventPatch) -> Result<Event, StoreError> {
        let response = self
            .client
            .patch(self.event_url(id))
            .json(patch)
            .send()
            .await?;

        Self::read_event(response, id).await
    }

    /// Delete an event. Success is an empty 2xx.
    #[instrument(skip(self), level = "info")]
    pub async fn delete_event(&self, id: &str) -> Result<(), StoreError> {
        let response = self.client.delete(self.event_url(id)).send().await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::mutation_error(response, id).await)
        }
    }

    async fn read_event(response: reqwest::Response, id: &str) -> Result<Event, StoreError> {
        let status = response.status();
        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| StoreError::Transport(format!("event decode failed: {e}")))
        } else {
            Err(Self::mutation_error(response, id).await)
        }
    }

    /// Map a failed mutation response onto the error taxonomy: 404 is
    /// not-found, other 4xx with an `{error}` body is a validation
    /// rejection with the server's message, anything else is transport.
    async fn mutation_error(response: reqwest::Response, id: &str) -> StoreError {
        let status = response.status();
        if status.as_u16() == 404 {
            return StoreError::NotFound(id.to_string());
        }

        if status.is_client_error() {
            if let Ok(body) = response.json::<ErrorBody>().await {
                return StoreError::Validation(body.error);
            }
        }
        StoreError::Transport(format!("request failed with status {status}"))
    }
}
