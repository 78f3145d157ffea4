//! Unified event store over the available backends.

use std::sync::Arc;

use dayflow_schedule::{Event, EventDraft, EventPatch};

use crate::error::StoreError;
use crate::http::HttpEventStore;
use crate::memory::MemoryEventStore;

/// Remote collaborator handle: the four operations of the event endpoint,
/// dispatched to either the HTTP client or the in-process store.
#[derive(Clone)]
pub enum EventStore {
    Http(Arc<HttpEventStore>),
    Memory(Arc<MemoryEventStore>),
}

impl EventStore {
    pub fn http(client: HttpEventStore) -> Self {
        Self::Http(Arc::new(client))
    }

    pub fn memory(store: MemoryEventStore) -> Self {
        Self::Memory(Arc::new(store))
    }

    pub async fn list_events(&self) -> Result<Vec<Event>, StoreError> {
        match self {
            Self::Http(client) => client.list_events().await,
            Self::Memory(store) => store.list_events().await,
        }
    }

    pub async fn create_event(&self, draft: &EventDraft) -> Result<Event, StoreError> {
        match self {
            Self::Http(client) => client.create_event(draft).await,
            Self::Memory(store) => store.create_event(draft).await,
        }
    }

    pub async fn update_event(&self, id: &str, patch: &EventPatch) -> Result<Event, StoreError> {
        match self {
            Self::Http(client) => client.update_event(id, patch).await,
            Self::Memory(store) => store.update_event(id, patch).await,
        }
    }

    pub async fn delete_event(&self, id: &str) -> Result<(), StoreError> {
        match self {
            Self::Http(client) => client.delete_event(id).await,
            Self::Memory(store) => store.delete_event(id).await,
        }
    }
}
