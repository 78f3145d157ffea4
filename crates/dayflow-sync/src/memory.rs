//! In-process event store for tests and the demo binary.

use chrono::Utc;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Notify;

use dayflow_schedule::{Event, EventDraft, EventPatch};

use crate::error::StoreError;

#[derive(Default)]
struct MemoryState {
    events: BTreeMap<String, Event>,
    next_id: u64,
}

/// Event store backed by process memory. Mirrors the remote contract,
/// including validation and not-found failures, so the planner behaves the
/// same against either backend.
#[derive(Default)]
pub struct MemoryEventStore {
    state: Mutex<MemoryState>,
    // Test hook: when set, mutations park here until notified.
    gate: Mutex<Option<Arc<Notify>>>,
}

impl MemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install already-materialized events, as if a previous session had
    /// created them.
    pub fn seed(&self, events: Vec<Event>) {
        let mut state = self.state.lock();
        for event in events {
            state.events.insert(event.id.clone(), event);
        }
    }

    /// Make every subsequent mutation wait on the returned handle.
    #[cfg(test)]
    pub(crate) fn hold_mutations(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.gate.lock() = Some(gate.clone());
        gate
    }

    async fn pause_point(&self) {
        let gate = self.gate.lock().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }

    pub async fn list_events(&self) -> Result<Vec<Event>, StoreError> {
        Ok(self.state.lock().events.values().cloned().collect())
    }

    pub async fn create_event(&self, draft: &EventDraft) -> Result<Event, StoreError> {
        self.pause_point().await;

        if draft.title.trim().is_empty() {
            return Err(StoreError::Validation("Title is required".to_string()));
        }

        let mut state = self.state.lock();
        state.next_id += 1;
        let event = Event {
            id: format!("evt-{}", state.next_id),
            title: draft.title.clone(),
            date: draft.date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            kind: draft.kind,
            description: draft.description.clone(),
            location: draft.location.clone(),
            cancelled: false,
            created_at: Utc::now(),
        };
        state.events.insert(event.id.clone(), event.clone());
        Ok(event)
    }

    pub async fn update_event(&self, id: &str, patch: &EventPatch) -> Result<Event, StoreError> {
        self.pause_point().await;

        if matches!(&patch.title, Some(title) if title.trim().is_empty()) {
            return Err(StoreError::Validation("Title is required".to_string()));
        }

        let mut state = self.state.lock();
        let event = state
            .events
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if let Some(title) = &patch.title {
            event.title = title.clone();
        }
        if let Some(date) = patch.date {
            event.date = date;
        }
        if let Some(start) = patch.start_time {
            event.start_time = start;
        }
        if let Some(end) = patch.end_time {
            event.end_time = end;
        }
        if let Some(kind) = patch.kind {
            event.kind = kind;
        }
        if let Some(description) = &patch.description {
            event.description = Some(description.clone());
        }
        if let Some(location) = &patch.location {
            event.location = Some(location.clone());
        }
        if let Some(cancelled) = patch.cancelled {
            event.cancelled = cancelled;
        }

        Ok(event.clone())
    }

    pub async fn delete_event(&self, id: &str) -> Result<(), StoreError> {
        self.pause_point().await;

        self.state
            .lock()
            .events
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}
