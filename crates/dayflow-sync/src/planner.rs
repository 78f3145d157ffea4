//! The event planner: single writer over the cached event set.

use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::instrument;

use dayflow_schedule::{Event, EventDraft, EventPatch};

use crate::error::StoreError;
use crate::store::EventStore;

/// Change notifications published to subscribers after a committed
/// mutation or refresh. Interim states are never published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannerChange {
    Refreshed,
    Created(String),
    Updated(String),
    Deleted(String),
}

#[derive(Default)]
struct PlannerState {
    events: HashMap<String, Event>,
    in_flight: HashSet<String>,
}

/// Owns the authoritative local copy of the event set.
///
/// Confirm-then-apply: the cache only ever reflects committed remote
/// responses, so a failed mutation leaves every view on the pre-mutation
/// state. Mutations on an existing id are at-most-one-in-flight; a second
/// one is rejected with [`StoreError::Busy`] while the first is pending.
///
/// The lock is never held across an await; remote calls run unlocked and
/// only the commit of their response takes the lock.
pub struct EventPlanner {
    store: EventStore,
    state: Mutex<PlannerState>,
    changes: broadcast::Sender<PlannerChange>,
}

impl EventPlanner {
    pub fn new(store: EventStore) -> Self {
        let (changes, _) = broadcast::channel(64);
        Self {
            store,
            state: Mutex::new(PlannerState::default()),
            changes,
        }
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<PlannerChange> {
        self.changes.subscribe()
    }

    fn publish(&self, change: PlannerChange) {
        // A send error only means nobody is listening right now.
        let _ = self.changes.send(change);
    }

    /// Replace the cache wholesale with the server's event set. Last fetch
    /// wins; there is no merge.
    #[instrument(skip(self), level = "info")]
    pub async fn refresh(&self) -> Result<(), StoreError> {
        let fetched = self.store.list_events().await?;
        {
            let mut state = self.state.lock();
            state.events = fetched
                .into_iter()
                .map(|event| (event.id.clone(), event))
                .collect();
        }
        self.publish(PlannerChange::Refreshed);
        Ok(())
    }

    /// Create an event. On success the server-assigned copy lands in the
    /// cache; on failure the cache is untouched.
    #[instrument(skip(self, draft), level = "info")]
    pub async fn create(&self, draft: &EventDraft) -> Result<Event, StoreError> {
        let created = self.store.create_event(draft).await?;
        self.state
            .lock()
            .events
            .insert(created.id.clone(), created.clone());
        self.publish(PlannerChange::Created(created.id.clone()));
        Ok(created)
    }

    /// Apply a partial field update to an event.
    ///
    /// If a refresh dropped the id while the request was in flight, the
    /// committed copy is not re-inserted; the server's set already won.
    #[instrument(skip(self, patch), level = "info")]
    pub async fn update(&self, id: &str, patch: &EventPatch) -> Result<Event, StoreError> {
        let _claim = self.claim(id)?;
        let updated = self.store.update_event(id, patch).await?;
        {
            let mut state = self.state.lock();
            if let Some(slot) = state.events.get_mut(id) {
                *slot = updated.clone();
            }
        }
        self.publish(PlannerChange::Updated(id.to_string()));
        Ok(updated)
    }

    /// Mark an event cancelled, preserving every other field. The event
    /// stays in the set for log views until explicitly deleted.
    pub async fn cancel(&self, id: &str) -> Result<Event, StoreError> {
        self.update(id, &EventPatch::cancel()).await
    }

    /// Delete an event outright.
    #[instrument(skip(self), level = "info")]
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let _claim = self.claim(id)?;
        self.store.delete_event(id).await?;
        self.state.lock().events.remove(id);
        self.publish(PlannerChange::Deleted(id.to_string()));
        Ok(())
    }

    /// Snapshot of the full cached set in deterministic order: date, then
    /// start time, then id.
    pub fn snapshot(&self) -> Vec<Event> {
        let state = self.state.lock();
        let mut events: Vec<Event> = state.events.values().cloned().collect();
        events.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.schedule_cmp(b)));
        events
    }

    /// Cached event by id, if present.
    pub fn get(&self, id: &str) -> Option<Event> {
        self.state.lock().events.get(id).cloned()
    }

    /// Number of non-cancelled events in the cache.
    pub fn active_count(&self) -> usize {
        self.state
            .lock()
            .events
            .values()
            .filter(|event| !event.cancelled)
            .count()
    }

    /// Claim an id for a mutation; the claim is released when the guard
    /// drops, on every exit path.
    fn claim(&self, id: &str) -> Result<InFlightClaim<'_>, StoreError> {
        let mut state = self.state.lock();
        if !state.in_flight.insert(id.to_string()) {
            return Err(StoreError::Busy(id.to_string()));
        }
        Ok(InFlightClaim {
            planner: self,
            id: id.to_string(),
        })
    }

    /// Run `refresh()` on a fixed interval until the planner is dropped.
    /// Failures are logged, never retried within a tick.
    pub fn spawn_refresher(self: &Arc<Self>, every: Duration) -> tokio::task::JoinHandle<()> {
        let planner = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(planner) = planner.upgrade() else {
                    break;
                };
                if let Err(err) = planner.refresh().await {
                    tracing::warn!("periodic refresh failed: {err}");
                }
            }
        })
    }
}

struct InFlightClaim<'a> {
    planner: &'a EventPlanner,
    id: String,
}

impl Drop for InFlightClaim<'_> {
    fn drop(&mut self) {
        self.planner.state.lock().in_flight.remove(&self.id);
    }
}
