//! Synchronization layer for Dayflow.
//!
//! Owns the authoritative local copy of the event set, talks to the remote
//! store, and notifies views of committed changes.

pub mod error;
pub mod http;
pub mod memory;
pub mod planner;
pub mod store;

pub use error::StoreError;
pub use http::HttpEventStore;
pub use memory::MemoryEventStore;
pub use planner::{EventPlanner, PlannerChange};
pub use store::EventStore;
