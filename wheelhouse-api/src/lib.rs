//! Wheelhouse Admin API
//!
//! The synchronization layer between a client's configuration draft
//! and the authoritative store: the store contract, an in-memory store
//! with the reference server's semantics, and the editing session
//! state machine.

pub mod memory;
pub mod session;
pub mod store;

pub use memory::MemoryStore;
pub use session::{AdminSession, LocationId, LocationRoster, SessionState, TrackedLocation};
pub use store::{ConfigStore, ServerStats, ServerStatus};
