//! Local fallback storage for tasks and conversations.
//!
//! When no backend is wired up, a startup-selected store serves the
//! task-by-id and conversation routes instead of proxying. This is an
//! explicit dev/test seam; data lives for the process lifetime only.

pub mod base;
pub mod memory_store;
pub mod no_store;

pub use base::{create_store, FallbackStore};
pub use memory_store::MemoryStore;
pub use no_store::NoFallback;
