//! Storage backends
//!
//! The backend currently ships a single in-memory store used for
//! development and tests. Anything implementing
//! [`crate::core::RecordSource`] can back the query engine instead.

pub mod in_memory;

pub use in_memory::InMemoryStore;

use thiserror::Error;
use uuid::Uuid;

/// Errors raised by storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage lock poisoned: {0}")]
    LockPoisoned(String),

    #[error("{resource} with id '{id}' not found")]
    NotFound { resource: &'static str, id: Uuid },
}
