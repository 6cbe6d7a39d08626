//! Eager-load registry
//!
//! Some entity types must bring related child records along before a
//! list query counts and filters (invoice lines, lookup detail rows).
//! Each such type registers a [`Loader`] here; the engine asks the
//! registry to attach children for whatever type it is querying, and
//! types with no registered loader pass through untouched. Adding
//! eager-load behavior for a new entity is a registration, never an
//! engine change.

use anyhow::Result;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

/// Attaches related child data onto a batch of parent records
pub trait Loader<T>: Send + Sync {
    /// Populate the child collections of every record in the batch
    fn attach(&self, records: Vec<T>) -> Result<Vec<T>>;
}

/// Per-entity-type table of eager-loaders
#[derive(Default)]
pub struct EagerLoadRegistry {
    loaders: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl EagerLoadRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the loader for entity type `T`, replacing any previous
    /// registration
    pub fn register<T: 'static>(&mut self, loader: Arc<dyn Loader<T>>) {
        self.loaders.insert(TypeId::of::<T>(), Box::new(loader));
    }

    /// Whether a loader is registered for `T`
    pub fn has<T: 'static>(&self) -> bool {
        self.loaders.contains_key(&TypeId::of::<T>())
    }

    /// Run the registered loader for `T`, or pass the batch through
    /// unchanged when none is registered
    pub fn attach<T: 'static>(&self, records: Vec<T>) -> Result<Vec<T>> {
        match self
            .loaders
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.downcast_ref::<Arc<dyn Loader<T>>>())
        {
            Some(loader) => loader.attach(records),
            None => Ok(records),
        }
    }
}
