//! Collaborator trait for queryable record sources

use anyhow::Result;
use async_trait::async_trait;

/// An abstract queryable source of records of type `T`
///
/// This is the only interface the query engine consumes: one full
/// materialization of the collection. Filtering, ordering, projection
/// and pagination all happen engine-side over the returned records, so
/// the source stays agnostic of query semantics. A failing source is
/// fatal to the whole call and propagates unmodified.
#[async_trait]
pub trait RecordSource<T>: Send + Sync {
    /// Fetch every record in the collection
    async fn fetch_all(&self) -> Result<Vec<T>>;
}
