//! Query orchestration
//!
//! One call threads a record source through the whole pipeline:
//! fetch, eager-load, filter, sort, optionally project, paginate. The
//! engine holds no per-request state: every predicate, comparator and
//! column set is built fresh inside the call, so a single engine is
//! shared freely across concurrent requests. The only suspension point
//! is the source fetch; a failing source fails the whole call.

use anyhow::Result;
use serde::Serialize;
use serde_json::json;

use crate::core::schema::Schema;
use crate::core::service::RecordSource;
use crate::query::loader::{EagerLoadRegistry, Loader};
use crate::query::page::{self, Page};
use crate::query::predicate;
use crate::query::projection::{self, Row};
use crate::query::request::QueryRequest;
use crate::query::sort;

use std::sync::Arc;

/// A finished query: either full entities or projected rows, depending
/// on whether the request named columns
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum QueryReply<T> {
    Entities(Page<T>),
    Rows(Page<Row>),
}

/// The generic dynamic query engine
///
/// Construct one per application, register eager-loaders for the
/// entity types that need them, and run [`QueryRequest`]s against any
/// [`RecordSource`].
#[derive(Default)]
pub struct QueryEngine {
    loaders: EagerLoadRegistry,
}

impl QueryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the eager-loader for entity type `T`
    pub fn register_loader<T: 'static>(&mut self, loader: Arc<dyn Loader<T>>) {
        self.loaders.register(loader);
    }

    /// Execute a request, dispatching on the presence of `columns`
    pub async fn run<T>(
        &self,
        source: &dyn RecordSource<T>,
        request: &QueryRequest,
    ) -> Result<QueryReply<T>>
    where
        T: Schema + Send + Sync + 'static,
    {
        if request.columns.is_some() {
            Ok(QueryReply::Rows(self.execute_projected(source, request).await?))
        } else {
            Ok(QueryReply::Entities(self.execute(source, request).await?))
        }
    }

    /// Execute a request returning full entities
    pub async fn execute<T>(
        &self,
        source: &dyn RecordSource<T>,
        request: &QueryRequest,
    ) -> Result<Page<T>>
    where
        T: Schema + Send + Sync + 'static,
    {
        let records = self.materialize(source).await?;

        let filters = predicate::compile::<T>(&request.filters);
        let mut records: Vec<T> = records.into_iter().filter(|r| filters.matches(r)).collect();

        let sorted = sort::compose::<T>(&request.sort);
        if let Some(comparator) = &sorted.comparator {
            records.sort_by(|a, b| comparator(a, b));
        }

        let mut page = page::paginate(records, &request.pagination);
        annotate(&mut page, &filters.dropped, &sorted.dropped, &[]);

        tracing::debug!(
            total_records = page.total_records,
            page_number = page.page_number,
            "query executed"
        );

        Ok(page)
    }

    /// Execute a request returning column-projected rows
    ///
    /// Paging a field subset requires a stable order; when the client
    /// supplied no usable sort key, ascending order on the first
    /// selected column is imposed before slicing.
    pub async fn execute_projected<T>(
        &self,
        source: &dyn RecordSource<T>,
        request: &QueryRequest,
    ) -> Result<Page<Row>>
    where
        T: Schema + Send + Sync + 'static,
    {
        let records = self.materialize(source).await?;

        let filters = predicate::compile::<T>(&request.filters);
        let mut records: Vec<T> = records.into_iter().filter(|r| filters.matches(r)).collect();

        let requested = request.columns.as_deref().unwrap_or(&[]);
        let columns = projection::resolve_columns::<T>(requested);

        let sorted = sort::compose::<T>(&request.sort);
        match &sorted.comparator {
            Some(comparator) => records.sort_by(|a, b| comparator(a, b)),
            None => {
                // Schema field lists are never empty, so after fallback
                // there is always a first column to order by.
                let comparator = sort::field_comparator::<T>(columns.columns[0]);
                records.sort_by(|a, b| comparator(a, b));
            }
        }

        let rows: Vec<Row> = records
            .iter()
            .map(|record| projection::project(record, &columns.columns))
            .collect();

        let mut page = page::paginate(rows, &request.pagination);
        annotate(&mut page, &filters.dropped, &sorted.dropped, &columns.dropped);

        tracing::debug!(
            total_records = page.total_records,
            columns = columns.columns.len(),
            "projected query executed"
        );

        Ok(page)
    }

    /// Fetch and eager-load: the single suspension point of a call
    async fn materialize<T>(&self, source: &dyn RecordSource<T>) -> Result<Vec<T>>
    where
        T: Schema + Send + Sync + 'static,
    {
        let records = source.fetch_all().await?;
        self.loaders.attach(records)
    }
}

/// Surface dropped criteria in the envelope metadata without affecting
/// the result set
fn annotate<R>(page: &mut Page<R>, filters: &[String], sort: &[String], columns: &[String]) {
    if !filters.is_empty() {
        page.insert_metadata("droppedFilters", json!(filters));
    }
    if !sort.is_empty() {
        page.insert_metadata("droppedSort", json!(sort));
    }
    if !columns.is_empty() {
        page.insert_metadata("droppedColumns", json!(columns));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::FieldValue;
    use crate::query::request::{FilterOperator, QueryRequest};
    use crate::query::testutil::{Med, med};
    use anyhow::anyhow;
    use async_trait::async_trait;

    struct VecSource(Vec<Med>);

    #[async_trait]
    impl RecordSource<Med> for VecSource {
        async fn fetch_all(&self) -> Result<Vec<Med>> {
            Ok(self.0.clone())
        }
    }

    struct BrokenSource;

    #[async_trait]
    impl RecordSource<Med> for BrokenSource {
        async fn fetch_all(&self) -> Result<Vec<Med>> {
            Err(anyhow!("store offline"))
        }
    }

    fn pharmacy() -> VecSource {
        VecSource(vec![
            med("Aspirin", Some("tablet"), 2.5, 100, true),
            med("Ibuprofen", Some("tablet"), 3.0, 50, true),
            med("Doliprane", Some("tablet"), 2.0, 60, true),
            med("Cough Syrup", Some("syrup"), 4.5, 20, false),
            med("Bandage", None, 1.5, 200, true),
        ])
    }

    #[tokio::test]
    async fn test_filter_sort_paginate() {
        let engine = QueryEngine::new();
        let request = QueryRequest::default()
            .filter("active", FilterOperator::Equal, "true")
            .order_by("price", "asc")
            .paginate(1, 2);

        let page = engine.execute(&pharmacy(), &request).await.unwrap();
        assert_eq!(page.total_records, 4);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.data[0].name, "Bandage");
        assert_eq!(page.data[1].name, "Doliprane");
        assert!(page.has_next_page);
    }

    #[tokio::test]
    async fn test_unknown_filter_field_leaves_results_untouched() {
        let engine = QueryEngine::new();

        let plain = QueryRequest::default().order_by("name", "asc");
        let with_typo = plain
            .clone()
            .filter("potencyy", FilterOperator::Equal, "10");

        let baseline = engine.execute(&pharmacy(), &plain).await.unwrap();
        let typod = engine.execute(&pharmacy(), &with_typo).await.unwrap();

        assert_eq!(baseline.total_records, typod.total_records);
        let names: Vec<_> = baseline.data.iter().map(|m| &m.name).collect();
        let typod_names: Vec<_> = typod.data.iter().map(|m| &m.name).collect();
        assert_eq!(names, typod_names);

        // The dropped criterion is surfaced in metadata
        assert_eq!(typod.metadata["droppedFilters"][0], "potencyy");
        assert!(baseline.metadata.is_empty());
    }

    #[tokio::test]
    async fn test_equal_roundtrip_on_observed_values() {
        let engine = QueryEngine::new();
        let all = engine
            .execute(&pharmacy(), &QueryRequest::all())
            .await
            .unwrap();

        for record in &all.data {
            let request = QueryRequest::all().filter(
                "name",
                FilterOperator::Equal,
                record.name.clone(),
            );
            let page = engine.execute(&pharmacy(), &request).await.unwrap();
            assert!(
                page.data.iter().any(|m| m.name == record.name),
                "Equal on observed value must return the row it came from"
            );
        }
    }

    #[tokio::test]
    async fn test_idempotence() {
        let engine = QueryEngine::new();
        let request = QueryRequest::default()
            .filter("form", FilterOperator::Equal, "tablet")
            .order_by("price", "desc")
            .paginate(1, 2);

        let first = engine.execute(&pharmacy(), &request).await.unwrap();
        let second = engine.execute(&pharmacy(), &request).await.unwrap();

        assert_eq!(first.total_records, second.total_records);
        assert_eq!(first.total_pages, second.total_pages);
        let first_names: Vec<_> = first.data.iter().map(|m| &m.name).collect();
        let second_names: Vec<_> = second.data.iter().map(|m| &m.name).collect();
        assert_eq!(first_names, second_names);
    }

    #[tokio::test]
    async fn test_get_all_returns_single_page() {
        let engine = QueryEngine::new();
        let page = engine
            .execute(&pharmacy(), &QueryRequest::all())
            .await
            .unwrap();
        assert_eq!(page.data.len(), 5);
        assert_eq!(page.page_number, 1);
        assert_eq!(page.page_size, 5);
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn test_projection_returns_rows() {
        let engine = QueryEngine::new();
        let request = QueryRequest::all().select(vec!["name", "price"]);

        let page = engine.execute_projected(&pharmacy(), &request).await.unwrap();
        assert_eq!(page.total_records, 5);
        let row = &page.data[0];
        assert_eq!(row.len(), 2);
        assert!(row.contains_key("name"));
        assert!(row.contains_key("price"));
    }

    #[tokio::test]
    async fn test_projection_imposes_order_when_unsorted() {
        let engine = QueryEngine::new();
        let request = QueryRequest::all().select(vec!["name"]);

        let page = engine.execute_projected(&pharmacy(), &request).await.unwrap();
        let names: Vec<_> = page
            .data
            .iter()
            .map(|row| row["name"].clone())
            .collect();
        let mut sorted = names.clone();
        sorted.sort_by(|a, b| {
            a.compare(b).unwrap_or(std::cmp::Ordering::Equal)
        });
        assert_eq!(names, sorted, "rows must be ordered by the first column");
    }

    #[tokio::test]
    async fn test_projection_unknown_columns_fall_back_to_all_fields() {
        let engine = QueryEngine::new();
        let request = QueryRequest::all().select(vec!["bogus"]);

        let page = engine.execute_projected(&pharmacy(), &request).await.unwrap();
        assert_eq!(page.data[0].len(), Med::field_names().len());
        assert_eq!(page.metadata["droppedColumns"][0], "bogus");
    }

    #[tokio::test]
    async fn test_projected_null_cells() {
        let engine = QueryEngine::new();
        let request = QueryRequest::all()
            .filter("name", FilterOperator::Equal, "Bandage")
            .select(vec!["name", "form"]);

        let page = engine.execute_projected(&pharmacy(), &request).await.unwrap();
        assert_eq!(page.data[0]["form"], FieldValue::Null);
    }

    #[tokio::test]
    async fn test_run_dispatches_on_columns() {
        let engine = QueryEngine::new();

        let entities = engine
            .run(&pharmacy(), &QueryRequest::all())
            .await
            .unwrap();
        assert!(matches!(entities, QueryReply::Entities(_)));

        let rows = engine
            .run(&pharmacy(), &QueryRequest::all().select(vec!["name"]))
            .await
            .unwrap();
        assert!(matches!(rows, QueryReply::Rows(_)));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let engine = QueryEngine::new();
        let err = engine
            .execute(&BrokenSource, &QueryRequest::all())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("store offline"));
    }

    #[tokio::test]
    async fn test_pagination_scenario_25_records() {
        let engine = QueryEngine::new();
        let source = VecSource(
            (0..25)
                .map(|i| med(&format!("med-{i:02}"), None, 1.0, i, true))
                .collect(),
        );
        let request = QueryRequest::default()
            .order_by("name", "asc")
            .paginate(3, 10);

        let page = engine.execute(&source, &request).await.unwrap();
        assert_eq!(page.data.len(), 5);
        assert_eq!(page.total_pages, 3);
        assert!(!page.has_next_page);
        assert!(page.has_previous_page);
    }
}
