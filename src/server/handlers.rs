//! HTTP handlers for dynamic list queries
//!
//! One generic handler serves every entity type: the router
//! instantiates it per resource, and [`ProvidesStore`] picks the right
//! store out of the shared state. Handlers stay thin; all query
//! semantics live in the engine.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;

use crate::core::entity::Entity;
use crate::core::error::ErpError;
use crate::core::schema::Schema;
use crate::entities::{
    Branch, InvoiceLineLoader, Lookup, LookupItem, LookupItemLoader, Product, SalesInvoice,
    SalesInvoiceLine, Stakeholder, StockLevel, StockTransaction, User,
};
use crate::query::engine::{QueryEngine, QueryReply};
use crate::query::request::QueryRequest;
use crate::storage::InMemoryStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<QueryEngine>,
    pub branches: Arc<InMemoryStore<Branch>>,
    pub products: Arc<InMemoryStore<Product>>,
    pub stock_levels: Arc<InMemoryStore<StockLevel>>,
    pub stock_transactions: Arc<InMemoryStore<StockTransaction>>,
    pub invoices: Arc<InMemoryStore<SalesInvoice>>,
    pub invoice_lines: Arc<InMemoryStore<SalesInvoiceLine>>,
    pub stakeholders: Arc<InMemoryStore<Stakeholder>>,
    pub users: Arc<InMemoryStore<User>>,
    pub lookups: Arc<InMemoryStore<Lookup>>,
    pub lookup_items: Arc<InMemoryStore<LookupItem>>,
}

impl AppState {
    /// Build fresh stores and an engine with the eager-loaders the
    /// domain needs (invoice lines, lookup items) already registered
    pub fn new() -> Self {
        let invoice_lines = Arc::new(InMemoryStore::new());
        let lookup_items = Arc::new(InMemoryStore::new());

        let mut engine = QueryEngine::new();
        engine.register_loader::<SalesInvoice>(Arc::new(InvoiceLineLoader::new(
            invoice_lines.clone(),
        )));
        engine.register_loader::<Lookup>(Arc::new(LookupItemLoader::new(lookup_items.clone())));

        Self {
            engine: Arc::new(engine),
            branches: Arc::new(InMemoryStore::new()),
            products: Arc::new(InMemoryStore::new()),
            stock_levels: Arc::new(InMemoryStore::new()),
            stock_transactions: Arc::new(InMemoryStore::new()),
            invoices: Arc::new(InMemoryStore::new()),
            invoice_lines,
            stakeholders: Arc::new(InMemoryStore::new()),
            users: Arc::new(InMemoryStore::new()),
            lookups: Arc::new(InMemoryStore::new()),
            lookup_items,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Access to the store backing entity type `T`
pub trait ProvidesStore<T: Entity> {
    fn store(&self) -> &Arc<InMemoryStore<T>>;
}

macro_rules! provides_store {
    ($( $field:ident : $type:ty ),* $(,)?) => {
        $(
            impl ProvidesStore<$type> for AppState {
                fn store(&self) -> &Arc<InMemoryStore<$type>> {
                    &self.$field
                }
            }
        )*
    };
}

provides_store!(
    branches: Branch,
    products: Product,
    stock_levels: StockLevel,
    stock_transactions: StockTransaction,
    invoices: SalesInvoice,
    invoice_lines: SalesInvoiceLine,
    stakeholders: Stakeholder,
    users: User,
    lookups: Lookup,
    lookup_items: LookupItem,
);

/// Run a dynamic list query against the store for `T`
///
/// Returns full entities, or projected rows when the request names
/// columns. Store failures surface as 500s; everything else about a
/// malformed query degrades permissively inside the engine.
pub async fn query<T>(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryReply<T>>, ErpError>
where
    T: Entity + Schema + Serialize,
    AppState: ProvidesStore<T>,
{
    let store: &Arc<InMemoryStore<T>> = state.store();
    let reply = state.engine.run(store.as_ref(), &request).await?;
    Ok(Json(reply))
}

/// Fetch a single record by id
pub async fn get_by_id<T>(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<T>, ErpError>
where
    T: Entity + Schema + Serialize,
    AppState: ProvidesStore<T>,
{
    let store: &Arc<InMemoryStore<T>> = state.store();
    let record = store.get(&id)?.ok_or(ErpError::NotFound {
        resource: T::resource_name_singular(),
        id,
    })?;
    Ok(Json(record))
}

/// Liveness probe
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
