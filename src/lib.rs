//! # Apotheca
//!
//! A multi-branch pharmacy ERP backend built around one generic
//! dynamic query engine.
//!
//! ## Features
//!
//! - **Dynamic list queries**: every entity's list endpoint accepts the
//!   same filter/sort/pagination/projection description and returns a
//!   paged envelope
//! - **Schema-driven**: entities describe their queryable fields once;
//!   the engine never hardcodes entity shapes
//! - **Permissive by design**: unknown fields and unparseable filter
//!   values degrade softly and are reported in response metadata
//!   instead of failing requests
//! - **Eager-load registry**: entity types declare which child records
//!   ride along with list queries, without touching engine code
//! - **Macro-declared entities**: struct, base fields and queryable
//!   schema generated from one declaration
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use apotheca::prelude::*;
//!
//! erp_entity!(
//!     Supplier, "supplier", "suppliers", {
//!         name: String,
//!         rating: i64,
//!     }
//! );
//!
//! let store = InMemoryStore::new();
//! store.insert(Supplier::new("MedSupply".to_string(), 5))?;
//!
//! let engine = QueryEngine::new();
//! let request = QueryRequest::default()
//!     .filter("rating", FilterOperator::GreaterOrEqual, "4")
//!     .order_by("name", "asc")
//!     .paginate(1, 20);
//!
//! let page = engine.execute(&store, &request).await?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod query;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        entity::Entity,
        error::{ErpError, ErpResult},
        field::{FieldFormat, FieldScalar, FieldType, FieldValue},
        schema::Schema,
        service::RecordSource,
    };

    // === Macros ===
    pub use crate::erp_entity;

    // === Query Engine ===
    pub use crate::query::{
        EagerLoadRegistry, FilterCriterion, FilterOperator, Loader, Page, PageSpec, QueryEngine,
        QueryReply, QueryRequest, Row, SortKey,
    };

    // === Entities ===
    pub use crate::entities::{
        Branch, Lookup, LookupItem, Product, SalesInvoice, SalesInvoiceLine, Stakeholder,
        StockLevel, StockTransaction, User,
    };

    // === Storage ===
    pub use crate::storage::InMemoryStore;

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::{AppState, ProvidesStore};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
