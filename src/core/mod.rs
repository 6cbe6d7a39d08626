//! Core module containing fundamental traits and types for the backend

pub mod entity;
pub mod error;
pub mod field;
pub mod schema;
pub mod service;

pub use entity::Entity;
pub use error::{ErpError, ErpResult, ErrorResponse};
pub use field::{FieldFormat, FieldScalar, FieldType, FieldValue};
pub use schema::Schema;
pub use service::RecordSource;
