//! ERP domain entities
//!
//! Every entity is declared once through `erp_entity!`, which generates
//! the struct, the base [`crate::core::Entity`] impl and the
//! [`crate::core::Schema`] impl the query engine introspects.

pub mod branch;
pub mod invoice;
pub mod lookup;
pub mod macros;
pub mod product;
pub mod stakeholder;
pub mod stock;
pub mod stock_transaction;
pub mod user;

pub use branch::Branch;
pub use invoice::{InvoiceLineLoader, SalesInvoice, SalesInvoiceLine};
pub use lookup::{Lookup, LookupItem, LookupItemLoader};
pub use product::Product;
pub use stakeholder::Stakeholder;
pub use stock::StockLevel;
pub use stock_transaction::StockTransaction;
pub use user::User;
