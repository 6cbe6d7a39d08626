//! The generic dynamic query engine
//!
//! Every list endpoint in the backend accepts the same opaque query
//! description (filters, sort keys, pagination bounds, optional column
//! subset) and this module turns it into an executed, paginated result
//! against any entity type that implements [`crate::core::Schema`].
//!
//! The pipeline is linear: compile filters ([`predicate`]), compose a
//! multi-key order ([`sort`]), attach registered child data
//! ([`loader`]), then either paginate full entities or project rows
//! first ([`projection`], [`page`]), all orchestrated by
//! [`engine::QueryEngine`].

pub mod coerce;
pub mod engine;
pub mod loader;
pub mod page;
pub mod predicate;
pub mod projection;
pub mod request;
pub mod sort;

pub use engine::{QueryEngine, QueryReply};
pub use loader::{EagerLoadRegistry, Loader};
pub use page::Page;
pub use projection::Row;
pub use request::{FilterCriterion, FilterOperator, PageSpec, QueryRequest, SortKey};

/// Shared fixture entity for the query module's unit tests
#[cfg(test)]
pub(crate) mod testutil {
    use crate::core::field::{FieldScalar, FieldType, FieldValue};
    use crate::core::schema::Schema;

    #[derive(Debug, Clone)]
    pub struct Med {
        pub name: String,
        pub form: Option<String>,
        pub price: f64,
        pub stock: i64,
        pub active: bool,
    }

    impl Schema for Med {
        fn field_names() -> &'static [&'static str] {
            &["name", "form", "price", "stock", "active"]
        }

        fn field_type(field: &str) -> Option<FieldType> {
            match field {
                "name" => Some(<String as FieldScalar>::KIND),
                "form" => Some(<Option<String> as FieldScalar>::KIND),
                "price" => Some(<f64 as FieldScalar>::KIND),
                "stock" => Some(<i64 as FieldScalar>::KIND),
                "active" => Some(<bool as FieldScalar>::KIND),
                _ => None,
            }
        }

        fn field_value(&self, field: &str) -> Option<FieldValue> {
            match field {
                "name" => Some(self.name.to_field_value()),
                "form" => Some(self.form.to_field_value()),
                "price" => Some(self.price.to_field_value()),
                "stock" => Some(self.stock.to_field_value()),
                "active" => Some(self.active.to_field_value()),
                _ => None,
            }
        }
    }

    pub fn med(name: &str, form: Option<&str>, price: f64, stock: i64, active: bool) -> Med {
        Med {
            name: name.to_string(),
            form: form.map(String::from),
            price,
            stock,
            active,
        }
    }

    pub fn meds() -> Vec<Med> {
        vec![
            med("Aspirin", Some("tablet"), 2.5, 100, true),
            med("Ibuprofen", Some("tablet"), 3.0, 50, true),
            med("Bandage", None, 1.5, 200, false),
        ]
    }
}
