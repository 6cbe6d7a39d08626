//! Macro for reducing boilerplate when defining ERP entities
//!
//! Every entity carries the same base fields (id + audit timestamps)
//! and needs `Entity` plus `Schema` implementations that agree with its
//! struct declaration. `erp_entity!` generates all of it from one
//! declaration, so the queryable schema can never drift from the
//! struct.

/// Define an ERP entity with generated `Entity` and `Schema` impls
///
/// # Example
/// ```rust,ignore
/// erp_entity!(
///     /// A pharmacy branch
///     Branch, "branch", "branches", {
///         name: String,
///         code: String,
///         is_active: bool,
///     }
/// );
/// ```
///
/// Child collections (populated only by eager-loaders, excluded from
/// the queryable schema) go in a trailing `children` block:
/// ```rust,ignore
/// erp_entity!(
///     SalesInvoice, "sales_invoice", "sales_invoices", {
///         invoice_number: String,
///         total: f64,
///     },
///     children {
///         lines: SalesInvoiceLine,
///     }
/// );
/// ```
#[macro_export]
macro_rules! erp_entity {
    (
        $(#[$meta:meta])*
        $type:ident, $singular:expr, $plural:expr, {
            $( $field:ident : $fty:ty ),* $(,)?
        }
    ) => {
        $crate::erp_entity!(
            $(#[$meta])*
            $type, $singular, $plural, {
                $( $field : $fty ),*
            },
            children {}
        );
    };

    (
        $(#[$meta:meta])*
        $type:ident, $singular:expr, $plural:expr, {
            $( $field:ident : $fty:ty ),* $(,)?
        },
        children {
            $( $child:ident : $cty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $type {
            /// Unique identifier for this record
            pub id: ::uuid::Uuid,

            /// When this record was created
            pub created_at: ::chrono::DateTime<::chrono::Utc>,

            /// When this record was last updated
            pub updated_at: ::chrono::DateTime<::chrono::Utc>,

            /// When this record was soft-deleted (if applicable)
            pub deleted_at: Option<::chrono::DateTime<::chrono::Utc>>,

            $( pub $field : $fty, )*

            $(
                /// Related child records, populated by the eager-load registry
                #[serde(default, skip_serializing_if = "Vec::is_empty")]
                pub $child : Vec<$cty>,
            )*
        }

        impl $crate::core::entity::Entity for $type {
            fn resource_name() -> &'static str {
                $plural
            }

            fn resource_name_singular() -> &'static str {
                $singular
            }

            fn id(&self) -> ::uuid::Uuid {
                self.id
            }

            fn created_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.created_at
            }

            fn updated_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.updated_at
            }

            fn deleted_at(&self) -> Option<::chrono::DateTime<::chrono::Utc>> {
                self.deleted_at
            }
        }

        impl $crate::core::schema::Schema for $type {
            fn field_names() -> &'static [&'static str] {
                &[
                    "id",
                    "created_at",
                    "updated_at",
                    "deleted_at",
                    $( stringify!($field) ),*
                ]
            }

            fn field_type(field: &str) -> Option<$crate::core::field::FieldType> {
                match field {
                    "id" => Some(<::uuid::Uuid as $crate::core::field::FieldScalar>::KIND),
                    "created_at" | "updated_at" | "deleted_at" => Some(
                        <::chrono::DateTime<::chrono::Utc> as $crate::core::field::FieldScalar>::KIND,
                    ),
                    $(
                        stringify!($field) => Some(
                            <$fty as $crate::core::field::FieldScalar>::KIND,
                        ),
                    )*
                    _ => None,
                }
            }

            fn field_value(&self, field: &str) -> Option<$crate::core::field::FieldValue> {
                match field {
                    "id" => Some($crate::core::field::FieldScalar::to_field_value(&self.id)),
                    "created_at" => {
                        Some($crate::core::field::FieldScalar::to_field_value(&self.created_at))
                    }
                    "updated_at" => {
                        Some($crate::core::field::FieldScalar::to_field_value(&self.updated_at))
                    }
                    "deleted_at" => {
                        Some($crate::core::field::FieldScalar::to_field_value(&self.deleted_at))
                    }
                    $(
                        stringify!($field) => Some(
                            $crate::core::field::FieldScalar::to_field_value(&self.$field),
                        ),
                    )*
                    _ => None,
                }
            }
        }

        impl $type {
            /// Create a new record with fresh id and timestamps
            pub fn new( $( $field : $fty ),* ) -> Self {
                Self {
                    id: ::uuid::Uuid::new_v4(),
                    created_at: ::chrono::Utc::now(),
                    updated_at: ::chrono::Utc::now(),
                    deleted_at: None,
                    $( $field, )*
                    $( $child : Vec::new(), )*
                }
            }

            /// Soft delete this record (sets deleted_at timestamp)
            pub fn soft_delete(&mut self) {
                self.deleted_at = Some(::chrono::Utc::now());
                self.updated_at = ::chrono::Utc::now();
            }

            /// Restore a soft-deleted record (clears deleted_at timestamp)
            pub fn restore(&mut self) {
                self.deleted_at = None;
                self.updated_at = ::chrono::Utc::now();
            }

            /// Update the updated_at timestamp to now
            pub fn touch(&mut self) {
                self.updated_at = ::chrono::Utc::now();
            }
        }
    };
}
