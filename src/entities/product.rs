//! Product catalog entity

use crate::core::field::{FieldFormat, FieldScalar};
use crate::erp_entity;

erp_entity!(
    /// A sellable product, shared across branches
    Product, "product", "products", {
        name: String,
        generic_name: Option<String>,
        barcode: Option<String>,
        form: Option<String>,
        unit_price: f64,
        reorder_level: i64,
        requires_prescription: bool,
    }
);

impl Product {
    /// Whether the barcode, if present, is a well-formed EAN-13 code
    pub fn has_valid_barcode(&self) -> bool {
        match &self.barcode {
            Some(code) => FieldFormat::Barcode.validate(&code.to_field_value()),
            None => false,
        }
    }
}
