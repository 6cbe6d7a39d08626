//! Stakeholder entity: customers and suppliers

use crate::erp_entity;

/// Stakeholder kinds
pub mod kind {
    pub const CUSTOMER: &str = "customer";
    pub const SUPPLIER: &str = "supplier";
}

erp_entity!(
    /// A party the pharmacy trades with: a customer or a supplier
    Stakeholder, "stakeholder", "stakeholders", {
        name: String,
        kind: String,
        phone: Option<String>,
        email: Option<String>,
        opening_balance: f64,
    }
);

impl Stakeholder {
    pub fn is_customer(&self) -> bool {
        self.kind == kind::CUSTOMER
    }

    pub fn is_supplier(&self) -> bool {
        self.kind == kind::SUPPLIER
    }
}
