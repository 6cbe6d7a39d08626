//! Stock movement entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::erp_entity;

/// Movement kinds recognized by stock reports
///
/// Kept as plain strings on the record so new kinds can be introduced
/// through the configurable lookup tables without a schema change.
pub mod kind {
    pub const PURCHASE: &str = "purchase";
    pub const SALE: &str = "sale";
    pub const TRANSFER_IN: &str = "transfer_in";
    pub const TRANSFER_OUT: &str = "transfer_out";
    pub const ADJUSTMENT: &str = "adjustment";
}

erp_entity!(
    /// One stock movement at a branch: purchases in, sales out,
    /// inter-branch transfers and manual adjustments
    StockTransaction, "stock_transaction", "stock_transactions", {
        branch_id: Uuid,
        product_id: Uuid,
        kind: String,
        quantity: i64,
        unit_cost: f64,
        reference: Option<String>,
        occurred_at: DateTime<Utc>,
    }
);

impl StockTransaction {
    /// Signed quantity: inbound kinds count positive, outbound negative
    pub fn signed_quantity(&self) -> i64 {
        match self.kind.as_str() {
            kind::SALE | kind::TRANSFER_OUT => -self.quantity,
            _ => self.quantity,
        }
    }
}
