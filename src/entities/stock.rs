//! Per-branch stock level entity

use chrono::NaiveDate;
use uuid::Uuid;

use crate::erp_entity;

erp_entity!(
    /// On-hand quantity of one product at one branch, per batch
    StockLevel, "stock_level", "stock_levels", {
        branch_id: Uuid,
        product_id: Uuid,
        quantity: i64,
        batch_number: Option<String>,
        expiry_date: Option<NaiveDate>,
        unit_cost: f64,
    }
);

impl StockLevel {
    /// Whether this batch is expired as of the given date
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiry_date.is_some_and(|expiry| expiry < today)
    }
}
