//! Sales invoice entities and their eager-loader

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::core::entity::Entity;
use crate::erp_entity;
use crate::query::loader::Loader;
use crate::storage::InMemoryStore;

erp_entity!(
    /// One line of a sales invoice
    SalesInvoiceLine, "sales_invoice_line", "sales_invoice_lines", {
        invoice_id: Uuid,
        product_id: Uuid,
        quantity: i64,
        unit_price: f64,
        line_total: f64,
    }
);

erp_entity!(
    /// A point-of-sale invoice issued by a branch
    SalesInvoice, "sales_invoice", "sales_invoices", {
        branch_id: Uuid,
        invoice_number: String,
        customer_id: Option<Uuid>,
        cashier_id: Uuid,
        subtotal: f64,
        discount: f64,
        total: f64,
        paid: f64,
        issued_at: DateTime<Utc>,
    },
    children {
        lines: SalesInvoiceLine,
    }
);

impl SalesInvoice {
    /// Amount still owed on this invoice
    pub fn outstanding(&self) -> f64 {
        self.total - self.paid
    }
}

/// Eager-loader attaching non-deleted lines to their invoices
pub struct InvoiceLineLoader {
    lines: Arc<InMemoryStore<SalesInvoiceLine>>,
}

impl InvoiceLineLoader {
    pub fn new(lines: Arc<InMemoryStore<SalesInvoiceLine>>) -> Self {
        Self { lines }
    }
}

impl Loader<SalesInvoice> for InvoiceLineLoader {
    fn attach(&self, invoices: Vec<SalesInvoice>) -> Result<Vec<SalesInvoice>> {
        let lines = self.lines.snapshot()?;
        Ok(invoices
            .into_iter()
            .map(|mut invoice| {
                invoice.lines = lines
                    .iter()
                    .filter(|line| line.invoice_id == invoice.id && !line.is_deleted())
                    .cloned()
                    .collect();
                invoice
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::FieldType;
    use crate::core::schema::Schema;

    fn invoice(number: &str) -> SalesInvoice {
        SalesInvoice::new(
            Uuid::new_v4(),
            number.to_string(),
            None,
            Uuid::new_v4(),
            10.0,
            1.0,
            9.0,
            5.0,
            Utc::now(),
        )
    }

    fn line(invoice_id: Uuid, quantity: i64) -> SalesInvoiceLine {
        SalesInvoiceLine::new(invoice_id, Uuid::new_v4(), quantity, 2.0, quantity as f64 * 2.0)
    }

    #[test]
    fn test_outstanding() {
        assert!((invoice("INV-1").outstanding() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_lines_are_not_queryable_fields() {
        assert!(!SalesInvoice::field_names().contains(&"lines"));
        assert_eq!(SalesInvoice::field_type("lines"), None);
        assert_eq!(
            SalesInvoice::field_type("issued_at"),
            Some(FieldType::DateTime)
        );
    }

    #[test]
    fn test_loader_attaches_matching_lines() {
        let store = Arc::new(InMemoryStore::new());
        let first = invoice("INV-1");
        let second = invoice("INV-2");

        store.insert(line(first.id, 2)).unwrap();
        store.insert(line(first.id, 1)).unwrap();
        store.insert(line(second.id, 5)).unwrap();

        let loader = InvoiceLineLoader::new(store);
        let loaded = loader.attach(vec![first.clone(), second.clone()]).unwrap();

        assert_eq!(loaded[0].lines.len(), 2);
        assert_eq!(loaded[1].lines.len(), 1);
        assert!(loaded[0].lines.iter().all(|l| l.invoice_id == first.id));
    }

    #[test]
    fn test_loader_skips_soft_deleted_lines() {
        let store = Arc::new(InMemoryStore::new());
        let parent = invoice("INV-9");

        let mut removed = line(parent.id, 3);
        removed.soft_delete();
        store.insert(removed).unwrap();
        store.insert(line(parent.id, 1)).unwrap();

        let loader = InvoiceLineLoader::new(store);
        let loaded = loader.attach(vec![parent]).unwrap();
        assert_eq!(loaded[0].lines.len(), 1);
        assert_eq!(loaded[0].lines[0].quantity, 1);
    }
}
