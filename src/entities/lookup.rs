//! Configurable lookup tables and their eager-loader
//!
//! Lookups are admin-editable code lists (payment methods, dosage
//! forms, transaction kinds, ...). A [`Lookup`] header owns a set of
//! [`LookupItem`] detail rows; list queries always want the non-deleted
//! items attached, which is what [`LookupItemLoader`] does through the
//! eager-load registry.

use anyhow::Result;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::entity::Entity;
use crate::erp_entity;
use crate::query::loader::Loader;
use crate::storage::InMemoryStore;

erp_entity!(
    /// One detail row of a lookup table
    LookupItem, "lookup_item", "lookup_items", {
        lookup_id: Uuid,
        code: String,
        label: String,
        sort_order: i64,
        is_default: bool,
    }
);

erp_entity!(
    /// A lookup table header
    Lookup, "lookup", "lookups", {
        code: String,
        name: String,
    },
    children {
        items: LookupItem,
    }
);

/// Eager-loader attaching non-deleted items, ordered by `sort_order`
pub struct LookupItemLoader {
    items: Arc<InMemoryStore<LookupItem>>,
}

impl LookupItemLoader {
    pub fn new(items: Arc<InMemoryStore<LookupItem>>) -> Self {
        Self { items }
    }
}

impl Loader<Lookup> for LookupItemLoader {
    fn attach(&self, lookups: Vec<Lookup>) -> Result<Vec<Lookup>> {
        let items = self.items.snapshot()?;
        Ok(lookups
            .into_iter()
            .map(|mut lookup| {
                lookup.items = items
                    .iter()
                    .filter(|item| item.lookup_id == lookup.id && !item.is_deleted())
                    .cloned()
                    .collect();
                lookup.items.sort_by_key(|item| item.sort_order);
                lookup
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(lookup_id: Uuid, code: &str, sort_order: i64) -> LookupItem {
        LookupItem::new(lookup_id, code.to_string(), code.to_uppercase(), sort_order, false)
    }

    #[test]
    fn test_items_excluded_from_schema() {
        use crate::core::schema::Schema;
        assert!(!Lookup::field_names().contains(&"items"));
        assert!(Lookup::field_names().contains(&"code"));
    }

    #[test]
    fn test_loader_attaches_sorted_items() {
        let store = Arc::new(InMemoryStore::new());
        let header = Lookup::new("payment_method".to_string(), "Payment methods".to_string());

        store.insert(item(header.id, "card", 2)).unwrap();
        store.insert(item(header.id, "cash", 1)).unwrap();
        store.insert(item(Uuid::new_v4(), "other", 0)).unwrap();

        let loader = LookupItemLoader::new(store);
        let loaded = loader.attach(vec![header]).unwrap();

        let codes: Vec<&str> = loaded[0].items.iter().map(|i| i.code.as_str()).collect();
        assert_eq!(codes, ["cash", "card"]);
    }

    #[test]
    fn test_loader_skips_soft_deleted_items() {
        let store = Arc::new(InMemoryStore::new());
        let header = Lookup::new("dosage_form".to_string(), "Dosage forms".to_string());

        let mut gone = item(header.id, "powder", 3);
        gone.soft_delete();
        store.insert(gone).unwrap();
        store.insert(item(header.id, "tablet", 1)).unwrap();

        let loader = LookupItemLoader::new(store);
        let loaded = loader.attach(vec![header]).unwrap();
        assert_eq!(loaded[0].items.len(), 1);
        assert_eq!(loaded[0].items[0].code, "tablet");
    }
}
