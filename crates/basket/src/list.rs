use serde_json::Value;
use tracing::debug;

use crate::action::{ItemPatch, ListOp, classify_response};
use crate::types::ListItem;

/// A container that accepts classified reconciler ops.
///
/// Implementations own their container for the page lifetime; callers read
/// snapshots and never mutate through them. `apply_response` classifies a raw
/// apply response and applies the resulting ops in order; the untagged shape
/// stops here.
pub trait Reconciler {
    fn apply_op(&mut self, op: ListOp);

    fn apply_response(&mut self, raw: &Value) {
        for op in classify_response(raw) {
            self.apply_op(op);
        }
    }
}

/// Ephemeral, name-keyed shopping list. Never round-trips to the backend.
#[derive(Debug, Clone, Default)]
pub struct ShoppingList {
    items: Vec<ListItem>,
}

impl ShoppingList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        let needle = name.to_lowercase();
        self.items.iter().position(|i| i.name.to_lowercase() == needle)
    }

    /// Insert or merge by case-insensitive name. A merge overwrites quantity,
    /// price, category, and the stored casing of the name with the incoming
    /// values; a new entry is prepended.
    pub fn upsert(&mut self, patch: ItemPatch) {
        if patch.name.is_empty() {
            return;
        }
        match self.position(&patch.name) {
            Some(idx) => {
                let item = &mut self.items[idx];
                item.name = patch.name;
                item.qty = patch.qty;
                item.price = patch.price;
                item.category = patch.category;
            }
            None => self.items.insert(
                0,
                ListItem {
                    name: patch.name,
                    qty: patch.qty,
                    price: patch.price,
                    category: patch.category,
                },
            ),
        }
    }

    /// No-op when the name is absent.
    pub fn remove_by_name(&mut self, name: &str) {
        let needle = name.to_lowercase();
        self.items.retain(|i| i.name.to_lowercase() != needle);
    }

    /// `qty <= 0` means removal, not a zero-quantity line. Absent names are
    /// a no-op either way.
    pub fn set_quantity(&mut self, name: &str, qty: i64) {
        if qty <= 0 {
            self.remove_by_name(name);
            return;
        }
        if let Some(idx) = self.position(name) {
            self.items[idx].qty = qty.min(u32::MAX as i64) as u32;
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Recomputed on every read. An unknown price counts as 0 here but still
    /// renders as unknown (see [`crate::format_price`]).
    pub fn total(&self) -> f64 {
        self.items
            .iter()
            .map(|i| i.price.unwrap_or(0.0) * f64::from(i.qty))
            .sum()
    }
}

impl Reconciler for ShoppingList {
    fn apply_op(&mut self, op: ListOp) {
        debug!(?op, "list op");
        match op {
            ListOp::Upsert(patch) => self.upsert(patch),
            ListOp::Remove(name) => self.remove_by_name(&name),
            ListOp::SetQty(name, qty) => self.set_quantity(&name, qty),
            ListOp::Clear => self.clear(),
        }
    }
}
