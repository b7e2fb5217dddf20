use crate::types::CartItem;

/// Local snapshot of the server-backed cart. Identity is the server id.
///
/// This container is only ever replaced wholesale with what the backend
/// returned; no optimistic local math beyond re-deriving the total from the
/// current item array. The one exception is `remove_by_id`, used when a
/// delete returns 204 and there is no item array to replace with.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Replace local state with exactly what the backend returned.
    pub fn replace(&mut self, items: Vec<CartItem>) {
        self.items = items;
    }

    /// No-op when the id is absent.
    pub fn remove_by_id(&mut self, id: &str) {
        self.items.retain(|i| i.id != id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Recomputed on every read, never cached.
    pub fn total(&self) -> f64 {
        self.items
            .iter()
            .map(|i| i.price.unwrap_or(0.0) * f64::from(i.quantity))
            .sum()
    }
}
