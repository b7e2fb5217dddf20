use serde_json::json;
use tracing::debug;
use vc_basket::{Cart, CartItem};
use vc_http::HttpClient;

use crate::error::Error;
use crate::types::{CartEnvelope, NewCartItem};

/// Client for the cart endpoints. Every call returns the server's complete
/// item array (or nothing, for a 204 delete).
pub struct CartApi<C> {
    http: C,
}

impl<C: HttpClient> CartApi<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    pub async fn get(&self, user_id: &str) -> Result<Vec<CartItem>, Error> {
        let path = format!("/api/cart?userId={}", urlencoding::encode(user_id));
        let bytes = self.http.get(&path).await.map_err(Error::Http)?;
        let envelope: CartEnvelope = serde_json::from_slice(&bytes)?;
        Ok(envelope.items)
    }

    pub async fn add(&self, item: &NewCartItem) -> Result<Vec<CartItem>, Error> {
        let body = serde_json::to_vec(item)?;
        let bytes = self.http.post("/api/cart", body).await.map_err(Error::Http)?;
        let envelope: CartEnvelope = serde_json::from_slice(&bytes)?;
        Ok(envelope.items)
    }

    pub async fn update_qty(&self, id: &str, quantity: u32) -> Result<Vec<CartItem>, Error> {
        let path = format!("/api/cart/{id}");
        let body = serde_json::to_vec(&json!({ "quantity": quantity }))?;
        let bytes = self.http.patch(&path, body).await.map_err(Error::Http)?;
        let envelope: CartEnvelope = serde_json::from_slice(&bytes)?;
        Ok(envelope.items)
    }

    /// `None` means the backend answered 204 with no body.
    pub async fn remove(&self, id: &str) -> Result<Option<Vec<CartItem>>, Error> {
        let path = format!("/api/cart/{id}");
        let bytes = self.http.delete(&path).await.map_err(Error::Http)?;
        if bytes.is_empty() {
            return Ok(None);
        }
        let envelope: CartEnvelope = serde_json::from_slice(&bytes)?;
        Ok(Some(envelope.items))
    }
}

/// The cart-side reconciler: a [`Cart`] snapshot kept in lock-step with the
/// backend. Mutations are never purely local: each one round-trips first
/// and the snapshot is replaced with exactly what the server returned, so
/// server-side pricing and stock logic can never drift from what the user
/// sees.
pub struct CartSync<C> {
    api: CartApi<C>,
    cart: Cart,
}

impl<C: HttpClient> CartSync<C> {
    pub fn new(http: C) -> Self {
        Self {
            api: CartApi::new(http),
            cart: Cart::new(),
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub async fn load(&mut self, user_id: &str) -> Result<(), Error> {
        let items = self.api.get(user_id).await?;
        self.cart.replace(items);
        Ok(())
    }

    pub async fn add(&mut self, item: &NewCartItem) -> Result<(), Error> {
        let items = self.api.add(item).await?;
        self.cart.replace(items);
        Ok(())
    }

    pub async fn increment(&mut self, id: &str) -> Result<(), Error> {
        let Some(item) = self.cart.find(id) else {
            debug!(id, "increment on unknown cart id, ignoring");
            return Ok(());
        };
        let items = self.api.update_qty(id, item.quantity + 1).await?;
        self.cart.replace(items);
        Ok(())
    }

    /// Decrementing below quantity 1 is a removal, not a zero-quantity row.
    pub async fn decrement(&mut self, id: &str) -> Result<(), Error> {
        let Some(item) = self.cart.find(id) else {
            debug!(id, "decrement on unknown cart id, ignoring");
            return Ok(());
        };
        if item.quantity <= 1 {
            return self.remove(id).await;
        }
        let items = self.api.update_qty(id, item.quantity - 1).await?;
        self.cart.replace(items);
        Ok(())
    }

    pub async fn remove(&mut self, id: &str) -> Result<(), Error> {
        match self.api.remove(id).await? {
            Some(items) => self.cart.replace(items),
            // 204: no array to replace with, drop the row locally
            None => self.cart.remove_by_id(id),
        }
        Ok(())
    }
}
