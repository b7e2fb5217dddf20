use vc_http::HttpClient;

use crate::error::Error;
use crate::types::Product;

/// Client for the product catalog endpoints that feed the search flow.
pub struct ProductsApi<C> {
    http: C,
}

impl<C: HttpClient> ProductsApi<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Product>, Error> {
        let path = format!("/api/products/search?query={}", urlencoding::encode(query));
        let bytes = self.http.get(&path).await.map_err(Error::Http)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn all(&self) -> Result<Vec<Product>, Error> {
        let bytes = self.http.get("/api/products").await.map_err(Error::Http)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn by_category(&self, category: &str) -> Result<Vec<Product>, Error> {
        let path = format!(
            "/api/products/category/{}",
            urlencoding::encode(category)
        );
        let bytes = self.http.get(&path).await.map_err(Error::Http)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
