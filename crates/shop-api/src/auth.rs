use serde_json::Value;
use vc_http::HttpClient;

use crate::error::Error;
use crate::types::{AuthResponse, LoginRequest, RegisterRequest};

/// Client for the auth endpoints. Returns the bearer token to the caller;
/// storing it (and attaching it to later calls) is the transport's job.
pub struct AuthApi<C> {
    http: C,
}

impl<C: HttpClient> AuthApi<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, Error> {
        let body = serde_json::to_vec(&LoginRequest { username, password })?;
        let bytes = self
            .http
            .post("/api/auth/login", body)
            .await
            .map_err(Error::Http)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, Error> {
        let body = serde_json::to_vec(&RegisterRequest {
            username,
            email,
            password,
        })?;
        let bytes = self
            .http
            .post("/api/auth/register", body)
            .await
            .map_err(Error::Http)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn me(&self) -> Result<Value, Error> {
        let bytes = self.http.get("/api/auth/me").await.map_err(Error::Http)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
