use std::sync::{Arc, RwLock};

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use tracing::debug;

/// Non-2xx backend response, carrying the server's `message` field when one
/// was present.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct StatusError {
    pub status: u16,
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// `reqwest`-backed transport for the VoiceCart backend.
///
/// Holds the base URL and an optional bearer token; where that token comes
/// from (login response, refresh) is the caller's concern. Cloning is cheap
/// and clones share the token slot, so one login call authenticates every
/// client built from the same transport.
#[derive(Clone)]
pub struct ReqwestClient {
    base: String,
    token: Arc<RwLock<Option<String>>>,
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new(base: impl Into<String>) -> Result<Self, url::ParseError> {
        let base = base.into();
        url::Url::parse(&base)?;
        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
            client: reqwest::Client::new(),
        })
    }

    pub fn with_token(self, token: impl Into<String>) -> Self {
        self.set_token(Some(token.into()));
        self
    }

    pub fn set_token(&self, token: Option<String>) {
        if let Ok(mut slot) = self.token.write() {
            *slot = token;
        }
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Vec<u8>, vc_http::Error> {
        let url = format!("{}{}", self.base, path);
        debug!(%method, %url, "backend request");

        let mut req = self.client.request(method, &url);
        if let Some(token) = self.token.read().ok().and_then(|t| t.clone()) {
            req = req.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(body) = body {
            req = req.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = req.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| "Request failed".to_string());
            return Err(Box::new(StatusError {
                status: status.as_u16(),
                message,
            }));
        }

        Ok(bytes.to_vec())
    }
}

impl vc_http::HttpClient for ReqwestClient {
    async fn get(&self, path: &str) -> Result<Vec<u8>, vc_http::Error> {
        self.execute(Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: Vec<u8>) -> Result<Vec<u8>, vc_http::Error> {
        self.execute(Method::POST, path, Some(body)).await
    }

    async fn patch(&self, path: &str, body: Vec<u8>) -> Result<Vec<u8>, vc_http::Error> {
        self.execute(Method::PATCH, path, Some(body)).await
    }

    async fn delete(&self, path: &str) -> Result<Vec<u8>, vc_http::Error> {
        self.execute(Method::DELETE, path, None).await
    }
}
