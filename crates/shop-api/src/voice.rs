use serde_json::Value;
use tracing::debug;
use vc_http::HttpClient;

use crate::error::Error;
use crate::types::{ApplyRequest, ParseRequest, ParseResponseWire, ParsedIntent};

/// Client for the voice intent endpoints.
pub struct VoiceApi<C> {
    http: C,
}

impl<C: HttpClient> VoiceApi<C> {
    pub fn new(http: C) -> Self {
        Self { http }
    }

    /// Parse normalized English text into a structured intent. Every match
    /// in the response is normalized on ingestion; the alias-ridden wire
    /// shape never leaves this call.
    pub async fn parse(&self, text: &str) -> Result<ParsedIntent, Error> {
        let body = serde_json::to_vec(&ParseRequest { text })?;
        let bytes = self
            .http
            .post("/api/voice/parse", body)
            .await
            .map_err(Error::Http)?;
        let wire: ParseResponseWire = serde_json::from_slice(&bytes)?;
        let parsed = ParsedIntent::from(wire);
        debug!(intent = %parsed.intent, matches = parsed.matches.len(), "parsed");
        Ok(parsed)
    }

    /// Apply a confirmed intent. The response shape is an untagged union and
    /// is returned raw; classification belongs to the reconciler boundary.
    pub async fn apply(&self, request: &ApplyRequest) -> Result<Value, Error> {
        let body = serde_json::to_vec(request)?;
        let bytes = self
            .http
            .post("/api/voice/apply", body)
            .await
            .map_err(Error::Http)?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}
