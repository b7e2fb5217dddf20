use std::future::Future;

pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Transport seam for the VoiceCart backend. API clients are generic over
/// this trait so contract tests can substitute a fake without a server.
///
/// Bodies are JSON bytes; the implementation owns base URL, auth header, and
/// timeouts. A non-2xx status is an `Err` carrying the server's `message`
/// field when one is present.
pub trait HttpClient: Send + Sync {
    fn get(&self, path: &str) -> impl Future<Output = Result<Vec<u8>, Error>> + Send;

    fn post(
        &self,
        path: &str,
        body: Vec<u8>,
    ) -> impl Future<Output = Result<Vec<u8>, Error>> + Send;

    fn patch(
        &self,
        path: &str,
        body: Vec<u8>,
    ) -> impl Future<Output = Result<Vec<u8>, Error>> + Send;

    fn delete(&self, path: &str) -> impl Future<Output = Result<Vec<u8>, Error>> + Send;
}
