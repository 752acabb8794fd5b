//! The transport seam.
//!
//! Sessions, signing, retries and rate limiting all live behind this trait.
//! The rest of the crate only sees raw response bytes or a classified failure.

use async_trait::async_trait;
use bytes::Bytes;
use tally_shared::TransportFailure;

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Read.
    Get,
    /// Create.
    Post,
    /// Replace.
    Put,
    /// Partial update.
    Patch,
    /// Remove.
    Delete,
}

impl Method {
    /// Returns the method name as sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Path below the service root, starting with `/`.
    pub path: &'static str,
    /// HTTP method.
    pub method: Method,
    /// Query string pairs.
    pub query: Vec<(String, String)>,
    /// Encoded JSON body, if any.
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    /// Decodes the body back into JSON.
    ///
    /// Returns `None` if there is no body or it is not JSON.
    #[must_use]
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.body
            .as_deref()
            .and_then(|body| serde_json::from_slice(body).ok())
    }

    /// Returns the first query value for `key`.
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, value)| value.as_str())
    }
}

/// Sends requests to the service.
///
/// A call completes exactly once, with either the body bytes or a failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends one request.
    async fn send(&self, request: ApiRequest) -> Result<Bytes, TransportFailure>;
}
