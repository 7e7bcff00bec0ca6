use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::headers::HeaderMap;

/// Result type at the transport boundary
pub type TransportResult<T> = Result<T, TransportFault>;

/// Core remote operations - must be implemented by all storage transports.
///
/// Every method reports failure through the closed [`TransportFault`] set so
/// call sites can pattern-match on not-found, conflict, and transient
/// conditions instead of downcasting backend-specific errors.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Store one object under `path` within `container`
    async fn put_object(
        &self,
        container: &str,
        path: &str,
        payload: Bytes,
        headers: HeaderMap,
    ) -> TransportResult<()>;

    /// Fetch an object's payload and headers
    async fn get_object(&self, container: &str, path: &str) -> TransportResult<ObjectResponse>;

    /// Delete an object
    async fn delete_object(&self, container: &str, path: &str) -> TransportResult<()>;

    /// Query a container, failing with `NotFound` if it does not exist
    async fn get_container(&self, container: &str) -> TransportResult<()>;

    /// Create a container, failing with `Conflict` if it already exists
    async fn create_container(&self, container: &str) -> TransportResult<()>;

    /// Re-establish the underlying connection after a transient fault.
    /// The handle itself stays valid; only its connection state is refreshed.
    async fn reload(&self) -> TransportResult<()>;
}

/// Response to a successful get
#[derive(Debug, Clone)]
pub struct ObjectResponse {
    pub payload: Bytes,
    pub headers: HeaderMap,
}

/// Closed fault taxonomy at the transport boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportFault {
    /// The object or container does not exist
    #[error("not found")]
    NotFound,

    /// The remote rejected the operation due to concurrent modification
    #[error("conflict")]
    Conflict,

    /// A socket-level failure expected to resolve after reconnecting
    #[error("transient transport failure: {0}")]
    Transient(String),

    /// Anything else (auth failure, quota, ...) - never retried
    #[error("{0}")]
    Other(String),
}

impl TransportFault {
    /// Create a transient fault
    pub fn transient<S: Into<String>>(detail: S) -> Self {
        Self::Transient(detail.into())
    }

    /// Create a non-retryable fault
    pub fn other<S: Into<String>>(detail: S) -> Self {
        Self::Other(detail.into())
    }

    /// Whether the retry policy may absorb this fault
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}
