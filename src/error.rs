use thiserror::Error;

use crate::transport::TransportFault;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// A required configuration field is missing. Surfaced before any remote
    /// call is attempted, so callers can distinguish setup problems from
    /// network problems.
    #[error("store is not configured: missing {field}")]
    NotConfigured { field: &'static str },

    #[error("invalid region {region:?}: expected one of dfw, ord, iad, lon, syd, hkg")]
    InvalidRegion { region: String },

    #[error("metadata serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    /// A transport fault that survived the retry policy, propagated unmodified.
    #[error("transport error: {source}")]
    Transport {
        #[from]
        source: TransportFault,
    },
}

impl StoreError {
    /// Create a missing-configuration error naming the field
    pub fn not_configured(field: &'static str) -> Self {
        Self::NotConfigured { field }
    }

    /// Create an invalid-region error
    pub fn invalid_region<S: Into<String>>(region: S) -> Self {
        Self::InvalidRegion {
            region: region.into(),
        }
    }
}
