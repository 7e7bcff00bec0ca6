use bytes::Bytes;
use serde::Serialize;

use crate::headers::{HeaderMap, Metadata};

/// Content handed to [`crate::SwiftStore::write`]: an owned payload, its MIME
/// type, an optional human-readable name, and a metadata map carried
/// out-of-band in the reserved header.
#[derive(Debug, Clone)]
pub struct Content {
    pub payload: Bytes,
    pub mime_type: String,
    pub name: Option<String>,
    pub meta: Metadata,
}

impl Content {
    /// Create content from a payload and MIME type
    pub fn new<B: Into<Bytes>, S: Into<String>>(payload: B, mime_type: S) -> Self {
        Self {
            payload: payload.into(),
            mime_type: mime_type.into(),
            name: None,
            meta: Metadata::new(),
        }
    }

    /// Set the name used for the generated key's final segment
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace the metadata map
    pub fn with_meta(mut self, meta: Metadata) -> Self {
        self.meta = meta;
        self
    }

    /// Insert one metadata entry
    pub fn with_meta_entry<K: Into<String>, V: Serialize>(mut self, key: K, value: V) -> Self {
        self.meta.insert(
            key.into(),
            serde_json::to_value(value).unwrap_or(serde_json::Value::Null),
        );
        self
    }
}

/// Per-call options for a write
#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    /// Explicit key, used verbatim instead of a generated one
    pub path: Option<String>,

    /// Headers merged over the configured defaults for this write only
    pub headers: HeaderMap,
}

impl WriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit key instead of generating one
    pub fn with_path<S: Into<String>>(mut self, path: S) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add one per-call header
    pub fn with_header<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}
