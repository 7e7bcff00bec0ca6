//! # swiftstore: object-storage adapter for Swift-style blob stores
//!
//! `swiftstore` is the policy layer between application content and a remote
//! blob store. It persists opaque bytes under generated or caller-supplied
//! keys, carries structured metadata out-of-band in a reserved header, and
//! hides two operational chores from callers: lazy container provisioning
//! and transient network faults (absorbed by one reload-and-retry).
//!
//! ## Key features
//!
//! - **Sortable generated keys**: `YYYY/MM/DD/HH/MM/SS/<0-999>/<name>` keeps
//!   objects lexically ordered by write time and human-readable
//! - **Header-borne metadata**: any JSON-shaped map rides along in the
//!   `X-Object-Meta` header and round-trips through read
//! - **Bounded retry**: exactly one retry after reloading the transport on a
//!   transient fault; everything else propagates untouched
//! - **Transport agnostic**: the remote store is a capability trait - bring
//!   an HTTP client, or use the built-in [`MemoryTransport`] in tests
//!
//! ## Quick start
//!
//! ```rust
//! use swiftstore::prelude::*;
//! use swiftstore::MemoryTransport;
//!
//! # #[tokio::main]
//! # async fn main() -> StoreResult<()> {
//! let config = StoreConfig::new("photos", "acme", "top-secret");
//! let store = SwiftStore::with_transport(MemoryTransport::new(), config);
//!
//! // First write creates the container, then stores under a generated key
//! let content = Content::new(&b"hello"[..], "text/plain")
//!     .with_name("hello.txt")
//!     .with_meta_entry("owner", "acme");
//! let uid = store.write(&content, WriteOptions::new()).await?;
//!
//! let stored = store.read(&uid).await?.expect("just written");
//! assert_eq!(&stored.payload[..], b"hello");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error taxonomy
//!
//! Setup problems surface as [`StoreError::NotConfigured`] before any remote
//! call; transport faults keep their identity through [`StoreError::Transport`]
//! so callers can tell a misconfiguration from a network condition. Not-found
//! is not an error for reads (`Ok(None)`) or destroys (silent success).

pub mod adapter;
mod config;
mod content;
mod error;
pub mod headers;
pub mod memory;
mod retry;
pub mod transport;
pub mod uid;

// Re-export main types for clean API
pub use adapter::{Connector, StoredObject, SwiftStore};
pub use config::{Region, StoreConfig};
pub use content::{Content, WriteOptions};
pub use error::{StoreError, StoreResult};
pub use headers::{HeaderMap, Metadata, CONTENT_TYPE, META_HEADER};
pub use memory::MemoryTransport;
pub use retry::retrying;
pub use transport::{ObjectResponse, Transport, TransportFault, TransportResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Content, StoreConfig, StoreError, StoreResult, StoredObject, SwiftStore, Transport,
        TransportFault, WriteOptions,
    };
}
