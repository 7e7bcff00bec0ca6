use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::config::StoreConfig;
use crate::content::{Content, WriteOptions};
use crate::error::{StoreError, StoreResult};
use crate::headers::{self, Metadata};
use crate::retry::{retrying, tolerate_conflict};
use crate::transport::{Transport, TransportFault};
use crate::uid;

/// Produces a transport handle from the live configuration on first use
pub type Connector = Box<dyn Fn(&StoreConfig) -> StoreResult<Arc<dyn Transport>> + Send + Sync>;

/// Object read back from the store
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub payload: Bytes,
    /// Decoded from the reserved header; `None` when the header was absent
    /// or empty
    pub meta: Option<Metadata>,
}

/// The storage adapter: policy layer between callers and a blob-store
/// transport.
///
/// Owns the configuration, lazily connects a transport on first remote call,
/// ensures the target container exists before the first write, generates keys
/// when the caller supplies none, folds metadata into transport headers, and
/// runs every remote call under a one-retry policy for transient faults.
///
/// Sharing: an adapter is safe to share across tasks once constructed. The
/// transport handle and the container-init flag use lock-free lazy state; a
/// race between concurrent first writes can at worst duplicate an existence
/// check, which is harmless. Reconfiguring via [`SwiftStore::config_mut`]
/// requires `&mut self` and therefore exclusive ownership.
pub struct SwiftStore {
    config: StoreConfig,
    connector: Option<Connector>,
    transport: OnceCell<Arc<dyn Transport>>,
    container_ready: AtomicBool,
}

impl SwiftStore {
    /// Create an adapter that connects lazily through `connector` on the
    /// first remote call
    pub fn new<F>(config: StoreConfig, connector: F) -> Self
    where
        F: Fn(&StoreConfig) -> StoreResult<Arc<dyn Transport>> + Send + Sync + 'static,
    {
        Self {
            config,
            connector: Some(Box::new(connector)),
            transport: OnceCell::new(),
            container_ready: AtomicBool::new(false),
        }
    }

    /// Create an adapter over an already-connected transport
    pub fn with_transport<T: Transport + 'static>(transport: T, config: StoreConfig) -> Self {
        Self {
            config,
            connector: None,
            transport: OnceCell::new_with(Some(Arc::new(transport) as Arc<dyn Transport>)),
            container_ready: AtomicBool::new(false),
        }
    }

    /// Current configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Mutable configuration access. Changes only affect calls made after
    /// the mutation; the transport handle, once connected, is kept.
    pub fn config_mut(&mut self) -> &mut StoreConfig {
        &mut self.config
    }

    /// Store `content`, returning the UID it was written under.
    ///
    /// The UID is `options.path` verbatim when given, otherwise a generated
    /// timestamped key (see [`crate::uid::generate`]). On the first write for
    /// this instance the target container is checked and created if missing;
    /// a racing creator is tolerated. Headers are merged lowest-to-highest:
    /// configured defaults, the metadata-derived reserved header, per-call
    /// headers, the computed content type.
    pub async fn write(&self, content: &Content, options: WriteOptions) -> StoreResult<String> {
        self.config.require_complete()?;
        let transport = self.transport().await?;
        self.ensure_container(transport.as_ref()).await?;

        let headers = headers::merge(
            &self.config.storage_headers,
            &content.meta,
            &options.headers,
            &content.mime_type,
        )?;
        let uid = match options.path {
            Some(path) => path,
            None => uid::generate(content.name.as_deref()),
        };
        let path = uid::full_path(&uid);

        let t = transport.as_ref();
        let container = self.config.container.as_str();
        let object_path = path.as_str();
        let payload = &content.payload;
        let headers = &headers;
        retrying(t, move || {
            t.put_object(container, object_path, payload.clone(), headers.clone())
        })
        .await?;

        Ok(uid)
    }

    /// Fetch the object stored under `uid`, or `None` if the object or the
    /// container does not exist. The container is never created here.
    pub async fn read(&self, uid: &str) -> StoreResult<Option<StoredObject>> {
        self.config.require_complete()?;
        let transport = self.transport().await?;

        let t = transport.as_ref();
        let container = self.config.container.as_str();
        let path = uid::full_path(uid);
        let object_path = path.as_str();

        match retrying(t, move || t.get_object(container, object_path)).await {
            Ok(response) => {
                let meta = headers::decode_meta(&response.headers)?;
                Ok(Some(StoredObject {
                    payload: response.payload,
                    meta,
                }))
            }
            Err(TransportFault::NotFound) => Ok(None),
            Err(fault) => Err(fault.into()),
        }
    }

    /// Delete the object stored under `uid`. Best-effort: an already-absent
    /// object is success, and a remote conflict is logged and swallowed.
    pub async fn destroy(&self, uid: &str) -> StoreResult<()> {
        let transport = self.transport().await?;

        let t = transport.as_ref();
        let container = self.config.container.as_str();
        let path = uid::full_path(uid);
        let object_path = path.as_str();

        match retrying(t, move || t.delete_object(container, object_path)).await {
            // already absent: goal achieved
            Ok(()) | Err(TransportFault::NotFound) => Ok(()),
            Err(fault @ TransportFault::Conflict) => {
                warn!("destroy of {container}/{object_path} failed: {fault}");
                Ok(())
            }
            Err(fault) => Err(fault.into()),
        }
    }

    /// Whether the configured container exists
    pub async fn container_exists(&self) -> StoreResult<bool> {
        let transport = self.transport().await?;
        self.check_container(transport.as_ref()).await
    }

    /// Lazily connect the transport, at most once per instance
    async fn transport(&self) -> StoreResult<Arc<dyn Transport>> {
        let transport = self
            .transport
            .get_or_try_init(|| async {
                match &self.connector {
                    Some(connect) => connect(&self.config),
                    None => Err(StoreError::from(TransportFault::other(
                        "no transport connector configured",
                    ))),
                }
            })
            .await?;
        Ok(Arc::clone(transport))
    }

    /// First-write container initialization. Once the flag is set the check
    /// is skipped for the rest of the instance's lifetime; a container
    /// deleted out-of-band afterwards surfaces as a failed write instead.
    async fn ensure_container(&self, transport: &dyn Transport) -> StoreResult<()> {
        if self.container_ready.load(Ordering::Acquire) {
            return Ok(());
        }
        let container = self.config.container.as_str();
        if !self.check_container(transport).await? {
            debug!("container {container} not found, creating it");
            tolerate_conflict(
                retrying(transport, move || transport.create_container(container)).await,
            )?;
        }
        self.container_ready.store(true, Ordering::Release);
        Ok(())
    }

    async fn check_container(&self, transport: &dyn Transport) -> StoreResult<bool> {
        let container = self.config.container.as_str();
        match retrying(transport, move || transport.get_container(container)).await {
            Ok(()) => Ok(true),
            Err(TransportFault::NotFound) => Ok(false),
            Err(fault) => Err(fault.into()),
        }
    }
}
