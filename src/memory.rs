//! In-memory transport for testing and development.
//!
//! Mirrors the semantics the adapter expects from a real blob store: objects
//! live under container/path, gets return the headers stored at put time,
//! creating an existing container reports a conflict. Faults can be queued
//! with [`MemoryTransport::inject_fault`] and are consumed one per object or
//! container operation, which makes the retry policy observable from tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::{Mutex, RwLock};

use crate::headers::HeaderMap;
use crate::transport::{ObjectResponse, Transport, TransportFault, TransportResult};

#[derive(Debug, Clone)]
struct StoredBlob {
    payload: Bytes,
    headers: HeaderMap,
}

type Containers = HashMap<String, HashMap<String, StoredBlob>>;

/// In-memory [`Transport`] implementation. Clones share state.
#[derive(Clone, Default)]
pub struct MemoryTransport {
    containers: Arc<RwLock<Containers>>,
    faults: Arc<Mutex<VecDeque<TransportFault>>>,
    reloads: Arc<AtomicUsize>,
    container_checks: Arc<AtomicUsize>,
    ops: Arc<AtomicUsize>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a fault returned by the next object or container operation
    pub fn inject_fault(&self, fault: TransportFault) {
        self.faults.lock().push_back(fault);
    }

    /// How many times `reload` has been called
    pub fn reload_count(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }

    /// How many times `get_container` has been called
    pub fn container_check_count(&self) -> usize {
        self.container_checks.load(Ordering::SeqCst)
    }

    /// Total object/container operations attempted (excludes `reload`)
    pub fn op_count(&self) -> usize {
        self.ops.load(Ordering::SeqCst)
    }

    /// Whether a container exists
    pub fn has_container(&self, container: &str) -> bool {
        self.containers.read().contains_key(container)
    }

    /// Whether an object exists
    pub fn has_object(&self, container: &str, path: &str) -> bool {
        self.containers
            .read()
            .get(container)
            .map(|objects| objects.contains_key(path))
            .unwrap_or(false)
    }

    /// Headers recorded for an object at put time
    pub fn object_headers(&self, container: &str, path: &str) -> Option<HeaderMap> {
        self.containers
            .read()
            .get(container)
            .and_then(|objects| objects.get(path))
            .map(|blob| blob.headers.clone())
    }

    fn begin_op(&self) -> TransportResult<()> {
        self.ops.fetch_add(1, Ordering::SeqCst);
        match self.faults.lock().pop_front() {
            Some(fault) => Err(fault),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn put_object(
        &self,
        container: &str,
        path: &str,
        payload: Bytes,
        headers: HeaderMap,
    ) -> TransportResult<()> {
        self.begin_op()?;
        let mut containers = self.containers.write();
        let objects = containers.get_mut(container).ok_or(TransportFault::NotFound)?;
        objects.insert(path.to_string(), StoredBlob { payload, headers });
        Ok(())
    }

    async fn get_object(&self, container: &str, path: &str) -> TransportResult<ObjectResponse> {
        self.begin_op()?;
        let containers = self.containers.read();
        let blob = containers
            .get(container)
            .and_then(|objects| objects.get(path))
            .ok_or(TransportFault::NotFound)?;
        Ok(ObjectResponse {
            payload: blob.payload.clone(),
            headers: blob.headers.clone(),
        })
    }

    async fn delete_object(&self, container: &str, path: &str) -> TransportResult<()> {
        self.begin_op()?;
        let mut containers = self.containers.write();
        let objects = containers.get_mut(container).ok_or(TransportFault::NotFound)?;
        objects.remove(path).ok_or(TransportFault::NotFound)?;
        Ok(())
    }

    async fn get_container(&self, container: &str) -> TransportResult<()> {
        self.container_checks.fetch_add(1, Ordering::SeqCst);
        self.begin_op()?;
        if self.containers.read().contains_key(container) {
            Ok(())
        } else {
            Err(TransportFault::NotFound)
        }
    }

    async fn create_container(&self, container: &str) -> TransportResult<()> {
        self.begin_op()?;
        let mut containers = self.containers.write();
        if containers.contains_key(container) {
            return Err(TransportFault::Conflict);
        }
        containers.insert(container.to_string(), HashMap::new());
        Ok(())
    }

    async fn reload(&self) -> TransportResult<()> {
        self.reloads.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
