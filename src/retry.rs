//! Bounded retry for transient transport faults.
//!
//! Every remote call site runs under [`retrying`]: on a transient fault the
//! transport handle is reloaded and the operation is attempted exactly once
//! more. A second transient fault, and every non-transient fault, propagates
//! to the caller as-is.

use std::future::Future;

use tracing::debug;

use crate::transport::{Transport, TransportFault, TransportResult};

/// Run `op`, absorbing at most one transient fault by reloading `transport`
/// and retrying. An explicit two-attempt sequence, not recursion.
pub async fn retrying<T, F, Fut>(transport: &dyn Transport, mut op: F) -> TransportResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = TransportResult<T>>,
{
    match op().await {
        Err(fault) if fault.is_transient() => {
            debug!("transient transport fault, reloading and retrying once: {fault}");
            transport.reload().await?;
            op().await
        }
        other => other,
    }
}

/// Convenience used by `write` paths: a racing creator making the container
/// first is success, not failure
pub fn tolerate_conflict(result: TransportResult<()>) -> TransportResult<()> {
    match result {
        Err(TransportFault::Conflict) => Ok(()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryTransport;
    use crate::transport::Transport;

    #[tokio::test]
    async fn one_transient_fault_is_absorbed_after_a_reload() {
        let transport = MemoryTransport::new();
        transport.create_container("c").await.unwrap();
        transport.inject_fault(TransportFault::transient("connection reset"));

        let t: &dyn Transport = &transport;
        retrying(t, move || t.get_container("c")).await.unwrap();
        assert_eq!(transport.reload_count(), 1);
    }

    #[tokio::test]
    async fn a_second_transient_fault_propagates() {
        let transport = MemoryTransport::new();
        transport.create_container("c").await.unwrap();
        transport.inject_fault(TransportFault::transient("reset"));
        transport.inject_fault(TransportFault::transient("reset again"));

        let t: &dyn Transport = &transport;
        let result = retrying(t, move || t.get_container("c")).await;
        assert!(matches!(result, Err(TransportFault::Transient(_))));
    }

    #[tokio::test]
    async fn non_transient_faults_never_retry() {
        let transport = MemoryTransport::new();

        let t: &dyn Transport = &transport;
        let result = retrying(t, move || t.get_container("missing")).await;
        assert_eq!(result, Err(TransportFault::NotFound));
        assert_eq!(transport.reload_count(), 0);
    }
}
