//! Sweep Trigger
//!
//! Fire-and-forget entry point used by the request layer: detaches an
//! unlimited sweep onto the runtime without awaiting it. The result is
//! discarded and failures never reach the serving path; the only
//! observability is log-level.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::sweep::SweepCoordinator;

/// Spawns a detached sweep run for the given coordinator.
///
/// The backend contract is synchronous and may block, so the run itself is
/// pushed onto the blocking pool. The returned handle exists only so tests
/// can await completion; callers on the request path drop it.
pub fn spawn_sweep(coordinator: Arc<SweepCoordinator>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let instance_id = coordinator.instance_id().to_string();
        match tokio::task::spawn_blocking(move || coordinator.run(None)).await {
            Ok(Ok(true)) => debug!("Background sweep by {} committed", instance_id),
            Ok(Ok(false)) => debug!("Background sweep by {} skipped", instance_id),
            Ok(Err(err)) => warn!("Background sweep by {} failed: {}", instance_id, err),
            Err(err) => warn!("Background sweep task for {} panicked: {}", instance_id, err),
        }
    })
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Consistency, KvBackend, ListOptions, MemoryKv};
    use crate::clock::{Clock, ManualClock};
    use crate::store::{Record, RecordStore, RECORD_PREFIX};

    #[tokio::test]
    async fn test_spawn_sweep_removes_expired_records() {
        let backend = Arc::new(MemoryKv::new());
        let clock = Arc::new(ManualClock::new(1_000_000));
        let store = RecordStore::new(backend.clone(), clock.clone());

        let mut record = Record::new("short");
        record.refresh_ttl(clock.now_unix(), 300);
        store.put(&record).unwrap();
        clock.advance(660);

        let coordinator = Arc::new(SweepCoordinator::new(
            backend.clone(),
            clock,
            "single-instance",
        ));
        spawn_sweep(coordinator).await.unwrap();

        let page = backend
            .list(RECORD_PREFIX, &ListOptions::default())
            .unwrap();
        assert!(page.entries.is_empty());
    }

    #[tokio::test]
    async fn test_spawn_sweep_swallows_skip_outcome() {
        let backend = Arc::new(MemoryKv::new());
        let clock = Arc::new(ManualClock::new(1_000_000));
        let coordinator = Arc::new(SweepCoordinator::new(
            backend.clone(),
            clock.clone(),
            "region1",
        ));

        // First pass owns the ledger; a second trigger inside the cooldown
        // is a silent skip.
        spawn_sweep(coordinator.clone()).await.unwrap();
        spawn_sweep(coordinator).await.unwrap();

        let ledger_time = backend.get("idb/clean_time", Consistency::Strong).unwrap();
        assert!(ledger_time.is_present());
    }
}
