//! Tests for `src/watch.rs` — refresh loop publish and shutdown.
//!
//! Uses tokio's paused clock so interval ticks advance instantly.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;

use vizier_console::cluster::{ClusterHealth, ClusterStatus};
use vizier_console::query::{ClusterSource, QueryError, QueryState};
use vizier_console::watch::{run_watch, state_channel, WatchDeps};

/// Source double that counts fetches and returns a fixed outcome.
struct CountingSource {
    calls: AtomicUsize,
    healthy: bool,
}

impl CountingSource {
    fn new(healthy: bool) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            healthy,
        }
    }
}

#[async_trait]
impl ClusterSource for CountingSource {
    async fn fetch_cluster(&self) -> Result<ClusterStatus, QueryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.healthy {
            Ok(ClusterStatus {
                id: "test".to_owned(),
                status: ClusterHealth::Healthy,
                last_heartbeat_ms: 1,
            })
        } else {
            Err(QueryError::MissingData)
        }
    }
}

#[tokio::test(start_paused = true)]
async fn publishes_resolved_state_on_first_tick() {
    let source = Arc::new(CountingSource::new(true));
    let (state_tx, mut state_rx) = state_channel();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let deps = WatchDeps {
        source: Arc::clone(&source) as Arc<dyn ClusterSource>,
        interval_secs: 30,
    };
    let task = tokio::spawn(run_watch(deps, state_tx, shutdown_rx));

    state_rx.changed().await.expect("state should be published");
    match &*state_rx.borrow_and_update() {
        QueryState::Resolved(cluster) => {
            assert_eq!(cluster.id, "test");
            assert_eq!(cluster.status, ClusterHealth::Healthy);
        }
        other => panic!("expected resolved state, got {other:?}"),
    }
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);

    shutdown_tx.send(true).expect("loop should be listening");
    task.await.expect("watch task should exit cleanly");
}

#[tokio::test(start_paused = true)]
async fn keeps_polling_after_a_failed_fetch() {
    let source = Arc::new(CountingSource::new(false));
    let (state_tx, mut state_rx) = state_channel();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let deps = WatchDeps {
        source: Arc::clone(&source) as Arc<dyn ClusterSource>,
        interval_secs: 30,
    };
    let task = tokio::spawn(run_watch(deps, state_tx, shutdown_rx));

    // Two cycles: the failure must not stop the loop.
    state_rx.changed().await.expect("first publish");
    assert!(matches!(
        &*state_rx.borrow_and_update(),
        QueryState::Failed(_)
    ));
    state_rx.changed().await.expect("second publish");

    assert!(source.calls.load(Ordering::SeqCst) >= 2);

    shutdown_tx.send(true).expect("loop should be listening");
    task.await.expect("watch task should exit cleanly");
}

#[tokio::test(start_paused = true)]
async fn stops_when_all_consumers_drop() {
    let source = Arc::new(CountingSource::new(true));
    let (state_tx, state_rx) = state_channel();
    let (_shutdown_tx, shutdown_rx) = watch::channel(false);

    drop(state_rx);

    let deps = WatchDeps {
        source: Arc::clone(&source) as Arc<dyn ClusterSource>,
        interval_secs: 30,
    };
    run_watch(deps, state_tx, shutdown_rx).await;

    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}
