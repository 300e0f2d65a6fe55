//! Background status refresh loop.
//!
//! Polls the cluster source at a fixed interval and publishes the latest
//! [`QueryState`] on a watch channel. A new result supersedes the previous
//! one wholesale; consumers re-read on change. Runs until the shutdown
//! signal flips or every consumer is gone.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::cluster::ClusterStatus;
use crate::query::{ClusterSource, QueryState};
use crate::router::{ClusterHealthRouter, ViewVariant};

/// Dependencies for the refresh loop.
pub struct WatchDeps {
    /// Source of cluster status records.
    pub source: Arc<dyn ClusterSource>,
    /// Seconds between fetches.
    pub interval_secs: u64,
}

/// Sender half of the published query state.
pub type StateSender = watch::Sender<QueryState<ClusterStatus>>;
/// Receiver half of the published query state.
pub type StateReceiver = watch::Receiver<QueryState<ClusterStatus>>;

/// Create the channel pair for publishing query state.
///
/// The initial value is [`QueryState::Pending`], so consumers see the
/// pending state until the first fetch lands.
pub fn state_channel() -> (StateSender, StateReceiver) {
    watch::channel(QueryState::Pending)
}

/// Run the refresh loop until shutdown.
///
/// The first fetch happens immediately; each subsequent tick replaces the
/// published state. View transitions are logged through the router.
pub async fn run_watch(deps: WatchDeps, state_tx: StateSender, mut shutdown_rx: watch::Receiver<bool>) {
    let router = ClusterHealthRouter::new();
    let mut interval = tokio::time::interval(Duration::from_secs(deps.interval_secs));
    let mut last_view: Option<ViewVariant> = None;

    info!(interval_secs = deps.interval_secs, "status watch started");

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let state = fetch_state(deps.source.as_ref()).await;
                log_transition(&router, &state, &mut last_view);
                if state_tx.send(state).is_err() {
                    info!("all status consumers dropped, watch stopping");
                    break;
                }
            }
            result = shutdown_rx.changed() => {
                if result.is_err() || *shutdown_rx.borrow() {
                    info!("status watch shutting down");
                    break;
                }
            }
        }
    }

    info!("status watch stopped");
}

/// Run one fetch cycle and fold the outcome into a query state.
async fn fetch_state(source: &dyn ClusterSource) -> QueryState<ClusterStatus> {
    match source.fetch_cluster().await {
        Ok(cluster) => {
            info!(
                cluster_id = %cluster.id,
                status = cluster.status.as_str(),
                "cluster status resolved"
            );
            QueryState::Resolved(cluster)
        }
        Err(e) => {
            warn!(error = %e, "cluster status fetch failed");
            QueryState::Failed(e)
        }
    }
}

/// Log when the selected view changes between cycles.
fn log_transition(
    router: &ClusterHealthRouter,
    state: &QueryState<ClusterStatus>,
    last_view: &mut Option<ViewVariant>,
) {
    match router.select(state) {
        Ok(view) => {
            if last_view.as_ref() != Some(&view) {
                info!(view = ?view, "selected view changed");
                *last_view = Some(view);
            }
        }
        Err(e) => warn!(error = %e, "no view selected this cycle"),
    }
}
