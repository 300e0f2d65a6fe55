//! View selection driven by cluster health.
//!
//! The router is the console's one decision point: it inspects the latest
//! query state and picks which view to present. It is a pure function of
//! its input — no retries, no caching, no mutation of the status record.

use thiserror::Error;

use crate::cluster::{ClusterHealth, ClusterStatus};
use crate::query::QueryState;

/// Mutually exclusive view presentations the console can select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewVariant {
    /// Neutral placeholder while the status query is still pending.
    Placeholder,
    /// Full navigation shell for a healthy, connected cluster.
    NavigationShell,
    /// Deployment instructions for a cluster that is not serving.
    DeploymentInstructions {
        /// Identifier of the cluster the instructions apply to, passed
        /// through from the status record unchanged.
        cluster_id: String,
    },
}

/// Router error types.
#[derive(Debug, Error)]
pub enum SelectError {
    /// The status query failed. The router makes no view decision; the
    /// caller owns failure presentation.
    #[error("cluster status query failed: {message}")]
    QueryFailed {
        /// Rendered query error.
        message: String,
    },
}

/// Selects a view from the latest cluster query state.
#[derive(Debug, Default)]
pub struct ClusterHealthRouter;

impl ClusterHealthRouter {
    /// Create a router.
    pub fn new() -> Self {
        Self
    }

    /// Pick the view for the given query state.
    ///
    /// A healthy cluster gets the navigation shell; every other resolved
    /// status gets deployment instructions carrying the cluster id. A
    /// pending query selects the placeholder.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::QueryFailed`] if the query failed.
    pub fn select(
        &self,
        state: &QueryState<ClusterStatus>,
    ) -> Result<ViewVariant, SelectError> {
        match state {
            QueryState::Pending => Ok(ViewVariant::Placeholder),
            QueryState::Resolved(cluster) => Ok(Self::select_resolved(cluster)),
            QueryState::Failed(e) => Err(SelectError::QueryFailed {
                message: e.to_string(),
            }),
        }
    }

    /// Two-way partition over resolved statuses: healthy vs everything else.
    fn select_resolved(cluster: &ClusterStatus) -> ViewVariant {
        match cluster.status {
            ClusterHealth::Healthy => ViewVariant::NavigationShell,
            ClusterHealth::Unhealthy
            | ClusterHealth::Disconnected
            | ClusterHealth::Updating
            | ClusterHealth::UpdateFailed
            | ClusterHealth::Unknown => ViewVariant::DeploymentInstructions {
                cluster_id: cluster.id.clone(),
            },
        }
    }
}
