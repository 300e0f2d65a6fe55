//! Cluster status data model.
//!
//! A [`ClusterStatus`] record is fetched fresh on each query cycle, is
//! read-only once returned, and is superseded wholesale by the next result.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Health of a monitored cluster as reported by the status query.
///
/// The wire format is a status string; the legacy `VZ_ST_`-prefixed
/// spellings are accepted too. Strings this build does not recognize
/// deserialize to [`ClusterHealth::Unknown`], so a new upstream status can
/// never be mistaken for a healthy one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ClusterHealth {
    /// Cluster is connected and heartbeating normally.
    Healthy,
    /// Cluster is reachable but failing its own health checks.
    Unhealthy,
    /// No heartbeat has been received within the liveness window.
    Disconnected,
    /// Cluster is mid-update; status settles once the rollout finishes.
    Updating,
    /// The last update rollout failed.
    UpdateFailed,
    /// Status string not recognized by this build.
    Unknown,
}

impl ClusterHealth {
    /// Canonical wire spelling of this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "HEALTHY",
            Self::Unhealthy => "UNHEALTHY",
            Self::Disconnected => "DISCONNECTED",
            Self::Updating => "UPDATING",
            Self::UpdateFailed => "UPDATE_FAILED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl From<String> for ClusterHealth {
    fn from(s: String) -> Self {
        match s.strip_prefix("VZ_ST_").unwrap_or(&s) {
            "HEALTHY" => Self::Healthy,
            "UNHEALTHY" => Self::Unhealthy,
            "DISCONNECTED" => Self::Disconnected,
            "UPDATING" => Self::Updating,
            "UPDATE_FAILED" => Self::UpdateFailed,
            _ => Self::Unknown,
        }
    }
}

impl From<ClusterHealth> for String {
    fn from(health: ClusterHealth) -> Self {
        health.as_str().to_owned()
    }
}

/// Latest known status of a single cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterStatus {
    /// Opaque cluster identifier, unique within one query response.
    pub id: String,
    /// Reported health. The only field that drives view selection.
    pub status: ClusterHealth,
    /// Milliseconds since the last heartbeat; `-1` means none received.
    pub last_heartbeat_ms: i64,
}

impl ClusterStatus {
    /// Time since the last heartbeat, or `None` if none was ever received.
    pub fn last_heartbeat(&self) -> Option<Duration> {
        u64::try_from(self.last_heartbeat_ms)
            .ok()
            .map(Duration::from_millis)
    }
}
