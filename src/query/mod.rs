//! Cluster status query collaborator.
//!
//! Defines the [`ClusterSource`] trait and the tri-state [`QueryState`]
//! consumed by the view router. One implementation is provided:
//! [`graphql::GraphqlSource`], which issues the `GET_CLUSTER` document over
//! HTTP. Tests supply canned doubles through the same trait.

use async_trait::async_trait;

use crate::cluster::ClusterStatus;

pub mod graphql;

/// Tri-state result of an asynchronous status query.
///
/// One value per fetch cycle; a new cycle's value supersedes the previous
/// one wholesale.
#[derive(Debug)]
pub enum QueryState<T> {
    /// No result yet.
    Pending,
    /// The query resolved with a record.
    Resolved(T),
    /// The query failed; no record is available.
    Failed(QueryError),
}

impl<T> QueryState<T> {
    /// Whether this state carries a resolved record.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

/// Errors returned by cluster status sources.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// HTTP transport failure.
    #[error("status request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Upstream responded with a non-success status.
    #[error("status endpoint returned {status}: {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Response body, collapsed and truncated.
        body: String,
    },
    /// The GraphQL layer reported errors.
    #[error("cluster query returned errors: {0}")]
    GraphQl(String),
    /// Response body did not match the expected envelope.
    #[error("cluster response parse error: {0}")]
    Parse(String),
    /// The response resolved but carried no cluster record.
    #[error("cluster response contained no data")]
    MissingData,
}

/// Source of cluster status records.
///
/// Implementations must be `Send + Sync`; the watch loop calls them from a
/// background task.
#[async_trait]
pub trait ClusterSource: Send + Sync {
    /// Fetch the latest status record for the cluster.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] on transport, HTTP, or response-shape failure.
    async fn fetch_cluster(&self) -> Result<ClusterStatus, QueryError>;
}
