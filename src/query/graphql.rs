//! GraphQL status source over HTTP.
//!
//! Posts the [`GET_CLUSTER`] document to the configured endpoint and parses
//! the standard `{"data": {"cluster": …}}` envelope. Envelope parsing is a
//! pure function ([`parse_cluster_response`]) so it is testable without a
//! server.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::{ClusterSource, QueryError};
use crate::cluster::ClusterStatus;

/// Query document for the cluster status fetch. Takes no variables.
pub const GET_CLUSTER: &str = "\
query GetCluster {
  cluster {
    id
    status
    lastHeartbeatMs
  }
}";

/// GraphQL request body.
#[derive(Debug, Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: serde_json::Value,
}

/// GraphQL response envelope for the cluster query.
#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<ClusterData>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct ClusterData {
    cluster: Option<ClusterStatus>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

/// Cluster status source backed by an HTTP GraphQL endpoint.
pub struct GraphqlSource {
    endpoint: Url,
    client: reqwest::Client,
}

impl GraphqlSource {
    /// Create a source for the given endpoint with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Transport`] if the HTTP client cannot be built.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, QueryError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { endpoint, client })
    }
}

#[async_trait]
impl ClusterSource for GraphqlSource {
    async fn fetch_cluster(&self) -> Result<ClusterStatus, QueryError> {
        let body = GraphqlRequest {
            query: GET_CLUSTER,
            variables: serde_json::json!({}),
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(QueryError::HttpStatus {
                status: status.as_u16(),
                body: truncate_body(&text),
            });
        }

        debug!(bytes = text.len(), "cluster query response received");
        parse_cluster_response(&text)
    }
}

/// Parse a GraphQL response body into a cluster record.
///
/// GraphQL errors take precedence over any partial data. A resolved
/// envelope with no cluster record is [`QueryError::MissingData`].
///
/// # Errors
///
/// Returns [`QueryError::Parse`] on malformed JSON, [`QueryError::GraphQl`]
/// when the errors array is non-empty, [`QueryError::MissingData`] when the
/// cluster field is absent or null.
pub fn parse_cluster_response(body: &str) -> Result<ClusterStatus, QueryError> {
    let envelope: GraphqlResponse =
        serde_json::from_str(body).map_err(|e| QueryError::Parse(e.to_string()))?;

    if !envelope.errors.is_empty() {
        let joined = envelope
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(QueryError::GraphQl(joined));
    }

    envelope
        .data
        .and_then(|d| d.cluster)
        .ok_or(QueryError::MissingData)
}

/// Cap response bodies quoted in error messages.
fn truncate_body(raw: &str) -> String {
    const MAX_ERROR_BODY_CHARS: usize = 256;

    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() > MAX_ERROR_BODY_CHARS {
        let shortened = collapsed
            .chars()
            .take(MAX_ERROR_BODY_CHARS)
            .collect::<String>();
        return format!("{shortened}...[truncated]");
    }

    collapsed
}
