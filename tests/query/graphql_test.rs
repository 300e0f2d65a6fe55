//! Tests for `src/query/graphql.rs` — response envelope parsing.

use vizier_console::cluster::ClusterHealth;
use vizier_console::query::graphql::{parse_cluster_response, GET_CLUSTER};
use vizier_console::query::QueryError;

#[test]
fn parses_resolved_envelope() {
    let body = r#"{"data":{"cluster":{"id":"test","status":"HEALTHY","lastHeartbeatMs":1}}}"#;
    let cluster = parse_cluster_response(body).expect("should parse");
    assert_eq!(cluster.id, "test");
    assert_eq!(cluster.status, ClusterHealth::Healthy);
    assert_eq!(cluster.last_heartbeat_ms, 1);
}

#[test]
fn parses_legacy_status_spelling() {
    let body =
        r#"{"data":{"cluster":{"id":"test","status":"VZ_ST_DISCONNECTED","lastHeartbeatMs":-1}}}"#;
    let cluster = parse_cluster_response(body).expect("should parse");
    assert_eq!(cluster.status, ClusterHealth::Disconnected);
    assert_eq!(cluster.last_heartbeat(), None);
}

#[test]
fn graphql_errors_take_precedence_over_data() {
    let body = r#"{
        "data": {"cluster": {"id": "test", "status": "HEALTHY", "lastHeartbeatMs": 1}},
        "errors": [{"message": "field deprecated"}, {"message": "partial result"}]
    }"#;
    let err = parse_cluster_response(body).expect_err("errors should win");
    match err {
        QueryError::GraphQl(messages) => {
            assert!(messages.contains("field deprecated"));
            assert!(messages.contains("partial result"));
        }
        other => panic!("expected GraphQl error, got {other:?}"),
    }
}

#[test]
fn null_cluster_is_missing_data() {
    let err = parse_cluster_response(r#"{"data":{"cluster":null}}"#)
        .expect_err("null cluster should fail");
    assert!(matches!(err, QueryError::MissingData));
}

#[test]
fn absent_data_is_missing_data() {
    let err = parse_cluster_response(r#"{"data":null}"#).expect_err("null data should fail");
    assert!(matches!(err, QueryError::MissingData));
}

#[test]
fn malformed_body_is_parse_error() {
    let err = parse_cluster_response("<html>bad gateway</html>").expect_err("html should fail");
    assert!(matches!(err, QueryError::Parse(_)));
}

#[test]
fn query_document_requests_the_status_fields() {
    assert!(GET_CLUSTER.contains("cluster"));
    assert!(GET_CLUSTER.contains("id"));
    assert!(GET_CLUSTER.contains("status"));
    assert!(GET_CLUSTER.contains("lastHeartbeatMs"));
}
