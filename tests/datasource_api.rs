//! HTTP contract tests for the datasource operations.
//!
//! Uses wiremock to pin down the request each operation sends and how it
//! treats the server's answer.

use grafapi::{
    Auth, Create, Datasource, DatasourceType, Delete, Get, GrafanaClient, GrafanaError, List,
    OrgId, Update,
};
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{any, body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn client_for(mock_server: &MockServer) -> GrafanaClient {
    GrafanaClient::new(Auth::Token("test-token".into()), &mock_server.uri()).unwrap()
}

fn prometheus_json() -> serde_json::Value {
    serde_json::json!({
        "id": 1,
        "uid": "prom-1",
        "orgId": 1,
        "name": "Prometheus",
        "type": "prometheus",
        "access": "proxy",
        "url": "http://prometheus:9090",
        "isDefault": true
    })
}

fn no_org_header(req: &Request) -> bool {
    !req.headers.contains_key("x-grafana-org-id")
}

// =============================================================================
// Reads
// =============================================================================

#[tokio::test]
async fn test_list_decodes_array_and_sends_auth() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/datasources"))
        .and(header("authorization", "Bearer test-token"))
        .and(no_org_header)
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            prometheus_json(),
            {"id": 2, "orgId": 1, "name": "Loki", "type": "loki"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let items = Datasource::list(&client_for(&mock_server), OrgId::CURRENT)
        .await
        .unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].name, "Prometheus");
    assert_eq!(items[1].ds_type, "loki");
}

#[tokio::test]
async fn test_list_null_body_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/datasources"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&mock_server)
        .await;

    let items = assert_ok!(Datasource::list(&client_for(&mock_server), OrgId::CURRENT).await);
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_list_non_200_wraps_code_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/datasources"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Permission denied"))
        .mount(&mock_server)
        .await;

    let err = assert_err!(Datasource::list(&client_for(&mock_server), OrgId::CURRENT).await);
    match err {
        GrafanaError::Status { status_code, body } => {
            assert_eq!(status_code, 403);
            assert_eq!(body, "Permission denied");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_sends_org_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/datasources/1"))
        .and(header("X-Grafana-Org-Id", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(prometheus_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ds = Datasource::get(&client_for(&mock_server), 1, OrgId(5))
        .await
        .unwrap();
    assert_eq!(ds.uid.as_deref(), Some("prom-1"));
    assert!(ds.is_default);
}

#[tokio::test]
async fn test_get_requires_exactly_200() {
    let mock_server = MockServer::start().await;

    // 2xx other than 200 still counts as a failure for reads
    Mock::given(method("GET"))
        .and(path("/api/datasources/1"))
        .respond_with(ResponseTemplate::new(202).set_body_json(prometheus_json()))
        .mount(&mock_server)
        .await;

    let err = Datasource::get(&client_for(&mock_server), 1, OrgId::CURRENT)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(202));
}

#[tokio::test]
async fn test_get_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/datasources/9"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"message": "Data source not found"})),
        )
        .mount(&mock_server)
        .await;

    let err = Datasource::get(&client_for(&mock_server), 9, OrgId::CURRENT)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().starts_with("HTTP error 404: returns "));
    assert!(err.to_string().contains("Data source not found"));
}

#[tokio::test]
async fn test_get_invalid_json_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/datasources/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&mock_server)
        .await;

    let err = Datasource::get(&client_for(&mock_server), 1, OrgId::CURRENT)
        .await
        .unwrap_err();
    assert!(matches!(err, GrafanaError::ParseError(_)));
}

#[tokio::test]
async fn test_get_by_name_encodes_name() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/datasources/name/My%20Prometheus"))
        .respond_with(ResponseTemplate::new(200).set_body_json(prometheus_json()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ds = Datasource::get_by_name(&client_for(&mock_server), "My Prometheus", OrgId::CURRENT)
        .await
        .unwrap();
    assert_eq!(ds.id, 1);
}

#[tokio::test]
async fn test_list_types_decodes_map() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/datasources/plugins"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "graphite": {
                "type": "graphite",
                "name": "Graphite",
                "pluginType": "datasource",
                "metrics": true,
                "module": "plugins/graphite/module",
                "datasource": {"query": "query.html"}
            },
            "loki": {"type": "loki", "name": "Loki"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let types = DatasourceType::list_all(&client_for(&mock_server), OrgId::CURRENT)
        .await
        .unwrap();

    assert_eq!(types.len(), 2);
    assert!(types["graphite"].metrics);
    assert_eq!(types["loki"].name, "Loki");
}

#[tokio::test]
async fn test_list_types_non_200() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/datasources/plugins"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let err = DatasourceType::list_all(&client_for(&mock_server), OrgId::CURRENT)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "HTTP error 500: returns boom");
}

// =============================================================================
// Mutations
// =============================================================================

#[tokio::test]
async fn test_create_posts_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/datasources"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(serde_json::json!({
            "name": "Loki",
            "type": "loki",
            "access": "proxy",
            "url": "http://loki:3100"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 7,
            "name": "Loki",
            "message": "Datasource added"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ds = Datasource::new("Loki", "loki", "http://loki:3100");
    let status = Datasource::create(&client_for(&mock_server), &ds, OrgId::CURRENT)
        .await
        .unwrap();

    assert_eq!(status.id, Some(7));
    assert_eq!(status.message.as_deref(), Some("Datasource added"));
}

#[tokio::test]
async fn test_create_does_not_judge_status_code() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/datasources"))
        .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
            "message": "data source with the same name already exists"
        })))
        .mount(&mock_server)
        .await;

    let ds = Datasource::new("Loki", "loki", "http://loki:3100");
    let status = Datasource::create(&client_for(&mock_server), &ds, OrgId::CURRENT)
        .await
        .unwrap();

    assert!(status.id.is_none());
    assert_eq!(
        status.message.as_deref(),
        Some("data source with the same name already exists")
    );
}

#[tokio::test]
async fn test_create_non_json_reply_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/datasources"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&mock_server)
        .await;

    let ds = Datasource::new("Loki", "loki", "http://loki:3100");
    let err = Datasource::create(&client_for(&mock_server), &ds, OrgId::CURRENT)
        .await
        .unwrap_err();
    assert!(matches!(err, GrafanaError::ParseError(_)));
}

#[tokio::test]
async fn test_update_puts_to_datasource_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/datasources/3"))
        .and(header("X-Grafana-Org-Id", "2"))
        .and(body_partial_json(serde_json::json!({"id": 3, "url": "http://new:9090"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 3,
            "name": "Prometheus",
            "message": "Datasource updated"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut ds = Datasource::new("Prometheus", "prometheus", "http://new:9090");
    ds.id = 3;
    let status = Datasource::update(&client_for(&mock_server), &ds, OrgId(2))
        .await
        .unwrap();
    assert_eq!(status.message.as_deref(), Some("Datasource updated"));
}

#[tokio::test]
async fn test_delete_by_id_returns_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/datasources/4"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"message": "Data source deleted"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let status = Datasource::delete(&client_for(&mock_server), 4, OrgId::CURRENT)
        .await
        .unwrap();
    assert_eq!(status.message.as_deref(), Some("Data source deleted"));
}

#[tokio::test]
async fn test_delete_missing_is_still_a_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/datasources/name/gone"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"message": "Data source not found"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let status = Datasource::delete_by_name(&client_for(&mock_server), "gone", OrgId::CURRENT)
        .await
        .unwrap();
    assert_eq!(status.message.as_deref(), Some("Data source not found"));
}

#[tokio::test]
async fn test_transport_failure_is_http_error() {
    // Reserve a port, then free it so nothing listens there.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let client = GrafanaClient::new(Auth::Token("t".into()), &format!("http://{addr}")).unwrap();

    let err = Datasource::delete(&client, 1, OrgId::CURRENT).await.unwrap_err();
    assert!(matches!(err, GrafanaError::HttpError(_)));
}

#[tokio::test]
async fn test_basic_auth_header() {
    let mock_server = MockServer::start().await;

    // "admin:admin" in base64
    Mock::given(method("GET"))
        .and(path("/api/datasources"))
        .and(header("authorization", "Basic YWRtaW46YWRtaW4="))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client =
        GrafanaClient::new(Auth::parse_basic("admin:admin").unwrap(), &mock_server.uri()).unwrap();
    let items = Datasource::list(&client, OrgId::CURRENT).await.unwrap();
    assert!(items.is_empty());
}

// =============================================================================
// Edge cases
// =============================================================================

#[tokio::test]
async fn test_get_sparse_body_uses_zero_values() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/datasources/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 1})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ds = Datasource::get(&client_for(&mock_server), 1, OrgId::CURRENT)
        .await
        .unwrap();
    assert_eq!(ds.id, 1);
    assert!(ds.name.is_empty());
    assert!(ds.ds_type.is_empty());
}

#[tokio::test]
async fn test_get_by_name_non_200_wraps_code_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/datasources/name/Loki"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"message": "Data source not found"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = Datasource::get_by_name(&client_for(&mock_server), "Loki", OrgId::CURRENT)
        .await
        .unwrap_err();
    match err {
        GrafanaError::Status { status_code, body } => {
            assert_eq!(status_code, 404);
            assert_eq!(body, r#"{"message":"Data source not found"}"#);
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_dot_names_never_reach_the_server() {
    let mock_server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    for name in [".", ".."] {
        let err = Datasource::get_by_name(&client, name, OrgId::CURRENT)
            .await
            .unwrap_err();
        assert!(matches!(err, GrafanaError::InvalidArgument(_)));

        let err = Datasource::delete_by_name(&client, name, OrgId::CURRENT)
            .await
            .unwrap_err();
        assert!(matches!(err, GrafanaError::InvalidArgument(_)));
    }
}

#[tokio::test]
async fn test_delete_by_name_keeps_slash_in_one_segment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/datasources/name/team%2Fmetrics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 8,
            "message": "Data source deleted"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let status = Datasource::delete_by_name(&client_for(&mock_server), "team/metrics", OrgId::CURRENT)
        .await
        .unwrap();
    assert_eq!(status.id, Some(8));
}

#[tokio::test]
async fn test_list_types_null_body_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/datasources/plugins"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let types =
        assert_ok!(DatasourceType::list_all(&client_for(&mock_server), OrgId::CURRENT).await);
    assert!(types.is_empty());
}

#[tokio::test]
async fn test_update_non_json_reply_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/datasources/3"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut ds = Datasource::new("Prometheus", "prometheus", "http://prometheus:9090");
    ds.id = 3;
    let err = Datasource::update(&client_for(&mock_server), &ds, OrgId::CURRENT)
        .await
        .unwrap_err();
    assert!(matches!(err, GrafanaError::ParseError(_)));
}

#[tokio::test]
async fn test_delete_non_json_reply_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/datasources/4"))
        .respond_with(ResponseTemplate::new(200).set_body_string("deleted"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = Datasource::delete(&client_for(&mock_server), 4, OrgId::CURRENT)
        .await
        .unwrap_err();
    assert!(matches!(err, GrafanaError::ParseError(_)));
}
