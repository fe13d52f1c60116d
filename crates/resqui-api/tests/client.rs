use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::{Method, StatusCode, Uri},
};
use resqui_api::{ApiError, ClientConfig, ResqueClient};
use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Recorded {
    method: Method,
    uri: String,
    body: String,
}

#[derive(Clone)]
struct MockBackend {
    requests: Arc<Mutex<Vec<Recorded>>>,
    status: StatusCode,
    body: String,
}

async fn record(
    State(state): State<MockBackend>,
    method: Method,
    uri: Uri,
    body: String,
) -> (StatusCode, String) {
    state.requests.lock().await.push(Recorded {
        method,
        uri: uri.to_string(),
        body,
    });
    (state.status, state.body.clone())
}

/// Serve `body` with `status` for every request, recording what arrives.
///
/// Returns `None` when the sandbox forbids binding a local socket.
async fn spawn_backend(
    status: StatusCode,
    body: &str,
) -> Option<(String, Arc<Mutex<Vec<Recorded>>>)> {
    let state = MockBackend {
        requests: Arc::new(Mutex::new(Vec::new())),
        status,
        body: body.to_string(),
    };
    let requests = state.requests.clone();
    let app = Router::new().fallback(record).with_state(state);

    let listener = match tokio::net::TcpListener::bind("127.0.0.1:0").await {
        Ok(listener) => listener,
        Err(err) if err.kind() == std::io::ErrorKind::PermissionDenied => {
            eprintln!("skipping mock backend tests: local socket bind is not permitted");
            return None;
        }
        Err(err) => panic!("bind failed: {err}"),
    };
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Some((format!("http://{addr}"), requests))
}

fn client(base: &str) -> ResqueClient {
    ResqueClient::new(&ClientConfig::new(base)).unwrap()
}

async fn only_request(requests: &Arc<Mutex<Vec<Recorded>>>) -> Recorded {
    let requests = requests.lock().await;
    assert_eq!(requests.len(), 1, "expected one request, got {:?}", *requests);
    requests[0].clone()
}

#[tokio::test]
async fn test_stats_decodes_response() {
    let body = r#"{"success_count":10,"failure_count":2,"available_queues":["default","mail"]}"#;
    let Some((base, requests)) = spawn_backend(StatusCode::OK, body).await else {
        return;
    };

    let stats = client(&base).stats().await.unwrap();
    assert_eq!(stats.success_count, 10);
    assert_eq!(stats.failure_count, 2);
    assert_eq!(stats.queues, vec!["default", "mail"]);

    let req = only_request(&requests).await;
    assert_eq!(req.method, Method::GET);
    assert_eq!(req.uri, "/api/stats");
}

#[tokio::test]
async fn test_paths_resolve_under_base_sub_path() {
    let Some((base, requests)) = spawn_backend(StatusCode::OK, r#"{"data":[]}"#).await else {
        return;
    };

    let workers = client(&format!("{base}/resque")).active_workers().await.unwrap();
    assert!(workers.is_empty());

    let req = only_request(&requests).await;
    assert_eq!(req.uri, "/resque/api/active_workers");
}

#[tokio::test]
async fn test_queue_page_sends_first_job_offset() {
    let body = r#"{"total_jobs":25,"jobs":[null]}"#;
    let Some((base, requests)) = spawn_backend(StatusCode::OK, body).await else {
        return;
    };

    let page = client(&base).queue_page("mail", 20).await.unwrap();
    assert_eq!(page.total_jobs, 25);
    assert_eq!(page.jobs, vec![None]);

    let req = only_request(&requests).await;
    assert_eq!(req.method, Method::GET);
    assert_eq!(req.uri, "/api/queue/mail?first_job=20");
}

#[tokio::test]
async fn test_failed_page_sends_from_job_offset() {
    let body = r#"{"total_failed":1,"jobs":[{"error":"failed to parse job"}]}"#;
    let Some((base, requests)) = spawn_backend(StatusCode::OK, body).await else {
        return;
    };

    let page = client(&base).failed_page(10).await.unwrap();
    assert_eq!(page.total_failed, 1);
    assert_eq!(page.jobs[0].error, "failed to parse job");
    assert_eq!(page.jobs[0].job_id(), None);

    let req = only_request(&requests).await;
    assert_eq!(req.uri, "/api/failed?from_job=10");
}

#[tokio::test]
async fn test_single_job_actions_send_id_body() {
    let Some((base, requests)) = spawn_backend(StatusCode::OK, "").await else {
        return;
    };
    let client = client(&base);

    client.delete_failed_job("j-1").await.unwrap();
    client.retry_failed_job("j-2").await.unwrap();

    let requests = requests.lock().await;
    assert_eq!(requests.len(), 2);

    assert_eq!(requests[0].method, Method::DELETE);
    assert_eq!(requests[0].uri, "/api/failed_job");
    let body: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(body, serde_json::json!({"id": "j-1"}));

    assert_eq!(requests[1].method, Method::POST);
    assert_eq!(requests[1].uri, "/api/retry_job");
    let body: serde_json::Value = serde_json::from_str(&requests[1].body).unwrap();
    assert_eq!(body, serde_json::json!({"id": "j-2"}));
}

#[tokio::test]
async fn test_bulk_actions_use_expected_methods() {
    let Some((base, requests)) = spawn_backend(StatusCode::OK, "").await else {
        return;
    };
    let client = client(&base);

    client.clear_queue("default").await.unwrap();
    client.clear_failed().await.unwrap();
    client.retry_all().await.unwrap();

    let seen: Vec<(Method, String)> = requests
        .lock()
        .await
        .iter()
        .map(|r| (r.method.clone(), r.uri.clone()))
        .collect();
    assert_eq!(
        seen,
        vec![
            (Method::DELETE, "/api/queue/default".to_string()),
            (Method::DELETE, "/api/failed".to_string()),
            (Method::POST, "/api/retry_all".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_delete_worker_escapes_id() {
    let Some((base, requests)) = spawn_backend(StatusCode::OK, "").await else {
        return;
    };

    client(&base).delete_worker("web 1:42:mail/low").await.unwrap();

    let req = only_request(&requests).await;
    assert_eq!(req.method, Method::DELETE);
    assert_eq!(req.uri, "/api/worker/web%201:42:mail%2Flow");
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let Some((base, _requests)) =
        spawn_backend(StatusCode::INTERNAL_SERVER_ERROR, "boom").await
    else {
        return;
    };

    let err = client(&base).retry_all().await.unwrap_err();
    assert!(
        matches!(err, ApiError::Status { status: 500, ref path } if path == "/api/retry_all"),
        "unexpected error: {err:?}"
    );

    let err = client(&base).stats().await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 500, .. }));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let Some((base, _requests)) = spawn_backend(StatusCode::OK, "<html>").await else {
        return;
    };

    let err = client(&base).failed_page(0).await.unwrap_err();
    assert!(matches!(err, ApiError::Decode { .. }), "unexpected error: {err:?}");
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    // Port 9 (discard) is closed on loopback in any sane test environment.
    let err = client("http://127.0.0.1:9").stats().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport { .. }), "unexpected error: {err:?}");
}
