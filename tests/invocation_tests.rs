//! Submit-then-poll protocol tests against an in-process mock provider.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{spawn_provider, test_config, Completion, MockProvider, Submit};
use fold_relay::{FoldingError, InvocationClient};
use serde_json::json;

fn client(base: &str) -> InvocationClient {
    InvocationClient::new(test_config(base)).unwrap()
}

/// Two pending answers then success: exactly three status queries
#[tokio::test]
async fn test_deferred_job_polls_until_success() {
    let result = json!({ "structures": [{ "structure": "data_x" }] });
    let mock = Arc::new(
        MockProvider::new(Submit::Defer)
            .with_pending(2, 202)
            .with_completion(Completion::ok(&result)),
    );
    let base = spawn_provider(mock.clone()).await;

    let body = client(&base)
        .invoke("Boltz-2", &format!("{base}/predict"), &json!({ "sequence": "MKT" }))
        .await
        .unwrap();

    assert_eq!(body, result);
    assert_eq!(mock.submits(), 1);
    assert_eq!(mock.polls(), 3);
    assert_eq!(mock.polls_for("job-1"), 3);
}

#[tokio::test]
async fn test_immediate_success_skips_polling() {
    let result = json!({ "pdbs": ["ATOM"] });
    let mock = Arc::new(MockProvider::new(Submit::Immediate(result.clone())));
    let base = spawn_provider(mock.clone()).await;

    let body = client(&base)
        .invoke("ESMFold", &format!("{base}/predict"), &json!({}))
        .await
        .unwrap();

    assert_eq!(body, result);
    assert_eq!(mock.polls(), 0);
}

#[tokio::test]
async fn test_submit_error_fails_without_polling() {
    let mock = Arc::new(MockProvider::new(Submit::Fail(
        422,
        r#"{"detail":"invalid sequence"}"#.to_string(),
    )));
    let base = spawn_provider(mock.clone()).await;

    let err = client(&base)
        .invoke("Boltz-2", &format!("{base}/predict"), &json!({}))
        .await
        .unwrap_err();

    match err {
        FoldingError::Provider {
            status,
            message,
            body,
        } => {
            assert_eq!(status, 422);
            assert!(message.contains("invalid sequence"));
            assert_eq!(body.unwrap()["detail"], "invalid sequence");
        }
        other => panic!("expected provider error, got {other:?}"),
    }
    assert_eq!(mock.submits(), 1);
    assert_eq!(mock.polls(), 0);
}

#[tokio::test]
async fn test_terminal_poll_status_fails() {
    for code in [400u16, 401, 404, 422, 500] {
        let mock = Arc::new(
            MockProvider::new(Submit::Defer)
                .with_pending(1, 202)
                .with_completion(Completion::status(code, "function failed")),
        );
        let base = spawn_provider(mock.clone()).await;

        let err = client(&base)
            .invoke("Boltz-2", &format!("{base}/predict"), &json!({}))
            .await
            .unwrap_err();

        match err {
            FoldingError::Provider { status, body, .. } => {
                assert_eq!(status, code);
                assert!(body.is_none());
            }
            other => panic!("expected provider error for {code}, got {other:?}"),
        }
        assert_eq!(mock.polls(), 2, "status {code} should stop polling");
    }
}

#[tokio::test]
async fn test_non_terminal_error_status_keeps_polling() {
    let result = json!({ "ok": true });
    let mock = Arc::new(
        MockProvider::new(Submit::Defer)
            .with_pending(3, 503)
            .with_completion(Completion::ok(&result)),
    );
    let base = spawn_provider(mock.clone()).await;

    let body = client(&base)
        .invoke("Boltz-2", &format!("{base}/predict"), &json!({}))
        .await
        .unwrap();

    assert_eq!(body, result);
    assert_eq!(mock.polls(), 4);
}

#[tokio::test]
async fn test_accepted_without_job_id_is_provider_error() {
    let mock = Arc::new(MockProvider::new(Submit::DeferWithoutId));
    let base = spawn_provider(mock.clone()).await;

    let err = client(&base)
        .invoke("Boltz-2", &format!("{base}/predict"), &json!({}))
        .await
        .unwrap_err();

    assert!(matches!(err, FoldingError::Provider { status: 202, .. }));
    assert_eq!(mock.polls(), 0);
}

#[tokio::test]
async fn test_max_polls_bound() {
    let mock = Arc::new(
        MockProvider::new(Submit::Defer)
            .with_pending(100, 202)
            .with_completion(Completion::ok(&json!({}))),
    );
    let base = spawn_provider(mock.clone()).await;
    let config = test_config(&base).with_max_polls(Some(4));

    let err = InvocationClient::new(config)
        .unwrap()
        .invoke("Boltz-2", &format!("{base}/predict"), &json!({}))
        .await
        .unwrap_err();

    assert!(matches!(err, FoldingError::Timeout(_)), "got {err:?}");
    assert_eq!(mock.polls(), 4);
}

#[tokio::test]
async fn test_max_wait_bound() {
    let mock = Arc::new(
        MockProvider::new(Submit::Defer)
            .with_pending(usize::MAX, 202)
            .with_completion(Completion::ok(&json!({}))),
    );
    let base = spawn_provider(mock.clone()).await;
    let config = test_config(&base).with_max_wait(Some(Duration::from_millis(100)));

    let err = InvocationClient::new(config)
        .unwrap()
        .invoke("Boltz-2", &format!("{base}/predict"), &json!({}))
        .await
        .unwrap_err();

    assert!(matches!(err, FoldingError::Timeout(_)), "got {err:?}");
    assert!(mock.polls() >= 1);
}

#[tokio::test]
async fn test_single_request_timeout() {
    let mock = Arc::new(MockProvider::new(Submit::Slow(
        Duration::from_secs(5),
        json!({}),
    )));
    let base = spawn_provider(mock.clone()).await;
    let config = test_config(&base).with_request_timeout(Duration::from_millis(200));

    let err = InvocationClient::new(config)
        .unwrap()
        .invoke("ESMFold", &format!("{base}/predict"), &json!({}))
        .await
        .unwrap_err();

    assert!(matches!(err, FoldingError::Timeout(_)), "got {err:?}");
    assert_eq!(err.http_status(), 408);
}

#[tokio::test]
async fn test_connection_refused() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let base = format!("http://{addr}");
    let err = client(&base)
        .invoke("ESMFold", &format!("{base}/predict"), &json!({}))
        .await
        .unwrap_err();

    assert!(matches!(err, FoldingError::Connection(_)), "got {err:?}");
    assert_eq!(err.http_status(), 503);
}

#[tokio::test]
async fn test_non_json_success_body() {
    let mock = Arc::new(
        MockProvider::new(Submit::Defer).with_completion(Completion::status(200, "not json")),
    );
    let base = spawn_provider(mock.clone()).await;

    let err = client(&base)
        .invoke("Boltz-2", &format!("{base}/predict"), &json!({}))
        .await
        .unwrap_err();

    assert!(matches!(err, FoldingError::Decode(_)), "got {err:?}");
}

#[tokio::test]
async fn test_request_headers_and_payload() {
    let mock = Arc::new(MockProvider::new(Submit::Immediate(json!({}))));
    let base = spawn_provider(mock.clone()).await;
    let payload = json!({ "sequence": "MKT" });

    client(&base)
        .invoke("ESMFold", &format!("{base}/predict"), &payload)
        .await
        .unwrap();

    assert_eq!(
        mock.last_submit_header("authorization").as_deref(),
        Some("Bearer test-key")
    );
    assert_eq!(
        mock.last_submit_header("nvcf-poll-seconds").as_deref(),
        Some("300")
    );
    assert_eq!(mock.last_payload(), Some(payload));
}

#[tokio::test]
async fn test_concurrent_invocations_are_independent() {
    let result = json!({ "done": true });
    let mock = Arc::new(
        MockProvider::new(Submit::Defer)
            .with_pending(2, 202)
            .with_completion(Completion::ok(&result)),
    );
    let base = spawn_provider(mock.clone()).await;
    let client = client(&base);
    let url = format!("{base}/predict");

    let body_a = json!({ "n": 1 });
    let body_b = json!({ "n": 2 });
    let (a, b) = tokio::join!(
        client.invoke("Boltz-2", &url, &body_a),
        client.invoke("Boltz-2", &url, &body_b),
    );

    assert_eq!(a.unwrap(), result);
    assert_eq!(b.unwrap(), result);
    assert_eq!(mock.submits(), 2);
    assert_eq!(mock.polls_for("job-1"), 3);
    assert_eq!(mock.polls_for("job-2"), 3);
}
