mod common;

use axum::http::{Method, StatusCode};
use common::*;
use serde_json::json;
use tower::ServiceExt;

// No backend is running at this address; every hit would fail loudly.
const NO_BACKEND: &str = "http://127.0.0.1:1";

/// With the memory store enabled, single-task reads are served locally.
#[tokio::test]
async fn integration_fallback_serves_task_reads() {
    let (app, state) = build_app(test_config(NO_BACKEND, true, 30)).await;
    state
        .fallback
        .put_task(1, json!({"id": 1, "title": "buy milk", "completed": false}))
        .await
        .unwrap();

    let response = app
        .oneshot(request_with_session("/api/tasks/1", "adam", Method::GET, None))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["title"], "buy milk");
}

/// Updates merge the patch into the stored record and return the result.
#[tokio::test]
async fn integration_fallback_update_merges() {
    let (app, state) = build_app(test_config(NO_BACKEND, true, 30)).await;
    state
        .fallback
        .put_task(1, json!({"id": 1, "title": "buy milk", "completed": false}))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(request_with_session(
            "/api/tasks/1",
            "adam",
            Method::PATCH,
            Some(json!({"completed": true})),
        ))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["title"], "buy milk");
    assert_eq!(body["completed"], true);
}

/// Deleting a stored task yields 204; the record is gone afterwards.
#[tokio::test]
async fn integration_fallback_delete_task() {
    let (app, state) = build_app(test_config(NO_BACKEND, true, 30)).await;
    state.fallback.put_task(5, json!({"id": 5})).await.unwrap();

    let response = app
        .clone()
        .oneshot(request_with_session(
            "/api/tasks/5",
            "adam",
            Method::DELETE,
            None,
        ))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(response).await.is_empty());

    let response = app
        .oneshot(request_with_session("/api/tasks/5", "adam", Method::GET, None))
        .await
        .expect("request should complete");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Unknown task ids report 404 with the standard error shape.
#[tokio::test]
async fn integration_fallback_missing_task() {
    let (app, _state) = build_app(test_config(NO_BACKEND, true, 30)).await;

    let response = app
        .oneshot(request_with_session("/api/tasks/99", "adam", Method::GET, None))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Task not found");
}

/// Conversations and their messages are served and deleted locally.
#[tokio::test]
async fn integration_fallback_conversations() {
    let (app, state) = build_app(test_config(NO_BACKEND, true, 30)).await;
    state
        .fallback
        .put_conversation(
            "c1",
            json!({"id": "c1", "title": "groceries"}),
            vec![
                json!({"role": "user", "content": "add milk"}),
                json!({"role": "assistant", "content": "Added."}),
            ],
        )
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(request_with_session(
            "/api/conversations/c1",
            "adam",
            Method::GET,
            None,
        ))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["title"], "groceries");

    let response = app
        .clone()
        .oneshot(request_with_session(
            "/api/conversations/c1/messages",
            "adam",
            Method::GET,
            None,
        ))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().map(|a| a.len()), Some(2));

    let response = app
        .clone()
        .oneshot(request_with_session(
            "/api/conversations/c1",
            "adam",
            Method::DELETE,
            None,
        ))
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(request_with_session(
            "/api/conversations/c1",
            "adam",
            Method::GET,
            None,
        ))
        .await
        .expect("request should complete");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Fallback mode still requires a session.
#[tokio::test]
async fn integration_fallback_requires_session() {
    let (app, state) = build_app(test_config(NO_BACKEND, true, 30)).await;
    state.fallback.put_task(1, json!({"id": 1})).await.unwrap();

    let response = app
        .oneshot(request_without_session("/api/tasks/1", Method::GET, None))
        .await
        .expect("request should complete");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
