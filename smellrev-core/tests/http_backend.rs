//! Wire-level tests for the HTTP backend against a local mock server.
//!
//! Each test binds an axum router to an ephemeral port and points an
//! `HttpBackend` at it, exercising the fetch/submit translation and the
//! failure paths end to end.

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;

use smellrev_core::backend::HttpBackend;
use smellrev_core::session::{FragmentSource, VerdictSink};
use smellrev_core::types::{Annotation, SmellCategory, Verdict, VerdictStatus};

async fn spawn_server(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

fn sample_verdict() -> Verdict {
    Verdict {
        reviewer: "dana".into(),
        kind: "method".into(),
        languages: vec!["TypeScript".into()],
        start_line: 10,
        end_line: 14,
        code: "const x = 1;".into(),
        status: VerdictStatus::Submitted,
        fragment_id: Some(7),
        annotations: vec![Annotation {
            smell_type: "Long Method".into(),
            category: SmellCategory::CodeSmell,
            suggestion: "split it".into(),
            refactored_code: "const y = 2;".into(),
        }],
    }
}

#[tokio::test]
async fn fetches_first_fragment_without_hint() {
    let app = Router::new().route(
        "/snippets/next",
        get(|| async {
            Json(serde_json::json!({
                "id": 7,
                "code": "let a = 1;",
                "startLine": 3,
                "endLine": 3,
                "languages": "JavaScript",
                "type": "block",
                "aiComment": "dense",
                "aiSuggestions": [
                    { "smellType": "God Class", "category": "Anti-pattern", "suggestion": "s" },
                    { "smellType": "Blob", "suggestion": "" }
                ]
            }))
        }),
    );
    let backend = HttpBackend::new(spawn_server(app).await);

    let fragment = backend.next_fragment(None).await.expect("fetch");

    assert_eq!(fragment.id, Some(7));
    assert_eq!(fragment.languages, vec!["JavaScript"]);
    assert_eq!(fragment.kind, "block");
    assert_eq!(fragment.assist_comment.as_deref(), Some("dense"));
    assert_eq!(fragment.suggestions[0].category, SmellCategory::AntiPattern);
    assert_eq!(fragment.suggestions[1].category, SmellCategory::CodeSmell);
}

#[tokio::test]
async fn fetch_with_hint_uses_the_continuation_route() {
    let seen: Arc<Mutex<Option<i64>>> = Arc::new(Mutex::new(None));
    let app = Router::new()
        .route(
            "/snippets/next/:id",
            get(|State(seen): State<Arc<Mutex<Option<i64>>>>, Path(id): Path<i64>| async move {
                *seen.lock().unwrap() = Some(id);
                Json(serde_json::json!({
                    "id": 8,
                    "code": "x",
                    "startLine": 1,
                    "endLine": 1,
                    "languages": ["JavaScript", "TypeScript"],
                    "type": "block"
                }))
            }),
        )
        .with_state(seen.clone());
    let backend = HttpBackend::new(spawn_server(app).await);

    let fragment = backend.next_fragment(Some(7)).await.expect("fetch");

    assert_eq!(*seen.lock().unwrap(), Some(7));
    assert_eq!(fragment.id, Some(8));
    assert_eq!(fragment.languages.len(), 2);
}

#[tokio::test]
async fn empty_queue_is_a_fetch_failure() {
    let app = Router::new().route("/snippets/next", get(|| async { StatusCode::NO_CONTENT }));
    let backend = HttpBackend::new(spawn_server(app).await);

    let err = backend.next_fragment(None).await.expect_err("204 must fail");
    assert!(err.to_string().contains("no fragment available"));
}

#[tokio::test]
async fn records_verdict_with_wire_field_names() {
    let posted: Arc<Mutex<Option<serde_json::Value>>> = Arc::new(Mutex::new(None));
    let app = Router::new()
        .route(
            "/annotations",
            post(
                |State(posted): State<Arc<Mutex<Option<serde_json::Value>>>>,
                 Json(body): Json<serde_json::Value>| async move {
                    *posted.lock().unwrap() = Some(body);
                    "Annotation saved"
                },
            ),
        )
        .with_state(posted.clone());
    let backend = HttpBackend::new(spawn_server(app).await);

    backend.record(&sample_verdict()).await.expect("record");

    let body = posted.lock().unwrap().clone().expect("server saw the verdict");
    assert_eq!(body["annotator"], "dana");
    assert_eq!(body["type"], "method");
    assert_eq!(body["languages"], serde_json::json!(["TypeScript"]));
    assert_eq!(body["startLine"], 10);
    assert_eq!(body["endLine"], 14);
    assert_eq!(body["status"], "SUBMITTED");
    assert_eq!(body["codeSnippetId"], 7);
    assert_eq!(body["annotations"][0]["smellType"], "Long Method");
    assert_eq!(body["annotations"][0]["refactoredCode"], "const y = 2;");
}

#[tokio::test]
async fn server_error_is_a_submit_failure() {
    let app = Router::new()
        .route("/annotations", post(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
    let backend = HttpBackend::new(spawn_server(app).await);

    assert!(backend.record(&sample_verdict()).await.is_err());
}

#[tokio::test]
async fn unreachable_server_is_a_fetch_failure() {
    // Nothing is listening on this port (bound and immediately dropped).
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let backend = HttpBackend::new(format!("http://{addr}"));

    assert!(backend.next_fragment(None).await.is_err());
}
