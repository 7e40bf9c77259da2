//! End-to-end tests: the real router over an in-memory SQLite pool, driven through
//! the HTTP adapter and a client `Session`.

use api_lib::adapters::{http::decode, DbAdapter, HttpRecordService};
use api_lib::web::protocol::QuestionResource;
use api_lib::web::{self, state::AppState};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use prep_tracker_core::domain::{CodeSnippetDraft, Difficulty, QuestionDraft};
use prep_tracker_core::ports::{Clock, PortError, RecordService};
use prep_tracker_core::session::{Session, SessionEvent};
use prep_tracker_core::sync::{HostStatus, SyncStatus};
use serde_json::{json, Value};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::sync::Arc;

struct TestApp {
    base_url: String,
    db: Arc<DbAdapter>,
    pool: SqlitePool,
}

impl TestApp {
    fn client(&self) -> HttpRecordService {
        HttpRecordService::new(self.base_url.clone()).unwrap()
    }
}

async fn spawn_app() -> TestApp {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let db = Arc::new(DbAdapter::new(pool.clone()));
    db.run_migrations().await.unwrap();

    let state = Arc::new(AppState {
        records: db.clone(),
    });
    let app = web::api_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        base_url: format!("http://{}", addr),
        db,
        pool,
    }
}

struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

fn question(title: &str) -> QuestionDraft {
    QuestionDraft {
        title: title.to_string(),
        ..Default::default()
    }
}

fn snippet(title: &str) -> CodeSnippetDraft {
    CodeSnippetDraft {
        title: title.to_string(),
        language: "python".to_string(),
        category: "array".to_string(),
        description: Some("Scan once".to_string()),
        condensed_code: "return -1".to_string(),
        complexity: "Time: O(n)".to_string(),
    }
}

#[tokio::test]
async fn created_question_reads_back_equal() {
    let app = spawn_app().await;
    let client = app.client();

    let draft = QuestionDraft {
        title: "Two Sum".to_string(),
        description: "Find two numbers adding up to target.".to_string(),
        link: Some("https://leetcode.com/problems/two-sum/".to_string()),
        category: Some("Algorithm".to_string()),
        difficulty: Some(Difficulty::Easy),
        platform: "LeetCode".to_string(),
        date_solved: NaiveDate::from_ymd_opt(2024, 5, 15),
        hint: "Hash map".to_string(),
        solution: "one pass".to_string(),
        notes: "O(n)".to_string(),
        tags: vec!["hash-map".to_string(), "array".to_string()],
    };

    let created = client.create_question(&draft).await.unwrap();
    assert_eq!(QuestionDraft::from(&created), draft);

    let fetched = client.get_question(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn lists_are_newest_first() {
    let app = spawn_app().await;
    let client = app.client();
    for title in ["first", "second", "third"] {
        client.create_question(&question(title)).await.unwrap();
        client.create_code_snippet(&snippet(title)).await.unwrap();
    }

    let questions: Vec<_> = client
        .list_questions()
        .await
        .unwrap()
        .into_iter()
        .map(|q| q.title)
        .collect();
    assert_eq!(questions, vec!["third", "second", "first"]);

    let snippets: Vec<_> = client
        .list_code_snippets()
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.title)
        .collect();
    assert_eq!(snippets, vec!["third", "second", "first"]);
}

#[tokio::test]
async fn missing_records_are_not_found() {
    let app = spawn_app().await;
    let client = app.client();

    assert_eq!(
        client.get_question(99).await,
        Err(PortError::NotFound("Question not found".to_string()))
    );
    assert_eq!(
        client.update_code_snippet(99, &snippet("x")).await,
        Err(PortError::NotFound("Code snippet not found".to_string()))
    );

    let created = client.create_question(&question("gone soon")).await.unwrap();
    client.delete_question(created.id).await.unwrap();
    assert!(matches!(
        client.delete_question(created.id).await,
        Err(PortError::NotFound(_))
    ));
}

#[tokio::test]
async fn server_rejects_incomplete_records() {
    let app = spawn_app().await;
    let client = app.client();

    assert_eq!(
        client.create_question(&question("")).await,
        Err(PortError::Validation("Title is required".to_string()))
    );

    let mut incomplete = snippet("No code");
    incomplete.condensed_code.clear();
    assert_eq!(
        client.create_code_snippet(&incomplete).await,
        Err(PortError::Validation(
            "Title, language, category, and condensed code are required".to_string()
        ))
    );
}

#[tokio::test]
async fn wire_format_is_camel_case_with_status_codes() {
    let app = spawn_app().await;
    let http = reqwest::Client::new();

    let response = http
        .post(format!("{}/api/questions", app.base_url))
        .json(&json!({
            "title": "Design a URL Shortener",
            "difficulty": "Medium",
            "dateSolved": "2024-05-25",
            "link": "",
            "tags": ["system-design"]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["dateSolved"], "2024-05-25");
    assert_eq!(body["difficulty"], "Medium");
    assert_eq!(body["link"], Value::Null);
    assert!(body["createdAt"].is_string());

    let response = http
        .post(format!("{}/api/questions", app.base_url))
        .json(&json!({ "title": "x", "difficulty": "Impossible" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("Impossible"));

    let id = app.db.list_questions().await.unwrap()[0].id;
    let response = http
        .delete(format!("{}/api/questions/{}", app.base_url, id))
        .send()
        .await
        .unwrap();
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Question deleted successfully");
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpRecordService::new(format!("http://{}", addr)).unwrap();
    assert!(matches!(
        client.list_questions().await,
        Err(PortError::Transport(_))
    ));
}

#[tokio::test]
async fn session_picks_up_remote_deletions() {
    let app = spawn_app().await;
    for title in ["a", "b", "c"] {
        app.db.create_question(&question(title)).await.unwrap();
    }

    let clock = Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 6, 1, 9, 5, 0).unwrap()));
    let mut session = Session::new(Arc::new(app.client()), clock, HostStatus::default());
    session.init().await;
    assert_eq!(session.cache().questions.len(), 3);
    session.drain_events();

    let doomed = session.cache().questions.items()[0].id;
    app.db.delete_question(doomed).await.unwrap();

    assert!(session.refresh().await);
    assert_eq!(session.sync_status(), SyncStatus::Idle);
    assert_eq!(session.cache().questions.len(), 2);
    assert_eq!(session.status().text, "Last sync: 09:05");

    let events = session.drain_events();
    assert!(events.contains(&SessionEvent::Notification(
        "🔄 Data synced: -1 questions".to_string()
    )));
    assert!(events.contains(&SessionEvent::ViewsChanged));
}

#[tokio::test]
async fn session_writes_go_through_the_server() {
    let app = spawn_app().await;
    let clock = Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 6, 1, 18, 30, 0).unwrap()));
    let mut session = Session::new(Arc::new(app.client()), clock, HostStatus::default());
    session.init().await;

    let created = session
        .create_code_snippet(snippet("Find First Negative"))
        .await
        .unwrap();
    assert_eq!(session.status().text, "Saved (18:30)");
    assert_eq!(app.db.get_code_snippet(created.id).await.unwrap(), created);

    // Nothing changed remotely since the write, so the next sync is a no-op.
    session.drain_events();
    session.refresh().await;
    assert_eq!(session.status().text, "Up to date (18:30)");
    assert!(!session
        .drain_events()
        .iter()
        .any(|e| matches!(e, SessionEvent::Notification(_))));
}

#[tokio::test]
async fn malformed_bodies_and_ids_are_bad_requests() {
    let app = spawn_app().await;
    let http = reqwest::Client::new();

    let response = http
        .post(format!("{}/api/questions", app.base_url))
        .json(&json!({ "title": 5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    assert!(matches!(
        decode::<QuestionResource>(response).await,
        Err(PortError::Validation(_))
    ));

    for (method, path, body) in [
        (reqwest::Method::POST, "/api/questions", json!({ "title": "x", "tags": "a,b" })),
        (reqwest::Method::POST, "/api/code-snippets", json!({ "title": "x" })),
        (reqwest::Method::PUT, "/api/questions/abc", json!({ "title": "x" })),
        (reqwest::Method::GET, "/api/code-snippets/abc", Value::Null),
    ] {
        let response = http
            .request(method.clone(), format!("{}{}", app.base_url, path))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST, "{} {}", method, path);
        let body: Value = response.json().await.unwrap();
        assert!(body["error"].is_string(), "{} {}: {}", method, path, body);
    }

    let response = http
        .post(format!("{}/api/questions", app.base_url))
        .header("content-type", "text/plain")
        .body("title=x")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    assert!(app.db.list_questions().await.unwrap().is_empty());
}

#[tokio::test]
async fn store_failures_surface_as_server_errors() {
    let app = spawn_app().await;
    app.db.create_question(&question("a")).await.unwrap();

    let clock = Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 6, 1, 9, 5, 0).unwrap()));
    let mut session = Session::new(Arc::new(app.client()), clock, HostStatus::default());
    session.init().await;
    assert_eq!(session.sync_status(), SyncStatus::Idle);

    sqlx::query("DROP TABLE questions")
        .execute(&app.pool)
        .await
        .unwrap();

    assert_eq!(
        app.client().list_questions().await,
        Err(PortError::Server {
            status: 500,
            message: "Internal server error".to_string(),
        })
    );

    assert!(!session.refresh().await);
    assert_eq!(session.sync_status(), SyncStatus::Error);
    assert_eq!(session.status().text, "Sync failed");
    assert_eq!(session.cache().questions.len(), 1);
}
