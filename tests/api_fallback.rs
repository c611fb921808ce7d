//! Router tests over the fallback backend and an in-memory fake backend.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceExt;

use quizbank_server::api::{router, AppState};
use quizbank_server::error::{QuizError, Result};
use quizbank_server::schema::{InsertQuestion, InsertScore, Question, Score};
use quizbank_server::security::{AdminCredentials, ADMIN_PASSWORD_HEADER, ADMIN_USERNAME_HEADER};
use quizbank_server::storage::{FallbackStorage, Storage, StorageMode};

fn admin() -> AdminCredentials {
    AdminCredentials::new(Some("guru".to_string()), Some("rahasia".to_string()))
}

fn fallback_app(credentials: AdminCredentials) -> Router {
    router(AppState::new(Arc::new(FallbackStorage::new(credentials))))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn as_admin(mut request: Request<Body>, username: &str, password: &str) -> Request<Body> {
    let headers = request.headers_mut();
    headers.insert(ADMIN_USERNAME_HEADER, username.parse().unwrap());
    headers.insert(ADMIN_PASSWORD_HEADER, password.parse().unwrap());
    request
}

fn new_question() -> Value {
    json!({
        "question": "Apa itu pengangguran musiman?",
        "options": ["a", "b", "c", "d"],
        "correctAnswer": 3
    })
}

#[tokio::test]
async fn health_reports_fallback_mode() {
    let app = fallback_app(admin());
    let (status, body) = send(&app, get("/api/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["mode"], "fallback");
    assert_eq!(body["database_configured"], false);
}

#[tokio::test]
async fn lists_ten_default_questions() {
    let app = fallback_app(admin());
    let (status, body) = send(&app, get("/api/questions")).await;

    assert_eq!(status, StatusCode::OK);
    let questions = body.as_array().unwrap();
    assert_eq!(questions.len(), 10);
    assert_eq!(questions[0]["id"], 1);
    assert_eq!(questions[9]["id"], 10);
}

#[tokio::test]
async fn question_by_id_and_not_found() {
    let app = fallback_app(admin());

    let (status, body) = send(&app, get("/api/questions/2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["correctAnswer"], 1);
    assert_eq!(body["options"][1], "15 tahun");

    let (status, body) = send(&app, get("/api/questions/99")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let (status, _) = send(&app, get("/api/questions/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn score_submission_is_synthesized_but_not_listed() {
    let app = fallback_app(admin());

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/scores",
            json!({"studentName": "Rina", "score": 80, "totalQuestions": 10}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["studentName"], "Rina");
    assert!(body["createdAt"].is_string());

    let (status, body) = send(&app, get("/api/scores")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn invalid_score_is_rejected_with_details() {
    let app = fallback_app(admin());

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/scores",
            json!({"studentName": "", "score": 120, "totalQuestions": 0}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_failed");
    assert_eq!(body["details"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn malformed_json_is_invalid_request() {
    let app = fallback_app(admin());

    let request = Request::post("/api/scores")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");
}

#[tokio::test]
async fn admin_login_returns_redacted_admin() {
    let app = fallback_app(admin());

    let (status, body) = send(
        &app,
        json_request("POST", "/api/admin/login", json!({"username": "guru", "password": "rahasia"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "guru");
    assert_eq!(body["password"], "[PROTECTED]");

    let (status, _) = send(
        &app,
        json_request("POST", "/api/admin/login", json!({"username": "guru", "password": "salah"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_login_fails_closed_without_secrets() {
    let app = fallback_app(AdminCredentials::default());

    let (status, _) = send(
        &app,
        json_request("POST", "/api/admin/login", json!({"username": "guru", "password": "rahasia"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let request = as_admin(json_request("POST", "/api/admin/questions", new_question()), "guru", "rahasia");
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "configuration_error");
}

#[tokio::test]
async fn admin_routes_require_credentials() {
    let app = fallback_app(admin());

    let (status, _) = send(&app, json_request("POST", "/api/admin/questions", new_question())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let request = as_admin(json_request("POST", "/api/admin/questions", new_question()), "guru", "salah");
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn fallback_admin_mutations_do_not_persist() {
    let app = fallback_app(admin());

    let request = as_admin(json_request("POST", "/api/admin/questions", new_question()), "guru", "rahasia");
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 11);

    let request = as_admin(
        Request::delete("/api/admin/questions/3").body(Body::empty()).unwrap(),
        "guru",
        "rahasia",
    );
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, body) = send(&app, get("/api/questions")).await;
    assert_eq!(body.as_array().unwrap().len(), 10);

    let request = as_admin(
        Request::delete("/api/admin/scores/5").body(Body::empty()).unwrap(),
        "guru",
        "rahasia",
    );
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let request = as_admin(
        Request::delete("/api/admin/scores").body(Body::empty()).unwrap(),
        "guru",
        "rahasia",
    );
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn update_validates_before_storage() {
    let app = fallback_app(admin());

    let request = as_admin(
        json_request(
            "PUT",
            "/api/admin/questions/1",
            json!({"question": "Hm?", "options": ["a"], "correctAnswer": 7}),
        ),
        "guru",
        "rahasia",
    );
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_failed");

    let request = as_admin(json_request("PUT", "/api/admin/questions/50", new_question()), "guru", "rahasia");
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// Keeps questions and scores in memory so handlers can be exercised
/// against persistent-style semantics without a database.
#[derive(Default)]
struct MemoryStorage {
    admin: AdminCredentials,
    questions: Mutex<Vec<Question>>,
    scores: Mutex<Vec<Score>>,
    next_id: Mutex<i32>,
}

impl MemoryStorage {
    fn next_id(&self) -> i32 {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        *next
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    fn mode(&self) -> StorageMode {
        StorageMode::Persistent
    }

    fn admin_credentials(&self) -> &AdminCredentials {
        &self.admin
    }

    async fn ping(&self) -> bool {
        true
    }

    async fn get_questions(&self) -> Result<Vec<Question>> {
        Ok(self.questions.lock().unwrap().clone())
    }

    async fn get_question_by_id(&self, id: i32) -> Result<Option<Question>> {
        Ok(self.questions.lock().unwrap().iter().find(|q| q.id == id).cloned())
    }

    async fn add_question(&self, question: InsertQuestion) -> Result<Question> {
        let created = Question::from_insert(self.next_id(), question);
        self.questions.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_question(&self, id: i32, question: InsertQuestion) -> Result<Option<Question>> {
        let mut questions = self.questions.lock().unwrap();
        Ok(questions.iter_mut().find(|q| q.id == id).map(|q| {
            *q = Question::from_insert(id, question);
            q.clone()
        }))
    }

    async fn delete_question(&self, id: i32) -> Result<bool> {
        let mut questions = self.questions.lock().unwrap();
        let before = questions.len();
        questions.retain(|q| q.id != id);
        Ok(questions.len() < before)
    }

    async fn get_scores(&self) -> Result<Vec<Score>> {
        let mut scores = self.scores.lock().unwrap().clone();
        scores.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(scores)
    }

    async fn add_score(&self, score: InsertScore) -> Result<Score> {
        let created = Score {
            id: self.next_id(),
            student_name: score.student_name,
            score: score.score,
            total_questions: score.total_questions,
            created_at: Utc::now(),
        };
        self.scores.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn delete_score(&self, id: i32) -> Result<bool> {
        let mut scores = self.scores.lock().unwrap();
        let before = scores.len();
        scores.retain(|s| s.id != id);
        Ok(scores.len() < before)
    }

    async fn clear_scores(&self) -> Result<()> {
        self.scores.lock().unwrap().clear();
        Ok(())
    }

    async fn initialize_default_questions(&self) {}
}

/// Every call fails the way an unreachable database does.
struct BrokenStorage {
    admin: AdminCredentials,
}

#[async_trait]
impl Storage for BrokenStorage {
    fn mode(&self) -> StorageMode {
        StorageMode::Persistent
    }

    fn admin_credentials(&self) -> &AdminCredentials {
        &self.admin
    }

    async fn ping(&self) -> bool {
        false
    }

    async fn get_questions(&self) -> Result<Vec<Question>> {
        Err(QuizError::ConnectionFailed { cause: "connection refused".to_string() })
    }

    async fn get_question_by_id(&self, _id: i32) -> Result<Option<Question>> {
        Err(QuizError::ConnectionFailed { cause: "connection refused".to_string() })
    }

    async fn add_question(&self, _question: InsertQuestion) -> Result<Question> {
        Err(QuizError::ConnectionFailed { cause: "connection refused".to_string() })
    }

    async fn update_question(&self, _id: i32, _question: InsertQuestion) -> Result<Option<Question>> {
        Err(QuizError::ConnectionFailed { cause: "connection refused".to_string() })
    }

    async fn delete_question(&self, _id: i32) -> Result<bool> {
        Err(QuizError::ConnectionFailed { cause: "connection refused".to_string() })
    }

    async fn get_scores(&self) -> Result<Vec<Score>> {
        Err(QuizError::QueryFailed { operation: "list scores", cause: "relation does not exist".to_string() })
    }

    async fn add_score(&self, _score: InsertScore) -> Result<Score> {
        Err(QuizError::ConnectionFailed { cause: "connection refused".to_string() })
    }

    async fn delete_score(&self, _id: i32) -> Result<bool> {
        Err(QuizError::ConnectionFailed { cause: "connection refused".to_string() })
    }

    async fn clear_scores(&self) -> Result<()> {
        Err(QuizError::ConnectionFailed { cause: "connection refused".to_string() })
    }

    async fn initialize_default_questions(&self) {}
}

#[tokio::test]
async fn injected_backend_round_trip() {
    let storage = Arc::new(MemoryStorage {
        admin: admin(),
        ..Default::default()
    });
    let app = router(AppState::new(storage));

    let request = as_admin(json_request("POST", "/api/admin/questions", new_question()), "guru", "rahasia");
    let (status, created) = send(&app, request).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();

    let (status, _) = send(&app, get(&format!("/api/questions/{}", id))).await;
    assert_eq!(status, StatusCode::OK);

    let request = as_admin(
        Request::delete(format!("/api/admin/questions/{}", id)).body(Body::empty()).unwrap(),
        "guru",
        "rahasia",
    );
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, get(&format!("/api/questions/{}", id))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let request = as_admin(
        Request::delete(format!("/api/admin/questions/{}", id)).body(Body::empty()).unwrap(),
        "guru",
        "rahasia",
    );
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn injected_backend_orders_leaderboard() {
    let storage = Arc::new(MemoryStorage {
        admin: admin(),
        ..Default::default()
    });
    let app = router(AppState::new(storage));

    for (name, score) in [("A", 40), ("B", 95), ("C", 70)] {
        let (status, _) = send(
            &app,
            json_request(
                "POST",
                "/api/scores",
                json!({"studentName": name, "score": score, "totalQuestions": 10}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, body) = send(&app, get("/api/scores")).await;
    let scores: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["score"].as_i64().unwrap())
        .collect();
    assert_eq!(scores, vec![95, 70, 40]);

    let (status, body) = send(&app, get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "persistent");
    assert_eq!(body["database_connected"], true);
}

#[tokio::test]
async fn backend_errors_propagate_as_responses() {
    let app = router(AppState::new(Arc::new(BrokenStorage { admin: admin() })));

    let (status, body) = send(&app, get("/api/questions")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "connection_failed");

    let (status, body) = send(&app, get("/api/scores")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed to list scores");

    // Health stays answerable with a dead backend
    let (status, body) = send(&app, get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database_connected"], false);
}
