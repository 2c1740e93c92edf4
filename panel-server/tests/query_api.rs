//! Free-form SQL execution and natural-language SQL generation.

#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use common::{send, MockLlmClient, TestApp};
use serde_json::json;
use std::sync::Arc;

#[actix_rt::test]
async fn test_batch_reports_each_statement() {
    let app = TestApp::new();
    let service = test_service!(app);

    let req = test::TestRequest::post()
        .uri("/api/db/execute-query")
        .insert_header(app.bearer())
        .set_json(json!({
            "sqlQuery": "UPDATE users SET score = 0 WHERE id <= 3; SELEC nonsense; SELECT id, name FROM users WHERE score = 0 ORDER BY id"
        }))
        .to_request();
    let (status, body) = send(&service, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["queries"],
        json!([
            "UPDATE users SET score = 0 WHERE id <= 3",
            "SELEC nonsense",
            "SELECT id, name FROM users WHERE score = 0 ORDER BY id"
        ])
    );

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0], json!({"rowsAffected": 3}));
    assert_eq!(results[1]["query"], "SELEC nonsense");
    assert!(results[1]["error"].as_str().unwrap().contains("syntax error"));
    // user25 already had a score of 0
    assert_eq!(results[2]["columns"], json!([{"name": "id"}, {"name": "name"}]));
    assert_eq!(results[2]["rows"].as_array().unwrap().len(), 4);
    assert_eq!(results[2]["rows"][0], json!({"id": 1, "name": "user01"}));
}

#[actix_rt::test]
async fn test_execute_query_requires_sql() {
    let app = TestApp::new();
    let service = test_service!(app);

    for payload in [json!({}), json!({"sqlQuery": "   "}), json!({"sqlQuery": " ; ; "})] {
        let req = test::TestRequest::post()
            .uri("/api/db/execute-query")
            .insert_header(app.bearer())
            .set_json(payload.clone())
            .to_request();
        let (status, body) = send(&service, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{payload}");
        assert!(body["message"].as_str().unwrap().contains("SQL query is required"));
    }
}

#[actix_rt::test]
async fn test_execute_query_needs_token() {
    let app = TestApp::new();
    let service = test_service!(app);

    let req = test::TestRequest::post()
        .uri("/api/db/execute-query")
        .set_json(json!({"sqlQuery": "DROP TABLE users"}))
        .to_request();
    let (status, _) = send(&service, req).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let tables: i64 = app
        .database
        .connect()
        .query_row("SELECT COUNT(*) FROM sqlite_master WHERE name = 'users'", [], |r| r.get(0))
        .unwrap();
    assert_eq!(tables, 1);
}

#[actix_rt::test]
async fn test_generate_query_with_schema_context() {
    let client = Arc::new(MockLlmClient::replying("```sql\nSELECT COUNT(*) FROM users;\n```"));
    let app = TestApp::with_llm(client.clone());
    let service = test_service!(app);

    let req = test::TestRequest::post()
        .uri("/api/db/generate-query")
        .insert_header(app.bearer())
        .set_json(json!({"prompt": "how many users are there?"}))
        .to_request();
    let (status, body) = send(&service, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"query": "SELECT COUNT(*) FROM users;"}));

    let prompts = client.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].starts_with("Database Schema:\n\nTable: users\n"));
    assert!(prompts[0].contains("  - id (INTEGER PRIMARY KEY)\n"));
    assert!(prompts[0].contains("  - name (TEXT NOT NULL)\n"));
    assert!(prompts[0].contains("how many users are there?"));

    // Generation never touches the data
    let count: i64 = app
        .database
        .connect()
        .query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 3);
}

#[actix_rt::test]
async fn test_generate_query_without_client() {
    let app = TestApp::new();
    let service = test_service!(app);

    let req = test::TestRequest::post()
        .uri("/api/db/generate-query")
        .insert_header(app.bearer())
        .set_json(json!({"prompt": "anything"}))
        .to_request();
    let (status, body) = send(&service, req).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Gemini API key not configured.");
}

#[actix_rt::test]
async fn test_generate_query_model_failure() {
    let app = TestApp::with_llm(Arc::new(MockLlmClient::failing("upstream exploded")));
    let service = test_service!(app);

    let req = test::TestRequest::post()
        .uri("/api/db/generate-query")
        .insert_header(app.bearer())
        .set_json(json!({"prompt": "list users"}))
        .to_request();
    let (status, body) = send(&service, req).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed to generate SQL query.");
}

#[actix_rt::test]
async fn test_generate_query_requires_prompt() {
    let client = Arc::new(MockLlmClient::replying("SELECT 1;"));
    let app = TestApp::with_llm(client.clone());
    let service = test_service!(app);

    let req = test::TestRequest::post()
        .uri("/api/db/generate-query")
        .insert_header(app.bearer())
        .set_json(json!({"prompt": ""}))
        .to_request();
    let (status, _) = send(&service, req).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(client.prompts().is_empty());
}
