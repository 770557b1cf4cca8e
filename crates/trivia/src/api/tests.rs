use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{json, Value};

use trivia_core::{SeedData, ServiceConfig, TriviaService};
use trivia_db::MemoryStore;

use super::create_router;

async fn spawn_app() -> String {
    let store = Arc::new(MemoryStore::new());
    SeedData::demo().apply(store.as_ref(), false).unwrap();
    let service = Arc::new(TriviaService::new(store, ServiceConfig::default()));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, create_router(service)).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn get(url: String) -> (StatusCode, Value) {
    let resp = reqwest::get(url).await.unwrap();
    let status = resp.status();
    (status, resp.json().await.unwrap())
}

async fn post(url: String, body: Value) -> (StatusCode, Value) {
    let resp = reqwest::Client::new()
        .post(url)
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = resp.status();
    (status, resp.json().await.unwrap())
}

#[tokio::test]
async fn test_list_categories() {
    let base = spawn_app().await;
    let (status, body) = get(format!("{}/categories", base)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let categories = body["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 6);
    assert_eq!(categories[0]["id"], 1);
    assert_eq!(categories[0]["label"], "Science");
}

#[tokio::test]
async fn test_list_questions_pages() {
    let base = spawn_app().await;

    let (status, body) = get(format!("{}/questions", base)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 10);
    assert_eq!(body["totalCount"], 19);
    assert_eq!(body["categories"]["2"], "Art");
    assert!(body["currentCategory"].is_null());

    let (status, body) = get(format!("{}/questions?page=2", base)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 9);
    assert_eq!(body["items"][0]["id"], 11);
}

#[tokio::test]
async fn test_page_past_end_is_not_found() {
    let base = spawn_app().await;
    let (status, body) = get(format!("{}/questions?page=100", base)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], 404);
    assert_eq!(body["message"], "resource not found");
}

#[tokio::test]
async fn test_bad_page_is_bad_request() {
    let base = spawn_app().await;

    let (status, body) = get(format!("{}/questions?page=0", base)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "bad request");

    let (status, _) = get(format!("{}/questions?page=abc", base)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_category_questions() {
    let base = spawn_app().await;

    let (status, body) = get(format!("{}/categories/2/questions", base)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalCount"], 4);
    assert_eq!(body["currentCategory"], "Art");
    let ids: Vec<i64> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![12, 13, 14, 15]);
    assert!(body["items"]
        .as_array()
        .unwrap()
        .iter()
        .all(|q| q["categoryId"] == 2));

    let (status, _) = get(format!("{}/categories/99/questions", base)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search_via_post_and_query() {
    let base = spawn_app().await;

    let (status, body) = post(
        format!("{}/questions", base),
        json!({ "searchTerm": "tim burton" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalCount"], 1);
    assert_eq!(body["items"][0]["id"], 5);

    let (status, body) = get(format!("{}/questions?search=TIM%20BURTON", base)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalCount"], 1);

    let (status, body) = post(
        format!("{}/questions", base),
        json!({ "searchTerm": "zzzz-no-match" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalCount"], 0);
    assert!(body["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_question() {
    let base = spawn_app().await;

    let (status, body) = post(
        format!("{}/questions", base),
        json!({
            "question": "What is the boiling point of water at sea level in Celsius?",
            "answer": "100",
            "category": "1",
            "difficulty": 1
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["created"], 20);
    assert_eq!(body["totalCount"], 20);

    let (_, body) = get(format!("{}/categories/1/questions", base)).await;
    assert_eq!(body["totalCount"], 4);
}

#[tokio::test]
async fn test_create_question_in_unknown_category() {
    let base = spawn_app().await;

    let (status, body) = post(
        format!("{}/questions?page=2", base),
        json!({ "question": "q", "answer": "a", "category": "10", "difficulty": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["created"], 20);
    assert!(body["currentCategory"].is_null());
    assert!(body["categories"].get("10").is_none());
    assert!(body["items"]
        .as_array()
        .unwrap()
        .iter()
        .any(|q| q["id"] == 20 && q["categoryId"] == 10));
}

#[tokio::test]
async fn test_create_question_rejections() {
    let base = spawn_app().await;

    let (status, body) = post(
        format!("{}/questions", base),
        json!({ "question": "Missing answer?", "category": 1, "difficulty": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "unprocessable");

    let resp = reqwest::Client::new()
        .post(format!("{}/questions", base))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_question() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let resp = client
        .delete(format!("{}/questions/12", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["deleted"], 12);

    let resp = client
        .delete(format!("{}/questions/12", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client
        .delete(format!("{}/questions/999", base))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_quiz_in_category() {
    let base = spawn_app().await;

    let (status, body) = post(
        format!("{}/quizzes", base),
        json!({ "previouslyAskedIds": [16, 17], "category": { "id": 1 } }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["question"]["id"], 18);
    assert_eq!(body["question"]["categoryId"], 1);
}

#[tokio::test]
async fn test_quiz_legacy_keys_and_exhaustion() {
    let base = spawn_app().await;

    let (status, body) = post(
        format!("{}/quizzes", base),
        json!({
            "previous_questions": [16, 17, 18],
            "quiz_category": { "id": "1", "type": "Science" }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["question"].is_null());
}

#[tokio::test]
async fn test_quiz_all_categories() {
    let base = spawn_app().await;

    let (status, body) = post(
        format!("{}/quizzes", base),
        json!({ "previouslyAskedIds": [], "category": { "id": 0 } }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["question"]["id"].as_i64().unwrap();
    assert!((1..=19).contains(&id));

    let (status, _) = post(format!("{}/quizzes", base), json!({})).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_quiz_unknown_category_returns_null() {
    let base = spawn_app().await;

    let (status, body) = post(
        format!("{}/quizzes", base),
        json!({ "previouslyAskedIds": [], "category": { "id": 99 } }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body["question"].is_null());
}

#[tokio::test]
async fn test_health() {
    let base = spawn_app().await;
    let (status, body) = get(format!("{}/health", base)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
