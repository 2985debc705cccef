mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::TestApp;
use serde_json::{json, Value};

fn ids(body: &Value) -> Vec<i64> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|todo| todo["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn create_returns_envelope_with_location() {
    let app = TestApp::new();

    let response = app
        .post(
            "/api/v2/todos",
            json!({ "title": "Write report", "initialNote": "outline first" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["message"], "Todo created");
    let id = response.body["data"]["id"].as_i64().unwrap();
    assert_eq!(
        response.location.as_deref(),
        Some(format!("/api/v2/todos/{id}").as_str())
    );

    let notes = app.get(&format!("/api/v2/todos/{id}/notes")).await;
    assert_eq!(notes.body["data"][0]["content"], "outline first");
}

#[tokio::test]
async fn get_with_include_adds_category_name() {
    let app = TestApp::new();

    let plain = app.get("/api/v2/todos/1").await;
    assert!(plain.body["data"].get("categoryName").is_none());

    let included = app.get("/api/v2/todos/1?include=true").await;
    assert_eq!(included.body["data"]["categoryName"], "General");
}

#[tokio::test]
async fn filtered_listing_applies_filters_and_sort() {
    let app = TestApp::new();
    let high = app
        .post("/api/v2/todos", json!({ "title": "urgent", "priority": 3 }))
        .await;
    let high_id = high.body["data"]["id"].as_i64().unwrap();

    let by_priority = app
        .get("/api/v2/todos?categoryId=1&done=false&sort=priority&include=true")
        .await;
    assert_eq!(by_priority.status, StatusCode::OK);
    assert_eq!(ids(&by_priority.body), vec![high_id, 1]);
    assert_eq!(by_priority.body["data"][0]["categoryName"], "General");

    let newest_first = app.get("/api/v2/todos").await;
    assert_eq!(ids(&newest_first.body)[0], high_id);
}

#[tokio::test]
async fn due_date_sort_puts_undated_last() {
    let app = TestApp::new();
    let due = (Utc::now() + Duration::days(2)).to_rfc3339();
    let dated = app
        .post("/api/v2/todos", json!({ "title": "dated", "dueDate": due }))
        .await;
    assert_eq!(dated.status, StatusCode::CREATED);
    let dated_id = dated.body["data"]["id"].as_i64().unwrap();

    let sorted = app.get("/api/v2/todos?sort=dueDate").await;
    assert_eq!(ids(&sorted.body)[0], dated_id);
}

#[tokio::test]
async fn past_due_date_is_rejected() {
    let app = TestApp::new();
    let due = (Utc::now() - Duration::days(2)).to_rfc3339();

    let response = app
        .post("/api/v2/todos", json!({ "title": "late", "dueDate": due }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["errors"]["dueDate"].is_array());
}

#[tokio::test]
async fn complete_and_pending_toggle_status_listings() {
    let app = TestApp::new();
    let work = app
        .post("/api/v2/categories", json!({ "name": "Work" }))
        .await;
    let work_id = work.body["data"]["id"].as_i64().unwrap();
    let bills = app
        .post(
            "/api/v2/todos",
            json!({ "title": "Pay bills", "priority": 3, "categoryId": work_id }),
        )
        .await;
    let bills_id = bills.body["data"]["id"].as_i64().unwrap();

    let completed = app
        .patch(&format!("/api/v2/todos/{bills_id}/complete"))
        .await;
    assert_eq!(completed.status, StatusCode::OK);
    assert_eq!(completed.body["data"]["isCompleted"], true);

    assert!(ids(&app.get("/api/v2/todos/completed").await.body).contains(&bills_id));
    assert!(!ids(&app.get("/api/v2/todos/pending").await.body).contains(&bills_id));

    let pending = app
        .patch(&format!("/api/v2/todos/{bills_id}/pending"))
        .await;
    assert_eq!(pending.body["data"]["isCompleted"], false);

    let missing = app.patch("/api/v2/todos/999/complete").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn by_category_and_priority_listings() {
    let app = TestApp::new();
    let urgent = app
        .post(
            "/api/v2/todos",
            json!({ "title": "fire", "priority": 3, "categoryId": 3 }),
        )
        .await;
    let urgent_id = urgent.body["data"]["id"].as_i64().unwrap();

    let by_category = app.get("/api/v2/todos/by-category/3").await;
    assert_eq!(ids(&by_category.body), vec![urgent_id]);

    let by_priority = app.get("/api/v2/todos/priority/3").await;
    assert_eq!(ids(&by_priority.body), vec![urgent_id]);

    let invalid = app.get("/api/v2/todos/priority/7").await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn overdue_is_empty_for_future_or_undated_todos() {
    let app = TestApp::new();
    let due = (Utc::now() + Duration::hours(6)).to_rfc3339();
    app.post("/api/v2/todos", json!({ "title": "soon", "dueDate": due }))
        .await;

    let overdue = app.get("/api/v2/todos/overdue").await;
    assert_eq!(overdue.status, StatusCode::OK);
    assert!(ids(&overdue.body).is_empty());
}

#[tokio::test]
async fn paged_listing_reports_navigation() {
    let app = TestApp::new();
    for index in 0..13 {
        app.post("/api/v2/todos", json!({ "title": format!("bulk {index}") }))
            .await;
    }

    let page = app.get("/api/v2/todos/paged?pageNumber=2&pageSize=5").await;
    assert_eq!(page.status, StatusCode::OK);
    let data = &page.body["data"];
    assert_eq!(data["totalCount"], 15);
    assert_eq!(data["totalPages"], 3);
    assert_eq!(data["hasPreviousPage"], true);
    assert_eq!(data["hasNextPage"], true);
    let page_ids = data["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|todo| todo["id"].as_i64().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(page_ids, vec![6, 7, 8, 9, 10]);

    let invalid = app.get("/api/v2/todos/paged?pageNumber=0").await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_and_delete_use_envelope_and_no_content() {
    let app = TestApp::new();

    let updated = app
        .put(
            "/api/v2/todos/1",
            json!({ "title": "First todo, edited", "priority": 2, "categoryId": 2 }),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["message"], "Todo updated");
    assert_eq!(updated.body["data"]["categoryId"], 2);

    let unknown_category = app
        .put(
            "/api/v2/todos/1",
            json!({ "title": "x", "categoryId": 404 }),
        )
        .await;
    assert_eq!(unknown_category.status, StatusCode::BAD_REQUEST);

    let deleted = app.delete("/api/v2/todos/1").await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    let notes = app.get("/api/v2/todos/1/notes").await;
    assert_eq!(notes.body["data"], json!([]));
}

#[tokio::test]
async fn put_and_patch_responses_match_the_following_get() {
    let app = TestApp::new();
    let due = "2099-01-01T00:00:00.123456789Z";

    let updated = app
        .put(
            "/api/v2/todos/1",
            json!({ "title": "Precise", "dueDate": due, "priority": 2 }),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    let fetched = app.get("/api/v2/todos/1").await;
    assert_eq!(updated.body["data"], fetched.body["data"]);
    assert_eq!(fetched.body["data"]["dueDate"], "2099-01-01T00:00:00.123456Z");

    let completed = app.patch("/api/v2/todos/1/complete").await;
    let fetched = app.get("/api/v2/todos/1").await;
    assert_eq!(completed.body["data"], fetched.body["data"]);
}
