use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use studydesk::ports::http::{router, AppState};
use tower::ServiceExt;

fn app() -> Router {
    router(AppState::in_memory().expect("In-memory state"))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, value)
}

#[tokio::test]
async fn given_empty_store_when_listing_notes_then_returns_empty_array() {
    // Arrange
    let app = app();

    // Act
    let (status, body) = send(&app, Method::GET, "/api/notes", None).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn given_created_note_when_listing_then_includes_it_exactly_once() {
    // Arrange
    let app = app();

    // Act
    let (status, created) = send(
        &app,
        Method::POST,
        "/api/notes/create",
        Some(json!({"title": "Math", "text": "Derivatives", "icon": "📐"})),
    )
    .await;
    let (_, notes) = send(&app, Method::GET, "/api/notes", None).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["status"], "created");
    let notes = notes.as_array().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["id"], created["id"]);
    assert_eq!(notes[0]["title"], "Math");
    assert_eq!(notes[0]["text"], "Derivatives");
    assert_eq!(notes[0]["icon"], "📐");
    assert!(notes[0]["created"].is_string());
}

#[tokio::test]
async fn given_two_notes_when_listing_then_newest_comes_first() {
    // Arrange
    let app = app();
    send(&app, Method::POST, "/api/notes/create", Some(json!({"title": "First"}))).await;
    send(&app, Method::POST, "/api/notes/create", Some(json!({"title": "Second"}))).await;

    // Act
    let (_, notes) = send(&app, Method::GET, "/api/notes", None).await;

    // Assert
    let titles: Vec<&str> = notes
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Second", "First"]);
}

#[tokio::test]
async fn given_partial_payload_when_creating_then_missing_fields_default_to_empty() {
    // Arrange
    let app = app();

    // Act
    let (status, _) =
        send(&app, Method::POST, "/api/notes/create", Some(json!({"title": "Only title"}))).await;
    let (_, notes) = send(&app, Method::GET, "/api/notes", None).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(notes[0]["text"], "");
    assert_eq!(notes[0]["icon"], "");
}

#[tokio::test]
async fn given_existing_note_when_updating_then_fields_replaced_and_created_kept() {
    // Arrange
    let app = app();
    let (_, created) = send(
        &app,
        Method::POST,
        "/api/notes/create",
        Some(json!({"title": "Math", "text": "Limits", "icon": "📐"})),
    )
    .await;
    let id = created["id"].as_i64().unwrap();
    let (_, before) = send(&app, Method::GET, "/api/notes", None).await;

    // Act
    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/notes/update/{}", id),
        Some(json!({"title": "Calculus", "text": "Integrals", "icon": "📚"})),
    )
    .await;
    let (_, after) = send(&app, Method::GET, "/api/notes", None).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "updated"}));
    assert_eq!(after[0]["title"], "Calculus");
    assert_eq!(after[0]["text"], "Integrals");
    assert_eq!(after[0]["icon"], "📚");
    assert_eq!(after[0]["created"], before[0]["created"]);
}

#[tokio::test]
async fn given_unknown_id_when_updating_then_returns_not_found() {
    // Arrange
    let app = app();

    // Act
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/notes/update/999",
        Some(json!({"title": "Ghost"})),
    )
    .await;
    let (_, notes) = send(&app, Method::GET, "/api/notes", None).await;

    // Assert
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Note not found: 999"}));
    assert_eq!(notes, json!([]));
}

#[tokio::test]
async fn given_deleted_note_when_deleting_again_then_returns_not_found() {
    // Arrange
    let app = app();
    let (_, created) =
        send(&app, Method::POST, "/api/notes/create", Some(json!({"title": "Temp"}))).await;
    let uri = format!("/api/notes/delete/{}", created["id"]);

    // Act
    let (first, first_body) = send(&app, Method::POST, &uri, None).await;
    let (second, _) = send(&app, Method::POST, &uri, None).await;
    let (_, notes) = send(&app, Method::GET, "/api/notes", None).await;

    // Assert
    assert_eq!(first, StatusCode::OK);
    assert_eq!(first_body, json!({"status": "deleted"}));
    assert_eq!(second, StatusCode::NOT_FOUND);
    assert_eq!(notes, json!([]));
}

#[tokio::test]
async fn given_malformed_json_when_creating_then_returns_client_error_body() {
    // Arrange
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/notes/create")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    // Act
    let response = app.clone().oneshot(request).await.unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn given_complete_registration_when_posting_then_stores_student() {
    // Arrange
    let app = app();

    // Act
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/register",
        Some(json!({"firstName": "Ann", "lastName": "Lee", "course": "1", "group": "ЛХ02-25"})),
    )
    .await;
    let (_, students) = send(&app, Method::GET, "/api/students", None).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
    let students = students.as_array().unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0]["firstName"], "Ann");
    assert_eq!(students[0]["lastName"], "Lee");
    assert_eq!(students[0]["course"], "1");
    assert_eq!(students[0]["groupName"], "ЛХ02-25");
}

#[tokio::test]
async fn given_blank_fields_when_registering_then_returns_bad_request_and_stores_nothing() {
    // Arrange
    let app = app();

    // Act
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/register",
        Some(json!({"firstName": "Ann", "lastName": "", "course": "1"})),
    )
    .await;
    let (_, students) = send(&app, Method::GET, "/api/students", None).await;

    // Assert
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"error": "Missing required fields: lastName, group"})
    );
    assert_eq!(students, json!([]));
}

#[tokio::test]
async fn given_grades_when_adding_and_removing_then_summary_tracks_average() {
    // Arrange
    let app = app();

    // Act
    send(&app, Method::GET, "/api/grades/add/8", None).await;
    send(&app, Method::GET, "/api/grades/add/9", None).await;
    let (_, ignored) = send(&app, Method::GET, "/api/grades/add/11", None).await;
    let (_, added) = send(&app, Method::GET, "/api/grades/add/6", None).await;
    let (_, removed) = send(&app, Method::GET, "/api/grades/remove", None).await;
    let (status, shown) = send(&app, Method::GET, "/api/grades", None).await;

    // Assert
    assert_eq!(ignored["count"], 2);
    assert_eq!(added["grades"], json!([8, 9, 6]));
    assert_eq!(added["average"], 7.67);
    assert_eq!(removed["grades"], json!([8, 9]));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(shown["average"], 8.5);
    assert_eq!(shown["count"], 2);
}

#[tokio::test]
async fn given_empty_tracker_when_removing_then_returns_zero_average() {
    // Arrange
    let app = app();

    // Act
    let (status, body) = send(&app, Method::GET, "/api/grades/remove", None).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"grades": [], "average": 0.0, "count": 0}));
}

#[tokio::test]
async fn given_non_numeric_id_when_deleting_then_returns_json_bad_request() {
    // Arrange
    let app = app();

    // Act
    let (status, body) = send(&app, Method::POST, "/api/notes/delete/abc", None).await;

    // Assert
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("abc"));
}

#[tokio::test]
async fn given_overflowing_id_when_updating_then_returns_json_bad_request() {
    // Arrange
    let app = app();

    // Act
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/notes/update/99999999999999999999",
        Some(json!({"title": "Ghost"})),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn given_non_numeric_grade_when_adding_then_returns_json_bad_request() {
    // Arrange
    let app = app();

    // Act
    let (status, body) = send(&app, Method::GET, "/api/grades/add/ten", None).await;
    let (_, shown) = send(&app, Method::GET, "/api/grades", None).await;

    // Assert
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(shown["count"], 0);
}

#[tokio::test]
async fn given_numeric_course_when_registering_then_stores_it_as_text() {
    // Arrange
    let app = app();

    // Act
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/register",
        Some(json!({"firstName": "Ann", "lastName": "Lee", "course": 1, "group": "ЛХ02-25"})),
    )
    .await;
    let (_, students) = send(&app, Method::GET, "/api/students", None).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
    assert_eq!(students[0]["course"], "1");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn given_concurrent_creates_when_listing_then_every_note_is_stored_once() {
    // Arrange
    let app = app();

    // Act
    let (a, b, c) = tokio::join!(
        send(&app, Method::POST, "/api/notes/create", Some(json!({"title": "A"}))),
        send(&app, Method::POST, "/api/notes/create", Some(json!({"title": "B"}))),
        send(&app, Method::POST, "/api/notes/create", Some(json!({"title": "C"}))),
    );
    let (_, notes) = send(&app, Method::GET, "/api/notes", None).await;

    // Assert
    for (status, _) in [a, b, c] {
        assert_eq!(status, StatusCode::OK);
    }
    let mut titles: Vec<&str> = notes
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["title"].as_str().unwrap())
        .collect();
    titles.sort_unstable();
    assert_eq!(titles, vec!["A", "B", "C"]);
}
