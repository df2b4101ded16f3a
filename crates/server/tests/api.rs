//! End-to-end API tests: each case drives the router with in-memory
//! requests and asserts on the JSON the frontend would see.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use quizpool_engine::QuestionBank;
use quizpool_server::routes;
use quizpool_server::state::AppState;

/// Catalog with one category of ten questions; option 0 is always correct
/// so tests can pick right/wrong answers deliberately.
fn test_bank() -> QuestionBank {
    let questions: Vec<Value> = (0..10)
        .map(|i| {
            json!({
                "id": format!("q{i}"),
                "question": format!("Question {i}?"),
                "options": ["a", "b", "c", "d"],
                "correctAnswer": 0,
            })
        })
        .collect();
    let catalog = json!({ "blockchain": questions });
    QuestionBank::from_json_str(&catalog.to_string()).unwrap()
}

fn app() -> Router {
    routes::router(AppState::new(test_bank()))
}

async fn send(app: &Router, method: Method, path: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(path);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn get(app: &Router, path: &str) -> (StatusCode, Value) {
    send(app, Method::GET, path, None).await
}

async fn post(app: &Router, path: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, path, Some(body)).await
}

async fn create_room(app: &Router, host: &str, entry_fee: &str, max_players: usize) -> String {
    let (status, body) = post(
        app,
        "/api/rooms/create",
        json!({
            "hostAddress": host,
            "category": "blockchain",
            "name": "Friday Quiz",
            "entryFee": entry_fee,
            "maxPlayers": max_players,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_category_questions_endpoint() {
    let app = app();
    let (status, body) = get(&app, "/api/questions/blockchain").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["questions"].as_array().unwrap().len(), 10);

    let (status, body) = get(&app, "/api/questions/history").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not enough questions for this category");
}

#[tokio::test]
async fn test_create_room_shape_and_defaults() {
    let app = app();
    let (status, body) = post(
        &app,
        "/api/rooms/create",
        json!({ "hostAddress": "0xHOST", "category": "blockchain", "name": "Quiz" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"].as_str().unwrap().len(), 8);
    assert_eq!(body["status"], "waiting");
    assert_eq!(body["entryFee"], "0");
    assert_eq!(body["maxPlayers"], 4);
    assert_eq!(body["hostAddress"], "0xhost");
    assert_eq!(body["players"].as_array().unwrap().len(), 1);
    assert_eq!(body["questions"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_create_room_missing_fields_rejected() {
    let app = app();
    let (status, body) = post(
        &app,
        "/api/rooms/create",
        json!({ "hostAddress": "0xhost", "category": "blockchain" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");
}

#[tokio::test]
async fn test_room_listing_and_detail() {
    let app = app();
    let room_id = create_room(&app, "0xhost", "0", 4).await;

    let (status, body) = get(&app, "/api/rooms").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rooms"][0]["id"], room_id.as_str());

    let (status, body) = get(&app, &format!("/api/rooms/{room_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["room"]["id"], room_id.as_str());

    let (status, body) = get(&app, "/api/rooms/XXXXXXXX").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Room not found");
}

#[tokio::test]
async fn test_join_conflicts() {
    let app = app();
    let room_id = create_room(&app, "0xhost", "0", 2).await;

    let (status, _) = post(
        &app,
        &format!("/api/rooms/{room_id}/join"),
        json!({ "playerAddress": "0xHOST" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = post(
        &app,
        &format!("/api/rooms/{room_id}/join"),
        json!({ "playerAddress": "0xp2" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Successfully joined room");

    let (status, body) = post(
        &app,
        &format!("/api/rooms/{room_id}/join"),
        json!({ "playerAddress": "0xp3" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Room is full");
}

#[tokio::test]
async fn test_start_authorization_and_quorum() {
    let app = app();
    let room_id = create_room(&app, "0xhost", "0", 4).await;

    let (status, body) = post(
        &app,
        &format!("/api/rooms/{room_id}/start"),
        json!({ "playerAddress": "0xhost" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Need at least 2 players to start");

    post(
        &app,
        &format!("/api/rooms/{room_id}/join"),
        json!({ "playerAddress": "0xp2" }),
    )
    .await;

    let (status, body) = post(
        &app,
        &format!("/api/rooms/{room_id}/start"),
        json!({ "playerAddress": "0xp2" }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Only host can start the game");

    let (status, body) = post(
        &app,
        &format!("/api/rooms/{room_id}/start"),
        json!({ "playerAddress": "0xhost" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["room"]["status"], "playing");
}

#[tokio::test]
async fn test_submit_before_start_rejected() {
    let app = app();
    let room_id = create_room(&app, "0xhost", "0", 4).await;

    let (status, body) = post(
        &app,
        "/api/answers/submit",
        json!({
            "roomId": room_id,
            "playerAddress": "0xhost",
            "questionIndex": 0,
            "answerIndex": 0,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Game is not active");
}

#[tokio::test]
async fn test_full_game_flow() {
    let app = app();
    // 100 base units each, pot 200.
    let room_id = create_room(&app, "0xhost", "100", 4).await;

    post(
        &app,
        &format!("/api/rooms/{room_id}/join"),
        json!({ "playerAddress": "0xp2" }),
    )
    .await;
    post(
        &app,
        &format!("/api/rooms/{room_id}/start"),
        json!({ "playerAddress": "0xhost" }),
    )
    .await;

    // Host: instant correct answer.
    let (status, body) = post(
        &app,
        "/api/answers/submit",
        json!({
            "roomId": room_id,
            "playerAddress": "0xhost",
            "questionIndex": 0,
            "answerIndex": 0,
            "timeTaken": 0,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["correct"], true);
    assert_eq!(body["points"], 150);
    assert_eq!(body["playerScore"], 150);
    assert_eq!(body["correctAnswer"], 0);

    // Duplicate submission is a conflict and changes nothing.
    let (status, body) = post(
        &app,
        "/api/answers/submit",
        json!({
            "roomId": room_id,
            "playerAddress": "0xhost",
            "questionIndex": 0,
            "answerIndex": 0,
            "timeTaken": 0,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Already answered this question");

    // P2: wrong answer.
    let (status, body) = post(
        &app,
        "/api/answers/submit",
        json!({
            "roomId": room_id,
            "playerAddress": "0xp2",
            "questionIndex": 0,
            "answerIndex": 3,
            "timeTaken": 5,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["correct"], false);
    assert_eq!(body["points"], 0);

    // Finish: 60/40 head-to-head split of the 200 pot.
    let (status, body) = post(&app, &format!("/api/rooms/{room_id}/finish"), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["room"]["status"], "finished");
    assert_eq!(body["leaderboard"][0]["address"], "0xhost");
    assert_eq!(body["leaderboard"][0]["score"], 150);
    assert_eq!(body["winners"][0]["amount"], "120");
    assert_eq!(body["winners"][1]["address"], "0xp2");
    assert_eq!(body["winners"][1]["amount"], "80");

    // Finishing again returns the same settlement.
    let (status, again) = post(&app, &format!("/api/rooms/{room_id}/finish"), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(again["winners"], body["winners"]);

    // Payout manifest matches.
    let (status, payout) = get(&app, &format!("/api/admin/payout/{room_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payout["roomId"], room_id.as_str());
    assert_eq!(payout["winners"], body["winners"]);

    // The finished room drops off the active list.
    let (_, rooms) = get(&app, "/api/rooms").await;
    assert!(rooms["rooms"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_payout_before_finish_rejected() {
    let app = app();
    let room_id = create_room(&app, "0xhost", "100", 4).await;

    let (status, body) = get(&app, &format!("/api/admin/payout/{room_id}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Game not finished yet");
}
