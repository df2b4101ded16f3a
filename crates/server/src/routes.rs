//! Route handlers.
//!
//! One handler per endpoint, each a thin translation between the JSON
//! schemas and a registry call. All game rules live in the engine.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use tower_http::cors::CorsLayer;
use tracing::info;

use quizpool_engine::{CreateRoomParams, Error, Room, QUESTIONS_PER_ROOM};

use crate::error::ApiError;
use crate::schemas::{
    CreateRoomRequest, FinishGameResponse, HealthResponse, JoinRoomRequest, PayoutResponse,
    QuestionsResponse, RoomActionResponse, RoomDetailResponse, RoomsResponse, StartGameRequest,
    SubmitAnswerRequest, SubmitAnswerResponse,
};
use crate::state::SharedState;

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/questions/{category}", get(category_questions))
        .route("/api/rooms/create", post(create_room))
        .route("/api/rooms", get(list_rooms))
        .route("/api/rooms/{room_id}", get(room_detail))
        .route("/api/rooms/{room_id}/join", post(join_room))
        .route("/api/rooms/{room_id}/start", post(start_game))
        .route("/api/answers/submit", post(submit_answer))
        .route("/api/rooms/{room_id}/finish", post(finish_game))
        .route("/api/admin/payout/{room_id}", get(payout_manifest))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Preview sample for a category, shuffled like a room draw would be.
async fn category_questions(
    State(state): State<SharedState>,
    Path(category): Path<String>,
) -> Result<Json<QuestionsResponse>, ApiError> {
    let questions = state.registry.bank().sample(&category, QUESTIONS_PER_ROOM)?;
    Ok(Json(QuestionsResponse { questions }))
}

async fn create_room(
    State(state): State<SharedState>,
    Json(body): Json<CreateRoomRequest>,
) -> Result<Json<Room>, ApiError> {
    let entry_fee = parse_amount(&body.entry_fee)?;
    let room = state.registry.create_room(CreateRoomParams {
        host_address: body.host_address,
        category: body.category,
        name: body.name,
        entry_fee,
        max_players: body.max_players,
    })?;

    info!(room_id = %room.id, name = %room.name, host = %room.host_address, "room created");
    Ok(Json(room))
}

async fn list_rooms(State(state): State<SharedState>) -> Json<RoomsResponse> {
    Json(RoomsResponse {
        rooms: state.registry.list_active(),
    })
}

async fn room_detail(
    State(state): State<SharedState>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomDetailResponse>, ApiError> {
    let room = state.registry.get(&room_id)?;
    Ok(Json(RoomDetailResponse { room }))
}

async fn join_room(
    State(state): State<SharedState>,
    Path(room_id): Path<String>,
    Json(body): Json<JoinRoomRequest>,
) -> Result<Json<RoomActionResponse>, ApiError> {
    let room = state.registry.join(&room_id, &body.player_address)?;

    info!(room_id = %room.id, player = %body.player_address, "player joined");
    Ok(Json(RoomActionResponse {
        room,
        message: "Successfully joined room",
    }))
}

async fn start_game(
    State(state): State<SharedState>,
    Path(room_id): Path<String>,
    Json(body): Json<StartGameRequest>,
) -> Result<Json<RoomActionResponse>, ApiError> {
    let room = state.registry.start(&room_id, &body.player_address)?;

    info!(room_id = %room.id, host = %body.player_address, "game started");
    Ok(Json(RoomActionResponse {
        room,
        message: "Game started successfully",
    }))
}

async fn submit_answer(
    State(state): State<SharedState>,
    Json(body): Json<SubmitAnswerRequest>,
) -> Result<Json<SubmitAnswerResponse>, ApiError> {
    if body.room_id.trim().is_empty() {
        return Err(Error::InvalidInput.into());
    }
    let question_index = body.question_index.ok_or(Error::InvalidInput)?;
    let answer_index = body.answer_index.ok_or(Error::InvalidInput)?;

    let outcome = state.registry.submit_answer(
        &body.room_id,
        &body.player_address,
        question_index,
        answer_index,
        body.time_taken,
    )?;

    info!(
        room_id = %body.room_id,
        player = %body.player_address,
        question_index,
        correct = outcome.is_correct,
        points = outcome.points,
        "answer submitted"
    );

    Ok(Json(SubmitAnswerResponse {
        correct: outcome.is_correct,
        points: outcome.points,
        player_score: outcome.player_score,
        correct_answer: outcome.correct_answer,
    }))
}

async fn finish_game(
    State(state): State<SharedState>,
    Path(room_id): Path<String>,
) -> Result<Json<FinishGameResponse>, ApiError> {
    let (room, settlement) = state.registry.finish(&room_id)?;

    info!(room_id = %room.id, prize_pool = %settlement.prize_pool, "game finished");
    Ok(Json(FinishGameResponse {
        room,
        leaderboard: settlement.leaderboard,
        winners: settlement.winners,
    }))
}

async fn payout_manifest(
    State(state): State<SharedState>,
    Path(room_id): Path<String>,
) -> Result<Json<PayoutResponse>, ApiError> {
    let settlement = state.registry.payout_manifest(&room_id)?;
    Ok(Json(PayoutResponse {
        room_id,
        winners: settlement.winners,
    }))
}

fn parse_amount(raw: &str) -> Result<i128, ApiError> {
    match raw.trim().parse::<i128>() {
        Ok(amount) => Ok(amount),
        Err(_) => Err(Error::InvalidInput.into()),
    }
}
