//! Request and response bodies for the JSON API.
//!
//! Field names are camelCase to stay wire-compatible with the frontend.
//! Token amounts travel as decimal strings of base units.

use quizpool_engine::{PayoutEntry, Question, RankedPlayer, Room};
use serde::{Deserialize, Serialize};

fn default_entry_fee() -> String {
    "0".to_owned()
}

fn default_max_players() -> usize {
    quizpool_engine::DEFAULT_MAX_PLAYERS
}

/// The original backend substituted 30 s when the client omitted the time.
fn default_time_taken() -> u64 {
    30
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    #[serde(default)]
    pub host_address: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_entry_fee")]
    pub entry_fee: String,
    #[serde(default = "default_max_players")]
    pub max_players: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRoomRequest {
    #[serde(default)]
    pub player_address: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartGameRequest {
    #[serde(default)]
    pub player_address: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswerRequest {
    #[serde(default)]
    pub room_id: String,
    #[serde(default)]
    pub player_address: String,
    pub question_index: Option<usize>,
    pub answer_index: Option<i32>,
    #[serde(default = "default_time_taken")]
    pub time_taken: u64,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct QuestionsResponse {
    pub questions: Vec<Question>,
}

#[derive(Debug, Serialize)]
pub struct RoomsResponse {
    pub rooms: Vec<Room>,
}

#[derive(Debug, Serialize)]
pub struct RoomDetailResponse {
    pub room: Room,
}

#[derive(Debug, Serialize)]
pub struct RoomActionResponse {
    pub room: Room,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswerResponse {
    pub correct: bool,
    pub points: u32,
    pub player_score: u32,
    /// Echoed so the client can reveal the right option.
    pub correct_answer: usize,
}

#[derive(Debug, Serialize)]
pub struct FinishGameResponse {
    pub room: Room,
    pub leaderboard: Vec<RankedPlayer>,
    pub winners: Vec<PayoutEntry>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutResponse {
    pub room_id: String,
    pub winners: Vec<PayoutEntry>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
