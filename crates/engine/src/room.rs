//! Room data model and lifecycle state machine.
//!
//! A room moves `waiting -> playing -> finished` and never backwards. The
//! question sequence is fixed when the room is created; starting the game
//! only flips the status. Player records are append-only: answers are never
//! overwritten and players are never removed, so the leaderboard stays
//! readable after the game ends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::question::Question;
use crate::scoring;
use crate::settlement::{self, Settlement};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Fixed length of every room's question sequence.
pub const QUESTIONS_PER_ROOM: usize = 10;
pub const MIN_PLAYERS_TO_START: usize = 2;
pub const DEFAULT_MAX_PLAYERS: usize = 4;

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Waiting,
    Playing,
    Finished,
}

/// One player's recorded response to one question. Created exactly once per
/// (player, question index) pair and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: String,
    /// Ordinal position within the room's question sequence.
    pub question_index: usize,
    /// Selected option index, or a negative sentinel for timeout/no answer.
    pub selected_answer: i32,
    /// Client-reported elapsed seconds.
    pub time_spent: u64,
    pub is_correct: bool,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Lower-cased wallet address; unique within a room.
    pub address: String,
    pub score: u32,
    pub correct_answers: u32,
    pub time_bonus: u32,
    pub answers: Vec<Answer>,
    pub joined_at: DateTime<Utc>,
}

impl Player {
    fn new(address: String, joined_at: DateTime<Utc>) -> Self {
        Self {
            address,
            score: 0,
            correct_answers: 0,
            time_bonus: 0,
            answers: Vec::new(),
            joined_at,
        }
    }
}

/// What a successful submission reports back to the client, including the
/// correct index so the UI can reveal it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub is_correct: bool,
    pub points: u32,
    pub player_score: u32,
    pub correct_answer: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Human-shareable 8-character code.
    pub id: String,
    pub name: String,
    pub host_address: String,
    pub category: String,
    /// Entry fee in cUSD base units.
    #[serde(with = "settlement::amount_string")]
    pub entry_fee: i128,
    /// Insertion order is join order; settlement relies on it for tie-breaks.
    pub players: Vec<Player>,
    pub status: RoomStatus,
    pub questions: Vec<Question>,
    pub current_question: usize,
    pub max_players: usize,
    pub creator: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    /// Cached at finish time so a repeated finish cannot re-split the pool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settlement: Option<Settlement>,
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

impl Room {
    /// Expects an already-normalized host address; the host is enrolled as
    /// the first player.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: String,
        name: String,
        host_address: String,
        category: String,
        entry_fee: i128,
        questions: Vec<Question>,
        max_players: usize,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            host_address: host_address.clone(),
            category,
            entry_fee,
            players: vec![Player::new(host_address.clone(), now)],
            status: RoomStatus::Waiting,
            questions,
            current_question: 0,
            max_players,
            creator: host_address,
            created_at: now,
            started_at: None,
            finished_at: None,
            settlement: None,
        }
    }

    pub fn player(&self, address: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.address == address)
    }

    fn player_mut(&mut self, address: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.address == address)
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= self.max_players
    }

    pub fn is_active(&self) -> bool {
        matches!(self.status, RoomStatus::Waiting | RoomStatus::Playing)
    }

    /// Enroll a new player. Valid only while the room is waiting.
    pub fn join(&mut self, address: String, now: DateTime<Utc>) -> Result<(), Error> {
        if self.status != RoomStatus::Waiting {
            return Err(Error::GameAlreadyStarted);
        }
        if self.is_full() {
            return Err(Error::RoomFull);
        }
        if self.player(&address).is_some() {
            return Err(Error::AlreadyJoined);
        }

        self.players.push(Player::new(address, now));
        Ok(())
    }

    /// Begin gameplay. Only the room's creator/host may start, and only from
    /// `waiting` with at least two enrolled players.
    pub fn start(&mut self, requester: &str, now: DateTime<Utc>) -> Result<(), Error> {
        if requester != self.host_address && requester != self.creator {
            return Err(Error::NotHost);
        }
        if self.players.len() < MIN_PLAYERS_TO_START {
            return Err(Error::NotEnoughPlayers);
        }
        if self.status != RoomStatus::Waiting {
            return Err(Error::InvalidState);
        }

        self.status = RoomStatus::Playing;
        self.started_at = Some(now);
        Ok(())
    }

    /// Record one player's answer to one question. This is the only write
    /// path into a player's answer history; duplicates are rejected, never
    /// overwritten.
    pub fn submit_answer(
        &mut self,
        address: &str,
        question_index: usize,
        selected_answer: i32,
        time_spent_secs: u64,
    ) -> Result<AnswerOutcome, Error> {
        if self.status != RoomStatus::Playing {
            return Err(Error::GameNotActive);
        }
        if self.player(address).is_none() {
            return Err(Error::PlayerNotFound);
        }

        let question = self
            .questions
            .get(question_index)
            .ok_or(Error::InvalidQuestionIndex)?;
        let question_id = question.id.clone();
        let correct_answer = question.correct_answer;
        let (is_correct, points) = scoring::score_answer(question, selected_answer, time_spent_secs);

        let player = self.player_mut(address).ok_or(Error::PlayerNotFound)?;
        if player.answers.iter().any(|a| a.question_index == question_index) {
            return Err(Error::AlreadyAnswered);
        }

        player.answers.push(Answer {
            question_id,
            question_index,
            selected_answer,
            time_spent: time_spent_secs,
            is_correct,
            points,
        });
        player.score += points;
        if is_correct {
            player.correct_answers += 1;
            player.time_bonus += points.saturating_sub(scoring::BASE_POINTS);
        }

        Ok(AnswerOutcome {
            is_correct,
            points,
            player_score: player.score,
            correct_answer,
        })
    }

    /// Close the game and split the pot.
    ///
    /// From `playing` this ranks the players, computes the payout manifest,
    /// and caches it; calling finish again returns the cached settlement
    /// unchanged. A room that never started cannot be finished.
    pub fn finish(&mut self, now: DateTime<Utc>) -> Result<Settlement, Error> {
        match self.status {
            RoomStatus::Waiting => Err(Error::InvalidState),
            RoomStatus::Finished => self.settlement.clone().ok_or(Error::InvalidState),
            RoomStatus::Playing => {
                let settlement = settlement::compute(&self.players, self.entry_fee)?;
                self.status = RoomStatus::Finished;
                self.finished_at = Some(now);
                self.settlement = Some(settlement.clone());
                Ok(settlement)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
