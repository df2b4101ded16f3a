//! QuizPool game engine.
//!
//! Room lifecycle, answer scoring, and prize settlement for the multiplayer
//! trivia game. All state lives in process memory behind the
//! [`RoomRegistry`]; the HTTP driver in `quizpool-server` is the only
//! caller. Prize amounts are cUSD base units (18 decimals) carried as
//! `i128`; the settlement output is a payout manifest handed to the
//! on-chain escrow contract by an operator script, never executed here.

pub mod error;
pub mod question;
pub mod registry;
pub mod room;
pub mod scoring;
pub mod settlement;

pub use error::{Error, ErrorKind};
pub use question::{LoadError, Question, QuestionBank};
pub use registry::{normalize_address, CreateRoomParams, RoomRegistry};
pub use room::{
    Answer, AnswerOutcome, Player, Room, RoomStatus, DEFAULT_MAX_PLAYERS, MIN_PLAYERS_TO_START,
    QUESTIONS_PER_ROOM,
};
pub use settlement::{PayoutEntry, RankedPlayer, Settlement};
