//! Engine error taxonomy.
//!
//! One fieldless enum covers every failure a room operation can surface.
//! Messages mirror the responses the frontend already understands;
//! [`Error::kind`] groups variants into the classes the HTTP layer maps to
//! status codes.

use thiserror::Error;

/// Broad classification of an [`Error`], used by the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Unauthorized,
    InvalidState,
    Validation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Missing required fields")]
    InvalidInput,
    #[error("Not enough questions for this category")]
    CategoryNotFound,
    #[error("Room not found")]
    RoomNotFound,
    #[error("Room is not accepting players")]
    GameAlreadyStarted,
    #[error("Room is full")]
    RoomFull,
    #[error("Already joined this room")]
    AlreadyJoined,
    #[error("Only host can start the game")]
    NotHost,
    #[error("Need at least 2 players to start")]
    NotEnoughPlayers,
    #[error("Game already started or finished")]
    InvalidState,
    #[error("Game is not active")]
    GameNotActive,
    #[error("Player not found in this room")]
    PlayerNotFound,
    #[error("Invalid question index")]
    InvalidQuestionIndex,
    #[error("Already answered this question")]
    AlreadyAnswered,
    #[error("Game not finished yet")]
    GameNotFinished,
    #[error("Arithmetic overflow while computing settlement")]
    Overflow,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::RoomNotFound | Error::PlayerNotFound | Error::CategoryNotFound => {
                ErrorKind::NotFound
            }
            Error::RoomFull | Error::AlreadyJoined | Error::AlreadyAnswered => ErrorKind::Conflict,
            Error::NotHost => ErrorKind::Unauthorized,
            Error::GameAlreadyStarted
            | Error::NotEnoughPlayers
            | Error::InvalidState
            | Error::GameNotActive
            | Error::GameNotFinished => ErrorKind::InvalidState,
            Error::InvalidInput | Error::InvalidQuestionIndex | Error::Overflow => {
                ErrorKind::Validation
            }
        }
    }
}
