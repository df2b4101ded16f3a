//! HTTP driver for the QuizPool trivia backend.
//!
//! Thin JSON layer over `quizpool-engine`: request schemas, route handlers,
//! shared state, and the error-to-status mapping. Clients poll for game
//! state; there is no push channel.

pub mod config;
pub mod error;
pub mod routes;
pub mod schemas;
pub mod state;
