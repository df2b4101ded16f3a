use std::sync::Arc;

use quizpool_engine::{QuestionBank, RoomRegistry};

pub type SharedState = Arc<AppState>;

/// Application state shared by all handlers: the room registry (which owns
/// the question bank). Process-lifetime only; a restart forgets all rooms.
pub struct AppState {
    pub registry: RoomRegistry,
}

impl AppState {
    pub fn new(bank: QuestionBank) -> SharedState {
        Arc::new(Self {
            registry: RoomRegistry::new(Arc::new(bank)),
        })
    }
}
