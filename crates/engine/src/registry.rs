//! Room registry.
//!
//! The one mutable shared resource in the engine: an explicit service
//! object owning the keyed room store, injected into request handlers
//! instead of living as ambient module state. Every mutation goes through
//! the map's per-entry locks, so operations on a single room are serialized
//! while different rooms proceed independently. Wallet addresses are
//! normalized (trimmed, lower-cased) at this boundary before any lookup.

use std::sync::Arc;

use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use crate::error::Error;
use crate::question::QuestionBank;
use crate::room::{AnswerOutcome, Room, RoomStatus, MIN_PLAYERS_TO_START, QUESTIONS_PER_ROOM};
use crate::settlement::Settlement;

pub const ROOM_CODE_LEN: usize = 8;

/// Inputs to [`RoomRegistry::create_room`].
#[derive(Debug, Clone)]
pub struct CreateRoomParams {
    pub host_address: String,
    pub category: String,
    pub name: String,
    /// Entry fee in cUSD base units; zero means a free room.
    pub entry_fee: i128,
    pub max_players: usize,
}

pub struct RoomRegistry {
    bank: Arc<QuestionBank>,
    rooms: DashMap<String, Room>,
}

impl RoomRegistry {
    pub fn new(bank: Arc<QuestionBank>) -> Self {
        Self {
            bank,
            rooms: DashMap::new(),
        }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    /// Create a room with a fixed sequence of ten questions sampled from the
    /// requested category, enrolling the host as the first player.
    pub fn create_room(&self, params: CreateRoomParams) -> Result<Room, Error> {
        let host = normalize_address(&params.host_address);
        let name = params.name.trim();
        let category = params.category.trim();

        if host.is_empty() || name.is_empty() || category.is_empty() {
            return Err(Error::InvalidInput);
        }
        if params.entry_fee < 0 {
            return Err(Error::InvalidInput);
        }
        if params.max_players < MIN_PLAYERS_TO_START {
            return Err(Error::InvalidInput);
        }

        let questions = self.bank.sample(category, QUESTIONS_PER_ROOM)?;

        let mut room = Room::new(
            generate_room_code(),
            name.to_owned(),
            host,
            category.to_owned(),
            params.entry_fee,
            questions,
            params.max_players,
            Utc::now(),
        );

        // Codes are 8 hex chars; regenerate on the rare collision.
        loop {
            match self.rooms.entry(room.id.clone()) {
                Entry::Occupied(_) => room.id = generate_room_code(),
                Entry::Vacant(slot) => {
                    slot.insert(room.clone());
                    return Ok(room);
                }
            }
        }
    }

    /// Snapshot of a room by its code.
    pub fn get(&self, room_id: &str) -> Result<Room, Error> {
        self.rooms
            .get(room_id)
            .map(|room| room.clone())
            .ok_or(Error::RoomNotFound)
    }

    /// Rooms that are still waiting or playing, oldest first.
    pub fn list_active(&self) -> Vec<Room> {
        let mut rooms: Vec<Room> = self
            .rooms
            .iter()
            .filter(|room| room.is_active())
            .map(|room| room.clone())
            .collect();
        rooms.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        rooms
    }

    pub fn join(&self, room_id: &str, player_address: &str) -> Result<Room, Error> {
        let address = normalize_address(player_address);
        if address.is_empty() {
            return Err(Error::InvalidInput);
        }

        let mut room = self.rooms.get_mut(room_id).ok_or(Error::RoomNotFound)?;
        room.join(address, Utc::now())?;
        Ok(room.clone())
    }

    pub fn start(&self, room_id: &str, requester_address: &str) -> Result<Room, Error> {
        let requester = normalize_address(requester_address);
        if requester.is_empty() {
            return Err(Error::InvalidInput);
        }

        let mut room = self.rooms.get_mut(room_id).ok_or(Error::RoomNotFound)?;
        room.start(&requester, Utc::now())?;
        Ok(room.clone())
    }

    pub fn submit_answer(
        &self,
        room_id: &str,
        player_address: &str,
        question_index: usize,
        selected_answer: i32,
        time_spent_secs: u64,
    ) -> Result<AnswerOutcome, Error> {
        let address = normalize_address(player_address);
        if address.is_empty() {
            return Err(Error::InvalidInput);
        }

        let mut room = self.rooms.get_mut(room_id).ok_or(Error::RoomNotFound)?;
        room.submit_answer(&address, question_index, selected_answer, time_spent_secs)
    }

    /// Finish a room, returning the post-finish snapshot and its settlement.
    /// Safe to call twice; the cached settlement is returned unchanged.
    pub fn finish(&self, room_id: &str) -> Result<(Room, Settlement), Error> {
        let mut room = self.rooms.get_mut(room_id).ok_or(Error::RoomNotFound)?;
        let settlement = room.finish(Utc::now())?;
        Ok((room.clone(), settlement))
    }

    /// Payout manifest of a finished room, for the operator payout script.
    pub fn payout_manifest(&self, room_id: &str) -> Result<Settlement, Error> {
        let room = self.rooms.get(room_id).ok_or(Error::RoomNotFound)?;
        if room.status != RoomStatus::Finished {
            return Err(Error::GameNotFinished);
        }
        room.settlement.clone().ok_or(Error::GameNotFinished)
    }
}

/// Addresses are compared case-insensitively everywhere; the lower-cased
/// form is what gets stored.
pub fn normalize_address(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

fn generate_room_code() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    hex[..ROOM_CODE_LEN].to_ascii_uppercase()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
