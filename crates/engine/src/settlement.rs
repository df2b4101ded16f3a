//! Prize settlement.
//!
//! Ranks players and splits the entry-fee pot into a payout manifest. The
//! manifest is the direct input to the escrow contract's `payoutWinners`,
//! invoked out-of-band by an operator; nothing here moves funds. Shares are
//! basis points applied with checked integer math, so division floors and
//! any remainder stays in the escrow pool as dust.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::room::Player;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const BASIS_POINTS_DIVISOR: i128 = 10_000;
/// 1st 50%, 2nd 30%, 3rd 20% when three or more players finished.
pub const TOP_THREE_SPLIT_BPS: [i128; 3] = [5_000, 3_000, 2_000];
/// 60/40 for a head-to-head game.
pub const HEAD_TO_HEAD_SPLIT_BPS: [i128; 2] = [6_000, 4_000];

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// One leaderboard row, in final rank order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedPlayer {
    pub address: String,
    pub score: u32,
    pub correct_answers: u32,
}

/// One line of the payout manifest: `amount` base units to `address`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutEntry {
    pub address: String,
    #[serde(with = "amount_string")]
    pub amount: i128,
}

/// Result of settling a finished room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    /// `entry_fee * player_count`, in base units.
    #[serde(with = "amount_string")]
    pub prize_pool: i128,
    /// Every player, descending by score; join order breaks ties.
    pub leaderboard: Vec<RankedPlayer>,
    /// Winners only; players below the paid ranks are omitted.
    pub winners: Vec<PayoutEntry>,
}

// ---------------------------------------------------------------------------
// Calculator
// ---------------------------------------------------------------------------

/// Rank `players` and split `entry_fee * players.len()`.
///
/// The sort is stable, so equal scores keep join order. Distribution by
/// player count: three or more pay the top three 50/30/20, exactly two pay
/// 60/40, a single player takes the whole pot, an empty room pays nobody.
pub fn compute(players: &[Player], entry_fee: i128) -> Result<Settlement, Error> {
    let mut ranked: Vec<&Player> = players.iter().collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));

    let prize_pool = entry_fee
        .checked_mul(ranked.len() as i128)
        .ok_or(Error::Overflow)?;

    let split: &[i128] = match ranked.len() {
        0 => &[],
        1 => &[BASIS_POINTS_DIVISOR],
        2 => &HEAD_TO_HEAD_SPLIT_BPS,
        _ => &TOP_THREE_SPLIT_BPS,
    };

    let mut winners = Vec::with_capacity(split.len());
    for (player, bps) in ranked.iter().zip(split) {
        winners.push(PayoutEntry {
            address: player.address.clone(),
            amount: prize_share(prize_pool, *bps)?,
        });
    }

    let leaderboard = ranked
        .iter()
        .map(|p| RankedPlayer {
            address: p.address.clone(),
            score: p.score,
            correct_answers: p.correct_answers,
        })
        .collect();

    Ok(Settlement {
        prize_pool,
        leaderboard,
        winners,
    })
}

/// Floor share of `pool` at `bps` basis points.
fn prize_share(pool: i128, bps: i128) -> Result<i128, Error> {
    pool.checked_mul(bps)
        .and_then(|v| v.checked_div(BASIS_POINTS_DIVISOR))
        .ok_or(Error::Overflow)
}

// ---------------------------------------------------------------------------
// Wire format for amounts
// ---------------------------------------------------------------------------

/// Serialize `i128` base-unit amounts as decimal strings. JSON numbers lose
/// precision past 2^53 and 18-decimal token amounts exceed that routinely;
/// the payout script feeds these strings to the chain client untouched.
pub mod amount_string {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(amount: &i128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&amount.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i128, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.trim()
            .parse()
            .map_err(|_| de::Error::custom("invalid token amount"))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
