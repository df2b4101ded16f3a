//! Scoring policy.
//!
//! A correct answer earns a fixed base plus a speed bonus that decays while
//! the reported time stays under the bonus window. The constants are part
//! of the game contract with clients and are not tunable per room. Elapsed
//! time is client-reported; the engine scores whatever it is told.

use crate::question::Question;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const BASE_POINTS: u32 = 100;
pub const MAX_TIME_BONUS: u32 = 50;
/// Answers at or beyond this many seconds earn no speed bonus.
pub const TIME_BONUS_WINDOW_SECS: u64 = 10;
pub const TIME_BONUS_DECAY_PER_SEC: u32 = 5;

/// Sentinel selection for a timeout / no answer. Always scores zero.
pub const NO_ANSWER: i32 = -1;

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Score one submitted answer, returning `(is_correct, points)`.
///
/// Correct in under 10 s yields 100-150 points (150 at 0 s, 105 at 9 s);
/// correct at 10 s or slower yields exactly 100. Anything else yields 0.
pub fn score_answer(question: &Question, selected_answer: i32, time_spent_secs: u64) -> (bool, u32) {
    let is_correct = selected_answer >= 0 && selected_answer as usize == question.correct_answer;
    if !is_correct {
        return (false, 0);
    }

    let mut points = BASE_POINTS;
    if time_spent_secs < TIME_BONUS_WINDOW_SECS {
        let decay = TIME_BONUS_DECAY_PER_SEC.saturating_mul(time_spent_secs as u32);
        points += MAX_TIME_BONUS.saturating_sub(decay);
    }
    (true, points)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
