//! Static question catalog.
//!
//! Questions are loaded once at startup from a JSON file shaped
//! `{ "<category>": [ { id, question, options, correctAnswer, explanation } ] }`
//! and are read-only afterwards. Rooms receive their own sampled copy of
//! ten questions, so the catalog is never mutated mid-game.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::Error;

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// A single multiple-choice question. Immutable after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    /// Prompt text shown to players.
    pub question: String,
    /// Ordered option list, at least two entries.
    pub options: Vec<String>,
    /// Zero-based index into `options`.
    pub correct_answer: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Failure while reading or validating the catalog file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read question catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse question catalog: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid question {id:?} in category {category:?}: {reason}")]
    InvalidQuestion {
        category: String,
        id: String,
        reason: &'static str,
    },
}

// ---------------------------------------------------------------------------
// Question bank
// ---------------------------------------------------------------------------

/// Read-only store of question pools keyed by category.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    categories: HashMap<String, Vec<Question>>,
}

impl QuestionBank {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Parse and validate a catalog. The whole file is rejected if any
    /// question has fewer than two options, an out-of-bounds correct index,
    /// or a duplicate id within its category.
    pub fn from_json_str(raw: &str) -> Result<Self, LoadError> {
        let categories: HashMap<String, Vec<Question>> = serde_json::from_str(raw)?;

        for (category, pool) in &categories {
            let mut seen_ids = HashSet::new();
            for question in pool {
                if question.options.len() < 2 {
                    return Err(invalid(category, question, "fewer than two options"));
                }
                if question.correct_answer >= question.options.len() {
                    return Err(invalid(category, question, "correct answer index out of bounds"));
                }
                if !seen_ids.insert(question.id.as_str()) {
                    return Err(invalid(category, question, "duplicate question id"));
                }
            }
        }

        Ok(Self { categories })
    }

    /// Category names in sorted order.
    pub fn categories(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.categories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn category(&self, name: &str) -> Option<&[Question]> {
        self.categories.get(name).map(Vec::as_slice)
    }

    /// Total question count across all categories.
    pub fn len(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Draw exactly `count` questions from `category` without replacement.
    ///
    /// Fails with `CategoryNotFound` when the category is missing or its
    /// pool is smaller than `count`. Selection is shuffled per call, so each
    /// room gets its own ordering.
    pub fn sample_with<R: Rng + ?Sized>(
        &self,
        category: &str,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<Question>, Error> {
        let pool = self.categories.get(category).ok_or(Error::CategoryNotFound)?;
        if pool.len() < count {
            return Err(Error::CategoryNotFound);
        }

        let mut picked = pool.clone();
        picked.shuffle(rng);
        picked.truncate(count);
        Ok(picked)
    }

    pub fn sample(&self, category: &str, count: usize) -> Result<Vec<Question>, Error> {
        self.sample_with(category, count, &mut rand::thread_rng())
    }
}

fn invalid(category: &str, question: &Question, reason: &'static str) -> LoadError {
    LoadError::InvalidQuestion {
        category: category.to_owned(),
        id: question.id.clone(),
        reason,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
