//! Compatibility matrices and polls.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::vote::{AnswerId, Vote};
use crate::errors::ConfigError;

/// answer → answer → integer score for one poll.
///
/// Symmetric by convention; symmetry is not enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityMatrix {
    answers: Vec<AnswerId>,
    scores: BTreeMap<AnswerId, BTreeMap<AnswerId, i64>>,
}

impl CompatibilityMatrix {
    /// Build a matrix from ordered answer labels and rows indexed the same way.
    pub fn from_rows(
        poll: &str,
        answers: &[String],
        rows: &[Vec<i64>],
    ) -> Result<Self, ConfigError> {
        if answers.is_empty() {
            return Err(ConfigError::EmptyPoll {
                poll: poll.to_string(),
            });
        }

        let mut seen = HashSet::new();
        for answer in answers {
            if !seen.insert(answer.as_str()) {
                return Err(ConfigError::DuplicateAnswer {
                    poll: poll.to_string(),
                    answer: answer.clone(),
                });
            }
        }

        if rows.len() != answers.len() {
            return Err(ConfigError::MatrixNotSquare {
                poll: poll.to_string(),
                answers: answers.len(),
                row: rows.len(),
                len: 0,
            });
        }

        let mut scores = BTreeMap::new();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != answers.len() {
                return Err(ConfigError::MatrixNotSquare {
                    poll: poll.to_string(),
                    answers: answers.len(),
                    row: i,
                    len: row.len(),
                });
            }
            let targets: BTreeMap<AnswerId, i64> = answers
                .iter()
                .zip(row.iter())
                .map(|(label, &score)| (AnswerId::new(label.clone()), score))
                .collect();
            scores.insert(AnswerId::new(answers[i].clone()), targets);
        }

        Ok(Self {
            answers: answers.iter().cloned().map(AnswerId::new).collect(),
            scores,
        })
    }

    /// Score between two answers; 0 if either is unknown.
    pub fn score(&self, from: &AnswerId, to: &AnswerId) -> i64 {
        self.scores
            .get(from)
            .and_then(|row| row.get(to))
            .copied()
            .unwrap_or(0)
    }

    pub fn contains(&self, answer: &AnswerId) -> bool {
        self.scores.contains_key(answer)
    }

    /// Answers in declaration order.
    pub fn answers(&self) -> &[AnswerId] {
        &self.answers
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

/// One survey question: its matrix and linear weight multiplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    pub name: String,
    pub matrix: CompatibilityMatrix,
    pub weight: i64,
}

impl Poll {
    pub fn new(name: impl Into<String>, matrix: CompatibilityMatrix, weight: i64) -> Self {
        Self {
            name: name.into(),
            matrix,
            weight,
        }
    }

    /// Votes whose answer belongs to this poll, in input order.
    /// Votes for answers outside the matrix are silently excluded.
    pub fn extract_votes<'a>(&self, votes: &'a [Vote]) -> Vec<&'a Vote> {
        votes
            .iter()
            .filter(|vote| self.matrix.contains(&vote.answer))
            .collect()
    }

    /// Weighted score between two answers of this poll.
    pub fn weighted_score(&self, from: &AnswerId, to: &AnswerId) -> i64 {
        self.matrix.score(from, to) * self.weight
    }
}
