//! Vote stream parsing.
//!
//! Votes arrive as alternating lines, user name then answer label, terminated
//! by a line reading `done` or by end of input.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::constants::INPUT_SENTINEL;
use crate::errors::InputError;
use crate::models::{UserId, Vote};

/// Fully materialized votes plus every distinct user in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteBatch {
    pub users: Vec<UserId>,
    pub votes: Vec<Vote>,
}

impl VoteBatch {
    /// Build a batch from already-parsed votes.
    pub fn from_votes(votes: Vec<Vote>) -> Self {
        let mut seen = HashSet::new();
        let users = votes
            .iter()
            .filter(|v| seen.insert(v.user.clone()))
            .map(|v| v.user.clone())
            .collect();
        Self { users, votes }
    }
}

/// Parse alternating user/answer lines until the sentinel.
pub fn parse_votes<I, S>(lines: I) -> Result<VoteBatch, InputError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut votes = Vec::new();
    let mut lines = lines.into_iter().enumerate();

    while let Some((index, user_line)) = lines.next() {
        let user = user_line.as_ref().trim_end_matches(['\r', '\n']);
        if user == INPUT_SENTINEL {
            break;
        }
        if user.trim().is_empty() {
            return Err(InputError::BlankUser { line: index + 1 });
        }
        let answer = match lines.next() {
            Some((_, answer_line)) => answer_line
                .as_ref()
                .trim_end_matches(['\r', '\n'])
                .to_string(),
            None => {
                return Err(InputError::MissingAnswer {
                    user: user.to_string(),
                })
            }
        };
        votes.push(Vote::new(user, answer));
    }

    Ok(VoteBatch::from_votes(votes))
}
