use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchResult {
    Win,
    Loss,
}

impl MatchResult {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchResult::Win => "win",
            MatchResult::Loss => "loss",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "win" => Some(MatchResult::Win),
            "loss" => Some(MatchResult::Loss),
            _ => None,
        }
    }

    pub fn is_win(self) -> bool {
        matches!(self, MatchResult::Win)
    }
}

impl Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
