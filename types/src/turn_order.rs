use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Whether the recording player acted first or second in the match.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnOrder {
    First,
    Second,
}

impl TurnOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            TurnOrder::First => "first",
            TurnOrder::Second => "second",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "first" => Some(TurnOrder::First),
            "second" => Some(TurnOrder::Second),
            _ => None,
        }
    }
}

impl Display for TurnOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
