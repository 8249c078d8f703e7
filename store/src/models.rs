use serde::{Deserialize, Serialize};
use types::{ChatRole, MatchResult, TurnOrder};

/// One completed match as persisted in the ledger. Immutable once written;
/// the deck fields are name snapshots, not references into the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: i64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub player_name: String,
    pub player_id: String,
    pub result: MatchResult,
    pub my_deck: String,
    pub opponent_deck: String,
    pub turn_order: TurnOrder,
    pub memo: Option<String>,
}

/// Field set collected by the recording workflow. Id and timestamp are
/// assigned by the ledger at insert time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMatchRecord {
    pub player_name: String,
    pub player_id: String,
    pub result: MatchResult,
    pub my_deck: String,
    pub opponent_deck: String,
    pub turn_order: TurnOrder,
    pub memo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl ChatMessage {
    /// Shape the external chat-completion service expects for one line.
    pub fn as_chat_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "role": self.role.as_str(),
            "content": self.content,
        })
    }
}
