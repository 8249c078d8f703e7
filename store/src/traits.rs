use async_trait::async_trait;
use types::{ChatRole, MatchResult};

use crate::error::{DeckError, StoreError};
use crate::models::{ChatMessage, MatchRecord, NewMatchRecord};

/// Window for recent-record listings when the caller leaves it unspecified.
pub const DEFAULT_RECENT_LIMIT: u32 = 10;

/// Registry of deck archetype names. Entries are immutable except for
/// presence; records reference decks by name snapshot, so removal never
/// cascades into the ledger.
#[async_trait]
pub trait DeckCatalog: Send + Sync {
    /// All deck names in lexicographic order. Empty is a valid answer.
    async fn deck_names(&self) -> Result<Vec<String>, StoreError>;
    async fn add_deck(&self, name: &str) -> Result<(), DeckError>;
    /// True iff a row matched. A missing name is not an error.
    async fn remove_deck(&self, name: &str) -> Result<bool, StoreError>;
}

/// The append-mostly ledger of completed matches. Every record access in
/// the workspace goes through this trait; nothing else touches the table.
#[async_trait]
pub trait MatchLedger: Send + Sync {
    async fn insert_record(&self, record: NewMatchRecord) -> Result<MatchRecord, StoreError>;
    /// Count of rows removed. Irreversible.
    async fn delete_all_records(&self) -> Result<u64, StoreError>;
    /// Count of rows removed; 0 when the player has no records.
    async fn delete_records_for_player(&self, player_id: &str) -> Result<u64, StoreError>;
    /// Newest first.
    async fn recent_records(&self, limit: u32) -> Result<Vec<MatchRecord>, StoreError>;
    /// Outcomes for one player, or for everyone when `player_id` is None.
    async fn results(&self, player_id: Option<&str>) -> Result<Vec<MatchResult>, StoreError>;
    /// (opponent_deck, result) pairs for one player's records.
    async fn opponent_results(
        &self,
        player_id: &str,
    ) -> Result<Vec<(String, MatchResult)>, StoreError>;
    /// Opponent-deck column across every record, one entry per record.
    async fn opponent_decks(&self) -> Result<Vec<String>, StoreError>;
}

/// Rolling per-player conversation transcript for the external chat
/// service. Append-only; reads return the most recent lines in order.
#[async_trait]
pub trait TranscriptLog: Send + Sync {
    async fn append_message(
        &self,
        player_id: &str,
        role: ChatRole,
        content: &str,
    ) -> Result<(), StoreError>;
    /// The last `limit` lines for the player, oldest first.
    async fn recent_messages(
        &self,
        player_id: &str,
        limit: u32,
    ) -> Result<Vec<ChatMessage>, StoreError>;
    async fn clear_messages(&self, player_id: &str) -> Result<u64, StoreError>;
}
