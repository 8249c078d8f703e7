pub mod config;
pub mod error;
pub mod models;
pub mod sqlite;
pub mod traits;

pub use config::StoreConfig;
pub use error::{DeckError, StoreError};
pub use models::{ChatMessage, MatchRecord, NewMatchRecord};
pub use sqlite::SqliteStore;
pub use traits::{DeckCatalog, MatchLedger, TranscriptLog, DEFAULT_RECENT_LIMIT};

// NoopStore for when persistence is not needed
pub struct NoopStore;

#[async_trait::async_trait]
impl traits::DeckCatalog for NoopStore {
    async fn deck_names(&self) -> Result<Vec<String>, error::StoreError> {
        Ok(Vec::new())
    }

    async fn add_deck(&self, _name: &str) -> Result<(), error::DeckError> {
        Ok(())
    }

    async fn remove_deck(&self, _name: &str) -> Result<bool, error::StoreError> {
        Ok(false)
    }
}

#[async_trait::async_trait]
impl traits::MatchLedger for NoopStore {
    async fn insert_record(
        &self,
        record: models::NewMatchRecord,
    ) -> Result<models::MatchRecord, error::StoreError> {
        Ok(models::MatchRecord {
            id: 0,
            timestamp: chrono::Utc::now(),
            player_name: record.player_name,
            player_id: record.player_id,
            result: record.result,
            my_deck: record.my_deck,
            opponent_deck: record.opponent_deck,
            turn_order: record.turn_order,
            memo: record.memo,
        })
    }

    async fn delete_all_records(&self) -> Result<u64, error::StoreError> {
        Ok(0)
    }

    async fn delete_records_for_player(
        &self,
        _player_id: &str,
    ) -> Result<u64, error::StoreError> {
        Ok(0)
    }

    async fn recent_records(
        &self,
        _limit: u32,
    ) -> Result<Vec<models::MatchRecord>, error::StoreError> {
        Ok(Vec::new())
    }

    async fn results(
        &self,
        _player_id: Option<&str>,
    ) -> Result<Vec<types::MatchResult>, error::StoreError> {
        Ok(Vec::new())
    }

    async fn opponent_results(
        &self,
        _player_id: &str,
    ) -> Result<Vec<(String, types::MatchResult)>, error::StoreError> {
        Ok(Vec::new())
    }

    async fn opponent_decks(&self) -> Result<Vec<String>, error::StoreError> {
        Ok(Vec::new())
    }
}

#[async_trait::async_trait]
impl traits::TranscriptLog for NoopStore {
    async fn append_message(
        &self,
        _player_id: &str,
        _role: types::ChatRole,
        _content: &str,
    ) -> Result<(), error::StoreError> {
        Ok(())
    }

    async fn recent_messages(
        &self,
        _player_id: &str,
        _limit: u32,
    ) -> Result<Vec<models::ChatMessage>, error::StoreError> {
        Ok(Vec::new())
    }

    async fn clear_messages(&self, _player_id: &str) -> Result<u64, error::StoreError> {
        Ok(0)
    }
}
