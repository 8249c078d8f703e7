use async_trait::async_trait;
use chrono::SubsecRound;
use sqlx::{Row, SqlitePool};
use types::{ChatRole, MatchResult, TurnOrder};

use crate::error::{DeckError, StoreError};
use crate::models::{ChatMessage, MatchRecord, NewMatchRecord};
use crate::traits::{DeckCatalog, MatchLedger, TranscriptLog};

/// All three persistence seams over a single SQLite pool. Every operation
/// is one self-committing statement, so concurrent sessions never need
/// application-level locking.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the tables if they are missing. Idempotent; run once at
    /// startup. There are no foreign keys between decks and records: deck
    /// fields on a record are name snapshots that must survive catalog
    /// churn.
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS decks (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                deck_name TEXT UNIQUE NOT NULL
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS game_records (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp TEXT NOT NULL,
                player_name TEXT NOT NULL,
                player_id TEXT NOT NULL,
                result TEXT NOT NULL,
                my_deck TEXT NOT NULL,
                opponent_deck TEXT NOT NULL,
                turn_order TEXT NOT NULL,
                memo TEXT
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS chat_history (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                player_id TEXT NOT NULL,
                role TEXT NOT NULL,
                content TEXT NOT NULL,
                timestamp TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(())
    }
}

fn parse_result(value: &str) -> Result<MatchResult, StoreError> {
    MatchResult::parse(value)
        .ok_or_else(|| StoreError::Query(format!("Unknown result value in ledger: {value}")))
}

fn parse_turn_order(value: &str) -> Result<TurnOrder, StoreError> {
    TurnOrder::parse(value)
        .ok_or_else(|| StoreError::Query(format!("Unknown turn_order value in ledger: {value}")))
}

fn record_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<MatchRecord, StoreError> {
    let result: String = row.get("result");
    let turn_order: String = row.get("turn_order");
    Ok(MatchRecord {
        id: row.get("id"),
        timestamp: row.get("timestamp"),
        player_name: row.get("player_name"),
        player_id: row.get("player_id"),
        result: parse_result(&result)?,
        my_deck: row.get("my_deck"),
        opponent_deck: row.get("opponent_deck"),
        turn_order: parse_turn_order(&turn_order)?,
        memo: row.get("memo"),
    })
}

#[async_trait]
impl DeckCatalog for SqliteStore {
    async fn deck_names(&self) -> Result<Vec<String>, StoreError> {
        let rows = sqlx::query("SELECT deck_name FROM decks ORDER BY deck_name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;
        Ok(rows.iter().map(|row| row.get("deck_name")).collect())
    }

    async fn add_deck(&self, name: &str) -> Result<(), DeckError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DeckError::EmptyName);
        }
        match sqlx::query("INSERT INTO decks (deck_name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await
        {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(DeckError::DuplicateName(name.to_string()))
            }
            Err(e) => Err(DeckError::Store(StoreError::Query(e.to_string()))),
        }
    }

    async fn remove_deck(&self, name: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM decks WHERE deck_name = ?")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl MatchLedger for SqliteStore {
    async fn insert_record(&self, record: NewMatchRecord) -> Result<MatchRecord, StoreError> {
        // Server clock at insert time, second precision.
        let timestamp = chrono::Utc::now().trunc_subsecs(0);
        let result = sqlx::query(
            "INSERT INTO game_records
                (timestamp, player_name, player_id, result, my_deck, opponent_deck, turn_order, memo)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(timestamp)
        .bind(&record.player_name)
        .bind(&record.player_id)
        .bind(record.result.as_str())
        .bind(&record.my_deck)
        .bind(&record.opponent_deck)
        .bind(record.turn_order.as_str())
        .bind(&record.memo)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(MatchRecord {
            id: result.last_insert_rowid(),
            timestamp,
            player_name: record.player_name,
            player_id: record.player_id,
            result: record.result,
            my_deck: record.my_deck,
            opponent_deck: record.opponent_deck,
            turn_order: record.turn_order,
            memo: record.memo,
        })
    }

    async fn delete_all_records(&self) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM game_records")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;
        tracing::info!("Deleted all {} match records", result.rows_affected());
        Ok(result.rows_affected())
    }

    async fn delete_records_for_player(&self, player_id: &str) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM game_records WHERE player_id = ?")
            .bind(player_id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;
        Ok(result.rows_affected())
    }

    async fn recent_records(&self, limit: u32) -> Result<Vec<MatchRecord>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, timestamp, player_name, player_id, result, my_deck, opponent_deck, turn_order, memo
             FROM game_records
             ORDER BY timestamp DESC, id DESC
             LIMIT ?",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;
        rows.iter().map(record_from_row).collect()
    }

    async fn results(&self, player_id: Option<&str>) -> Result<Vec<MatchResult>, StoreError> {
        let rows = match player_id {
            Some(player_id) => {
                sqlx::query("SELECT result FROM game_records WHERE player_id = ?")
                    .bind(player_id)
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                sqlx::query("SELECT result FROM game_records")
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(|e| StoreError::Query(e.to_string()))?;

        rows.iter()
            .map(|row| {
                let result: String = row.get("result");
                parse_result(&result)
            })
            .collect()
    }

    async fn opponent_results(
        &self,
        player_id: &str,
    ) -> Result<Vec<(String, MatchResult)>, StoreError> {
        let rows = sqlx::query(
            "SELECT opponent_deck, result FROM game_records WHERE player_id = ?",
        )
        .bind(player_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        rows.iter()
            .map(|row| {
                let result: String = row.get("result");
                Ok((row.get("opponent_deck"), parse_result(&result)?))
            })
            .collect()
    }

    async fn opponent_decks(&self) -> Result<Vec<String>, StoreError> {
        let rows = sqlx::query("SELECT opponent_deck FROM game_records")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;
        Ok(rows.iter().map(|row| row.get("opponent_deck")).collect())
    }
}

#[async_trait]
impl TranscriptLog for SqliteStore {
    async fn append_message(
        &self,
        player_id: &str,
        role: ChatRole,
        content: &str,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO chat_history (player_id, role, content, timestamp) VALUES (?, ?, ?, ?)",
        )
        .bind(player_id)
        .bind(role.as_str())
        .bind(content)
        .bind(chrono::Utc::now().trunc_subsecs(0))
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;
        Ok(())
    }

    async fn recent_messages(
        &self,
        player_id: &str,
        limit: u32,
    ) -> Result<Vec<ChatMessage>, StoreError> {
        let rows = sqlx::query(
            "SELECT role, content, timestamp FROM chat_history
             WHERE player_id = ?
             ORDER BY timestamp DESC, id DESC
             LIMIT ?",
        )
        .bind(player_id)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        let mut messages = rows
            .iter()
            .map(|row| {
                let role: String = row.get("role");
                let role = ChatRole::parse(&role).ok_or_else(|| {
                    StoreError::Query(format!("Unknown role value in transcript: {role}"))
                })?;
                Ok(ChatMessage {
                    role,
                    content: row.get("content"),
                    timestamp: row.get("timestamp"),
                })
            })
            .collect::<Result<Vec<_>, StoreError>>()?;

        // Scanned newest-first to apply the limit; callers want reading order.
        messages.reverse();
        Ok(messages)
    }

    async fn clear_messages(&self, player_id: &str) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM chat_history WHERE player_id = ?")
            .bind(player_id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_store() -> SqliteStore {
        let pool = SqlitePool::connect(":memory:").await.unwrap();
        let store = SqliteStore::new(pool);
        store.init_schema().await.unwrap();
        store
    }

    #[tokio::test]
    async fn init_schema_is_idempotent() {
        let store = memory_store().await;
        store.init_schema().await.unwrap();
        assert!(store.deck_names().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_deck_trims_and_rejects_empty() {
        let store = memory_store().await;
        store.add_deck("  Aggro  ").await.unwrap();
        assert_eq!(store.deck_names().await.unwrap(), vec!["Aggro"]);
        assert!(matches!(
            store.add_deck("   ").await,
            Err(DeckError::EmptyName)
        ));
    }

    #[tokio::test]
    async fn duplicate_deck_is_rejected_and_catalog_stays_at_one() {
        let store = memory_store().await;
        store.add_deck("Aggro").await.unwrap();
        assert!(matches!(
            store.add_deck("Aggro").await,
            Err(DeckError::DuplicateName(name)) if name == "Aggro"
        ));
        assert_eq!(store.deck_names().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn deck_names_are_lexicographic() {
        let store = memory_store().await;
        for name in ["Midrange", "Aggro", "Control"] {
            store.add_deck(name).await.unwrap();
        }
        assert_eq!(
            store.deck_names().await.unwrap(),
            vec!["Aggro", "Control", "Midrange"]
        );
    }

    #[tokio::test]
    async fn remove_deck_reports_whether_a_row_matched() {
        let store = memory_store().await;
        store.add_deck("Aggro").await.unwrap();
        assert!(store.remove_deck("Aggro").await.unwrap());
        assert!(!store.remove_deck("Aggro").await.unwrap());
    }
}
