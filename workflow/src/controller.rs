use store::{DeckCatalog, MatchLedger, MatchRecord, NewMatchRecord};
use types::{Initiator, MatchResult, TurnOrder};

use crate::error::WorkflowError;
use crate::prompt::{self, Prompt, NO_DECKS_VALUE};
use crate::session::{SessionId, SessionRegistry, SessionState};

/// What the platform should do after one choice event.
#[derive(Debug)]
pub enum StepOutcome {
    /// Present these options and wait for exactly one selection.
    Prompt(Prompt),
    /// The record is in the ledger; the session is over.
    Committed(MatchRecord),
}

/// Walks initiators through the four recording choices and performs the
/// single ledger insert on the last one. One instance serves any number
/// of concurrent sessions; they share nothing but the registry map.
pub struct Controller<S> {
    store: S,
    sessions: SessionRegistry,
}

impl<S> Controller<S>
where
    S: DeckCatalog + MatchLedger,
{
    pub fn new(store: S) -> Self {
        Self::with_registry(store, SessionRegistry::new())
    }

    pub fn with_registry(store: S, sessions: SessionRegistry) -> Self {
        Self { store, sessions }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn sessions(&mut self) -> &mut SessionRegistry {
        &mut self.sessions
    }

    pub fn open_session(&mut self, initiator: Initiator) -> (SessionId, Prompt) {
        let id = self.sessions.open(initiator);
        log::info!("Opened recording session {id}");
        (id, prompt::result_prompt())
    }

    /// Applies one choice event to its session. A valid choice advances
    /// that session exactly one step; an invalid, stale, or placeholder
    /// choice mutates nothing anywhere.
    pub async fn handle_choice(
        &mut self,
        id: SessionId,
        value: &str,
    ) -> Result<StepOutcome, WorkflowError> {
        let session = self
            .sessions
            .live_snapshot(id)
            .ok_or(WorkflowError::StaleSession(id))?;

        match session.state {
            SessionState::AwaitResult => {
                let result = MatchResult::parse(value).ok_or_else(|| invalid(value))?;
                let deck_names = self.store.deck_names().await?;
                self.sessions
                    .advance(id, SessionState::AwaitMyDeck { result });
                Ok(StepOutcome::Prompt(prompt::my_deck_prompt(&deck_names)))
            }
            SessionState::AwaitMyDeck { result } => {
                let deck_names = self.store.deck_names().await?;
                if is_placeholder(value, &deck_names) {
                    return Ok(StepOutcome::Prompt(prompt::my_deck_prompt(&deck_names)));
                }
                if !deck_names.iter().any(|name| name == value) {
                    return Err(invalid(value));
                }
                self.sessions.advance(
                    id,
                    SessionState::AwaitOpponentDeck {
                        result,
                        my_deck: value.to_string(),
                    },
                );
                Ok(StepOutcome::Prompt(prompt::opponent_deck_prompt(
                    &deck_names,
                )))
            }
            SessionState::AwaitOpponentDeck { result, my_deck } => {
                let deck_names = self.store.deck_names().await?;
                if is_placeholder(value, &deck_names) {
                    return Ok(StepOutcome::Prompt(prompt::opponent_deck_prompt(
                        &deck_names,
                    )));
                }
                // The same deck on both sides is a legitimate mirror matchup.
                if !deck_names.iter().any(|name| name == value) {
                    return Err(invalid(value));
                }
                self.sessions.advance(
                    id,
                    SessionState::AwaitTurnOrder {
                        result,
                        my_deck,
                        opponent_deck: value.to_string(),
                    },
                );
                Ok(StepOutcome::Prompt(prompt::turn_order_prompt()))
            }
            SessionState::AwaitTurnOrder {
                result,
                my_deck,
                opponent_deck,
            } => {
                let turn_order = TurnOrder::parse(value).ok_or_else(|| invalid(value))?;
                // Discard before the write; a storage failure must not
                // leave a stuck session behind, and there is no retry.
                self.sessions.close(id);
                let record = self
                    .store
                    .insert_record(NewMatchRecord {
                        player_name: session.initiator.name,
                        player_id: session.initiator.id,
                        result,
                        my_deck,
                        opponent_deck,
                        turn_order,
                        memo: None,
                    })
                    .await
                    .map_err(|e| {
                        log::error!("Session {id} failed to commit its record: {e}");
                        e
                    })?;
                log::info!("Session {id} committed record {}", record.id);
                Ok(StepOutcome::Committed(record))
            }
        }
    }
}

fn invalid(value: &str) -> WorkflowError {
    WorkflowError::InvalidChoice {
        choice: value.to_string(),
    }
}

fn is_placeholder(value: &str, deck_names: &[String]) -> bool {
    deck_names.is_empty() && value == NO_DECKS_VALUE
}
