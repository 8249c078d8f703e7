use std::collections::HashMap;
use std::fmt::Display;
use std::time::{Duration, Instant};

use types::{Initiator, MatchResult};
use uuid::Uuid;

/// Inactivity window measured from session creation. Events arriving
/// after it are rejected as stale.
pub const SESSION_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Forward-only ladder of pending choices. Each variant carries exactly
/// the fields already chosen, so a later field cannot be set before an
/// earlier one by construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    AwaitResult,
    AwaitMyDeck {
        result: MatchResult,
    },
    AwaitOpponentDeck {
        result: MatchResult,
        my_deck: String,
    },
    AwaitTurnOrder {
        result: MatchResult,
        my_deck: String,
        opponent_deck: String,
    },
}

/// One in-progress recording interaction. Never persisted; dropped on
/// commit, cancellation, or expiry.
#[derive(Clone, Debug)]
pub struct Session {
    pub initiator: Initiator,
    pub state: SessionState,
    created_at: Instant,
}

impl Session {
    fn new(initiator: Initiator) -> Self {
        Self {
            initiator,
            state: SessionState::AwaitResult,
            created_at: Instant::now(),
        }
    }

    pub fn is_expired(&self, timeout: Duration) -> bool {
        self.created_at.elapsed() >= timeout
    }
}

/// Process-wide map of live sessions. Sessions for different initiators
/// (or repeat invocations by the same one) share nothing but this map,
/// and entries are cleared on commit and expiry to bound memory.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: HashMap<SessionId, Session>,
    timeout: Duration,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::with_timeout(SESSION_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            sessions: HashMap::new(),
            timeout,
        }
    }

    pub fn open(&mut self, initiator: Initiator) -> SessionId {
        let id = SessionId::new();
        self.sessions.insert(id, Session::new(initiator));
        id
    }

    /// Snapshot of a live session. An expired entry is purged here and
    /// reported as absent, so stale events can never observe it.
    pub fn live_snapshot(&mut self, id: SessionId) -> Option<Session> {
        let session = self.sessions.get(&id)?;
        if session.is_expired(self.timeout) {
            log::info!("Session {id} expired before the next choice arrived");
            self.sessions.remove(&id);
            return None;
        }
        Some(session.clone())
    }

    pub fn advance(&mut self, id: SessionId, state: SessionState) {
        if let Some(session) = self.sessions.get_mut(&id) {
            session.state = state;
        }
    }

    /// Removes the session regardless of its state.
    pub fn close(&mut self, id: SessionId) -> Option<Session> {
        self.sessions.remove(&id)
    }

    /// Drops every expired session and reports how many went. Expiry is
    /// also enforced per event, so this only reclaims abandoned entries.
    pub fn sweep_expired(&mut self) -> usize {
        let timeout = self.timeout;
        let before = self.sessions.len();
        self.sessions.retain(|_, session| !session.is_expired(timeout));
        before - self.sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn initiator() -> Initiator {
        Initiator::new("p1", "Alice")
    }

    #[test]
    fn new_sessions_start_awaiting_a_result() {
        let mut registry = SessionRegistry::new();
        let id = registry.open(initiator());
        let session = registry.live_snapshot(id).unwrap();
        assert_eq!(session.state, SessionState::AwaitResult);
    }

    #[test]
    fn expired_sessions_are_purged_on_touch() {
        let mut registry = SessionRegistry::with_timeout(Duration::ZERO);
        let id = registry.open(initiator());
        assert!(registry.live_snapshot(id).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn sweep_only_drops_expired_entries() {
        let mut registry = SessionRegistry::with_timeout(Duration::from_secs(60));
        registry.open(initiator());
        assert_eq!(registry.sweep_expired(), 0);
        assert_eq!(registry.len(), 1);

        let mut registry = SessionRegistry::with_timeout(Duration::ZERO);
        registry.open(initiator());
        registry.open(Initiator::new("p2", "Bob"));
        assert_eq!(registry.sweep_expired(), 2);
        assert!(registry.is_empty());
    }

    #[test]
    fn sessions_are_independent_per_open() {
        let mut registry = SessionRegistry::new();
        let first = registry.open(initiator());
        let second = registry.open(initiator());
        assert_ne!(first, second);

        registry.advance(
            first,
            SessionState::AwaitMyDeck {
                result: MatchResult::Win,
            },
        );
        let untouched = registry.live_snapshot(second).unwrap();
        assert_eq!(untouched.state, SessionState::AwaitResult);
    }
}
