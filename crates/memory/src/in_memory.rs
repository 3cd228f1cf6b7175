//! In-memory session store: the default for a single-process deployment.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use eatba_core::error::SessionError;
use eatba_core::session::{SessionState, SessionStore};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// A session store backed by a `HashMap` behind an async `RwLock`.
///
/// Without an idle TTL, sessions are kept for the life of the process.
/// With one, a session neither written nor read for longer than the TTL
/// reads as absent and is swept on the next write.
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionState>>>,
    idle_ttl: Option<Duration>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_ttl: None,
        }
    }

    /// Expire sessions that have not been touched for `ttl`.
    pub fn with_idle_ttl(mut self, ttl: Duration) -> Self {
        self.idle_ttl = Some(ttl);
        self
    }

    fn is_expired(&self, state: &SessionState) -> bool {
        match self.idle_ttl {
            Some(ttl) => Utc::now() - state.updated_at > ttl,
            None => false,
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn get(&self, user_id: &str) -> Result<Option<SessionState>, SessionError> {
        if self.idle_ttl.is_none() {
            return Ok(self.sessions.read().await.get(user_id).cloned());
        }

        // A read counts as activity
        let mut sessions = self.sessions.write().await;
        Ok(match sessions.get_mut(user_id) {
            Some(state) if !self.is_expired(state) => {
                state.updated_at = Utc::now();
                Some(state.clone())
            }
            _ => None,
        })
    }

    async fn put(&self, user_id: &str, state: SessionState) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().await;
        if self.idle_ttl.is_some() {
            let before = sessions.len();
            sessions.retain(|_, s| !self.is_expired(s));
            let swept = before - sessions.len();
            if swept > 0 {
                debug!(swept, "Expired idle sessions");
            }
        }
        sessions.insert(user_id.to_string(), state);
        Ok(())
    }

    async fn remove(&self, user_id: &str) -> Result<bool, SessionError> {
        Ok(self.sessions.write().await.remove(user_id).is_some())
    }

    async fn count(&self) -> Result<usize, SessionError> {
        Ok(self.sessions.read().await.len())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        self.sessions.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eatba_core::catalog::{DistrictGroups, MealTime};

    fn state(meal: MealTime) -> SessionState {
        SessionState::new(meal, Arc::new(DistrictGroups::new()))
    }

    #[tokio::test]
    async fn put_and_get() {
        let store = InMemorySessionStore::new();
        assert!(store.get("U1").await.unwrap().is_none());

        store.put("U1", state(MealTime::Lunch)).await.unwrap();
        let got = store.get("U1").await.unwrap().unwrap();
        assert_eq!(got.meal, MealTime::Lunch);
        assert!(store.get("U2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn last_write_wins() {
        let store = InMemorySessionStore::new();
        store.put("U1", state(MealTime::Breakfast)).await.unwrap();
        store.put("U1", state(MealTime::Dinner)).await.unwrap();
        assert_eq!(store.get("U1").await.unwrap().unwrap().meal, MealTime::Dinner);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn remove_and_clear() {
        let store = InMemorySessionStore::new();
        store.put("U1", state(MealTime::Breakfast)).await.unwrap();
        store.put("U2", state(MealTime::Lunch)).await.unwrap();

        assert!(store.remove("U1").await.unwrap());
        assert!(!store.remove("U1").await.unwrap());
        assert_eq!(store.count().await.unwrap(), 1);

        store.clear().await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn idle_sessions_expire() {
        let store = InMemorySessionStore::new().with_idle_ttl(Duration::minutes(30));

        let mut stale = state(MealTime::Lunch);
        stale.updated_at = Utc::now() - Duration::minutes(31);
        store.put("old", stale).await.unwrap();
        assert!(store.get("old").await.unwrap().is_none());

        store.put("fresh", state(MealTime::Dinner)).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 1);
        assert!(store.get("fresh").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn reads_keep_a_session_alive() {
        let store = InMemorySessionStore::new().with_idle_ttl(Duration::minutes(30));

        let mut active = state(MealTime::Lunch);
        active.updated_at = Utc::now() - Duration::minutes(20);
        store.put("U1", active).await.unwrap();

        let read = store.get("U1").await.unwrap().unwrap();
        assert!(Utc::now() - read.updated_at < Duration::minutes(1));

        // The stored copy was refreshed, not just the returned one
        let again = store.get("U1").await.unwrap().unwrap();
        assert!(again.updated_at >= read.updated_at);
        assert_eq!(again.meal, MealTime::Lunch);
    }

    #[tokio::test]
    async fn without_ttl_nothing_expires() {
        let store = InMemorySessionStore::new();
        let mut old = state(MealTime::Lunch);
        old.updated_at = Utc::now() - Duration::days(365);
        store.put("U1", old).await.unwrap();
        assert!(store.get("U1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn concurrent_writers_for_distinct_users() {
        let store = Arc::new(InMemorySessionStore::new());
        let mut handles = Vec::new();
        for i in 0..32 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.put(&format!("U{i}"), state(MealTime::Breakfast)).await.unwrap();
            }));
        }
        for h in handles {
            h.await.unwrap();
        }
        assert_eq!(store.count().await.unwrap(), 32);
    }
}
