//! Session trait: per-user memory of the selected meal time.
//!
//! When a user picks a meal-time category the bot remembers the choice
//! together with that category's district groups, so the following
//! district selection can be answered. The store is injected into the bot
//! rather than living in a global.

use crate::catalog::{DistrictGroups, MealTime};
use crate::error::SessionError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// What the bot remembers about one user.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// The most recently selected meal time
    pub meal: MealTime,

    /// The catalog partition for `meal`
    pub districts: Arc<DistrictGroups>,

    /// Last time the session was written or, with an idle TTL, read
    pub updated_at: DateTime<Utc>,
}

impl SessionState {
    pub fn new(meal: MealTime, districts: Arc<DistrictGroups>) -> Self {
        Self {
            meal,
            districts,
            updated_at: Utc::now(),
        }
    }
}

/// The core SessionStore trait.
///
/// Implementations: in-memory (default). Writes for one user are
/// last-write-wins; no ordering is required across users.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// The store name (e.g., "in_memory").
    fn name(&self) -> &str;

    /// Fetch the session of a user.
    async fn get(&self, user_id: &str) -> std::result::Result<Option<SessionState>, SessionError>;

    /// Store (or overwrite) the session of a user.
    async fn put(&self, user_id: &str, state: SessionState)
    -> std::result::Result<(), SessionError>;

    /// Forget a user. Returns whether a session existed.
    async fn remove(&self, user_id: &str) -> std::result::Result<bool, SessionError>;

    /// Number of stored sessions.
    async fn count(&self) -> std::result::Result<usize, SessionError>;

    /// Drop all sessions.
    async fn clear(&self) -> std::result::Result<(), SessionError>;
}
