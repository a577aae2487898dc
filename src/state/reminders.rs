use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use teloxide::types::ChatId;
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: u32,
    pub text: String,
    pub fire_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Per-user reminder records, keyed by chat id.
///
/// The record and its firing task are independent: the task claims the
/// record with [`ReminderStore::take`] when it wakes, and finding it gone
/// means the reminder was deleted while pending.
#[derive(Clone, Default)]
pub struct ReminderStore {
    inner: Arc<RwLock<HashMap<ChatId, Vec<Reminder>>>>,
}

impl ReminderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a reminder. Ids are per-user: one more than the current
    /// maximum, so deleting the newest reminder frees its id for reuse.
    pub async fn add(&self, user: ChatId, text: String, fire_at: DateTime<Utc>) -> Reminder {
        let mut guard = self.inner.write().await;
        let list = guard.entry(user).or_default();

        let id = list.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let reminder = Reminder {
            id,
            text,
            fire_at,
            created_at: Utc::now(),
        };
        list.push(reminder.clone());
        reminder
    }

    pub async fn list(&self, user: ChatId) -> Vec<Reminder> {
        self.inner
            .read()
            .await
            .get(&user)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn find(&self, user: ChatId, id: u32) -> Option<Reminder> {
        self.inner
            .read()
            .await
            .get(&user)
            .and_then(|list| list.iter().find(|r| r.id == id).cloned())
    }

    /// Removes a reminder by id; returns whether anything was removed.
    pub async fn remove(&self, user: ChatId, id: u32) -> bool {
        self.take(user, id).await.is_some()
    }

    /// Atomically claims a reminder for delivery. At most one caller gets
    /// the record; everyone else sees `None`.
    pub async fn take(&self, user: ChatId, id: u32) -> Option<Reminder> {
        let mut guard = self.inner.write().await;
        let list = guard.get_mut(&user)?;
        let index = list.iter().position(|r| r.id == id)?;
        Some(list.remove(index))
    }

    /// Total pending reminders across all users, for the health endpoint.
    pub async fn total_pending(&self) -> usize {
        self.inner.read().await.values().map(Vec::len).sum()
    }
}
