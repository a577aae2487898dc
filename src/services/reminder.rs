use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::ChatId;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::state::reminders::{Reminder, ReminderStore};

/// Delivery seam for fired reminders, so the scheduler can run against a
/// recording sink in tests.
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    async fn deliver(&self, user: ChatId, text: &str) -> Result<()>;
}

#[async_trait]
impl Notifier for Bot {
    async fn deliver(&self, user: ChatId, text: &str) -> Result<()> {
        self.send_message(user, format!("⏰ REMINDER\n\n📝 {text}\n\n⌚ Time's up!"))
            .reply_markup(crate::bot::menus::reminder_fired_keyboard())
            .await?;
        Ok(())
    }
}

/// Spawns one sleep-then-deliver task per reminder and keeps an abort
/// handle per (user, id) so explicit deletion can cancel the timer.
///
/// The timer also re-checks the store when it wakes: whichever side loses
/// the delete/fire race, the record is claimed exactly once and a deleted
/// reminder is never delivered.
#[derive(Clone)]
pub struct ReminderScheduler {
    notifier: Arc<dyn Notifier>,
    store: ReminderStore,
    timers: Arc<Mutex<HashMap<(ChatId, u32), JoinHandle<()>>>>,
}

impl ReminderScheduler {
    pub fn new(notifier: Arc<dyn Notifier>, store: ReminderStore) -> Self {
        Self {
            notifier,
            store,
            timers: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Schedules the firing task. `delay` is fixed at creation time and is
    /// not re-evaluated while sleeping.
    pub async fn schedule(&self, user: ChatId, reminder: &Reminder, delay: Duration) {
        let notifier = self.notifier.clone();
        let store = self.store.clone();
        let timers = self.timers.clone();
        let id = reminder.id;

        // Holding the timers lock across the spawn keeps the task's own
        // cleanup from running before its handle is registered.
        let mut guard = self.timers.lock().await;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            match store.take(user, id).await {
                Some(reminder) => match notifier.deliver(user, &reminder.text).await {
                    Ok(()) => {
                        tracing::info!("Reminder {} delivered to {}", id, user);
                    }
                    Err(e) => {
                        // Known gap: the record is already gone, so a failed
                        // delivery loses the reminder. No retry.
                        tracing::error!("Failed to deliver reminder {} to {}: {}", id, user, e);
                    }
                },
                None => {
                    tracing::debug!("Reminder {} for {} deleted before firing, skipping", id, user);
                }
            }

            timers.lock().await.remove(&(user, id));
        });
        guard.insert((user, id), handle);
    }

    /// Deletes a reminder: removes the store record and aborts the pending
    /// timer. Returns whether a record existed.
    pub async fn cancel(&self, user: ChatId, id: u32) -> bool {
        let removed = self.store.remove(user, id).await;
        if let Some(handle) = self.timers.lock().await.remove(&(user, id)) {
            handle.abort();
        }
        removed
    }

    /// Number of timers still pending, for the health endpoint.
    pub async fn pending_timers(&self) -> usize {
        self.timers.lock().await.len()
    }
}
