use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use teloxide::types::ChatId;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// Bot-wide gate on non-command free text: one last-message instant per
/// user, nothing per-feature. Commands and button presses are never gated.
#[derive(Clone)]
pub struct RateLimiter {
    min_interval: Duration,
    last_seen: Arc<RwLock<HashMap<ChatId, Instant>>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_seen: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns whether this message is allowed through, updating the user's
    /// timestamp when it is. A gated message does not push the window out.
    pub async fn allow(&self, user: ChatId) -> bool {
        let now = Instant::now();
        let mut guard = self.last_seen.write().await;

        if let Some(last) = guard.get(&user) {
            if now.duration_since(*last) < self.min_interval {
                return false;
            }
        }
        guard.insert(user, now);
        true
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}
