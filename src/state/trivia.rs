use std::collections::HashMap;
use std::sync::Arc;

use teloxide::types::ChatId;
use tokio::sync::RwLock;

/// Pending trivia answers and running scores, keyed by chat id.
///
/// Each user has at most one pending correct answer; issuing a new question
/// replaces it, and answering consumes it whether or not the answer was
/// right.
#[derive(Clone, Default)]
pub struct TriviaStore {
    answers: Arc<RwLock<HashMap<ChatId, String>>>,
    scores: Arc<RwLock<HashMap<ChatId, u32>>>,
}

impl TriviaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_pending(&self, user: ChatId, correct_answer: String) {
        self.answers.write().await.insert(user, correct_answer);
    }

    /// Consumes the pending answer, if any.
    pub async fn take_pending(&self, user: ChatId) -> Option<String> {
        self.answers.write().await.remove(&user)
    }

    /// Increments the user's score and returns the new value.
    pub async fn record_correct(&self, user: ChatId) -> u32 {
        let mut scores = self.scores.write().await;
        let score = scores.entry(user).or_insert(0);
        *score += 1;
        *score
    }

    pub async fn score(&self, user: ChatId) -> u32 {
        self.scores.read().await.get(&user).copied().unwrap_or(0)
    }
}
