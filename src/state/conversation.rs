use std::collections::HashMap;
use std::sync::Arc;

use teloxide::types::ChatId;
use tokio::sync::RwLock;

/// What a city name typed after a weather prompt is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CityPurpose {
    /// Current conditions plus forecast (the "Search City" button).
    Current,
    /// Explicit forecast request (the "Weather Forecast" button).
    Forecast,
}

/// Per-user marker for a pending free-text reply.
///
/// Absence from the store means idle. A new marker overwrites whatever was
/// there; flows never stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationState {
    AwaitingCity(CityPurpose),
    AwaitingNoteTitle,
    AwaitingNoteContent { title: String },
    AwaitingNoteId,
    AwaitingNoteDeleteId,
    AwaitingNoteSearch,
    AwaitingReminderText,
    AwaitingReminderTime { text: String },
    AwaitingReminderDeleteId,
    PlayingNumberGuess { target: u32, attempts: u32 },
}

/// Outcome of one number-guess input against the current game state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Non-integer or out-of-range input; attempts unchanged.
    Invalid,
    /// Guess below the target: hint "higher".
    TooLow,
    /// Guess above the target: hint "lower".
    TooHigh,
    /// Guessed it; carries the attempt count including this guess.
    Correct { attempts: u32 },
}

/// Evaluates one guess. `attempts` is the count before this input.
pub fn evaluate_guess(target: u32, attempts: u32, input: &str) -> GuessOutcome {
    match crate::utils::validation::parse_guess(input) {
        None => GuessOutcome::Invalid,
        Some(guess) if guess < target => GuessOutcome::TooLow,
        Some(guess) if guess > target => GuessOutcome::TooHigh,
        Some(_) => GuessOutcome::Correct {
            attempts: attempts + 1,
        },
    }
}

/// Map of user to pending-input marker.
#[derive(Clone, Default)]
pub struct ConversationStore {
    inner: Arc<RwLock<HashMap<ChatId, ConversationState>>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the user's state unconditionally.
    pub async fn set(&self, user: ChatId, state: ConversationState) {
        self.inner.write().await.insert(user, state);
    }

    pub async fn get(&self, user: ChatId) -> Option<ConversationState> {
        self.inner.read().await.get(&user).cloned()
    }

    /// Returns the user to idle.
    pub async fn clear(&self, user: ChatId) {
        self.inner.write().await.remove(&user);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_state_overwrites_prior() {
        let store = ConversationStore::new();
        let user = ChatId(1);

        store.set(user, ConversationState::AwaitingNoteTitle).await;
        store.set(user, ConversationState::AwaitingReminderText).await;

        assert_eq!(
            store.get(user).await,
            Some(ConversationState::AwaitingReminderText)
        );
    }

    #[tokio::test]
    async fn test_clear_returns_to_idle() {
        let store = ConversationStore::new();
        let user = ChatId(2);

        store
            .set(user, ConversationState::AwaitingCity(CityPurpose::Current))
            .await;
        store.clear(user).await;

        assert_eq!(store.get(user).await, None);
    }

    #[tokio::test]
    async fn test_states_are_per_user() {
        let store = ConversationStore::new();

        store.set(ChatId(1), ConversationState::AwaitingNoteTitle).await;

        assert_eq!(store.get(ChatId(2)).await, None);
    }

    #[test]
    fn test_evaluate_guess_hints() {
        assert_eq!(evaluate_guess(42, 0, "50"), GuessOutcome::TooHigh);
        assert_eq!(evaluate_guess(42, 0, "30"), GuessOutcome::TooLow);
        assert_eq!(
            evaluate_guess(42, 2, "42"),
            GuessOutcome::Correct { attempts: 3 }
        );
    }

    #[test]
    fn test_evaluate_guess_invalid_input() {
        assert_eq!(evaluate_guess(42, 0, "abc"), GuessOutcome::Invalid);
        assert_eq!(evaluate_guess(42, 0, "0"), GuessOutcome::Invalid);
        assert_eq!(evaluate_guess(42, 0, "101"), GuessOutcome::Invalid);
    }
}
