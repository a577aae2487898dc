use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use teloxide::types::ChatId;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn label(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "Celsius",
            TemperatureUnit::Fahrenheit => "Fahrenheit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: u32,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// One user's settings and notes. Created lazily on first access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub temperature_unit: TemperatureUnit,
    pub notifications: bool,
    pub theme: Theme,
    pub notes: Vec<Note>,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            temperature_unit: TemperatureUnit::Celsius,
            notifications: true,
            theme: Theme::Light,
            notes: Vec::new(),
        }
    }
}

/// Per-user preference and note records, keyed by chat id.
#[derive(Clone, Default)]
pub struct PreferenceStore {
    inner: Arc<RwLock<HashMap<ChatId, UserPreferences>>>,
}

impl PreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the user's record, creating it with defaults on first touch.
    pub async fn get(&self, user: ChatId) -> UserPreferences {
        self.inner.write().await.entry(user).or_default().clone()
    }

    pub async fn set_temperature_unit(&self, user: ChatId, unit: TemperatureUnit) {
        self.inner.write().await.entry(user).or_default().temperature_unit = unit;
    }

    pub async fn set_notifications(&self, user: ChatId, enabled: bool) {
        self.inner.write().await.entry(user).or_default().notifications = enabled;
    }

    pub async fn set_theme(&self, user: ChatId, theme: Theme) {
        self.inner.write().await.entry(user).or_default().theme = theme;
    }

    /// Appends a note. Ids are per-user: one more than the current maximum,
    /// so deleting the newest note frees its id for reuse.
    pub async fn add_note(&self, user: ChatId, title: String, content: String) -> Note {
        let mut guard = self.inner.write().await;
        let prefs = guard.entry(user).or_default();

        let id = prefs.notes.iter().map(|n| n.id).max().unwrap_or(0) + 1;
        let note = Note {
            id,
            title,
            content,
            created_at: Utc::now(),
        };
        prefs.notes.push(note.clone());
        note
    }

    pub async fn notes(&self, user: ChatId) -> Vec<Note> {
        self.inner.write().await.entry(user).or_default().notes.clone()
    }

    pub async fn find_note(&self, user: ChatId, id: u32) -> Option<Note> {
        self.inner
            .read()
            .await
            .get(&user)
            .and_then(|p| p.notes.iter().find(|n| n.id == id).cloned())
    }

    /// Removes a note by id; returns whether anything was removed.
    pub async fn delete_note(&self, user: ChatId, id: u32) -> bool {
        let mut guard = self.inner.write().await;
        match guard.get_mut(&user) {
            Some(prefs) => {
                let before = prefs.notes.len();
                prefs.notes.retain(|n| n.id != id);
                prefs.notes.len() < before
            }
            None => false,
        }
    }

    /// Case-insensitive substring search over titles and contents.
    pub async fn search_notes(&self, user: ChatId, keyword: &str) -> Vec<Note> {
        let keyword = keyword.to_lowercase();
        self.inner
            .read()
            .await
            .get(&user)
            .map(|p| {
                p.notes
                    .iter()
                    .filter(|n| {
                        n.title.to_lowercase().contains(&keyword)
                            || n.content.to_lowercase().contains(&keyword)
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of users with a record, for the health endpoint.
    pub async fn user_count(&self) -> usize {
        self.inner.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_access_yields_defaults() {
        let store = PreferenceStore::new();
        let prefs = store.get(ChatId(1)).await;

        assert_eq!(prefs.temperature_unit, TemperatureUnit::Celsius);
        assert!(prefs.notifications);
        assert_eq!(prefs.theme, Theme::Light);
        assert!(prefs.notes.is_empty());
    }

    #[tokio::test]
    async fn test_note_ids_are_sequential() {
        let store = PreferenceStore::new();
        let user = ChatId(1);

        for i in 1..=3u32 {
            let note = store
                .add_note(user, format!("title {i}"), "content".into())
                .await;
            assert_eq!(note.id, i);
        }
    }

    #[tokio::test]
    async fn test_deleting_max_id_frees_it_for_reuse() {
        let store = PreferenceStore::new();
        let user = ChatId(1);

        store.add_note(user, "a".into(), "1".into()).await;
        store.add_note(user, "b".into(), "2".into()).await;
        store.add_note(user, "c".into(), "3".into()).await;

        assert!(store.delete_note(user, 3).await);

        let note = store.add_note(user, "d".into(), "4".into()).await;
        assert_eq!(note.id, 3);
    }

    #[tokio::test]
    async fn test_deleting_middle_id_does_not_shift_others() {
        let store = PreferenceStore::new();
        let user = ChatId(1);

        store.add_note(user, "a".into(), "1".into()).await;
        store.add_note(user, "b".into(), "2".into()).await;
        store.add_note(user, "c".into(), "3".into()).await;

        assert!(store.delete_note(user, 2).await);

        // Max is still 3, so the next id is 4.
        let note = store.add_note(user, "d".into(), "4".into()).await;
        assert_eq!(note.id, 4);
    }

    #[tokio::test]
    async fn test_setting_unit_leaves_other_fields_alone() {
        let store = PreferenceStore::new();
        let user = ChatId(1);

        store.add_note(user, "keep me".into(), "x".into()).await;
        store.set_temperature_unit(user, TemperatureUnit::Fahrenheit).await;

        let prefs = store.get(user).await;
        assert_eq!(prefs.temperature_unit, TemperatureUnit::Fahrenheit);
        assert!(prefs.notifications);
        assert_eq!(prefs.theme, Theme::Light);
        assert_eq!(prefs.notes.len(), 1);
    }

    #[tokio::test]
    async fn test_search_matches_title_and_content_case_insensitively() {
        let store = PreferenceStore::new();
        let user = ChatId(1);

        store.add_note(user, "Groceries".into(), "milk, eggs".into()).await;
        store.add_note(user, "Work".into(), "ship the Release".into()).await;

        assert_eq!(store.search_notes(user, "groceries").await.len(), 1);
        assert_eq!(store.search_notes(user, "RELEASE").await.len(), 1);
        assert!(store.search_notes(user, "absent").await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_note_is_a_noop() {
        let store = PreferenceStore::new();
        assert!(!store.delete_note(ChatId(1), 7).await);
    }
}
