use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use crate::state::{PreferenceStore, ReminderStore};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub uptime_seconds: u64,
    pub tracked_users: usize,
    pub pending_reminders: usize,
}

#[derive(Clone)]
struct AppState {
    preferences: PreferenceStore,
    reminders: ReminderStore,
    start_time: DateTime<Utc>,
}

/// Small HTTP sidecar reporting process status; runs alongside the bot
/// dispatcher.
pub struct HealthService {
    pub router: Router,
}

impl HealthService {
    pub fn new(preferences: PreferenceStore, reminders: ReminderStore) -> Self {
        let state = AppState {
            preferences,
            reminders,
            start_time: Utc::now(),
        };

        let router = Router::new()
            .route("/health", get(health_check))
            .route("/health/live", get(liveness_check))
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        Self { router }
    }
}

async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, StatusCode> {
    let uptime = Utc::now()
        .signed_duration_since(state.start_time)
        .num_seconds()
        .max(0) as u64;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime,
        tracked_users: state.preferences.user_count().await,
        pending_reminders: state.reminders.total_pending().await,
    }))
}

async fn liveness_check() -> Json<&'static str> {
    // If this endpoint responds, the process is alive.
    Json("alive")
}
