use tracing::{error, info, warn};

/// Logs a handled command with consistent format
pub fn log_command(command: &str, user: &str, user_id: i64) {
    info!("CMD: {} by {}({})", command, user, user_id);
}

/// Logs a handled callback button press with consistent format
pub fn log_callback(tag: &str, user: &str, user_id: i64) {
    info!("CALLBACK: '{}' by {}({})", tag, user, user_id);
}

/// Logs an external provider failure with consistent format
pub fn log_provider_error(provider: &str, error: &str) {
    error!("PROVIDER_ERROR: {} - {}", provider, error);
}

/// Logs a dropped message (rate limit, malformed input) with consistent format
pub fn log_dropped(reason: &str, user_id: i64) {
    warn!("DROPPED: {} - user {}", reason, user_id);
}

/// Logs system lifecycle events with consistent format
pub fn log_system_event(event: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("SYSTEM: {} - {}", event, d),
        None => info!("SYSTEM: {}", event),
    }
}
