//! # Daily Assistant Bot
//!
//! A Telegram assistant bot offering weather lookups, jokes, news headlines,
//! note-taking, reminders, and mini-games through inline-button menus and
//! free-text conversation flows.
//!
//! ## Features
//! - Current weather and 3-day forecasts for any city or shared location
//! - Random jokes, top news headlines by category, trivia questions
//! - Per-user notes and one-shot reminders ("10m", "2h", "1d", "14:30")
//! - Number guessing, dice, and rock-paper-scissors
//! - All state in process memory; nothing survives a restart

/// Command definitions, dispatch, menus, and the conversation state machine
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// Process-wide state and collaborators handed to handlers
pub mod context;
/// External content providers, reminder delivery, and the health sidecar
pub mod services;
/// In-memory per-user stores
pub mod state;
/// Utility functions for datetime parsing, validation, and logging
pub mod utils;
