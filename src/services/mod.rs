//! Outbound collaborators: content providers over HTTP, reminder delivery,
//! and the health sidecar.

pub mod health;
pub mod jokes;
pub mod news;
pub mod reminder;
pub mod trivia;
pub mod weather;
