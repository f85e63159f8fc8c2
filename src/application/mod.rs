// src/application/mod.rs
//
// Application layer
//
// ARCHITECTURE:
// - Sits above services; owns process wiring and what the user sees
// - Turns errors into static messages and dates into display text
// - Never touches SQL or HTTP directly

pub mod dates;
pub mod messages;
pub mod state;

pub use dates::format_release_date;
pub use messages::{ToUserMessage, UserMessage};
pub use state::AppState;
