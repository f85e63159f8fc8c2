// src/application/messages.rs
//
// User-facing failure messages
//
// ARCHITECTURE:
// - Every AppError maps to exactly one static message
// - Raw error text is logged, never shown
// - Malformed catalog data reads the same as "nothing found"

use serde::Serialize;
use std::fmt;

use crate::error::{AppError, AppResult};

/// Failure categories shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UserMessage {
    /// Transport failure or a bad status from the catalog
    NoInternet,

    /// No catalog API key configured
    NoApiKey,

    /// Nothing to show, including unreadable catalog responses
    NoResults,

    /// The favorites store could not complete the operation
    StorageFailure,
}

impl UserMessage {
    pub fn from_error(error: &AppError) -> Self {
        let message = match error {
            AppError::Http(_) | AppError::HttpStatus(_) => UserMessage::NoInternet,

            AppError::MissingApiKey => UserMessage::NoApiKey,

            AppError::Serialization(_) | AppError::NotFound | AppError::Other(_) => {
                UserMessage::NoResults
            }

            AppError::Database(_)
            | AppError::Pool(_)
            | AppError::Domain(_)
            | AppError::Io(_)
            | AppError::UnknownUri(_)
            | AppError::UnsupportedRoute(_)
            | AppError::InsertFailed(_)
            | AppError::UnknownColumn(_) => UserMessage::StorageFailure,
        };

        match message {
            UserMessage::NoResults | UserMessage::NoApiKey => log::warn!("{}", error),
            _ => log::error!("{}", error),
        }
        message
    }

    pub fn text(&self) -> &'static str {
        match self {
            UserMessage::NoInternet => {
                "Unable to reach the movie catalog. Check your internet connection and try again."
            }
            UserMessage::NoApiKey => {
                "No movie catalog API key is configured. Set TMDB_API_KEY or add api_key to the configuration file."
            }
            UserMessage::NoResults => "No movies found.",
            UserMessage::StorageFailure => "Your favorites could not be updated. Please try again.",
        }
    }
}

impl fmt::Display for UserMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl From<&AppError> for UserMessage {
    fn from(error: &AppError) -> Self {
        UserMessage::from_error(error)
    }
}

/// Convert a result's error into its user message
pub trait ToUserMessage<T> {
    fn to_user_message(self) -> Result<T, UserMessage>;
}

impl<T> ToUserMessage<T> for AppResult<T> {
    fn to_user_message(self) -> Result<T, UserMessage> {
        self.map_err(|e| UserMessage::from_error(&e))
    }
}
