//! Error types for the bot core.
//!
//! [`DbotError`] is the top-level error and names every external failure the bot degrades around;
//! [`HandlerError`] is used for handler failures.

use thiserror::Error;

/// Top-level error for dbot.
#[derive(Error, Debug)]
pub enum DbotError {
    /// The generative-text call failed; surfaced to the user as a visible reply.
    #[error("Provider error: {0}")]
    Provider(String),

    /// The moderation log could not be read; classification degrades to "left".
    #[error("Audit log lookup error: {0}")]
    AuditLookup(String),

    /// Outbound delivery failed; logged and dropped.
    #[error("Send error: {0}")]
    Send(String),

    /// The append-only event log could not be written; logged and dropped.
    #[error("Log write error: {0}")]
    LogWrite(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors produced by handlers (no text, invalid command, state, empty content).
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("No text in message")]
    NoText,

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("State error: {0}")]
    State(String),

    #[error("Empty content")]
    EmptyContent,
}

/// Result type for core operations; uses [`DbotError`].
pub type Result<T> = std::result::Result<T, DbotError>;
