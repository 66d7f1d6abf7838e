//! Quiz and session error types.
//!
//! Every failure the core can report is a variant here. None of them end a
//! session: the presentation layer shows the message and returns the user
//! to the menu they came from.

use thiserror::Error;

/// Errors produced by the course registry, account store, and sessions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// No student account exists for this username.
    #[error("user '{0}' is not registered")]
    NotRegistered(String),

    /// The account exists but the password did not match.
    #[error("wrong password for user '{0}'")]
    BadPassword(String),

    /// The administrator id/password pair did not match.
    #[error("invalid administrator credentials")]
    BadCredential,

    /// No course is registered under this code.
    #[error("invalid course code: {0}")]
    InvalidCode(String),

    /// The course has no questions to attempt.
    #[error("no MCQs available for course {0}")]
    EmptyBank(String),

    /// Account lookup for a username that was never registered.
    #[error("account not found: {0}")]
    NotFound(String),

    /// A question was given without any options.
    #[error("question has no options")]
    EmptyOptions,

    /// The answer letter does not index one of the options.
    #[error("answer '{answer}' does not match any of {option_count} option(s)")]
    AnswerOutOfRange { answer: char, option_count: usize },
}
