use thiserror::Error;

/// User-correctable input problems. Surfaced to the caller for display;
/// the rejected operation leaves all state unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Task name cannot be empty.")]
    EmptyTaskName,

    /// A survey scale answer that does not parse as an integer in 1-10.
    /// `question` is the question number shown on the survey screen.
    #[error("Question {question} must be a number from 1 to 10.")]
    ScaleOutOfRange { question: u8 },

    #[error("Email and password cannot be empty.")]
    EmptyCredentials,

    #[error("Password must be at least 6 characters.")]
    PasswordTooShort,

    #[error("Please enter your email.")]
    EmptyEmail,
}

/// Failures from the identity provider plus the email-verification gate.
/// Wraps [`ValidationError`] so auth callers match a single error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Please verify your email before logging in.")]
    EmailNotVerified,

    #[error("No current user. Please register again.")]
    NoCurrentUser,

    /// Error message reported by the external provider
    #[error("{0}")]
    Provider(String),
}
