use clementine_core::EmailError;

/// Errors returned by sign-in and registration.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum AuthError {
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("name is required")]
    NameRequired,
}
