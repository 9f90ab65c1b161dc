//! Validation rules for user registration input

use thiserror::Error;

/// Errors produced while validating user fields
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserValidationError {
    #[error("Email must not be empty")]
    EmptyEmail,

    #[error("Email '{0}' is not a valid address")]
    MalformedEmail(String),

    #[error("Display name must be between 1 and 100 characters")]
    InvalidName,

    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),

    #[error("User ID must be a non-empty string of at most 64 characters")]
    InvalidUserId,
}

const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_USER_ID_LENGTH: usize = 64;

/// Validate an email address
///
/// A deliberately loose check: one '@' with non-empty local and domain
/// parts, and a dot in the domain. Uniqueness is enforced by the repository.
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if email.is_empty() {
        return Err(UserValidationError::EmptyEmail);
    }

    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();

    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(UserValidationError::MalformedEmail(email.to_string()));
    }

    Ok(())
}

/// Validate a display name
pub fn validate_name(name: &str) -> Result<(), UserValidationError> {
    let trimmed = name.trim();

    if trimmed.is_empty() || trimmed.len() > 100 {
        return Err(UserValidationError::InvalidName);
    }

    Ok(())
}

/// Validate a plaintext password before hashing
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }

    Ok(())
}

/// Validate a user identifier
pub fn validate_user_id(id: &str) -> Result<(), UserValidationError> {
    if id.is_empty() || id.len() > MAX_USER_ID_LENGTH {
        return Err(UserValidationError::InvalidUserId);
    }

    Ok(())
}
