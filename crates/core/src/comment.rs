//! Comment validation.

use crate::error::CoreError;

/// Maximum length of a commenter nickname in characters.
pub const MAX_NICKNAME_LENGTH: usize = 255;

/// Maximum length of a comment body in characters.
pub const MAX_COMMENT_LENGTH: usize = 5_000;

/// Validate a nickname and return it trimmed.
pub fn validate_nickname(nickname: &str) -> Result<&str, CoreError> {
    let trimmed = nickname.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Nickname is required".to_string()));
    }
    if trimmed.chars().count() > MAX_NICKNAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Nickname exceeds maximum length of {MAX_NICKNAME_LENGTH} characters"
        )));
    }
    Ok(trimmed)
}

/// Validate a comment body and return it trimmed.
pub fn validate_content(content: &str) -> Result<&str, CoreError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Comment content cannot be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_COMMENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Comment content exceeds maximum length of {MAX_COMMENT_LENGTH} characters"
        )));
    }
    Ok(trimmed)
}
