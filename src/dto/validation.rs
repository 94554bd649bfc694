//! Validation helpers for DTOs.

use validator::ValidationError;

/// Validates that a username is 3 to 32 characters of letters, digits,
/// underscores, or hyphens.
///
/// # Examples
///
/// ```ignore
/// validate_username("taras_01")  // Ok
/// validate_username("ab")        // Err - too short
/// validate_username("bad name")  // Err - space
/// ```
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let length = username.chars().count();
    if !(3..=32).contains(&length) {
        let mut err = ValidationError::new("username_length");
        err.message =
            Some(format!("Username must be 3 to 32 characters (got {length})").into());
        return Err(err);
    }

    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    {
        let mut err = ValidationError::new("username_format");
        err.message =
            Some("Username may contain only letters, digits, underscores, and hyphens".into());
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username_valid() {
        assert!(validate_username("taras").is_ok());
        assert!(validate_username("player-one_99").is_ok());
        assert!(validate_username("abc").is_ok());
    }

    #[test]
    fn test_validate_username_invalid_length() {
        assert!(validate_username("ab").is_err()); // too short
        assert!(validate_username(&"x".repeat(33)).is_err()); // too long
        assert!(validate_username("").is_err()); // empty
    }

    #[test]
    fn test_validate_username_invalid_format() {
        assert!(validate_username("bad name").is_err()); // space
        assert!(validate_username("nope!").is_err()); // punctuation
        assert!(validate_username("a@b.com").is_err()); // looks like an email
    }
}
