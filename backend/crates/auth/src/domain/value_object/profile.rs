//! Profile fields collected at sign-up
//!
//! `name` is required; phone number and referral code are optional extras
//! carried on the user record.

use kernel::error::app_error::{AppError, AppResult};

const NAME_MAX_CHARS: usize = 100;
const PHONE_MAX_CHARS: usize = 32;
const REFERRAL_CODE_MAX_CHARS: usize = 64;

/// Display name: trimmed, non-empty, bounded
pub fn display_name(raw: &str) -> AppResult<String> {
    let name = raw.trim();

    if name.is_empty() {
        return Err(AppError::bad_request("Name is required"));
    }
    if name.chars().count() > NAME_MAX_CHARS {
        return Err(AppError::bad_request(format!(
            "Name must be at most {} characters",
            NAME_MAX_CHARS
        )));
    }
    if name.chars().any(char::is_control) {
        return Err(AppError::bad_request("Name contains invalid characters"));
    }

    Ok(name.to_string())
}

/// Phone number: digits with optional leading `+` and common separators.
/// Blank input is treated as absent.
pub fn phone_number(raw: Option<&str>) -> AppResult<Option<String>> {
    let Some(phone) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    let body = phone.strip_prefix('+').unwrap_or(phone);
    let valid = phone.chars().count() <= PHONE_MAX_CHARS
        && body.chars().any(|c| c.is_ascii_digit())
        && body
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')'));

    if !valid {
        return Err(AppError::bad_request("Invalid phone number"));
    }

    Ok(Some(phone.to_string()))
}

/// Referral code: opaque, trimmed, bounded. Blank input is treated as absent.
pub fn referral_code(raw: Option<&str>) -> AppResult<Option<String>> {
    let Some(code) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    if code.chars().count() > REFERRAL_CODE_MAX_CHARS || code.chars().any(char::is_whitespace) {
        return Err(AppError::bad_request("Invalid referral code"));
    }

    Ok(Some(code.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("  Asha  ").unwrap(), "Asha");
        assert!(display_name("   ").is_err());
        assert!(display_name(&"x".repeat(NAME_MAX_CHARS + 1)).is_err());
    }

    #[test]
    fn test_phone_number() {
        assert_eq!(phone_number(None).unwrap(), None);
        assert_eq!(phone_number(Some("  ")).unwrap(), None);
        assert_eq!(
            phone_number(Some("+91 98765-43210")).unwrap(),
            Some("+91 98765-43210".to_string())
        );
        assert!(phone_number(Some("call me")).is_err());
        assert!(phone_number(Some("+")).is_err());
    }

    #[test]
    fn test_referral_code() {
        assert_eq!(referral_code(Some(" ABC123 ")).unwrap(), Some("ABC123".to_string()));
        assert_eq!(referral_code(Some("")).unwrap(), None);
        assert!(referral_code(Some("AB C")).is_err());
    }
}
