//! Session token codec
//!
//! Token format: `<session uuid>.<base64url(HMAC-SHA256(secret, uuid))>`.
//! The signature lets forged or truncated tokens be rejected without a
//! database round trip.

use kernel::id::SessionId;
use platform::crypto::{sign_token, verify_token};

use crate::error::{AuthError, AuthResult};

/// Issue a signed token for a session
pub fn issue(secret: &[u8; 32], session_id: &SessionId) -> String {
    sign_token(secret, &session_id.to_string())
}

/// Verify the signature and recover the session ID
pub fn parse(secret: &[u8; 32], token: &str) -> AuthResult<SessionId> {
    verify_token(secret, token)
        .and_then(|payload| payload.parse().ok())
        .ok_or(AuthError::SessionInvalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_parse() {
        let secret = [3u8; 32];
        let session_id = SessionId::new();

        let token = issue(&secret, &session_id);
        assert_eq!(parse(&secret, &token).unwrap(), session_id);
    }

    #[test]
    fn test_parse_rejects_tampering() {
        let secret = [3u8; 32];
        let token = issue(&secret, &SessionId::new());

        assert!(parse(&[4u8; 32], &token).is_err());
        assert!(parse(&secret, "not-a-token").is_err());

        let (_, signature) = token.split_once('.').unwrap();
        let forged = format!("{}.{}", SessionId::new(), signature);
        assert!(parse(&secret, &forged).is_err());
    }

    #[test]
    fn test_parse_rejects_signed_non_uuid() {
        let secret = [3u8; 32];
        let token = sign_token(&secret, "not-a-uuid");
        assert!(matches!(parse(&secret, &token), Err(AuthError::SessionInvalid)));
    }
}
