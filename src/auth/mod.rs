//! Shared-secret verification for inbound webhooks
//!
//! The platform signs nothing; it simply echoes a static secret in the
//! `x-vapi-secret` header. Comparison is constant-time so the secret cannot
//! be probed byte by byte.

use http::HeaderMap;
use subtle::ConstantTimeEq;

use crate::errors::auth_error::{AuthError, AuthResult};

/// Header carrying the shared webhook secret
pub const WEBHOOK_SECRET_HEADER: &str = "x-vapi-secret";

/// Constant-time string comparison.
pub fn secret_matches(provided: &str, expected: &str) -> bool {
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// Check the secret header against the configured secret.
pub fn verify_webhook_secret(headers: &HeaderMap, expected: &str) -> AuthResult<()> {
    let provided = headers
        .get(WEBHOOK_SECRET_HEADER)
        .ok_or(AuthError::MissingSecret)?
        .to_str()
        .map_err(|_| AuthError::SecretMismatch)?;

    if secret_matches(provided, expected) {
        Ok(())
    } else {
        Err(AuthError::SecretMismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_secret_matches_exact_only() {
        assert!(secret_matches("s3cret", "s3cret"));
        assert!(!secret_matches("s3cret ", "s3cret"));
        assert!(!secret_matches("S3CRET", "s3cret"));
        assert!(!secret_matches("", "s3cret"));
    }

    #[test]
    fn test_verify_missing_header() {
        let headers = HeaderMap::new();
        assert_eq!(
            verify_webhook_secret(&headers, "s3cret"),
            Err(AuthError::MissingSecret)
        );
    }

    #[test]
    fn test_verify_matching_and_mismatching_header() {
        let mut headers = HeaderMap::new();
        headers.insert(WEBHOOK_SECRET_HEADER, HeaderValue::from_static("s3cret"));
        assert_eq!(verify_webhook_secret(&headers, "s3cret"), Ok(()));

        headers.insert(WEBHOOK_SECRET_HEADER, HeaderValue::from_static("wrong"));
        assert_eq!(
            verify_webhook_secret(&headers, "s3cret"),
            Err(AuthError::SecretMismatch)
        );
    }
}
