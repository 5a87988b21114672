use axum::http::{header::AUTHORIZATION, HeaderMap};

use crate::error::{auth::AuthError, AppError};

/// Guards mutating admin API endpoints behind the configured bearer token.
pub struct TokenGuard<'a> {
    expected: Option<&'a str>,
    headers: &'a HeaderMap,
}

impl<'a> TokenGuard<'a> {
    /// Creates a new TokenGuard.
    ///
    /// # Arguments
    /// - `expected` - Configured admin API token, `None` disables the guarded endpoints
    /// - `headers` - Headers of the incoming request
    pub fn new(expected: Option<&'a str>, headers: &'a HeaderMap) -> Self {
        Self { expected, headers }
    }

    /// Checks the request's `Authorization: Bearer` header.
    ///
    /// # Returns
    /// - `Ok(())` - The token matches
    /// - `Err(AuthError::AdminApiDisabled)` - No token is configured
    /// - `Err(AuthError::MissingToken)` - No bearer token was sent
    /// - `Err(AuthError::InvalidToken)` - The token does not match
    pub fn require(&self) -> Result<(), AppError> {
        let Some(expected) = self.expected else {
            return Err(AuthError::AdminApiDisabled.into());
        };

        let Some(provided) = self
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
        else {
            return Err(AuthError::MissingToken.into());
        };

        if !tokens_match(provided, expected) {
            return Err(AuthError::InvalidToken.into());
        }

        Ok(())
    }
}

/// Compares tokens without stopping at the first differing byte.
///
/// Only the length comparison returns early.
fn tokens_match(provided: &str, expected: &str) -> bool {
    let (provided, expected) = (provided.as_bytes(), expected.as_bytes());
    if provided.len() != expected.len() {
        return false;
    }

    provided
        .iter()
        .zip(expected)
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}
