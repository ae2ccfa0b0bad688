//! Session and credential errors.

use std::fmt;

use crate::traits::SessionStoreError;

#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    /// An operation needs a bearer token but nobody is signed in.
    NotSignedIn,

    /// Reading or writing the persisted session failed.
    Store(SessionStoreError),
}

impl AuthError {
    /// Whether the user has to log in again to continue.
    pub fn requires_login(&self) -> bool {
        matches!(self, AuthError::NotSignedIn)
    }

    pub fn user_message(&self) -> String {
        match self {
            AuthError::NotSignedIn => "You are not signed in.".to_string(),
            AuthError::Store(err) => format!("Could not access the saved session: {}", err),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::NotSignedIn => "E_AUTH_MISSING",
            AuthError::Store(_) => "E_AUTH_STORE",
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::NotSignedIn => write!(f, "Not signed in"),
            AuthError::Store(err) => write!(f, "Session store error: {}", err),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<SessionStoreError> for AuthError {
    fn from(err: SessionStoreError) -> Self {
        AuthError::Store(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_signed_in() {
        let err = AuthError::NotSignedIn;
        assert!(err.requires_login());
        assert_eq!(err.error_code(), "E_AUTH_MISSING");
        assert_eq!(err.to_string(), "Not signed in");
    }

    #[test]
    fn test_store_error_wraps() {
        let err: AuthError = SessionStoreError::Io("disk full".to_string()).into();
        assert!(!err.requires_login());
        assert!(err.user_message().contains("disk full"));
    }
}
