//! Unified error type for the Glitch client.

use std::fmt;

use super::api::ApiError;
use super::auth::AuthError;
use super::category::ErrorCategory;
use super::chat::ChatError;
use super::network::NetworkError;
use super::system::SystemError;
use crate::traits::SessionStoreError;

#[derive(Debug)]
pub enum GlitchError {
    /// The request never got a response.
    Network(NetworkError),

    /// The server answered with a non-2xx status.
    Api(ApiError),

    /// A response or chat frame could not be decoded.
    Decode { target: String, message: String },

    Auth(AuthError),

    Chat(ChatError),

    System(SystemError),
}

impl GlitchError {
    pub fn decode(target: impl Into<String>, err: impl fmt::Display) -> Self {
        GlitchError::Decode {
            target: target.into(),
            message: err.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            GlitchError::Network(_) => ErrorCategory::Network,
            GlitchError::Api(err) if err.is_unauthorized() => ErrorCategory::Auth,
            GlitchError::Api(err) if err.is_server_error() => ErrorCategory::Server,
            GlitchError::Api(_) => ErrorCategory::User,
            GlitchError::Decode { .. } => ErrorCategory::Client,
            GlitchError::Auth(err) => {
                if err.requires_login() {
                    ErrorCategory::Auth
                } else {
                    ErrorCategory::System
                }
            }
            GlitchError::Chat(ChatError::MissingCredential) => ErrorCategory::Auth,
            GlitchError::Chat(ChatError::InvalidPayload(_)) => ErrorCategory::Client,
            GlitchError::Chat(_) => ErrorCategory::Network,
            GlitchError::System(_) => ErrorCategory::System,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }

    /// Message suitable for an error slot on screen.
    pub fn user_message(&self) -> String {
        match self {
            GlitchError::Network(err) => err.user_message(),
            GlitchError::Api(err) => err.user_message(),
            GlitchError::Decode { target, .. } => format!("Unexpected {} from server", target),
            GlitchError::Auth(err) => err.user_message(),
            GlitchError::Chat(err) => err.user_message(),
            GlitchError::System(err) => err.user_message(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            GlitchError::Network(err) => err.error_code(),
            GlitchError::Api(err) => err.error_code(),
            GlitchError::Decode { .. } => "E_DECODE",
            GlitchError::Auth(err) => err.error_code(),
            GlitchError::Chat(err) => err.error_code(),
            GlitchError::System(err) => err.error_code(),
        }
    }

    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }

    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            GlitchError::Api(err) => Some(err.status),
            _ => None,
        }
    }
}

impl fmt::Display for GlitchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlitchError::Network(err) => write!(f, "{}", err),
            GlitchError::Api(err) => write!(f, "{}", err),
            GlitchError::Decode { target, message } => {
                write!(f, "Failed to decode {}: {}", target, message)
            }
            GlitchError::Auth(err) => write!(f, "{}", err),
            GlitchError::Chat(err) => write!(f, "{}", err),
            GlitchError::System(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for GlitchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GlitchError::Network(err) => Some(err),
            GlitchError::Api(err) => Some(err),
            GlitchError::Decode { .. } => None,
            GlitchError::Auth(err) => Some(err),
            GlitchError::Chat(err) => Some(err),
            GlitchError::System(err) => Some(err),
        }
    }
}

impl From<NetworkError> for GlitchError {
    fn from(err: NetworkError) -> Self {
        GlitchError::Network(err)
    }
}

impl From<ApiError> for GlitchError {
    fn from(err: ApiError) -> Self {
        GlitchError::Api(err)
    }
}

impl From<AuthError> for GlitchError {
    fn from(err: AuthError) -> Self {
        GlitchError::Auth(err)
    }
}

impl From<SessionStoreError> for GlitchError {
    fn from(err: SessionStoreError) -> Self {
        GlitchError::Auth(AuthError::Store(err))
    }
}

impl From<ChatError> for GlitchError {
    fn from(err: ChatError) -> Self {
        GlitchError::Chat(err)
    }
}

impl From<SystemError> for GlitchError {
    fn from(err: SystemError) -> Self {
        GlitchError::System(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_categories() {
        let unauthorized: GlitchError = ApiError::from_response(401, "").into();
        assert_eq!(unauthorized.category(), ErrorCategory::Auth);

        let server: GlitchError = ApiError::from_response(503, "").into();
        assert_eq!(server.category(), ErrorCategory::Server);
        assert!(server.is_retryable());

        let conflict: GlitchError = ApiError::from_response(409, "taken").into();
        assert_eq!(conflict.category(), ErrorCategory::User);
        assert_eq!(conflict.status(), Some(409));
    }

    #[test]
    fn test_user_message_passes_server_text() {
        let err: GlitchError =
            ApiError::from_response(400, r#"{"message":"Title too long"}"#).into();
        assert_eq!(err.user_message(), "Title too long");
    }

    #[test]
    fn test_decode_error() {
        let err = GlitchError::decode("stream", "missing field `username`");
        assert_eq!(err.category(), ErrorCategory::Client);
        assert_eq!(err.error_code(), "E_DECODE");
        assert_eq!(err.to_string(), "Failed to decode stream: missing field `username`");
    }

    #[test]
    fn test_chat_categories() {
        let missing: GlitchError = ChatError::MissingCredential.into();
        assert_eq!(missing.category(), ErrorCategory::Auth);

        let lost: GlitchError = ChatError::RetriesExhausted { attempts: 3 }.into();
        assert_eq!(lost.category(), ErrorCategory::Network);
    }

    #[test]
    fn test_source_chain() {
        use std::error::Error;
        let err: GlitchError = AuthError::NotSignedIn.into();
        assert!(err.source().is_some());
    }
}
