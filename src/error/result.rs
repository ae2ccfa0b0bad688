use super::glitch_error::GlitchError;

/// Result alias for every fallible client operation.
pub type GlitchResult<T> = Result<T, GlitchError>;

/// Prefix an error's user message with the action that failed.
///
/// View state holders report failures as `"Failed to load stream: <reason>"`.
pub trait DescribeFailure {
    fn describe(&self, action: &str) -> String;
}

impl DescribeFailure for GlitchError {
    fn describe(&self, action: &str) -> String {
        format!("{}: {}", action, self.user_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    #[test]
    fn test_describe_prefixes_action() {
        let err: GlitchError = ApiError::from_response(404, r#"{"message":"No such user"}"#).into();
        assert_eq!(
            err.describe("Failed to load user"),
            "Failed to load user: No such user"
        );
    }
}
