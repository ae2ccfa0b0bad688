use serde::{Deserialize, Serialize};

use super::{Stream, User};

/// A directed follow edge from one user to another.
///
/// The server may denormalize the followed user and their stream into the
/// edge (`/api/follows/live` does).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Follow {
    pub id: i64,
    pub from: i64,
    pub to: i64,
    pub followed_at: String,
    #[serde(default)]
    pub to_user: Option<User>,
    #[serde(default)]
    pub to_stream: Option<Stream>,
}

impl Follow {
    /// Username of the followed channel, from the denormalized stream or user.
    pub fn target_username(&self) -> Option<&str> {
        self.to_stream
            .as_ref()
            .map(|s| s.username.as_str())
            .or_else(|| self.to_user.as_ref().map(|u| u.username.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_minimal() {
        let json = r#"{"id":5,"from":1,"to":2,"followedAt":"2024-03-01T12:00:00Z"}"#;
        let follow: Follow = serde_json::from_str(json).unwrap();
        assert_eq!(follow.from, 1);
        assert_eq!(follow.to, 2);
        assert!(follow.to_user.is_none());
        assert!(follow.target_username().is_none());
    }

    #[test]
    fn test_follow_with_stream() {
        let json = r#"{
            "id":5,"from":1,"to":2,"followedAt":"2024-03-01T12:00:00Z",
            "toUser":null,
            "toStream":{"id":9,"username":"bob","live":true,"title":"t","startedAt":null,"viewers":3}
        }"#;
        let follow: Follow = serde_json::from_str(json).unwrap();
        assert_eq!(follow.target_username(), Some("bob"));
        assert_eq!(follow.to_stream.unwrap().viewers, 3);
    }

    #[test]
    fn test_follow_target_falls_back_to_user() {
        let json = r#"{
            "id":5,"from":1,"to":2,"followedAt":"2024-03-01T12:00:00Z",
            "toUser":{"id":2,"username":"carol","createdAt":"2024-01-01"}
        }"#;
        let follow: Follow = serde_json::from_str(json).unwrap();
        assert_eq!(follow.target_username(), Some("carol"));
    }
}
