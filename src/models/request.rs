use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Password change. The server reads the new password from `_new`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordUpdateRequest {
    pub old: String,
    #[serde(rename = "_new")]
    pub new_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailUpdateRequest {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub bio: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStreamRequest {
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowRequest {
    pub to: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_update_field_names() {
        let req = PasswordUpdateRequest {
            old: "a".to_string(),
            new_password: "b".to_string(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"old": "a", "_new": "b"}));
    }

    #[test]
    fn test_follow_request_shape() {
        let json = serde_json::to_string(&FollowRequest { to: 42 }).unwrap();
        assert_eq!(json, r#"{"to":42}"#);
    }
}
