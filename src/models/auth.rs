use serde::{Deserialize, Serialize};

/// Returned by login and registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub id: i64,
    pub username: String,
    pub token: String,
}

/// Account details from `/api/auth`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthInfo {
    pub id: i64,
    pub username: String,
    pub email: String,
}
