use serde::{Deserialize, Serialize};

use super::{deserialize_picture, serialize_picture};

/// Public profile of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub created_at: String,
    #[serde(default)]
    pub bio: Option<String>,
    /// Raw image bytes of the profile picture.
    #[serde(
        default,
        deserialize_with = "deserialize_picture",
        serialize_with = "serialize_picture"
    )]
    pub profile_pic: Option<Vec<u8>>,
    #[serde(default)]
    pub followers_count: i64,
}

impl User {
    pub fn has_profile_picture(&self) -> bool {
        self.profile_pic.as_ref().is_some_and(|bytes| !bytes.is_empty())
    }
}
