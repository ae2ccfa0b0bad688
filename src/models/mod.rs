//! Wire data model for the Glitch REST and chat APIs.
//!
//! Field names follow the server's camelCase JSON.

mod auth;
mod chat;
mod follow;
mod request;
mod stream;
mod user;

pub use auth::{AuthInfo, AuthResponse};
pub use chat::ChatMessage;
pub use follow::Follow;
pub use request::{
    EmailUpdateRequest, FollowRequest, LoginRequest, PasswordUpdateRequest, RegisterRequest,
    UpdateStreamRequest, UpdateUserRequest,
};
pub use stream::Stream;
pub use user::User;

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserializer, Serializer};

/// Deserialize an optional profile picture.
///
/// Accepts a base64 string, an array of byte values (signed or unsigned),
/// `null`, or a missing field.
pub(crate) fn deserialize_picture<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct PictureVisitor;

    impl<'de> Visitor<'de> for PictureVisitor {
        type Value = Option<Vec<u8>>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a base64 string, an array of bytes, or null")
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(self)
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if value.is_empty() {
                return Ok(None);
            }
            STANDARD.decode(value).map(Some).map_err(E::custom)
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(value) = seq.next_element::<i16>()? {
                if !(-128..=255).contains(&value) {
                    return Err(de::Error::custom(format!("byte out of range: {}", value)));
                }
                bytes.push(value.rem_euclid(256) as u8);
            }
            Ok(Some(bytes))
        }
    }

    deserializer.deserialize_option(PictureVisitor)
}

/// Serialize a profile picture as a base64 string.
pub(crate) fn serialize_picture<S>(picture: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match picture {
        Some(bytes) => serializer.serialize_str(&STANDARD.encode(bytes)),
        None => serializer.serialize_none(),
    }
}
