use super::client::{segment, GlitchApi};
use crate::error::GlitchResult;
use crate::models::{UpdateUserRequest, User};
use crate::traits::FilePart;

/// Multipart field the server reads the picture from.
pub const PROFILE_PIC_FIELD: &str = "profilePic";

impl GlitchApi {
    pub async fn current_user(&self, token: &str) -> GlitchResult<User> {
        self.get_json("api/users", Some(token), "user").await
    }

    pub async fn user_by_name(&self, username: &str, token: Option<&str>) -> GlitchResult<User> {
        let path = format!("api/users/{}", segment(username));
        self.get_json(&path, token, "user").await
    }

    pub async fn search_users(&self, query: &str, token: Option<&str>) -> GlitchResult<Vec<User>> {
        let path = format!("api/users/search/{}", segment(query));
        self.get_json(&path, token, "user list").await
    }

    pub async fn update_user(&self, token: &str, request: &UpdateUserRequest) -> GlitchResult<User> {
        self.post_json("api/users/update", Some(token), request, "user")
            .await
    }

    pub async fn upload_profile_picture(
        &self,
        token: &str,
        file_name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> GlitchResult<User> {
        let part = FilePart::new(PROFILE_PIC_FIELD, file_name, mime_type, bytes);
        self.post_file("api/users/upload", Some(token), part, "user")
            .await
    }
}
