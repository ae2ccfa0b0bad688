//! Pass-through from view state holders to the API client.
//!
//! Every call reads the bearer token from the [`SessionContext`] at the
//! moment it is made. Nothing is cached or retried here.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info};

use crate::api::GlitchApi;
use crate::error::{classify_io_error, AuthError, GlitchResult};
use crate::models::{
    AuthInfo, AuthResponse, EmailUpdateRequest, Follow, LoginRequest, PasswordUpdateRequest,
    RegisterRequest, Stream, UpdateStreamRequest, UpdateUserRequest, User,
};
use crate::session::SessionContext;

/// Prefix of exported CSV files.
pub const EXPORT_FILE_PREFIX: &str = "glitch_export_";

#[derive(Debug, Clone)]
pub struct Repository {
    api: GlitchApi,
    session: SessionContext,
}

impl Repository {
    pub fn new(api: GlitchApi, session: SessionContext) -> Self {
        Self { api, session }
    }

    pub fn api(&self) -> &GlitchApi {
        &self.api
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    fn token(&self) -> GlitchResult<String> {
        Ok(self.session.token().ok_or(AuthError::NotSignedIn)?)
    }

    // Auth

    pub async fn register(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> GlitchResult<AuthResponse> {
        self.api
            .register(&RegisterRequest {
                username: username.to_string(),
                password: password.to_string(),
                email: email.to_string(),
            })
            .await
    }

    pub async fn login(&self, username: &str, password: &str) -> GlitchResult<AuthResponse> {
        self.api
            .login(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .await
    }

    pub async fn auth_info(&self) -> GlitchResult<AuthInfo> {
        self.api.auth_info(&self.token()?).await
    }

    pub async fn update_password(&self, old: &str, new: &str) -> GlitchResult<()> {
        let request = PasswordUpdateRequest {
            old: old.to_string(),
            new_password: new.to_string(),
        };
        self.api.update_password(&self.token()?, &request).await
    }

    pub async fn update_email(&self, email: &str) -> GlitchResult<AuthInfo> {
        let request = EmailUpdateRequest {
            email: email.to_string(),
        };
        self.api.update_email(&self.token()?, &request).await
    }

    pub async fn delete_account(&self) -> GlitchResult<()> {
        self.api.delete_account(&self.token()?).await
    }

    // Users

    pub async fn current_user(&self) -> GlitchResult<User> {
        self.api.current_user(&self.token()?).await
    }

    pub async fn user_by_name(&self, username: &str) -> GlitchResult<User> {
        self.api
            .user_by_name(username, self.session.token().as_deref())
            .await
    }

    pub async fn search_users(&self, query: &str) -> GlitchResult<Vec<User>> {
        self.api
            .search_users(query, self.session.token().as_deref())
            .await
    }

    pub async fn update_bio(&self, bio: &str) -> GlitchResult<User> {
        let request = UpdateUserRequest {
            bio: bio.to_string(),
        };
        self.api.update_user(&self.token()?, &request).await
    }

    /// Upload the image at `path` as the profile picture.
    pub async fn upload_profile_picture(&self, path: &Path) -> GlitchResult<User> {
        let token = self.token()?;
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| classify_io_error(&e, path, "read"))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "picture".to_string());

        debug!(file = %file_name, size = bytes.len(), "Uploading profile picture");
        self.api
            .upload_profile_picture(&token, &file_name, image_mime_type(path), bytes)
            .await
    }

    // Streams

    pub async fn current_stream(&self) -> GlitchResult<Stream> {
        self.api.current_stream(&self.token()?).await
    }

    pub async fn live_streams(&self) -> GlitchResult<Vec<Stream>> {
        self.api.live_streams(self.session.token().as_deref()).await
    }

    pub async fn stream_by_name(&self, username: &str) -> GlitchResult<Stream> {
        self.api
            .stream_by_name(username, self.session.token().as_deref())
            .await
    }

    pub async fn update_stream_title(&self, title: &str) -> GlitchResult<Stream> {
        let request = UpdateStreamRequest {
            title: title.to_string(),
        };
        self.api.update_stream(&self.token()?, &request).await
    }

    // Follows

    pub async fn follows(&self) -> GlitchResult<Vec<Follow>> {
        self.api.follows(&self.token()?).await
    }

    pub async fn is_following(&self, user_id: i64) -> GlitchResult<bool> {
        let edge = self.api.check_follow(&self.token()?, user_id).await?;
        Ok(edge.is_some())
    }

    pub async fn follower_count(&self, user_id: i64) -> GlitchResult<i64> {
        self.api
            .follower_count(user_id, self.session.token().as_deref())
            .await
    }

    pub async fn live_follows(&self) -> GlitchResult<Vec<Follow>> {
        self.api.live_follows(&self.token()?).await
    }

    pub async fn follow(&self, user_id: i64) -> GlitchResult<Follow> {
        self.api.create_follow(&self.token()?, user_id).await
    }

    pub async fn unfollow(&self, user_id: i64) -> GlitchResult<()> {
        self.api.delete_follow(&self.token()?, user_id).await
    }

    // VODs

    /// Download the VOD CSV export into `dir` and return the file written.
    pub async fn export_vods_to(&self, dir: &Path) -> GlitchResult<PathBuf> {
        let csv = self.api.export_vods(&self.token()?).await?;

        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| classify_io_error(&e, dir, "create"))?;
        let file_name = format!(
            "{}{}.csv",
            EXPORT_FILE_PREFIX,
            Utc::now().format("%Y%m%d_%H%M%S")
        );
        let path = dir.join(file_name);
        tokio::fs::write(&path, &csv)
            .await
            .map_err(|e| classify_io_error(&e, &path, "write"))?;

        info!(path = %path.display(), bytes = csv.len(), "VOD export written");
        Ok(path)
    }
}

fn image_mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/*",
    }
}
