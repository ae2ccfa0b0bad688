use super::client::GlitchApi;
use crate::error::GlitchResult;
use crate::models::{
    AuthInfo, AuthResponse, EmailUpdateRequest, LoginRequest, PasswordUpdateRequest,
    RegisterRequest,
};

impl GlitchApi {
    pub async fn register(&self, request: &RegisterRequest) -> GlitchResult<AuthResponse> {
        self.post_json("api/auth/register", None, request, "auth response")
            .await
    }

    pub async fn login(&self, request: &LoginRequest) -> GlitchResult<AuthResponse> {
        self.post_json("api/auth/login", None, request, "auth response")
            .await
    }

    pub async fn auth_info(&self, token: &str) -> GlitchResult<AuthInfo> {
        self.get_json("api/auth", Some(token), "account").await
    }

    pub async fn update_password(
        &self,
        token: &str,
        request: &PasswordUpdateRequest,
    ) -> GlitchResult<()> {
        self.post_unit("api/auth/password", Some(token), request)
            .await
    }

    pub async fn update_email(
        &self,
        token: &str,
        request: &EmailUpdateRequest,
    ) -> GlitchResult<AuthInfo> {
        self.post_json("api/auth/email", Some(token), request, "account")
            .await
    }

    pub async fn delete_account(&self, token: &str) -> GlitchResult<()> {
        self.delete_unit("api/auth", Some(token)).await
    }
}
