use super::client::{GlitchApi, Method};
use crate::error::{ApiError, GlitchError, GlitchResult};
use crate::models::{Follow, FollowRequest};

impl GlitchApi {
    pub async fn follows(&self, token: &str) -> GlitchResult<Vec<Follow>> {
        self.get_json("api/follows", Some(token), "follow list")
            .await
    }

    /// The follow edge from the signed-in user to `to`, if there is one.
    ///
    /// A 404 or an empty 2xx body both mean "not following".
    pub async fn check_follow(&self, token: &str, to: i64) -> GlitchResult<Option<Follow>> {
        let path = format!("api/follows/{}", to);
        let response = self.send_raw(Method::Get, &path, Some(token), None).await?;

        if response.status == 404 {
            return Ok(None);
        }
        if !response.is_success() {
            return Err(GlitchError::Api(ApiError::from_response(
                response.status,
                &response.text_lossy(),
            )));
        }
        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        Self::decode::<Option<Follow>>(&response, "follow")
    }

    pub async fn follower_count(&self, user_id: i64, token: Option<&str>) -> GlitchResult<i64> {
        let path = format!("api/follows/count/{}", user_id);
        self.get_json(&path, token, "follower count").await
    }

    /// Follows whose target is live right now.
    pub async fn live_follows(&self, token: &str) -> GlitchResult<Vec<Follow>> {
        self.get_json("api/follows/live", Some(token), "follow list")
            .await
    }

    pub async fn create_follow(&self, token: &str, to: i64) -> GlitchResult<Follow> {
        self.post_json("api/follows/create", Some(token), &FollowRequest { to }, "follow")
            .await
    }

    pub async fn delete_follow(&self, token: &str, to: i64) -> GlitchResult<()> {
        self.post_unit("api/follows/delete", Some(token), &FollowRequest { to })
            .await
    }
}
