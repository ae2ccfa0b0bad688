use super::client::{segment, GlitchApi};
use crate::error::GlitchResult;
use crate::models::{Stream, UpdateStreamRequest};

impl GlitchApi {
    /// The signed-in user's own stream.
    pub async fn current_stream(&self, token: &str) -> GlitchResult<Stream> {
        self.get_json("api/streams", Some(token), "stream").await
    }

    pub async fn live_streams(&self, token: Option<&str>) -> GlitchResult<Vec<Stream>> {
        self.get_json("api/streams/live", token, "stream list")
            .await
    }

    pub async fn stream_by_name(&self, username: &str, token: Option<&str>) -> GlitchResult<Stream> {
        let path = format!("api/streams/{}", segment(username));
        self.get_json(&path, token, "stream").await
    }

    /// Returns the stream as stored by the server.
    pub async fn update_stream(
        &self,
        token: &str,
        request: &UpdateStreamRequest,
    ) -> GlitchResult<Stream> {
        self.post_json("api/streams/update", Some(token), request, "stream")
            .await
    }
}
