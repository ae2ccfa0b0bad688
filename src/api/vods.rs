use bytes::Bytes;

use super::client::GlitchApi;
use crate::error::GlitchResult;

impl GlitchApi {
    /// CSV export of the signed-in user's past broadcasts.
    pub async fn export_vods(&self, token: &str) -> GlitchResult<Bytes> {
        self.get_bytes("api/vods/export", Some(token)).await
    }
}
