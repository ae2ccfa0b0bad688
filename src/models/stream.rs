use serde::{Deserialize, Serialize};

/// A user's stream channel as reported by `/api/streams`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    pub id: i64,
    pub username: String,
    pub live: bool,
    #[serde(default)]
    pub title: Option<String>,
    /// ISO-8601 start time, present while live.
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub viewers: i64,
}

impl Stream {
    /// Title to show, falling back to a placeholder when unset or blank.
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title,
            _ => "Untitled stream",
        }
    }
}
