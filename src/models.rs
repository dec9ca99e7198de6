use crate::config::Config;
use crate::search::MediaWikiClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub search: MediaWikiClient,
}

/// One matched item from an upstream, passed through as the upstream emitted
/// it. Unknown fields (categorysnippet, pageid, ...) ride along in `extra`
/// so the relay stays transparent to upstream additions.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchResult {
    pub title: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub titlesnippet: String,
    /// 0 or 1 entries; attached during normalization, empty when the
    /// upstream had no page-level image info for this title.
    #[serde(default)]
    pub imageinfo: Vec<ImageInfo>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ImageInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumburl: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Relay output: one ordered result list per upstream. Both keys are always
/// present and always lists; a failed or empty upstream is `[]`, never null.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ComparisonResponse {
    pub left: Vec<SearchResult>,
    pub right: Vec<SearchResult>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub upstreams: Vec<String>,
}
