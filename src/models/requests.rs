use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request for "people you may know" or "roles for you"
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SuggestionsRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "profile_id", rename = "profileId")]
    pub profile_id: String,
    #[validate(range(min = 1, max = 100))]
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request for ranked candidates of one role
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CandidatesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "role_id", rename = "roleId")]
    pub role_id: String,
    /// Caller whose snapshot is used to resolve the role's project
    #[validate(length(min = 1))]
    #[serde(alias = "profile_id", rename = "profileId")]
    pub profile_id: String,
    #[validate(range(min = 1, max = 100))]
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Weighted field for fuzzy search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchField {
    pub field: String,
    pub weight: f64,
}

/// Fuzzy search over an already-fetched collection
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchRequest {
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
    #[serde(default)]
    pub fields: Vec<SearchField>,
    #[serde(default)]
    pub query: String,
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(default)]
    pub threshold: Option<f64>,
}
