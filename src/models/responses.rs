use serde::{Deserialize, Serialize};
use crate::models::domain::{MatchResult, SuggestionResult};

/// Response for the "people you may know" endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeopleResponse {
    pub suggestions: Vec<SuggestionResult>,
    pub total_results: usize,
}

/// Response for the "roles for you" endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolesResponse {
    pub matches: Vec<MatchResult>,
    pub total_results: usize,
}

/// Response for the role candidates endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidatesResponse {
    pub role_id: String,
    pub candidates: Vec<MatchResult>,
    pub total_results: usize,
}

/// Single fuzzy search hit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub item: serde_json::Value,
    pub relevance: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub hits: Vec<SearchHit>,
    pub total_results: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
