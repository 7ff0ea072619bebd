use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::SuggestionAggregator;
use crate::models::{
    CandidatesRequest, CandidatesResponse, ErrorResponse, HealthResponse, PeopleResponse, ProfileId,
    RolesResponse, SuggestionsRequest,
};
use crate::services::{load_role_snapshot, SnapshotSource};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub snapshots: Arc<dyn SnapshotSource>,
    pub aggregator: SuggestionAggregator,
    pub search_threshold: f64,
}

/// Configure all suggestion-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/suggestions/people", web::post().to(people_you_may_know))
        .route("/suggestions/roles", web::post().to(roles_for_you))
        .route("/roles/candidates", web::post().to(role_candidates));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

pub(crate) fn bad_request(error: &str, message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 400,
    })
}

fn snapshot_failed(message: String) -> HttpResponse {
    HttpResponse::BadGateway().json(ErrorResponse {
        error: "Failed to load snapshot".to_string(),
        message,
        status_code: 502,
    })
}

/// People you may know
///
/// POST /api/v1/suggestions/people
///
/// Request body:
/// ```json
/// { "profileId": "string", "limit": 5 }
/// ```
async fn people_you_may_know(
    state: web::Data<AppState>,
    req: web::Json<SuggestionsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }
    let profile_id = match ProfileId::new(req.profile_id.as_str()) {
        Ok(id) => id,
        Err(e) => return bad_request("Invalid profile id", e.to_string()),
    };

    let request_id = uuid::Uuid::new_v4();
    tracing::info!(%request_id, profile_id = %profile_id, "Computing people suggestions");

    let snapshot = match state.snapshots.load_snapshot(&profile_id).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!(%request_id, "Failed to load snapshot for {}: {}", profile_id, e);
            return snapshot_failed(e.to_string());
        }
    };

    let suggestions = state
        .aggregator
        .people_you_may_know(&snapshot, &profile_id, req.limit.map(usize::from));

    HttpResponse::Ok().json(PeopleResponse {
        total_results: suggestions.len(),
        suggestions,
    })
}

/// Roles for you
///
/// POST /api/v1/suggestions/roles
///
/// Request body:
/// ```json
/// { "profileId": "string", "limit": 10 }
/// ```
async fn roles_for_you(
    state: web::Data<AppState>,
    req: web::Json<SuggestionsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }
    let profile_id = match ProfileId::new(req.profile_id.as_str()) {
        Ok(id) => id,
        Err(e) => return bad_request("Invalid profile id", e.to_string()),
    };

    let request_id = uuid::Uuid::new_v4();
    tracing::info!(%request_id, profile_id = %profile_id, "Computing role matches");

    let snapshot = match state.snapshots.load_snapshot(&profile_id).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!(%request_id, "Failed to load snapshot for {}: {}", profile_id, e);
            return snapshot_failed(e.to_string());
        }
    };

    let matches = state
        .aggregator
        .roles_for_you(&snapshot, &profile_id, req.limit.map(usize::from));

    HttpResponse::Ok().json(RolesResponse {
        total_results: matches.len(),
        matches,
    })
}

/// Ranked candidates for a role
///
/// POST /api/v1/roles/candidates
///
/// Request body:
/// ```json
/// { "roleId": "string", "profileId": "string", "limit": 20 }
/// ```
async fn role_candidates(
    state: web::Data<AppState>,
    req: web::Json<CandidatesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }
    let profile_id = match ProfileId::new(req.profile_id.as_str()) {
        Ok(id) => id,
        Err(e) => return bad_request("Invalid profile id", e.to_string()),
    };

    let snapshot = match load_role_snapshot(state.snapshots.as_ref(), &profile_id, &req.role_id).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!("Failed to load snapshot for role {}: {}", req.role_id, e);
            return snapshot_failed(e.to_string());
        }
    };

    let candidates = state
        .aggregator
        .candidates_for_role(&snapshot, &req.role_id, req.limit.map(usize::from));

    HttpResponse::Ok().json(CandidatesResponse {
        role_id: req.role_id.clone(),
        total_results: candidates.len(),
        candidates,
    })
}
