use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::{search_with_scores, WeightedField};
use crate::models::{SearchHit, SearchRequest, SearchResponse};
use crate::routes::suggestions::{bad_request, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/search", web::post().to(search));
}

/// Fuzzy search over a caller-supplied collection
///
/// POST /api/v1/search
///
/// Request body:
/// ```json
/// {
///   "items": [{ "name": "Jean Dujardin" }],
///   "fields": [{ "field": "name", "weight": 2 }],
///   "query": "jean dujardan",
///   "threshold": 0.4
/// }
/// ```
///
/// A blank query echoes `items` back in their original order.
async fn search(state: web::Data<AppState>, req: web::Json<SearchRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    let SearchRequest { items, fields, query, threshold } = req.into_inner();
    let fields: Vec<WeightedField> = fields
        .into_iter()
        .map(|f| WeightedField::new(f.field, f.weight))
        .collect();
    let threshold = threshold.unwrap_or(state.search_threshold);

    let ranked = search_with_scores(&items, &fields, &query, threshold);
    tracing::debug!(items = items.len(), hits = ranked.len(), "Search ranked");

    let mut slots: Vec<Option<serde_json::Value>> = items.into_iter().map(Some).collect();
    let hits: Vec<SearchHit> = ranked
        .into_iter()
        .filter_map(|(index, relevance)| {
            slots[index].take().map(|item| SearchHit { item, relevance })
        })
        .collect();

    HttpResponse::Ok().json(SearchResponse {
        total_results: hits.len(),
        hits,
    })
}
