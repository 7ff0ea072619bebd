use crate::models::{
    ApplicationEdge, BlockEdge, ConnectionEdge, GraphSnapshot, ParticipationEdge, Profile, ProfileId,
    Project, Role,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with Appwrite
#[derive(Debug, Error)]
pub enum AppwriteError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key or token")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Default number of documents fetched per collection
const DEFAULT_PAGE_SIZE: usize = 500;

/// Appwrite API client
///
/// Reads the collections a graph snapshot is assembled from:
/// - Profiles
/// - Connections and blocks touching the caller
/// - Participations, open roles, projects and applications
pub struct AppwriteClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    collections: AppwriteCollections,
    page_size: usize,
}

/// Collection IDs in Appwrite
#[derive(Debug, Clone)]
pub struct AppwriteCollections {
    pub profiles: String,
    pub connections: String,
    pub blocks: String,
    pub participations: String,
    pub roles: String,
    pub projects: String,
    pub applications: String,
}

impl AppwriteClient {
    /// Create a new Appwrite client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collections: AppwriteCollections,
    ) -> Result<Self, AppwriteError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
            collections,
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Override how many documents are requested per collection
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Fetch everything needed to compute suggestions for `profile_id`
    ///
    /// The reads are independent, so they are issued concurrently and joined
    /// before anything is computed. Any failed read fails the whole snapshot.
    pub async fn fetch_snapshot(&self, profile_id: &ProfileId) -> Result<GraphSnapshot, AppwriteError> {
        let c = &self.collections;
        let me = profile_id.as_str();

        let (profiles, outgoing, incoming, blocking, blocked_by, participations, roles, projects, applications) = tokio::try_join!(
            self.list_documents::<Profile>(&c.profiles, vec![]),
            self.list_documents::<ConnectionEdge>(&c.connections, vec![equal("requesterId", me)]),
            self.list_documents::<ConnectionEdge>(&c.connections, vec![equal("receiverId", me)]),
            self.list_documents::<BlockEdge>(&c.blocks, vec![equal("blockerId", me)]),
            self.list_documents::<BlockEdge>(&c.blocks, vec![equal("blockedId", me)]),
            self.list_documents::<ParticipationEdge>(&c.participations, vec![]),
            self.list_documents::<Role>(&c.roles, vec![equal("assignmentState", "open")]),
            self.list_documents::<Project>(&c.projects, vec![]),
            self.list_documents::<ApplicationEdge>(&c.applications, vec![]),
        )?;

        let mut connections = outgoing;
        for edge in incoming {
            if !connections.contains(&edge) {
                connections.push(edge);
            }
        }
        let mut blocks = blocking;
        for edge in blocked_by {
            if !blocks.contains(&edge) {
                blocks.push(edge);
            }
        }

        tracing::debug!(
            profile_id = %profile_id,
            profiles = profiles.len(),
            connections = connections.len(),
            blocks = blocks.len(),
            participations = participations.len(),
            roles = roles.len(),
            "Fetched snapshot from Appwrite"
        );

        Ok(GraphSnapshot {
            taken_at: chrono::Utc::now(),
            profiles,
            connections,
            blocks,
            participations,
            roles,
            projects,
            applications,
        }
        .with_derived_counts())
    }

    /// List every document of a collection
    ///
    /// Pages are requested with `limit`/`offset` until the reported `total`
    /// is reached or a short page comes back. Documents that do not
    /// deserialize are skipped rather than failing the whole list.
    async fn list_documents<T: DeserializeOwned>(
        &self,
        collection: &str,
        queries: Vec<String>,
    ) -> Result<Vec<T>, AppwriteError> {
        let mut documents: Vec<Value> = Vec::new();
        let mut total = None;

        loop {
            let (page, page_total) = self.fetch_page(collection, &queries, documents.len()).await?;
            let fetched = page.len();
            documents.extend(page);
            total = page_total.or(total);

            let complete = total.is_some_and(|t| documents.len() >= t);
            if complete || fetched < self.page_size {
                break;
            }
        }

        if let Some(total) = total.filter(|&t| t > documents.len()) {
            tracing::warn!(
                "Collection {} reported {} documents but only {} were returned",
                collection,
                total,
                documents.len()
            );
        }

        let parsed: Vec<T> = documents
            .iter()
            .filter_map(|doc| {
                // Extract data from Appwrite document format
                let data = doc.get("data").unwrap_or(doc);
                match serde_json::from_value(data.clone()) {
                    Ok(value) => Some(value),
                    Err(e) => {
                        tracing::debug!("Skipping malformed document in {}: {}", collection, e);
                        None
                    }
                }
            })
            .collect();

        if parsed.len() < documents.len() {
            tracing::warn!(
                "Skipped {} malformed documents in {}",
                documents.len() - parsed.len(),
                collection
            );
        }

        Ok(parsed)
    }

    /// One page of raw documents plus the collection total, when reported
    async fn fetch_page(
        &self,
        collection: &str,
        queries: &[String],
        offset: usize,
    ) -> Result<(Vec<Value>, Option<usize>), AppwriteError> {
        let mut queries = queries.to_vec();
        queries.push(format!("limit({})", self.page_size));
        queries.push(format!("offset({})", offset));

        let queries_json = serde_json::to_string(&queries)
            .map_err(|e| AppwriteError::InvalidResponse(format!("Failed to encode queries: {}", e)))?;
        let encoded_queries = urlencoding::encode(&queries_json);

        let url = format!(
            "{}/databases/{}/collections/{}/documents?query={}",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            collection,
            encoded_queries
        );

        tracing::debug!("Listing documents from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        match response.status().as_u16() {
            200..=299 => {}
            401 | 403 => return Err(AppwriteError::Unauthorized),
            404 => return Err(AppwriteError::NotFound(format!("Collection {}", collection))),
            status => {
                return Err(AppwriteError::ApiError(format!(
                    "Failed to list {}: {}",
                    collection, status
                )))
            }
        }

        let mut json: Value = response.json().await?;
        let total = json.get("total").and_then(Value::as_u64).map(|t| t as usize);

        match json.get_mut("documents").map(Value::take) {
            Some(Value::Array(documents)) => Ok((documents, total)),
            _ => Err(AppwriteError::InvalidResponse("Missing documents array".into())),
        }
    }
}

/// `equal` query; the value is JSON-encoded so quotes in ids stay escaped
fn equal(attribute: &str, value: &str) -> String {
    format!("equal(\"{}\", {})", attribute, Value::from(value))
}
